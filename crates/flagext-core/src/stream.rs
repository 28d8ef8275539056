//! File-or-standard-stream selection.
//!
//! `-` is the universal sentinel for "use the standard stream instead of a
//! named file". Everything else is tilde-expanded and opened. The result is a
//! single [`Stream`] type whose [`Ownership`] decides what closing it means:
//! owned files are released, shared process streams are only flushed.

use std::fs::{File, Metadata, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::paths::expand_user_path;
use crate::source::SourceKind;
use crate::{Error, Result};

/// The value that selects a standard stream.
pub const STDIO_SENTINEL: &str = "-";

/// Permission bits for files created by [`open_output`].
#[cfg(unix)]
pub const OUTPUT_MODE: u32 = 0o600;

/// Who is responsible for the lifecycle of a [`Stream`]'s endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// Opened on the caller's behalf; closing releases it.
    Owned,
    /// A process-wide standard stream; closing never releases it.
    Shared,
}

#[derive(Debug, Clone)]
enum Endpoint {
    File(Arc<File>),
    Stdin,
    Stdout,
}

/// An open input or output resolved from a flag value.
///
/// Clones share the underlying open file description, including its offset.
#[derive(Debug, Clone)]
pub struct Stream {
    endpoint: Option<Endpoint>,
    name: PathBuf,
    kind: SourceKind,
    ownership: Ownership,
}

impl Stream {
    fn file(file: File, path: PathBuf) -> Self {
        Self {
            endpoint: Some(Endpoint::File(Arc::new(file))),
            name: path,
            kind: SourceKind::FilePath,
            ownership: Ownership::Owned,
        }
    }

    /// The process's standard input.
    pub fn stdin() -> Self {
        Self {
            endpoint: Some(Endpoint::Stdin),
            name: PathBuf::from("/dev/stdin"),
            kind: SourceKind::Stdin,
            ownership: Ownership::Shared,
        }
    }

    /// The process's standard output.
    pub fn stdout() -> Self {
        Self {
            endpoint: Some(Endpoint::Stdout),
            name: PathBuf::from("/dev/stdout"),
            kind: SourceKind::Stdout,
            ownership: Ownership::Shared,
        }
    }

    /// Path the stream was opened from (tilde-expanded), or `/dev/stdin`,
    /// `/dev/stdout` for the standard streams.
    pub fn name(&self) -> &Path {
        &self.name
    }

    /// Whether closing releases the endpoint.
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// True for the process standard streams.
    pub fn is_std(&self) -> bool {
        self.ownership == Ownership::Shared
    }

    /// What the stream is connected to.
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// True once [`Stream::close`] has released an owned endpoint.
    pub fn is_closed(&self) -> bool {
        self.endpoint.is_none()
    }

    /// Metadata of the open handle.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the handle cannot be `stat`ed or has been closed.
    pub fn metadata(&self) -> Result<Metadata> {
        match &self.endpoint {
            Some(Endpoint::File(file)) => Ok(file.metadata()?),
            Some(Endpoint::Stdin) => Ok(std_metadata(&io::stdin())?),
            Some(Endpoint::Stdout) => Ok(std_metadata(&io::stdout())?),
            None => Err(closed().into()),
        }
    }

    /// Flush and, for owned streams, release the endpoint.
    ///
    /// Shared streams stay usable afterwards: the process's stdin/stdout are
    /// never closed through a `Stream`. Closing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the flush error, if any. The endpoint is released regardless.
    pub fn close(&mut self) -> io::Result<()> {
        let flushed = self.flush_endpoint();
        if self.ownership == Ownership::Owned && self.endpoint.take().is_some() {
            debug!("closed {}", self.name.display());
        }
        flushed
    }

    fn flush_endpoint(&self) -> io::Result<()> {
        match &self.endpoint {
            Some(Endpoint::File(file)) => (&**file).flush(),
            Some(Endpoint::Stdout) => io::stdout().flush(),
            Some(Endpoint::Stdin) | None => Ok(()),
        }
    }
}

#[cfg(unix)]
fn std_metadata(stream: &impl std::os::fd::AsFd) -> io::Result<Metadata> {
    // A duplicate descriptor: dropping it leaves the process stream open.
    let fd = stream.as_fd().try_clone_to_owned()?;
    File::from(fd).metadata()
}

#[cfg(not(unix))]
fn std_metadata<T>(_stream: &T) -> io::Result<Metadata> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "metadata of standard streams is not available on this platform",
    ))
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "stream is closed")
}

impl Read for Stream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &self.endpoint {
            Some(Endpoint::File(file)) => (&**file).read(buf),
            Some(Endpoint::Stdin) => io::stdin().read(buf),
            Some(Endpoint::Stdout) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "standard output is not readable",
            )),
            None => Err(closed()),
        }
    }
}

impl Write for Stream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.endpoint {
            Some(Endpoint::File(file)) => (&**file).write(buf),
            Some(Endpoint::Stdout) => io::stdout().write(buf),
            Some(Endpoint::Stdin) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "standard input is not writable",
            )),
            None => Err(closed()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_endpoint()
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Open `path` (tilde-expanded) for reading.
///
/// `-` has no special meaning here.
///
/// # Errors
///
/// [`Error::EmptyValue`] for an empty path, [`Error::FileOpen`] if the file
/// cannot be opened.
pub fn open_input(path: &str) -> Result<Stream> {
    if path.is_empty() {
        return Err(Error::EmptyValue);
    }
    let path = expand_user_path(path);
    debug!("opening {} for reading", path.display());
    let file = File::open(&path).map_err(|e| Error::file_open(e, &path))?;
    Ok(Stream::file(file, path))
}

/// Open `path` (tilde-expanded) for writing, creating it if absent and
/// truncating it otherwise. New files get mode `0600` on Unix.
///
/// `-` has no special meaning here.
///
/// # Errors
///
/// [`Error::EmptyValue`] for an empty path, [`Error::FileOpen`] if the file
/// cannot be opened.
pub fn open_output(path: &str) -> Result<Stream> {
    if path.is_empty() {
        return Err(Error::EmptyValue);
    }
    let path = expand_user_path(path);
    debug!("opening {} for writing", path.display());

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(OUTPUT_MODE);
    }

    let file = options.open(&path).map_err(|e| Error::file_open(e, &path))?;
    Ok(Stream::file(file, path))
}

/// Standard input for `-`, otherwise [`open_input`].
pub fn resolve_input(value: &str) -> Result<Stream> {
    match value {
        STDIO_SENTINEL => Ok(Stream::stdin()),
        _ => open_input(value),
    }
}

/// Standard output for `-`, otherwise [`open_output`].
pub fn resolve_output(value: &str) -> Result<Stream> {
    match value {
        STDIO_SENTINEL => Ok(Stream::stdout()),
        _ => open_output(value),
    }
}
