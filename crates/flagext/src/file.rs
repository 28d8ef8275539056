//! Flags that hold an open file or standard stream.
//!
//! All four types wrap the same [`Stream`]; they differ only in how the raw
//! value is opened:
//!
//! | type           | `-` means      | otherwise                              |
//! |----------------|----------------|----------------------------------------|
//! | [`InputFile`]  | a file named - | open for reading                       |
//! | [`OutputFile`] | a file named - | create/truncate for writing, mode 0600 |
//! | [`FileOrStdin`]  | stdin        | open for reading                       |
//! | [`FileOrStdout`] | stdout       | create/truncate for writing, mode 0600 |
//!
//! Paths are tilde-expanded. Closing a flag backed by stdin/stdout flushes
//! it but never closes the process stream.

use std::io::{self, Read, Write};
use std::ops::{Deref, DerefMut};

use flagext_core::stream::{self, STDIO_SENTINEL, Stream};
use flagext_core::Result;

use crate::value::{FlagValue, value_parser_factory};

/// Canonical string for a stream-backed flag: `-` for standard streams,
/// otherwise the opened path once the handle is confirmed to still be valid.
fn stringify_stream(stream: &Stream) -> Result<String> {
    if stream.is_std() {
        return Ok(STDIO_SENTINEL.to_string());
    }
    stream.metadata()?;
    Ok(stream.name().to_string_lossy().into_owned())
}

macro_rules! stream_flag {
    ($(#[$meta:meta])* $name:ident => $open:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            stream: Stream,
        }

        impl $name {
            /// Unwrap into the underlying stream.
            pub fn into_stream(self) -> Stream {
                self.stream
            }
        }

        impl Deref for $name {
            type Target = Stream;

            fn deref(&self) -> &Stream {
                &self.stream
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Stream {
                &mut self.stream
            }
        }

        impl FlagValue for $name {
            fn parse_flag(value: &str) -> Result<Self> {
                $open(value).map(|stream| Self { stream })
            }

            fn stringify(&self) -> Result<String> {
                stringify_stream(&self.stream)
            }
        }

        value_parser_factory!($name);
    };
}

macro_rules! impl_read {
    ($($name:ident),+) => {
        $(
            impl Read for $name {
                fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                    self.stream.read(buf)
                }
            }
        )+
    };
}

macro_rules! impl_write {
    ($($name:ident),+) => {
        $(
            impl Write for $name {
                fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                    self.stream.write(buf)
                }

                fn flush(&mut self) -> io::Result<()> {
                    self.stream.flush()
                }
            }
        )+
    };
}

stream_flag! {
    /// A file opened for reading. `-` is an ordinary file name.
    InputFile => stream::open_input
}

stream_flag! {
    /// A file opened for writing: created if absent, truncated otherwise,
    /// new files with mode `0600`. `-` is an ordinary file name.
    OutputFile => stream::open_output
}

stream_flag! {
    /// A file opened for reading, or standard input for `-`.
    ///
    /// Pair with `default_value = "-"` to read stdin when the flag is omitted.
    FileOrStdin => stream::resolve_input
}

stream_flag! {
    /// A file opened for writing, or standard output for `-`.
    ///
    /// Pair with `default_value = "-"` to write stdout when the flag is
    /// omitted. Files are created with mode `0600` and truncated.
    FileOrStdout => stream::resolve_output
}

impl_read!(InputFile, FileOrStdin);
impl_write!(OutputFile, FileOrStdout);

impl Default for FileOrStdin {
    fn default() -> Self {
        Self {
            stream: Stream::stdin(),
        }
    }
}

impl Default for FileOrStdout {
    fn default() -> Self {
        Self {
            stream: Stream::stdout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagext_core::{Error, SourceKind};
    use std::fs;
    use tempfile::TempDir;

    // ------------------------------------------------------------------------
    // InputFile / OutputFile
    // ------------------------------------------------------------------------

    #[test]
    fn test_input_file_reads_and_stringifies() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("input.txt");
        fs::write(&path, "line one\n").unwrap();

        let mut input = InputFile::parse_flag(path.to_str().unwrap()).unwrap();
        assert_eq!(input.stringify().unwrap(), path.to_str().unwrap());

        let mut content = String::new();
        input.read_to_string(&mut content).unwrap();
        assert_eq!(content, "line one\n");
    }

    #[test]
    fn test_input_file_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.txt");
        let err = InputFile::parse_flag(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, Error::FileOpen { .. }));
    }

    #[test]
    fn test_input_file_empty() {
        assert!(matches!(
            InputFile::parse_flag("").unwrap_err(),
            Error::EmptyValue
        ));
    }

    #[test]
    fn test_output_file_writes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.txt");

        let mut output = OutputFile::parse_flag(path.to_str().unwrap()).unwrap();
        output.write_all(b"written").unwrap();
        output.close().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "written");
    }

    #[test]
    fn test_stringify_after_close_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("closed.txt");

        let mut output = OutputFile::parse_flag(path.to_str().unwrap()).unwrap();
        output.close().unwrap();
        assert!(output.stringify().is_err());
    }

    // ------------------------------------------------------------------------
    // FileOrStdin / FileOrStdout
    // ------------------------------------------------------------------------

    #[test]
    fn test_file_or_stdin_dash() {
        let input = FileOrStdin::parse_flag("-").unwrap();
        assert_eq!(input.kind(), SourceKind::Stdin);
        assert_eq!(input.stringify().unwrap(), "-");
    }

    #[test]
    fn test_file_or_stdin_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("in.txt");
        fs::write(&path, "from file").unwrap();

        let mut input = FileOrStdin::parse_flag(path.to_str().unwrap()).unwrap();
        assert_eq!(input.kind(), SourceKind::FilePath);

        let mut content = String::new();
        input.read_to_string(&mut content).unwrap();
        assert_eq!(content, "from file");
    }

    #[test]
    fn test_file_or_stdout_dash() {
        let output = FileOrStdout::parse_flag("-").unwrap();
        assert_eq!(output.kind(), SourceKind::Stdout);
        assert_eq!(output.stringify().unwrap(), "-");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_or_stdout_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.txt");

        let output = FileOrStdout::parse_flag(path.to_str().unwrap()).unwrap();
        let mode = output.metadata().unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_defaults_are_std_streams() {
        assert!(FileOrStdin::default().is_std());
        assert!(FileOrStdout::default().is_std());
    }

    #[test]
    fn test_into_stream() {
        let stream = FileOrStdout::parse_flag("-").unwrap().into_stream();
        assert_eq!(stream.kind(), SourceKind::Stdout);
    }
}
