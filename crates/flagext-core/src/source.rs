//! Multi-source value resolution.
//!
//! A raw flag value is dispatched on a fixed set of prefixes:
//!
//! | value            | source                                   |
//! |------------------|------------------------------------------|
//! | `file:<path>`    | contents of `<path>` (tilde-expanded)    |
//! | `env:<NAME>`     | value of environment variable `<NAME>`   |
//! | anything else    | the value itself                         |
//!
//! Prefixes are checked in [`Prefix::ALL`] order and are disjoint. Exactly
//! one source is consulted per call and the result is never re-resolved,
//! so a file whose contents start with `env:` is returned verbatim.

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::debug;

use crate::paths::expand_user;
use crate::{Error, Result};

/// Where a flag value's content comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// The raw value is the content.
    Literal,
    /// Content is read from a named file.
    FilePath,
    /// Content is read from an environment variable.
    EnvVar,
    /// The process's standard input.
    Stdin,
    /// The process's standard output.
    Stdout,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Literal => "literal",
            Self::FilePath => "file",
            Self::EnvVar => "env",
            Self::Stdin => "stdin",
            Self::Stdout => "stdout",
        };
        f.write_str(s)
    }
}

/// A recognized source prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// `file:`
    File,
    /// `env:`
    Env,
}

impl Prefix {
    /// Every prefix, in dispatch order. New prefixes must stay disjoint from
    /// the existing ones.
    pub const ALL: [Prefix; 2] = [Prefix::File, Prefix::Env];

    /// The literal prefix text, including the trailing colon.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file:",
            Self::Env => "env:",
        }
    }

    /// The kind of source this prefix selects.
    pub const fn kind(self) -> SourceKind {
        match self {
            Self::File => SourceKind::FilePath,
            Self::Env => SourceKind::EnvVar,
        }
    }

    /// Split `value` into the first matching prefix and its remainder.
    pub fn split(value: &str) -> Option<(Prefix, &str)> {
        Self::ALL
            .into_iter()
            .find_map(|p| value.strip_prefix(p.as_str()).map(|rest| (p, rest)))
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw value after prefix dispatch, before any I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    /// Use the value verbatim.
    Literal(&'a str),
    /// Read the named file; the path is not yet tilde-expanded.
    File(&'a str),
    /// Read the named environment variable.
    Env(&'a str),
}

impl<'a> Source<'a> {
    /// Dispatch `value` on its prefix.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyValue`] if `value` is empty.
    pub fn parse(value: &'a str) -> Result<Self> {
        if value.is_empty() {
            return Err(Error::EmptyValue);
        }
        Ok(match Prefix::split(value) {
            Some((Prefix::File, path)) => Self::File(path),
            Some((Prefix::Env, name)) => Self::Env(name),
            None => Self::Literal(value),
        })
    }

    /// The kind of source selected.
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Literal(_) => SourceKind::Literal,
            Self::File(_) => SourceKind::FilePath,
            Self::Env(_) => SourceKind::EnvVar,
        }
    }

    /// Read the raw bytes this source refers to.
    ///
    /// File contents are returned as-is, so binary files are accepted.
    ///
    /// # Errors
    ///
    /// - [`Error::FileRead`] if a file source cannot be read.
    /// - [`Error::MissingOrEmptyEnv`] if an env source is unset or empty.
    /// - [`Error::EnvNotUnicode`] if an env source is not valid Unicode.
    pub fn resolve_bytes(&self) -> Result<Vec<u8>> {
        match *self {
            Self::Literal(value) => Ok(value.as_bytes().to_vec()),
            Self::File(path) => {
                let path = PathBuf::from(expand_user(path));
                debug!("resolving value from file {}", path.display());
                fs::read(&path).map_err(|e| Error::file_read(e, &path))
            }
            Self::Env(name) => {
                debug!("resolving value from environment variable {name}");
                if name.is_empty() || name.contains(['=', '\0']) {
                    return Err(Error::missing_env(name));
                }
                match env::var(name) {
                    Ok(value) if !value.is_empty() => Ok(value.into_bytes()),
                    Ok(_) | Err(env::VarError::NotPresent) => Err(Error::missing_env(name)),
                    Err(env::VarError::NotUnicode(_)) => Err(Error::EnvNotUnicode {
                        name: name.to_string(),
                    }),
                }
            }
        }
    }

    /// Read the content this source refers to as text.
    ///
    /// # Errors
    ///
    /// Everything [`Source::resolve_bytes`] reports, plus
    /// [`Error::InvalidUtf8`] when the content is not UTF-8.
    pub fn resolve(&self) -> Result<String> {
        let bytes = self.resolve_bytes()?;
        String::from_utf8(bytes).map_err(|e| Error::InvalidUtf8(e.utf8_error()))
    }
}

/// Resolve a raw flag value to its content.
///
/// Shorthand for `Source::parse(value)?.resolve()`.
///
/// # Example
///
/// ```
/// use flagext_core::source::resolve;
///
/// assert_eq!(resolve("plain text").unwrap(), "plain text");
/// assert!(resolve("").unwrap_err().is_empty_value());
/// ```
pub fn resolve(value: &str) -> Result<String> {
    Source::parse(value)?.resolve()
}

/// Resolve a raw flag value to its content without requiring UTF-8.
///
/// Shorthand for `Source::parse(value)?.resolve_bytes()`.
pub fn resolve_bytes(value: &str) -> Result<Vec<u8>> {
    Source::parse(value)?.resolve_bytes()
}
