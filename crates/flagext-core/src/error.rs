//! Error types for flag value resolution.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! across all flagext crates. Uses `thiserror` for derive macros.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while turning a raw flag value into a resource.
///
/// Tilde expansion never produces one of these; it degrades to the
/// unexpanded input instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The value was the empty string.
    #[error("received empty string, value must be provided")]
    EmptyValue,

    /// A `file:` source could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    FileRead {
        /// Path after tilde expansion.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// An input or output file could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    FileOpen {
        /// Path after tilde expansion.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// An `env:` source named a variable that is unset or empty.
    #[error("environment variable {name} empty or non-existent")]
    MissingOrEmptyEnv {
        /// Variable name, without the `env:` prefix.
        name: String,
    },

    /// An `env:` source named a variable whose value is not valid Unicode.
    #[error("environment variable {name} is not valid unicode")]
    EnvNotUnicode {
        /// Variable name, without the `env:` prefix.
        name: String,
    },

    /// Resolved content was requested as text but is not UTF-8.
    #[error("value is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// I/O error on an already-open handle.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a file read error for `path`.
    pub fn file_read(source: io::Error, path: impl AsRef<Path>) -> Self {
        Self::FileRead {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a file open error for `path`.
    pub fn file_open(source: io::Error, path: impl AsRef<Path>) -> Self {
        Self::FileOpen {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a missing-or-empty environment variable error.
    pub fn missing_env(name: impl Into<String>) -> Self {
        Self::MissingOrEmptyEnv { name: name.into() }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for [`Error::EmptyValue`].
    pub fn is_empty_value(&self) -> bool {
        matches!(self, Self::EmptyValue)
    }

    /// True when the underlying I/O failure was `NotFound`.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::FileRead { source, .. } | Self::FileOpen { source, .. } | Self::Io(source) => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }

    /// The path involved in a file error, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::FileRead { path, .. } | Self::FileOpen { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias using flagext's Error type.
pub type Result<T> = std::result::Result<T, Error>;
