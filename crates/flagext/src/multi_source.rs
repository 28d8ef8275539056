//! Strings that may be read from a file or the environment.

use std::fmt;
use std::str::FromStr;

use flagext_core::{Completion, Error, Result, Source, SourceKind};

use crate::value::{FlagValue, value_parser_factory};

/// A flag whose content depends on a prefix in the raw value.
///
/// - `file:<path>`: the contents of `<path>` (tilde-expanded), byte for byte
/// - `env:<NAME>`: the value of environment variable `<NAME>`, which must be
///   set and non-empty
/// - anything else: the value itself
///
/// The empty string is rejected. Content is kept as bytes, so binary files
/// are accepted; the `str` views fail when the content is not UTF-8.
///
/// # Example
///
/// ```no_run
/// use clap::Parser;
/// use flagext::MultiSourceString;
///
/// #[derive(Parser)]
/// struct Args {
///     /// API token, e.g. `env:API_TOKEN` or `file:~/.config/token`.
///     #[arg(long)]
///     token: MultiSourceString,
/// }
///
/// let args = Args::parse();
/// println!("{} bytes of token", args.token.as_bytes().len());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MultiSourceString {
    value: Vec<u8>,
    kind: SourceKind,
}

impl MultiSourceString {
    /// The resolved content as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.value
    }

    /// The resolved content as text.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUtf8`] when the content is not UTF-8.
    pub fn as_str(&self) -> Result<&str> {
        Ok(std::str::from_utf8(&self.value)?)
    }

    /// Which source the content came from.
    pub fn source_kind(&self) -> SourceKind {
        self.kind
    }

    /// Take the resolved content.
    pub fn into_bytes(self) -> Vec<u8> {
        self.value
    }

    /// Take the resolved content as text.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUtf8`] when the content is not UTF-8.
    pub fn into_string(self) -> Result<String> {
        String::from_utf8(self.value).map_err(|e| Error::InvalidUtf8(e.utf8_error()))
    }

    /// Completion candidates for a partially typed value.
    pub fn complete(partial: &str) -> Vec<Completion> {
        flagext_core::complete(partial)
    }
}

impl FlagValue for MultiSourceString {
    fn parse_flag(value: &str) -> Result<Self> {
        let source = Source::parse(value)?;
        Ok(Self {
            value: source.resolve_bytes()?,
            kind: source.kind(),
        })
    }

    fn stringify(&self) -> Result<String> {
        self.as_str().map(str::to_string)
    }
}

impl FromStr for MultiSourceString {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_flag(s)
    }
}

/// Lossy: invalid UTF-8 sequences are shown as U+FFFD.
impl fmt::Display for MultiSourceString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.value))
    }
}

impl AsRef<[u8]> for MultiSourceString {
    fn as_ref(&self) -> &[u8] {
        &self.value
    }
}

impl From<MultiSourceString> for Vec<u8> {
    fn from(value: MultiSourceString) -> Self {
        value.value
    }
}

value_parser_factory!(MultiSourceString);
