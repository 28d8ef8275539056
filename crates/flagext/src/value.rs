//! The stringify/parse contract and its `clap` bridge.
//!
//! Every flag type in this crate implements [`FlagValue`]. The parse half is
//! what clap calls once per flag occurrence; the stringify half gives back a
//! canonical string for help output and defaults. [`FlagValueParser`] adapts
//! the parse half to [`clap::builder::TypedValueParser`], so a field typed as
//! one of these flags needs no explicit `value_parser` attribute.

use std::ffi::OsStr;
use std::fmt;
use std::marker::PhantomData;

use clap::builder::TypedValueParser;
use clap::error::ErrorKind;
use clap::{Arg, Command};
use flagext_core::Result;
use log::debug;

/// A type bound to a command-line option that converts to and from its
/// string representation.
pub trait FlagValue: Sized {
    /// Turn a raw argument into the resolved value.
    ///
    /// # Errors
    ///
    /// Whatever resolution fails with; the flag stays unset.
    fn parse_flag(value: &str) -> Result<Self>;

    /// Canonical string for the resolved value.
    ///
    /// # Errors
    ///
    /// When the value can no longer be described, e.g. a file handle that
    /// cannot be `stat`ed.
    fn stringify(&self) -> Result<String>;
}

/// [`TypedValueParser`] for any [`FlagValue`].
pub struct FlagValueParser<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> FlagValueParser<T> {
    /// Create a parser for `T`.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for FlagValueParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FlagValueParser<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FlagValueParser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagValueParser")
            .field("value", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> TypedValueParser for FlagValueParser<T>
where
    T: FlagValue + Clone + Send + Sync + 'static,
{
    type Value = T;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> std::result::Result<T, clap::Error> {
        let Some(value) = value.to_str() else {
            return Err(clap::Error::new(ErrorKind::InvalidUtf8).with_cmd(cmd));
        };

        T::parse_flag(value).map_err(|err| {
            let arg = arg
                .map(ToString::to_string)
                .unwrap_or_else(|| "...".to_string());
            debug!("rejected value for {arg}: {err}");
            clap::Error::raw(
                ErrorKind::ValueValidation,
                format!("invalid value '{value}' for '{arg}': {err}\n"),
            )
            .with_cmd(cmd)
        })
    }
}

/// Implements [`clap::builder::ValueParserFactory`] so `value_parser!` (and
/// therefore the derive API) picks [`FlagValueParser`] automatically.
macro_rules! value_parser_factory {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ::clap::builder::ValueParserFactory for $ty {
                type Parser = $crate::value::FlagValueParser<$ty>;

                fn value_parser() -> Self::Parser {
                    $crate::value::FlagValueParser::new()
                }
            }
        )+
    };
}

pub(crate) use value_parser_factory;
