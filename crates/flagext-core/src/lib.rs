//! flagext core: value resolution behind the flagext flag types.
//!
//! This crate has no dependency on any argument parser. It decides what a
//! raw flag value refers to and fetches it.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`paths`]: Tilde expansion (`~`, `~user`)
//! - [`source`]: `file:` / `env:` / literal value resolution
//! - [`stream`]: `-` versus named file selection for inputs and outputs
//! - [`complete`]: Completion suggestions for multi-source values
//! - [`users`]: System user database lookups

pub mod complete;
pub mod error;
pub mod paths;
pub mod source;
pub mod stream;
pub mod users;

#[cfg(test)]
mod test_utils;

// Re-export key types at crate root for convenience
pub use complete::{Completion, complete};
pub use error::{Error, Result};
pub use paths::{expand_user, expand_user_path};
pub use source::{Prefix, Source, SourceKind, resolve, resolve_bytes};
pub use stream::{
    Ownership, STDIO_SENTINEL, Stream, open_input, open_output, resolve_input, resolve_output,
};
