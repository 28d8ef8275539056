//! flagcat: copy a file or stdin to a file or stdout, wrapped in an optional
//! header and footer.
//!
//! A small consumer of the `flagext` flag types: every option is one of them,
//! and the `resolve`, `complete` and `expand` subcommands expose the
//! underlying resolution directly.

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;

pub use app::Flagcat;
pub use cli::{CliArgs, Command, ConfigAction, ConfigCommand};
pub use config::{FlagcatConfig, IoConfig, RenderConfig};
