//! CLI argument parsing and command definitions.
//!
//! Every flagext flag type appears here at least once: `--input` is a
//! [`FileOrStdin`], `--output` a [`FileOrStdout`], `--header`/`--footer` and
//! `resolve VALUE` are [`MultiSourceString`]s.

use clap::{Parser, Subcommand};
use flagext::{FileOrStdin, FileOrStdout, MultiSourceString};

// ============================================================================
// CLI argument types
// ============================================================================

/// Copy an input to an output, with optional header and footer.
///
/// INPUT and OUTPUT accept `-` for stdin/stdout. HEADER and FOOTER accept
/// `file:<path>`, `env:<NAME>` or a literal string.
#[derive(Parser, Debug)]
#[command(name = "flagcat", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "FLAGCAT_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Input file, or `-` for stdin [default: config `io.input`, else -].
    #[arg(short, long, value_name = "INPUT")]
    pub input: Option<FileOrStdin>,

    /// Output file, or `-` for stdout [default: config `io.output`, else -].
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<FileOrStdout>,

    /// Text written before the input.
    #[arg(long, value_name = "VALUE")]
    pub header: Option<MultiSourceString>,

    /// Text written after the input.
    #[arg(long, value_name = "VALUE")]
    pub footer: Option<MultiSourceString>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands besides the default copy.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the content a multi-source value resolves to.
    Resolve {
        /// `file:<path>`, `env:<NAME>` or a literal.
        value: MultiSourceString,
    },

    /// Print completion candidates for a partial multi-source value.
    Complete {
        /// Partially typed value, e.g. `env:HO` or `file:~/.con`.
        #[arg(allow_hyphen_values = true)]
        partial: String,
    },

    /// Print a path with `~` / `~user` expanded.
    Expand {
        /// Path to expand.
        #[arg(allow_hyphen_values = true)]
        path: String,
    },

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Print the effective configuration as TOML.
    Show,

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
