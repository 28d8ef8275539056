//! The flagcat application: logging setup and command dispatch.

use std::io::{self, Read, Write};

use flagext::{
    FileOrStdin, FileOrStdout, FlagValue, MultiSourceString, Result, complete, expand_user,
};
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command};
use crate::config::FlagcatConfig;
use crate::config_handlers;

// ============================================================================
// Flagcat
// ============================================================================

/// Configured CLI application.
#[derive(Debug, Clone, Default)]
pub struct Flagcat {
    config: FlagcatConfig,
}

impl Flagcat {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let config = FlagcatConfig::load(args.config.as_deref())?;
        Ok(Self::new(config))
    }

    /// Create with an already-loaded config.
    pub fn new(config: FlagcatConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &FlagcatConfig {
        &self.config
    }

    /// Initialise tracing-based logging on stderr.
    ///
    /// Uses `RUST_LOG` env var if set, otherwise defaults based on verbosity flags.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    }

    /// Run the CLI with the given arguments.
    pub fn run(&self, args: CliArgs) -> Result<()> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(Command::Resolve { value }) => write_resolved(&mut io::stdout().lock(), &value),
            Some(Command::Complete { partial }) => {
                write_completions(&mut io::stdout().lock(), &partial)
            }
            Some(Command::Expand { path }) => write_expanded(&mut io::stdout().lock(), &path),
            Some(Command::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)
            }
            None => self
                .cat(args.input, args.output, args.header, args.footer)
                .map(|_| ()),
        }
    }

    /// Copy input to output between the header and footer.
    ///
    /// Each `None` falls back to the config. Header and footer are resolved
    /// before a config-supplied output is opened, so a bad header never
    /// truncates it. Returns the number of input bytes copied.
    pub fn cat(
        &self,
        input: Option<FileOrStdin>,
        output: Option<FileOrStdout>,
        header: Option<MultiSourceString>,
        footer: Option<MultiSourceString>,
    ) -> Result<u64> {
        let header = self.frame(header, self.config.render.header.as_deref())?;
        let footer = self.frame(footer, self.config.render.footer.as_deref())?;

        let mut input = match input {
            Some(input) => input,
            None => FileOrStdin::parse_flag(&self.config.io.input)?,
        };
        let mut output = match output {
            Some(output) => output,
            None => FileOrStdout::parse_flag(&self.config.io.output)?,
        };

        tracing::debug!(
            input = %input.name().display(),
            output = %output.name().display(),
            "copying"
        );
        let copied = copy_framed(&mut input, &mut output, header.as_ref(), footer.as_ref())?;
        tracing::debug!(bytes = copied, "copied input");

        output.close()?;
        input.close()?;
        Ok(copied)
    }

    /// An explicit flag value, or the config's raw value resolved the same way.
    fn frame(
        &self,
        flag: Option<MultiSourceString>,
        configured: Option<&str>,
    ) -> Result<Option<MultiSourceString>> {
        match (flag, configured) {
            (Some(value), _) => Ok(Some(value)),
            (None, Some(raw)) => MultiSourceString::parse_flag(raw).map(Some),
            (None, None) => Ok(None),
        }
    }
}

// ============================================================================
// Output helpers
// ============================================================================

/// Write header, the whole input, then footer. Returns input bytes copied.
fn copy_framed(
    input: &mut impl Read,
    output: &mut impl Write,
    header: Option<&MultiSourceString>,
    footer: Option<&MultiSourceString>,
) -> io::Result<u64> {
    if let Some(header) = header {
        output.write_all(header.as_bytes())?;
    }
    let copied = io::copy(input, output)?;
    if let Some(footer) = footer {
        output.write_all(footer.as_bytes())?;
    }
    output.flush()?;
    Ok(copied)
}

/// Resolved content, written verbatim.
fn write_resolved(out: &mut impl Write, value: &MultiSourceString) -> Result<()> {
    out.write_all(value.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// One candidate per line, with its description after a tab when present.
fn write_completions(out: &mut impl Write, partial: &str) -> Result<()> {
    for candidate in complete(partial) {
        match &candidate.description {
            Some(description) => writeln!(out, "{}\t{description}", candidate.item)?,
            None => writeln!(out, "{}", candidate.item)?,
        }
    }
    Ok(())
}

fn write_expanded(out: &mut impl Write, path: &str) -> Result<()> {
    writeln!(out, "{}", expand_user(path))?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
