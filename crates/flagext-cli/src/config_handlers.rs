//! Handler functions for config CLI commands.
//!
//! Implements `flagcat config {path,show,init}`.

use std::path::PathBuf;

use flagext::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::FlagcatConfig;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
///
/// Receives the raw `--config` path (not a loaded config) because `path` and
/// `init` work before a config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => cmd_config_show(config_path),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force).map(|path| {
            println!("Config file created at {}", path.display());
        }),
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = FlagcatConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;

    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `flagcat config init` to create it)");
    }
    Ok(())
}

/// Print the effective configuration.
fn cmd_config_show(config_path: Option<&str>) -> Result<()> {
    let config = FlagcatConfig::load(config_path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Create a default configuration file, returning where it was written.
fn cmd_config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(flagext::expand_user(p)),
        None => FlagcatConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml_str = FlagcatConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str)?;
    tracing::info!(path = %path.display(), "wrote default config");

    Ok(path)
}

// ============================================================================
// Tests
// ============================================================================
