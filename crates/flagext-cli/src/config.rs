//! Configuration for flagcat.
//!
//! Provides the [`FlagcatConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `FLAGCAT_CONFIG` environment variable
//! 3. XDG default: `~/.config/flagcat/config.toml`
//! 4. Built-in defaults
//!
//! Every value is stored raw: `io.input`/`io.output` are parsed like `-i`/`-o`
//! and `render.header`/`render.footer` like `--header`/`--footer`.

use std::path::PathBuf;

use confyg::{Confygery, env};
use flagext::{Error, Result, expand_user};
use serde::{Deserialize, Serialize};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FLAGCAT_CONFIG";

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for flagcat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagcatConfig {
    /// Default input and output.
    pub io: IoConfig,

    /// Text placed around the copied input.
    pub render: RenderConfig,
}

/// Default streams used when `-i`/`-o` are not given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Input path, `-` for stdin.
    pub input: String,

    /// Output path, `-` for stdout.
    pub output: String,
}

/// Header and footer defaults, as multi-source values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Written before the input, e.g. `file:~/.flagcat/header`.
    pub header: Option<String>,

    /// Written after the input.
    pub footer: Option<String>,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: "-".to_string(),
            output: "-".to_string(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl FlagcatConfig {
    /// Load configuration from file, environment, and defaults.
    ///
    /// A config path that does not exist is skipped, not an error.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config file");
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("FLAGCAT");
        env_opts.add_section("io");
        env_opts.add_section("render");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    ///
    /// Explicit and env paths are tilde-expanded.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(expand_user(path)));
        }

        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Some(PathBuf::from(expand_user(&path)));
            }
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("flagcat").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================
