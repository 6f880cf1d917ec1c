//! Configuration management for Valet
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. CLI arguments (highest precedence)
//! 2. Environment variables (VALET_* prefix)
//! 3. valet.local.toml (gitignored, local overrides)
//! 4. valet.toml (git-tracked, project config)
//! 5. ~/.config/valet/config.toml (user defaults)
//! 6. Built-in defaults (lowest precedence)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Path value meaning "standard input/output" rather than a file.
pub const STDIO: &str = "-";

/// Main Valet configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValetConfig {
    pub io: IoConfig,
    pub repl: ReplConfig,
    pub logging: LoggingConfig,
}

/// Where `valet run` reads commands and writes responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("resource/input.txt"),
            output: PathBuf::from("output.txt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    pub prompt: String,
    /// Persist line history under the user data directory.
    pub history: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "valet> ".to_string(),
            history: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

/// Returns true when `path` stands for stdin/stdout.
pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO
}

impl ValetConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        ConfigLoader::new().load()
    }

    /// Resolve relative I/O paths against `base_dir`, leaving `-` alone.
    pub fn resolve_paths(&mut self, base_dir: impl AsRef<Path>) {
        let base = base_dir.as_ref();

        for path in [&mut self.io.input, &mut self.io.output] {
            if path.is_relative() && !is_stdio(path) {
                *path = base.join(&*path);
            }
        }
    }

    /// Rejects values no command could work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.io.input.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "io.input must not be empty".to_string(),
            ));
        }
        if self.io.output.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "io.output must not be empty".to_string(),
            ));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.filter must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
