//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["stride.toml", ".stride.toml", "stride.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration was read from, `None` when running on defaults.
    pub config_file: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    ///
    /// An explicit `config_path` must load. A discovered file that fails to
    /// parse is reported and replaced by defaults.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_file) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            let discovery = discover_config(&cwd);
            if let Some(ref warning) = discovery.warning {
                output.warn(warning);
            }
            (discovery.config, discovery.source)
        };

        Ok(Self {
            config,
            config_file,
            output,
            cwd,
        })
    }

    /// Apply command-line overrides on top of the loaded config.
    pub fn with_overrides(mut self, api_url: Option<String>, storage: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.config.api.base_url = url;
        }
        if let Some(path) = storage {
            self.config.storage.path = path;
        }
        self
    }

    /// Location of the storage file.
    pub fn storage_path(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.path)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Result of looking for a config file above a directory.
#[derive(Debug, Default)]
pub struct Discovery {
    pub config: CliConfig,
    /// File `config` came from.
    pub source: Option<PathBuf>,
    /// Set when a config file was found but could not be used.
    pub warning: Option<String>,
}

/// First config file found walking up from `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.is_file() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load the nearest config file, falling back to defaults.
pub fn discover_config(start: &Path) -> Discovery {
    let Some(path) = find_config_file(start) else {
        return Discovery::default();
    };

    match CliConfig::load(&path.to_string_lossy()) {
        Ok(config) => Discovery {
            config,
            source: Some(path),
            warning: None,
        },
        Err(e) => Discovery {
            warning: Some(format!("Ignoring config file, using defaults: {:#}", e)),
            ..Discovery::default()
        },
    }
}
