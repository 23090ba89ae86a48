//! Finding and loading `gormlint.toml` for a command.
//!
//! `--config` bypasses the search. Otherwise the start directory and its
//! ancestors are searched for `gormlint.toml` or `.gormlint.toml`, stopping
//! at the enclosing Go module root (the first directory holding `go.mod`).
//! `$GORMLINT_CONFIG_DIR/config.toml`, or `~/.gormlint/config.toml`, is the
//! last resort. Command-line overrides are applied to whatever was loaded.

use anyhow::{Context, Result};
use gormlint_core::Config;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: &[&str] = &["gormlint.toml", ".gormlint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Marks the root of a Go module; the upward search ends there.
const GO_MODULE_FILE: &str = "go.mod";

/// Settings given on the command line, layered over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replaces `validator.namespace`.
    pub namespace: Option<String>,
    /// Appended to `validator.exclude`.
    pub exclude: Vec<String>,
}

impl Overrides {
    fn apply(&self, config: &mut Config) {
        if let Some(namespace) = &self.namespace {
            config.validator.namespace.clone_from(namespace);
        }
        config.validator.exclude.extend(self.exclude.iter().cloned());
    }
}

/// A configuration ready for use, and the file it came from.
#[derive(Debug)]
pub struct LoadedConfig {
    /// Effective configuration, overrides applied.
    pub config: Config,
    /// Source file; `None` when defaults were used.
    pub path: Option<PathBuf>,
}

/// Where to look for configuration.
#[derive(Debug, Clone)]
pub struct ConfigSearch {
    explicit: Option<PathBuf>,
    global_dir: Option<PathBuf>,
}

impl ConfigSearch {
    /// Creates a search honoring an explicit `--config` path.
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self {
            explicit,
            global_dir: global_config_dir(),
        }
    }

    #[cfg(test)]
    fn with_global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    /// Finds the config file that applies to `start`.
    #[must_use]
    pub fn find(&self, start: &Path) -> Option<PathBuf> {
        if let Some(path) = &self.explicit {
            return Some(path.clone());
        }

        let start = if start.as_os_str().is_empty() {
            Path::new(".")
        } else {
            start
        };
        let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
        for dir in start.ancestors() {
            if let Some(found) = CONFIG_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
            {
                tracing::debug!("Found project config: {}", found.display());
                return Some(found);
            }
            if dir.join(GO_MODULE_FILE).is_file() {
                tracing::debug!("Stopping config search at module root {}", dir.display());
                break;
            }
        }

        self.global_dir
            .as_ref()
            .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
            .filter(|candidate| candidate.is_file())
    }

    /// Loads the config for `start` and applies `overrides`.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file was found but cannot be read or parsed.
    pub fn load(&self, start: &Path, overrides: &Overrides) -> Result<LoadedConfig> {
        let path = self.find(start);
        let mut config = match &path {
            Some(p) => {
                tracing::info!("Using config: {}", p.display());
                Config::from_file(p)
                    .with_context(|| format!("Failed to load config: {}", p.display()))?
            }
            None => Config::default(),
        };
        overrides.apply(&mut config);
        Ok(LoadedConfig { config, path })
    }
}

/// Returns the global config directory: `$GORMLINT_CONFIG_DIR` or `~/.gormlint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("GORMLINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".gormlint"))
}
