//! Engine plus built-in rules behind one handle.

use std::path::Path;

use gormlint_core::{publish, Config, ConfigError, Engine, LocatedDiagnostic, Report};
use gormlint_rules::Preset;
use tracing::debug;

/// Validates documents with a preset's rules.
///
/// Holds no per-document state; share one instance across documents.
pub struct Linter {
    engine: Engine,
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

impl Linter {
    /// Creates a linter with every built-in rule and the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a linter with every built-in rule.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self::with_preset(Preset::Recommended, config)
    }

    /// Creates a linter with a preset's rules.
    #[must_use]
    pub fn with_preset(preset: Preset, config: Config) -> Self {
        let engine = Engine::builder()
            .registry(preset.registry())
            .config(config)
            .build();
        debug!("Linter ready with {} rules", engine.rule_count());
        Self { engine }
    }

    /// Creates a linter configured from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::with_config(Config::from_file(path)?))
    }

    /// Returns the underlying engine.
    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Validates one document, capped at the configured limit.
    #[must_use]
    pub fn validate(&self, text: &str) -> Report {
        self.engine.validate_document(text)
    }

    /// Validates one document and resolves a range for each diagnostic.
    #[must_use]
    pub fn publish(&self, text: &str) -> Vec<LocatedDiagnostic> {
        let validator = &self.engine.config().validator;
        let report = self.validate(text);
        publish(
            text,
            &report.diagnostics,
            validator.max_diagnostics,
            &validator.namespace,
        )
    }
}
