//! Rule to forbid repeating a key inside one tag.
//!
//! # Rationale
//!
//! GORM reads a tag into a map, so a repeated key silently overrides the
//! earlier one. `gorm:"size:10;size:20"` ends up with size 20, which is
//! rarely what the author meant.
//!
//! Keys compare case-insensitively: `primaryKey;PRIMARYKEY` is a repeat.

use gormlint_core::{Diagnostic, FieldContext, RuleError, SeenKeys, Severity, TagEntry, TagRule};

/// Rule code for duplicate-key.
pub const CODE: &str = "GL001";

/// Rule name for duplicate-key.
pub const NAME: &str = "duplicate-key";

/// Forbids repeated keys within one field's tag.
#[derive(Debug, Clone)]
pub struct DuplicateKey {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for DuplicateKey {
    fn default() -> Self {
        Self::new()
    }
}

impl DuplicateKey {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl TagRule for DuplicateKey {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids repeating a key in one tag"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        if !seen.contains(&entry.original) {
            return Ok(Vec::new());
        }
        Ok(vec![Diagnostic::new(
            CODE,
            NAME,
            self.severity,
            &ctx.scope(),
            format!("duplicate key '{}'", entry.key),
        )
        .with_key(&entry.original)])
    }
}
