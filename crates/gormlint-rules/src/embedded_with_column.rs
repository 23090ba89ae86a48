//! Rule forbidding `column` on an `embedded` field.
//!
//! An embedded struct contributes its own fields' columns; a column name on
//! the embedding field is ignored. Use `embeddedPrefix` instead.

use gormlint_core::{Diagnostic, FieldContext, RuleError, SeenKeys, Severity, TagEntry, TagRule};

/// Rule code for embedded-with-column.
pub const CODE: &str = "GL025";

/// Rule name for embedded-with-column.
pub const NAME: &str = "embedded-with-column";

/// Forbids `embedded` together with `column`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedWithColumn;

impl EmbeddedWithColumn {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagRule for EmbeddedWithColumn {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids column on an embedded field"
    }

    fn keys(&self) -> &'static [&'static str] {
        &["embedded"]
    }

    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        if seen.contains("embedded") || !ctx.has_key("column") {
            return Ok(Vec::new());
        }
        Ok(vec![Diagnostic::new(
            CODE,
            NAME,
            Severity::Error,
            &ctx.scope(),
            "embedded field cannot set column; use embeddedPrefix",
        )
        .with_key(&entry.original)])
    }
}
