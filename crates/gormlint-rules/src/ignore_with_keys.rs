//! Rule forbidding other keys next to the ignore flag `-`.
//!
//! `-` tells GORM to skip the field, so every other key on it is dead
//! configuration. One error is emitted on the `-` entry listing the rest.

use gormlint_core::{Diagnostic, FieldContext, RuleError, SeenKeys, Severity, TagEntry, TagRule};

/// Rule code for ignore-with-keys.
pub const CODE: &str = "GL021";

/// Rule name for ignore-with-keys.
pub const NAME: &str = "ignore-with-keys";

const IGNORE: &str = "-";

/// Forbids `-` combined with any other key.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreWithKeys;

impl IgnoreWithKeys {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagRule for IgnoreWithKeys {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids other keys on a field ignored with '-'"
    }

    fn keys(&self) -> &'static [&'static str] {
        &[IGNORE]
    }

    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        if seen.contains(IGNORE) {
            return Ok(Vec::new());
        }
        let mut others: Vec<&str> = Vec::new();
        for e in ctx.entries.iter().filter(|e| e.original != IGNORE) {
            if !others.iter().any(|k| k.eq_ignore_ascii_case(&e.key)) {
                others.push(&e.key);
            }
        }
        if others.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![Diagnostic::new(
            CODE,
            NAME,
            Severity::Error,
            &ctx.scope(),
            format!(
                "field is ignored with '-' but also sets: {}",
                others.join(", ")
            ),
        )
        .with_key(&entry.original)])
    }
}
