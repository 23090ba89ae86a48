//! Rule forbidding more than one field permission key.
//!
//! `<-` (write), `->` (read) and `-` (ignore) each set the field's access
//! mode outright; combining them leaves the effective mode to GORM's parse
//! order. One error is emitted, on the first permission entry.

use gormlint_core::{Diagnostic, FieldContext, RuleError, SeenKeys, Severity, TagEntry, TagRule};

/// Rule code for conflicting-permissions.
pub const CODE: &str = "GL022";

/// Rule name for conflicting-permissions.
pub const NAME: &str = "conflicting-permissions";

/// The mutually exclusive permission keys.
pub const PERMISSION_KEYS: &[&str] = &["<-", "->", "-"];

/// Forbids combining `<-`, `->` and `-`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictingPermissions;

impl ConflictingPermissions {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagRule for ConflictingPermissions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids combining the <-, -> and - permission keys"
    }

    fn keys(&self) -> &'static [&'static str] {
        PERMISSION_KEYS
    }

    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        if PERMISSION_KEYS.iter().any(|k| seen.contains(k)) {
            return Ok(Vec::new());
        }
        let present: Vec<&str> = PERMISSION_KEYS
            .iter()
            .copied()
            .filter(|k| ctx.has_key(k))
            .collect();
        if present.len() < 2 {
            return Ok(Vec::new());
        }
        Ok(vec![Diagnostic::new(
            CODE,
            NAME,
            Severity::Error,
            &ctx.scope(),
            format!("conflicting permission keys: {}", present.join(", ")),
        )
        .with_key(&entry.original)])
    }
}
