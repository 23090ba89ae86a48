//! Rule noting `autoCreateTime` and `autoUpdateTime` on one field.
//!
//! Not a conflict: GORM sets the value on insert and again on every
//! update, which makes the create time unrecoverable. Reported as a
//! warning on whichever key comes second.

use gormlint_core::{Diagnostic, FieldContext, RuleError, SeenKeys, Severity, TagEntry, TagRule};

/// Rule code for dual-timestamps.
pub const CODE: &str = "GL026";

/// Rule name for dual-timestamps.
pub const NAME: &str = "dual-timestamps";

const CREATE: &str = "autoCreateTime";
const UPDATE: &str = "autoUpdateTime";

/// Warns when one field tracks both creation and update time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DualTimestamps;

impl DualTimestamps {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagRule for DualTimestamps {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Warns when autoCreateTime and autoUpdateTime share a field"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn keys(&self) -> &'static [&'static str] {
        &[CREATE, UPDATE]
    }

    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let other = if entry.original.eq_ignore_ascii_case(CREATE) {
            UPDATE
        } else {
            CREATE
        };
        if !seen.contains(other) || seen.contains(&entry.original) {
            return Ok(Vec::new());
        }
        Ok(vec![Diagnostic::new(
            CODE,
            NAME,
            Severity::Warning,
            &ctx.scope(),
            format!(
                "'{other}' and '{}' on one field; the creation time is overwritten on update",
                entry.key
            ),
        )
        .with_key(&entry.original)])
    }
}
