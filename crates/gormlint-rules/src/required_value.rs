//! Rule requiring a value for keys that are meaningless without one.
//!
//! `column`, `type:` or `foreignKey` with nothing after them are accepted
//! by GORM and then ignored.

use gormlint_core::{Diagnostic, FieldContext, RuleError, SeenKeys, Severity, TagEntry, TagRule};

/// Rule code for required-value.
pub const CODE: &str = "GL012";

/// Rule name for required-value.
pub const NAME: &str = "required-value";

/// Keys that must carry a non-empty value.
pub const REQUIRED_KEYS: &[&str] = &[
    "type",
    "column",
    "check",
    "constraint",
    "comment",
    "foreignKey",
    "references",
    "joinForeignKey",
    "joinReferences",
    "many2many",
    "polymorphic",
    "embeddedPrefix",
];

/// Requires a non-empty value.
#[derive(Debug, Clone)]
pub struct RequiredValue {
    keys: &'static [&'static str],
}

impl Default for RequiredValue {
    fn default() -> Self {
        Self::new()
    }
}

impl RequiredValue {
    /// Creates a new rule covering [`REQUIRED_KEYS`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            keys: REQUIRED_KEYS,
        }
    }

    /// Replaces the set of keys checked.
    #[must_use]
    pub fn with_keys(mut self, keys: &'static [&'static str]) -> Self {
        self.keys = keys;
        self
    }
}

impl TagRule for RequiredValue {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires a value for column, type, relationship and similar keys"
    }

    fn keys(&self) -> &'static [&'static str] {
        self.keys
    }

    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        _seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        if !entry.is_flag() {
            return Ok(Vec::new());
        }
        Ok(vec![Diagnostic::new(
            CODE,
            NAME,
            Severity::Error,
            &ctx.scope(),
            format!("key '{}' requires a value", entry.key),
        )
        .with_key(&entry.original)])
    }
}
