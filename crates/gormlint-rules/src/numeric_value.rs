//! Rule requiring digits-only values for numeric keys.
//!
//! `size:abc`, `size:` and `precision:-1` are all rejected. GORM parses
//! these with `strconv.Atoi` and falls back to zero on failure, so a bad
//! value never surfaces at runtime.

use gormlint_core::{Diagnostic, FieldContext, RuleError, SeenKeys, Severity, TagEntry, TagRule};

/// Rule code for numeric-value.
pub const CODE: &str = "GL010";

/// Rule name for numeric-value.
pub const NAME: &str = "numeric-value";

/// Keys whose value must be a non-negative integer.
pub const NUMERIC_KEYS: &[&str] = &[
    "size",
    "precision",
    "scale",
    "autoIncrementIncrement",
    "priority",
    "length",
];

/// Requires a non-empty, digits-only value.
#[derive(Debug, Clone)]
pub struct NumericValue {
    keys: &'static [&'static str],
}

impl Default for NumericValue {
    fn default() -> Self {
        Self::new()
    }
}

impl NumericValue {
    /// Creates a new rule covering [`NUMERIC_KEYS`].
    #[must_use]
    pub fn new() -> Self {
        Self { keys: NUMERIC_KEYS }
    }

    /// Replaces the set of keys checked.
    #[must_use]
    pub fn with_keys(mut self, keys: &'static [&'static str]) -> Self {
        self.keys = keys;
        self
    }
}

/// Returns true if `value` is non-empty and all ASCII digits.
#[must_use]
pub fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

impl TagRule for NumericValue {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires digits-only values for size, precision, scale and similar keys"
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
        if is_numeric(&entry.value) {
            return Ok(Vec::new());
        }
        Ok(vec![Diagnostic::new(
            CODE,
            NAME,
            Severity::Error,
            &ctx.scope(),
            format!(
                "invalid {} value '{}': expected a non-negative integer",
                entry.key, entry.value
            ),
        )
        .with_key(&entry.original)])
    }
}
