//! Rule forbidding `primaryKey` together with `unique`.
//!
//! A primary key is already unique; adding `unique` makes GORM create a
//! second, redundant constraint. Both entries are reported, each naming
//! the other, so the conflict shows up wherever the reader is looking.

use gormlint_core::{Diagnostic, FieldContext, RuleError, SeenKeys, Severity, TagEntry, TagRule};

/// Rule code for primary-key-unique.
pub const CODE: &str = "GL020";

/// Rule name for primary-key-unique.
pub const NAME: &str = "primary-key-unique";

const PRIMARY_KEY: &str = "primaryKey";
const UNIQUE: &str = "unique";

/// Forbids `primaryKey` with `unique` on one field.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrimaryKeyUnique;

impl PrimaryKeyUnique {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagRule for PrimaryKeyUnique {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids primaryKey together with unique"
    }

    fn keys(&self) -> &'static [&'static str] {
        &[PRIMARY_KEY, UNIQUE]
    }

    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        if seen.contains(&entry.original) {
            return Ok(Vec::new());
        }
        let other = if entry.original.eq_ignore_ascii_case(PRIMARY_KEY) {
            UNIQUE
        } else {
            PRIMARY_KEY
        };
        if !ctx.has_key(other) {
            return Ok(Vec::new());
        }
        Ok(vec![Diagnostic::new(
            CODE,
            NAME,
            Severity::Error,
            &ctx.scope(),
            format!("'{}' conflicts with '{other}'", entry.key),
        )
        .with_key(&entry.original)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::check_segment;

    #[test]
    fn test_one_error_per_direction() {
        let found = check_segment(&PrimaryKeyUnique::new(), "primaryKey;unique");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].message, "'primaryKey' conflicts with 'unique'");
        assert_eq!(found[1].message, "'unique' conflicts with 'primaryKey'");
    }

    #[test]
    fn test_order_does_not_matter() {
        let found = check_segment(&PrimaryKeyUnique::new(), "unique;size:1;PRIMARYKEY");
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].key.as_deref(), Some("PRIMARYKEY"));
    }

    #[test]
    fn test_repeats_reported_once() {
        assert_eq!(
            check_segment(&PrimaryKeyUnique::new(), "primaryKey;unique;unique").len(),
            2
        );
    }

    #[test]
    fn test_alone_passes() {
        assert!(check_segment(&PrimaryKeyUnique::new(), "primaryKey;uniqueIndex").is_empty());
    }
}
