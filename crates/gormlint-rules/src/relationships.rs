//! Rules on relationship keys.
//!
//! - `foreignKey` without `references` leaves GORM to guess the referenced
//!   column from the owner's primary key (`GL023`, warning)
//! - `many2many` with `foreignKey` or `references` mixes two relationship
//!   strategies on one field (`GL024`)

use gormlint_core::{Diagnostic, FieldContext, RuleError, SeenKeys, Severity, TagEntry, TagRule};

/// Rule code for foreign-key-without-references.
pub const MISSING_REFERENCES_CODE: &str = "GL023";
/// Rule name for foreign-key-without-references.
pub const MISSING_REFERENCES_NAME: &str = "foreign-key-without-references";

/// Rule code for many2many-with-foreign-key.
pub const MANY2MANY_CODE: &str = "GL024";
/// Rule name for many2many-with-foreign-key.
pub const MANY2MANY_NAME: &str = "many2many-with-foreign-key";

const FOREIGN_KEY: &str = "foreignKey";
const REFERENCES: &str = "references";
const MANY2MANY: &str = "many2many";

/// Warns on `foreignKey` without a matching `references`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForeignKeyWithoutReferences;

impl ForeignKeyWithoutReferences {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagRule for ForeignKeyWithoutReferences {
    fn name(&self) -> &'static str {
        MISSING_REFERENCES_NAME
    }

    fn code(&self) -> &'static str {
        MISSING_REFERENCES_CODE
    }

    fn description(&self) -> &'static str {
        "Warns on foreignKey without references"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn keys(&self) -> &'static [&'static str] {
        &[FOREIGN_KEY]
    }

    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        if seen.contains(FOREIGN_KEY) || ctx.has_key(REFERENCES) {
            return Ok(Vec::new());
        }
        Ok(vec![Diagnostic::new(
            MISSING_REFERENCES_CODE,
            MISSING_REFERENCES_NAME,
            Severity::Warning,
            &ctx.scope(),
            "foreignKey without references; the referenced column defaults to the primary key",
        )
        .with_key(&entry.original)])
    }
}

/// Forbids `many2many` combined with `foreignKey` or `references`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Many2ManyWithForeignKey;

impl Many2ManyWithForeignKey {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagRule for Many2ManyWithForeignKey {
    fn name(&self) -> &'static str {
        MANY2MANY_NAME
    }

    fn code(&self) -> &'static str {
        MANY2MANY_CODE
    }

    fn description(&self) -> &'static str {
        "Forbids many2many together with foreignKey or references"
    }

    fn keys(&self) -> &'static [&'static str] {
        &[MANY2MANY]
    }

    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        if seen.contains(MANY2MANY) {
            return Ok(Vec::new());
        }
        let conflicting: Vec<&str> = [FOREIGN_KEY, REFERENCES]
            .into_iter()
            .filter(|k| ctx.has_key(k))
            .collect();
        if conflicting.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![Diagnostic::new(
            MANY2MANY_CODE,
            MANY2MANY_NAME,
            Severity::Error,
            &ctx.scope(),
            format!(
                "many2many cannot be combined with {}; use joinForeignKey/joinReferences",
                conflicting.join(" or ")
            ),
        )
        .with_key(&entry.original)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::check_segment;

    #[test]
    fn test_foreign_key_alone_warns() {
        let found = check_segment(&ForeignKeyWithoutReferences::new(), "foreignKey:UserID");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].severity, Severity::Warning);
        assert_eq!(found[0].key.as_deref(), Some("foreignKey"));
    }

    #[test]
    fn test_foreign_key_with_references_passes() {
        let segment = "references:ID;foreignKey:UserID";
        assert!(check_segment(&ForeignKeyWithoutReferences::new(), segment).is_empty());
    }

    #[test]
    fn test_many2many_conflicts() {
        let found = check_segment(
            &Many2ManyWithForeignKey::new(),
            "foreignKey:A;many2many:user_roles;references:B",
        );
        assert_eq!(found.len(), 1);
        assert!(found[0]
            .message
            .starts_with("many2many cannot be combined with foreignKey or references"));
    }

    #[test]
    fn test_many2many_with_join_keys_passes() {
        let segment = "many2many:user_roles;joinForeignKey:UserID;joinReferences:RoleID";
        assert!(check_segment(&Many2ManyWithForeignKey::new(), segment).is_empty());
    }
}
