//! Rule restricting enumerated keys to their allowed values.
//!
//! The check only applies when a value is present; `autoCreateTime` alone
//! is valid, `autoCreateTime:seconds` is not. Comparison ignores case.

use gormlint_core::{Diagnostic, FieldContext, RuleError, SeenKeys, Severity, TagEntry, TagRule};

/// Rule code for enum-value.
pub const CODE: &str = "GL011";

/// Rule name for enum-value.
pub const NAME: &str = "enum-value";

/// Allowed values per key.
pub const ALLOWED_VALUES: &[(&str, &[&str])] = &[
    ("sort", &["asc", "desc"]),
    ("serializer", &["json", "gob", "unixtime"]),
    ("<-", &["create", "update", "false"]),
    ("->", &["false"]),
    ("-", &["all", "migration"]),
    ("autoCreateTime", &["nano", "milli"]),
    ("autoUpdateTime", &["nano", "milli"]),
];

const KEYS: &[&str] = &[
    "sort",
    "serializer",
    "<-",
    "->",
    "-",
    "autoCreateTime",
    "autoUpdateTime",
];

/// Looks up the allowed values for `key`.
#[must_use]
pub fn allowed_values(key: &str) -> Option<&'static [&'static str]> {
    ALLOWED_VALUES
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, values)| *values)
}

/// Requires enumerated keys to carry one of their allowed values.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumValue;

impl EnumValue {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagRule for EnumValue {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Restricts sort, serializer, permission and timestamp keys to known values"
    }

    fn keys(&self) -> &'static [&'static str] {
        KEYS
    }

    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        _seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        if entry.value.is_empty() {
            return Ok(Vec::new());
        }
        let Some(allowed) = allowed_values(&entry.original) else {
            return Err(RuleError::failed(NAME, entry, "no allowed values registered"));
        };
        if allowed.iter().any(|v| v.eq_ignore_ascii_case(&entry.value)) {
            return Ok(Vec::new());
        }
        Ok(vec![Diagnostic::new(
            CODE,
            NAME,
            Severity::Error,
            &ctx.scope(),
            format!(
                "invalid {} value '{}': expected one of {}",
                entry.key,
                entry.value,
                allowed.join(", ")
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
    fn test_every_key_has_values() {
        for key in KEYS {
            assert!(allowed_values(key).is_some(), "{key}");
        }
    }

    #[test]
    fn test_rejects_unknown_serializer() {
        let found = check_segment(&EnumValue::new(), "serializer:yaml");
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].message,
            "invalid serializer value 'yaml': expected one of json, gob, unixtime"
        );
    }

    #[test]
    fn test_case_insensitive_membership() {
        assert!(check_segment(&EnumValue::new(), "serializer:JSON;sort:Desc;<-:Create").is_empty());
    }

    #[test]
    fn test_flags_without_value_pass() {
        assert!(check_segment(&EnumValue::new(), "autoCreateTime;->;-").is_empty());
    }

    #[test]
    fn test_permission_values() {
        let found = check_segment(&EnumValue::new(), "->:true");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].key.as_deref(), Some("->"));

        let found = check_segment(&EnumValue::new(), "-:migration");
        assert!(found.is_empty());

        let found = check_segment(&EnumValue::new(), "autoUpdateTime:seconds");
        assert_eq!(found.len(), 1);
    }
}
