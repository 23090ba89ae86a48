//! Rule forbidding two fields mapped to the same column.
//!
//! Only explicit `column:` values are compared, exactly as written after
//! trimming. The first field to claim a name owns it; each later claimant
//! gets one error naming the owner.

use std::collections::HashMap;

use gormlint_core::{Diagnostic, Severity, StructContext, StructRule};

/// Rule code for duplicate-column.
pub const CODE: &str = "GL030";

/// Rule name for duplicate-column.
pub const NAME: &str = "duplicate-column";

/// Forbids reusing a column name within one struct.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateColumn;

impl DuplicateColumn {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl StructRule for DuplicateColumn {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids two fields with the same column name"
    }

    fn check_struct(&self, ctx: &StructContext) -> Vec<Diagnostic> {
        let mut owners: HashMap<&str, &str> = HashMap::new();
        let mut diagnostics = Vec::new();

        for parsed in &ctx.fields {
            for entry in parsed.entries_for("column") {
                let column = entry.value.trim();
                if column.is_empty() {
                    continue;
                }
                match owners.get(column) {
                    Some(&owner) if owner != parsed.field.name => {
                        diagnostics.push(
                            Diagnostic::new(
                                CODE,
                                NAME,
                                Severity::Error,
                                &ctx.scope(parsed.field),
                                format!("column '{column}' is already used by field {owner}"),
                            )
                            .with_key(&entry.original),
                        );
                    }
                    Some(_) => {}
                    None => {
                        owners.insert(column, &parsed.field.name);
                    }
                }
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::check_fields;

    #[test]
    fn test_later_field_reported_once() {
        let found = check_fields(
            &DuplicateColumn::new(),
            &[("Name", "column:name"), ("Title", "size:5"), ("Alias", "column:name")],
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].field_name, "Alias");
        assert_eq!(found[0].message, "column 'name' is already used by field Name");
    }

    #[test]
    fn test_first_owner_kept() {
        let found = check_fields(
            &DuplicateColumn::new(),
            &[("A", "column:x"), ("B", "column:x"), ("C", "column: x ")],
        );
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|d| d.message.ends_with("field A")));
    }

    #[test]
    fn test_distinct_and_empty_pass() {
        let found = check_fields(
            &DuplicateColumn::new(),
            &[("A", "column:a"), ("B", "column"), ("C", "column:")],
        );
        assert!(found.is_empty());
    }
}
