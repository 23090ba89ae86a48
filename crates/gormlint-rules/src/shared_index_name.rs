//! Rule flagging index names shared by several fields.
//!
//! GORM builds one composite index from all fields declaring the same
//! index name. That is sometimes intended, but a copy-pasted name produces
//! it silently, so every participant gets a warning. `index` and
//! `uniqueIndex` share one namespace.

use gormlint_core::{Diagnostic, Severity, StructContext, StructRule};

use crate::index_option::{IndexValue, INDEX_KEYS};

/// Rule code for shared-index-name.
pub const CODE: &str = "GL032";

/// Rule name for shared-index-name.
pub const NAME: &str = "shared-index-name";

/// Warns on index names used by more than one field.
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedIndexName;

impl SharedIndexName {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

struct Participant<'a> {
    field: usize,
    key: &'a str,
}

impl StructRule for SharedIndexName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Warns when fields share an index name (composite index)"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check_struct(&self, ctx: &StructContext) -> Vec<Diagnostic> {
        // Groups in first-appearance order.
        let mut groups: Vec<(&str, Vec<Participant>)> = Vec::new();

        for (i, parsed) in ctx.fields.iter().enumerate() {
            let entries = parsed
                .entries
                .iter()
                .filter(|e| INDEX_KEYS.iter().any(|k| k.eq_ignore_ascii_case(&e.original)));
            for entry in entries {
                let Some(name) = IndexValue::parse(&entry.value).name else {
                    continue;
                };
                let participant = Participant {
                    field: i,
                    key: &entry.original,
                };
                match groups.iter_mut().find(|(n, _)| *n == name) {
                    Some((_, members)) => {
                        if members.iter().all(|m| m.field != i) {
                            members.push(participant);
                        }
                    }
                    None => groups.push((name, vec![participant])),
                }
            }
        }

        let mut diagnostics = Vec::new();
        for (name, members) in groups.iter().filter(|(_, m)| m.len() > 1) {
            let names: Vec<&str> = members
                .iter()
                .map(|m| ctx.fields[m.field].field.name.as_str())
                .collect();
            for member in members {
                let field = ctx.fields[member.field].field;
                diagnostics.push(
                    Diagnostic::new(
                        CODE,
                        NAME,
                        Severity::Warning,
                        &ctx.scope(field),
                        format!(
                            "index '{name}' is shared by fields {}; they form one composite index",
                            names.join(", ")
                        ),
                    )
                    .with_key(member.key),
                );
            }
        }
        diagnostics
    }
}
