//! Rule flagging structs with more than one `primaryKey` field.
//!
//! Every participating field is reported, not just the second one, so
//! each declaration shows the problem.

use gormlint_core::{Diagnostic, Severity, StructContext, StructRule};

/// Rule code for multiple-primary-keys.
pub const CODE: &str = "GL031";

/// Rule name for multiple-primary-keys.
pub const NAME: &str = "multiple-primary-keys";

/// Forbids more than one field carrying `primaryKey`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiplePrimaryKeys;

impl MultiplePrimaryKeys {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl StructRule for MultiplePrimaryKeys {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids more than one primaryKey field per struct"
    }

    fn check_struct(&self, ctx: &StructContext) -> Vec<Diagnostic> {
        let keyed: Vec<_> = ctx
            .fields
            .iter()
            .filter(|parsed| parsed.has_key("primaryKey"))
            .collect();
        if keyed.len() < 2 {
            return Vec::new();
        }

        let names: Vec<&str> = keyed.iter().map(|p| p.field.name.as_str()).collect();
        let message = format!(
            "{} fields carry primaryKey: {}",
            keyed.len(),
            names.join(", ")
        );
        keyed
            .iter()
            .map(|parsed| {
                let key = parsed
                    .entries_for("primaryKey")
                    .next()
                    .map_or("primaryKey", |e| e.original.as_str());
                Diagnostic::new(
                    CODE,
                    NAME,
                    Severity::Error,
                    &ctx.scope(parsed.field),
                    message.clone(),
                )
                .with_key(key)
            })
            .collect()
    }
}
