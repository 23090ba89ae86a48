//! Helpers for driving a single rule in unit tests.

use gormlint_core::{
    tag, Diagnostic, FieldContext, FieldDecl, ParsedField, SeenKeys, StructContext, StructDecl,
    StructRule, TagRule,
};

/// Runs `rule` over a `gorm` segment the way the engine would.
pub(crate) fn check_segment(rule: &dyn TagRule, segment: &str) -> Vec<Diagnostic> {
    let field = FieldDecl::new("F", "string", format!("gorm:\"{segment}\""));
    let entries = tag::parse_entries(segment);
    let ctx = FieldContext::new("T", &field, &entries);
    let mut seen = SeenKeys::new();
    let mut out = Vec::new();

    for entry in &entries {
        let keys = rule.keys();
        if keys.is_empty() || keys.iter().any(|k| k.eq_ignore_ascii_case(&entry.original)) {
            out.extend(rule.check(&ctx, entry, &seen).expect("rule failed"));
        }
        seen.insert(&entry.original);
    }
    out
}

/// Runs a struct rule over `(field name, gorm segment)` pairs.
pub(crate) fn check_fields(rule: &dyn StructRule, fields: &[(&str, &str)]) -> Vec<Diagnostic> {
    let mut decl = StructDecl::new("T");
    for (name, segment) in fields {
        decl.fields
            .push(FieldDecl::new(*name, "string", format!("gorm:\"{segment}\"")));
    }
    let parsed = decl
        .fields
        .iter()
        .map(|field| ParsedField {
            field,
            entries: tag::parse_entries(tag::decode(&field.tag, "gorm")),
        })
        .collect();
    let ctx = StructContext {
        decl: &decl,
        fields: parsed,
    };
    rule.check_struct(&ctx)
}
