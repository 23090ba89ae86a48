//! Rule engine: runs registered rules over extracted structs.

use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::extract::extract_structs;
use crate::model::{FieldDecl, StructDecl, TagEntry};
use crate::rule::{FieldContext, ParsedField, RuleError, RuleRegistry, SeenKeys, StructContext};
use crate::tag;
use crate::types::{Diagnostic, Report, Scope, Severity};

/// Rule code for isolated rule failures.
pub const RULE_FAILURE_CODE: &str = "GL099";

/// Rule name for isolated rule failures.
pub const RULE_FAILURE_NAME: &str = "rule-failure";

/// Builder for configuring an [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    registry: Option<RuleRegistry>,
    config: Option<Config>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule registry.
    #[must_use]
    pub fn registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the engine.
    #[must_use]
    pub fn build(self) -> Engine {
        Engine {
            registry: self.registry.unwrap_or_default(),
            config: self.config.unwrap_or_default(),
        }
    }
}

/// Validates struct tags in one document at a time.
///
/// The engine holds no per-document state, so one instance can serve
/// concurrent calls for different documents.
pub struct Engine {
    registry: RuleRegistry,
    config: Config,
}

impl Engine {
    /// Creates a new builder for configuring an engine.
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.registry.len()
    }

    /// Validates a document, capped at the configured diagnostic limit.
    #[must_use]
    pub fn validate_document(&self, text: &str) -> Report {
        self.validate_with_cap(text, self.config.validator.max_diagnostics)
    }

    /// Validates a document and keeps only the first `cap` diagnostics.
    ///
    /// Empty or whitespace-only documents yield an empty report.
    #[must_use]
    pub fn validate_with_cap(&self, text: &str, cap: usize) -> Report {
        if text.trim().is_empty() {
            return Report::new();
        }
        let structs = extract_structs(text);
        let mut report = self.validate_structs(&structs);
        if report.diagnostics.len() > cap {
            info!(
                "Truncating {} diagnostics to {}",
                report.diagnostics.len(),
                cap
            );
            report.truncate(cap);
        }
        report
    }

    /// Validates already extracted structs, without a cap.
    #[must_use]
    pub fn validate_structs(&self, structs: &[StructDecl]) -> Report {
        let mut report = Report::new();
        for decl in structs {
            if !decl.has_tags() {
                debug!("Skipping {}: no tagged fields", decl.name);
                continue;
            }
            report.diagnostics.extend(self.validate_struct(decl));
            report.structs_checked += 1;
        }
        report
    }

    fn validate_struct(&self, decl: &StructDecl) -> Vec<Diagnostic> {
        debug!("Validating struct {}", decl.name);

        let namespace = self.config.validator.namespace.as_str();
        let mut diagnostics = Vec::new();
        let mut parsed = Vec::with_capacity(decl.fields.len());

        for field in &decl.fields {
            let entries = tag::parse_entries(tag::decode(&field.tag, namespace));
            match self.check_field(&decl.name, field, &entries) {
                Ok(found) => diagnostics.extend(found),
                Err(e) => {
                    warn!("Rule failed on {}.{}: {}", decl.name, field.name, e);
                    diagnostics.push(rule_failure(&decl.name, field, &e));
                }
            }
            parsed.push(ParsedField { field, entries });
        }

        let ctx = StructContext {
            decl,
            fields: parsed,
        };
        for rule in self.registry.struct_rules() {
            if !self.config.is_rule_enabled(rule.name()) {
                continue;
            }
            match catch_unwind(AssertUnwindSafe(|| rule.check_struct(&ctx))) {
                Ok(found) => diagnostics.extend(self.apply_severity_override(rule.name(), found)),
                Err(_) => {
                    warn!("Struct rule {} panicked on {}", rule.name(), decl.name);
                    if let Some(field) = decl.fields.iter().find(|f| !f.tag.is_empty()) {
                        diagnostics.push(struct_rule_failure(&decl.name, field, rule.name()));
                    }
                }
            }
        }

        diagnostics
    }

    /// Runs tag rules over one field's entries in textual order.
    fn check_field(
        &self,
        struct_name: &str,
        field: &FieldDecl,
        entries: &[TagEntry],
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let ctx = FieldContext::new(struct_name, field, entries);
        let mut seen = SeenKeys::new();
        let mut diagnostics = Vec::new();

        for entry in entries {
            for rule in self.registry.rules_for(&entry.original) {
                if !self.config.is_rule_enabled(rule.name()) {
                    continue;
                }
                let found = catch_unwind(AssertUnwindSafe(|| rule.check(&ctx, entry, &seen)))
                    .map_err(|payload| RuleError::panicked(rule.name(), entry, &*payload))??;
                diagnostics.extend(self.apply_severity_override(rule.name(), found));
            }
            seen.insert(&entry.original);
        }

        Ok(diagnostics)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut diagnostics: Vec<Diagnostic>,
    ) -> Vec<Diagnostic> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for d in &mut diagnostics {
                d.severity = severity;
            }
        }
        diagnostics
    }
}

fn rule_failure(struct_name: &str, field: &FieldDecl, error: &RuleError) -> Diagnostic {
    let scope = Scope {
        struct_name,
        field_name: &field.name,
        tag: &field.tag,
    };
    Diagnostic::new(
        RULE_FAILURE_CODE,
        RULE_FAILURE_NAME,
        Severity::Error,
        &scope,
        format!("tag could not be fully validated: {error}"),
    )
    .with_key(error.key())
}

fn struct_rule_failure(struct_name: &str, field: &FieldDecl, rule: &str) -> Diagnostic {
    let scope = Scope {
        struct_name,
        field_name: &field.name,
        tag: &field.tag,
    };
    Diagnostic::new(
        RULE_FAILURE_CODE,
        RULE_FAILURE_NAME,
        Severity::Error,
        &scope,
        format!("struct could not be fully validated: rule '{rule}' panicked"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{StructRule, TagRule};

    struct FlagEveryKey;

    impl TagRule for FlagEveryKey {
        fn name(&self) -> &'static str {
            "flag-every-key"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn default_severity(&self) -> Severity {
            Severity::Warning
        }
        fn check(
            &self,
            ctx: &FieldContext,
            entry: &TagEntry,
            seen: &SeenKeys,
        ) -> Result<Vec<Diagnostic>, RuleError> {
            let message = format!("{} (seen before: {})", entry.key, seen.contains(&entry.key));
            Ok(vec![Diagnostic::new(
                self.code(),
                self.name(),
                self.default_severity(),
                &ctx.scope(),
                message,
            )
            .with_key(&entry.original)])
        }
    }

    struct FailOnSize;

    impl TagRule for FailOnSize {
        fn name(&self) -> &'static str {
            "fail-on-size"
        }
        fn code(&self) -> &'static str {
            "T002"
        }
        fn keys(&self) -> &'static [&'static str] {
            &["size"]
        }
        fn check(
            &self,
            _ctx: &FieldContext,
            entry: &TagEntry,
            _seen: &SeenKeys,
        ) -> Result<Vec<Diagnostic>, RuleError> {
            Err(RuleError::failed(self.name(), entry, "boom"))
        }
    }

    struct PanicOnColumn;

    impl TagRule for PanicOnColumn {
        fn name(&self) -> &'static str {
            "panic-on-column"
        }
        fn code(&self) -> &'static str {
            "T003"
        }
        fn keys(&self) -> &'static [&'static str] {
            &["column"]
        }
        fn check(
            &self,
            _ctx: &FieldContext,
            _entry: &TagEntry,
            _seen: &SeenKeys,
        ) -> Result<Vec<Diagnostic>, RuleError> {
            panic!("column table missing")
        }
    }

    struct PanicInStruct;

    impl StructRule for PanicInStruct {
        fn name(&self) -> &'static str {
            "panic-in-struct"
        }
        fn code(&self) -> &'static str {
            "T004"
        }
        fn check_struct(&self, _ctx: &StructContext) -> Vec<Diagnostic> {
            panic!("struct pass failed")
        }
    }

    fn engine_with(registry: RuleRegistry) -> Engine {
        Engine::builder().registry(registry).build()
    }

    const SOURCE: &str = r#"
type User struct {
    ID   uint   `gorm:"primaryKey;primaryKey"`
    Name string `gorm:"size:10;column:name"`
    Note string `gorm:"comment:x"`
}
"#;

    #[test]
    fn entries_run_in_field_then_textual_order() {
        let mut registry = RuleRegistry::new();
        registry.register(FlagEveryKey);
        let report = engine_with(registry).validate_document(SOURCE);

        let messages: Vec<&str> = report
            .diagnostics
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec![
                "primaryKey (seen before: false)",
                "primaryKey (seen before: true)",
                "size (seen before: false)",
                "column (seen before: false)",
                "comment (seen before: false)",
            ]
        );
        assert_eq!(report.structs_checked, 1);
    }

    #[test]
    fn failing_rule_is_isolated_to_its_field() {
        let mut registry = RuleRegistry::new();
        registry.register(FlagEveryKey).register(FailOnSize);
        let report = engine_with(registry).validate_document(SOURCE);

        let name_diags: Vec<&Diagnostic> = report
            .diagnostics
            .iter()
            .filter(|d| d.field_name == "Name")
            .collect();
        assert_eq!(name_diags.len(), 1);
        assert_eq!(name_diags[0].code, RULE_FAILURE_CODE);
        assert_eq!(name_diags[0].key.as_deref(), Some("size"));
        assert!(name_diags[0].message.contains("boom"));

        assert!(report.diagnostics.iter().any(|d| d.field_name == "Note"));
    }

    #[test]
    fn panicking_tag_rule_is_isolated_to_its_field() {
        let mut registry = RuleRegistry::new();
        registry.register(FlagEveryKey).register(PanicOnColumn);
        let report = engine_with(registry).validate_document(SOURCE);

        let name_diags: Vec<&Diagnostic> = report
            .diagnostics
            .iter()
            .filter(|d| d.field_name == "Name")
            .collect();
        assert_eq!(name_diags.len(), 1);
        assert_eq!(name_diags[0].code, RULE_FAILURE_CODE);
        assert_eq!(name_diags[0].key.as_deref(), Some("column"));
        assert!(name_diags[0].message.contains("column table missing"));

        assert!(report.diagnostics.iter().any(|d| d.field_name == "ID"));
        assert!(report.diagnostics.iter().any(|d| d.field_name == "Note"));
    }

    #[test]
    fn panicking_struct_rule_keeps_field_findings() {
        let mut registry = RuleRegistry::new();
        registry.register(FlagEveryKey).register_struct(PanicInStruct);
        let report = engine_with(registry).validate_document(SOURCE);

        let failures: Vec<&Diagnostic> = report
            .diagnostics
            .iter()
            .filter(|d| d.code == RULE_FAILURE_CODE)
            .collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field_name, "ID");
        assert!(failures[0].message.contains("panic-in-struct"));
        assert_eq!(report.diagnostics.len(), 6);
    }

    #[test]
    fn untagged_structs_and_blank_documents_are_skipped() {
        let mut registry = RuleRegistry::new();
        registry.register(FlagEveryKey);
        let engine = engine_with(registry);

        let report = engine.validate_document("type Plain struct {\n  A int\n  B string\n}\n");
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.structs_checked, 0);

        assert!(engine.validate_document("   \n\t").diagnostics.is_empty());
    }

    #[test]
    fn cap_keeps_leading_diagnostics() {
        let mut registry = RuleRegistry::new();
        registry.register(FlagEveryKey);
        let report = engine_with(registry).validate_with_cap(SOURCE, 2);
        assert_eq!(report.diagnostics.len(), 2);
        assert_eq!(report.diagnostics[1].message, "primaryKey (seen before: true)");
    }

    #[test]
    fn config_disables_and_overrides() {
        let mut registry = RuleRegistry::new();
        registry.register(FlagEveryKey);
        let config = Config::parse("[rules.flag-every-key]\nseverity = \"error\"\n").unwrap();
        let engine = Engine::builder().registry(registry).config(config).build();
        let report = engine.validate_document(SOURCE);
        assert!(report.diagnostics.iter().all(|d| d.severity == Severity::Error));

        let mut registry = RuleRegistry::new();
        registry.register(FlagEveryKey);
        let config = Config::parse("[rules.flag-every-key]\nenabled = false\n").unwrap();
        let engine = Engine::builder().registry(registry).config(config).build();
        assert!(engine.validate_document(SOURCE).diagnostics.is_empty());
    }

    #[test]
    fn custom_namespace_is_honored() {
        let mut registry = RuleRegistry::new();
        registry.register(FlagEveryKey);
        let config = Config::parse("[validator]\nnamespace = \"tag\"\n").unwrap();
        let engine = Engine::builder().registry(registry).config(config).build();

        let report = engine.validate_document("type U struct { ID uint `tag:\"unique\" gorm:\"size:1\"` }");
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].key.as_deref(), Some("unique"));
    }
}
