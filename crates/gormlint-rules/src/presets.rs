//! Rule presets for common configurations.

use gormlint_core::{RuleRegistry, StructRuleBox, TagRuleBox};

use crate::{
    CautionKey, CommentQuotes, ConflictingPermissions, DeprecatedKey, DualTimestamps,
    DuplicateColumn, DuplicateKey, EmbeddedWithColumn, EnumValue, ForeignKeyWithoutReferences,
    IgnoreWithKeys, IndexOption, Many2ManyWithForeignKey, MixedQuotes, MultiplePrimaryKeys,
    NumericValue, PrimaryKeyUnique, RequiredValue, SharedIndexName, UnknownKey,
};

/// Preset configurations for gormlint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every built-in rule.
    Recommended,
    /// Errors only: drops the advisory warning rules.
    Strict,
    /// Structural checks only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the tag rules for this preset.
    #[must_use]
    pub fn tag_rules(self) -> Vec<TagRuleBox> {
        match self {
            Self::Recommended => all_tag_rules(),
            Self::Strict => all_tag_rules()
                .into_iter()
                .filter(|r| r.default_severity() == gormlint_core::Severity::Error)
                .collect(),
            Self::Minimal => vec![
                Box::new(DuplicateKey::new()),
                Box::new(UnknownKey::new()),
                Box::new(NumericValue::new()),
            ],
        }
    }

    /// Returns the struct rules for this preset.
    #[must_use]
    pub fn struct_rules(self) -> Vec<StructRuleBox> {
        match self {
            Self::Recommended => all_struct_rules(),
            Self::Strict => all_struct_rules()
                .into_iter()
                .filter(|r| r.default_severity() == gormlint_core::Severity::Error)
                .collect(),
            Self::Minimal => vec![Box::new(DuplicateColumn::new())],
        }
    }

    /// Builds a registry holding this preset's rules.
    #[must_use]
    pub fn registry(self) -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        for rule in self.tag_rules() {
            registry.register_box(rule);
        }
        for rule in self.struct_rules() {
            registry.register_struct_box(rule);
        }
        registry
    }
}

/// Returns every tag rule, in emission order.
///
/// Order within one entry: duplicate check, catalog classification,
/// value format, then key combinations.
#[must_use]
pub fn all_tag_rules() -> Vec<TagRuleBox> {
    vec![
        Box::new(DuplicateKey::new()),
        Box::new(UnknownKey::new()),
        Box::new(DeprecatedKey::new()),
        Box::new(CautionKey::new()),
        Box::new(NumericValue::new()),
        Box::new(EnumValue::new()),
        Box::new(RequiredValue::new()),
        Box::new(CommentQuotes::new()),
        Box::new(MixedQuotes::new()),
        Box::new(IndexOption::new()),
        Box::new(PrimaryKeyUnique::new()),
        Box::new(IgnoreWithKeys::new()),
        Box::new(ConflictingPermissions::new()),
        Box::new(ForeignKeyWithoutReferences::new()),
        Box::new(Many2ManyWithForeignKey::new()),
        Box::new(EmbeddedWithColumn::new()),
        Box::new(DualTimestamps::new()),
    ]
}

/// Returns every struct rule, in emission order.
#[must_use]
pub fn all_struct_rules() -> Vec<StructRuleBox> {
    vec![
        Box::new(DuplicateColumn::new()),
        Box::new(MultiplePrimaryKeys::new()),
        Box::new(SharedIndexName::new()),
    ]
}

/// Returns the registry with every built-in rule.
#[must_use]
pub fn default_registry() -> RuleRegistry {
    Preset::Recommended.registry()
}

/// Name, code, severity and description of every built-in rule.
#[must_use]
pub fn rule_catalog() -> Vec<RuleInfo> {
    let tag = all_tag_rules().into_iter().map(|r| RuleInfo {
        name: r.name(),
        code: r.code(),
        severity: r.default_severity(),
        description: r.description(),
    });
    let structs = all_struct_rules().into_iter().map(|r| RuleInfo {
        name: r.name(),
        code: r.code(),
        severity: r.default_severity(),
        description: r.description(),
    });
    let mut rules: Vec<RuleInfo> = tag.chain(structs).collect();
    rules.sort_by_key(|r| r.code);
    rules
}

/// Summary of one built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    /// Kebab-case name.
    pub name: &'static str,
    /// Code, e.g. `GL001`.
    pub code: &'static str,
    /// Default severity.
    pub severity: gormlint_core::Severity,
    /// One-line description.
    pub description: &'static str,
}
