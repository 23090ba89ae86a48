//! Rule traits and the key-dispatched rule registry.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{FieldDecl, StructDecl, TagEntry};
use crate::types::{Diagnostic, Scope, Severity};

/// Error raised by a rule while checking one field.
///
/// The engine turns it into a single field-scoped diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// The rule could not evaluate an entry.
    #[error("rule '{rule}' failed on key '{key}': {message}")]
    Failed {
        /// Rule name.
        rule: &'static str,
        /// Key being checked.
        key: String,
        /// What went wrong.
        message: String,
    },

    /// The rule panicked while evaluating an entry.
    #[error("rule '{rule}' panicked on key '{key}': {message}")]
    Panicked {
        /// Rule name.
        rule: &'static str,
        /// Key being checked.
        key: String,
        /// Panic payload, when it was a string.
        message: String,
    },
}

impl RuleError {
    /// Creates a [`RuleError::Failed`].
    #[must_use]
    pub fn failed(rule: &'static str, entry: &TagEntry, message: impl Into<String>) -> Self {
        Self::Failed {
            rule,
            key: entry.original.clone(),
            message: message.into(),
        }
    }

    /// Creates a [`RuleError::Panicked`] from a caught panic payload.
    #[must_use]
    pub fn panicked(
        rule: &'static str,
        entry: &TagEntry,
        payload: &(dyn std::any::Any + Send),
    ) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        Self::Panicked {
            rule,
            key: entry.original.clone(),
            message,
        }
    }

    /// Key of the entry being checked.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Failed { key, .. } | Self::Panicked { key, .. } => key,
        }
    }
}

/// Keys already processed in the current field, lowercased.
///
/// Lives for one field pass and is dropped when the field completes.
#[derive(Debug, Default)]
pub struct SeenKeys(BTreeSet<String>);

impl SeenKeys {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `key` was already processed.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(&key.to_ascii_lowercase())
    }

    /// Records `key`; returns false if it was already present.
    pub fn insert(&mut self, key: &str) -> bool {
        self.0.insert(key.to_ascii_lowercase())
    }
}

/// Everything a [`TagRule`] may inspect about the field being checked.
#[derive(Debug)]
pub struct FieldContext<'a> {
    /// Owning struct name.
    pub struct_name: &'a str,
    /// The field.
    pub field: &'a FieldDecl,
    /// All entries of the field, in textual order.
    pub entries: &'a [TagEntry],
    keys: BTreeSet<String>,
}

impl<'a> FieldContext<'a> {
    /// Creates a context for one field.
    #[must_use]
    pub fn new(struct_name: &'a str, field: &'a FieldDecl, entries: &'a [TagEntry]) -> Self {
        let keys = entries.iter().map(TagEntry::normalized).collect();
        Self {
            struct_name,
            field,
            entries,
            keys,
        }
    }

    /// Returns true if any entry of the field has `key`.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.keys.contains(&key.to_ascii_lowercase())
    }

    /// Diagnostic scope of this field.
    #[must_use]
    pub fn scope(&self) -> Scope<'a> {
        Scope {
            struct_name: self.struct_name,
            field_name: &self.field.name,
            tag: &self.field.tag,
        }
    }
}

/// A parsed field handed to struct-wide rules.
#[derive(Debug)]
pub struct ParsedField<'a> {
    /// The field.
    pub field: &'a FieldDecl,
    /// Its parsed entries.
    pub entries: Vec<TagEntry>,
}

impl ParsedField<'_> {
    /// Entries whose key matches `key`, case-insensitively.
    pub fn entries_for<'e>(&'e self, key: &'e str) -> impl Iterator<Item = &'e TagEntry> + 'e {
        self.entries
            .iter()
            .filter(move |e| e.original.eq_ignore_ascii_case(key))
    }

    /// Returns true if any entry has `key`.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        self.entries_for(key).next().is_some()
    }
}

/// Everything a [`StructRule`] may inspect.
#[derive(Debug)]
pub struct StructContext<'a> {
    /// The struct.
    pub decl: &'a StructDecl,
    /// Fields in declaration order, with parsed entries.
    pub fields: Vec<ParsedField<'a>>,
}

impl StructContext<'_> {
    /// Diagnostic scope for one of this struct's fields.
    #[must_use]
    pub fn scope<'s>(&'s self, field: &'s FieldDecl) -> Scope<'s> {
        Scope {
            struct_name: &self.decl.name,
            field_name: &field.name,
            tag: &field.tag,
        }
    }
}

/// A per-entry rule, dispatched on the entry's key.
///
/// # Example
///
/// ```ignore
/// use gormlint_core::{Diagnostic, FieldContext, RuleError, SeenKeys, Severity, TagEntry, TagRule};
///
/// pub struct NoCheckConstraints;
///
/// impl TagRule for NoCheckConstraints {
///     fn name(&self) -> &'static str { "no-check-constraints" }
///     fn code(&self) -> &'static str { "X001" }
///     fn keys(&self) -> &'static [&'static str] { &["check"] }
///
///     fn check(&self, ctx: &FieldContext, entry: &TagEntry, _seen: &SeenKeys)
///         -> Result<Vec<Diagnostic>, RuleError>
///     {
///         Ok(vec![Diagnostic::new(self.code(), self.name(), Severity::Warning,
///             &ctx.scope(), "check constraints are not portable").with_key(&entry.original)])
///     }
/// }
/// ```
pub trait TagRule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "duplicate-key").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "GL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for diagnostics from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Keys this rule is dispatched on; an empty slice means every entry.
    fn keys(&self) -> &'static [&'static str] {
        &[]
    }

    /// Checks one entry.
    ///
    /// `seen` holds the keys processed before `entry` in this field.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be evaluated; the engine
    /// reports it as a single diagnostic for the whole field.
    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError>;
}

/// Type alias for boxed `TagRule` trait objects.
pub type TagRuleBox = Box<dyn TagRule>;

/// A rule that runs once per struct after every field has been checked.
pub trait StructRule: Send + Sync {
    /// Returns the kebab-case name of this rule.
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "GL030").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for diagnostics from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks the whole struct.
    fn check_struct(&self, ctx: &StructContext) -> Vec<Diagnostic>;
}

/// Type alias for boxed `StructRule` trait objects.
pub type StructRuleBox = Box<dyn StructRule>;

/// Registered rules, with tag rules indexed by the keys they handle.
///
/// Rules run in registration order. New keys get checks by registering a
/// rule, not by editing the engine.
#[derive(Default)]
pub struct RuleRegistry {
    tag_rules: Vec<TagRuleBox>,
    every_entry: Vec<usize>,
    by_key: BTreeMap<String, Vec<usize>>,
    struct_rules: Vec<StructRuleBox>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tag rule.
    pub fn register<R: TagRule + 'static>(&mut self, rule: R) -> &mut Self {
        self.register_box(Box::new(rule))
    }

    /// Registers a boxed tag rule.
    pub fn register_box(&mut self, rule: TagRuleBox) -> &mut Self {
        let index = self.tag_rules.len();
        let keys = rule.keys();
        if keys.is_empty() {
            self.every_entry.push(index);
        }
        for key in keys {
            self.by_key
                .entry(key.to_ascii_lowercase())
                .or_default()
                .push(index);
        }
        self.tag_rules.push(rule);
        self
    }

    /// Registers a struct rule.
    pub fn register_struct<R: StructRule + 'static>(&mut self, rule: R) -> &mut Self {
        self.register_struct_box(Box::new(rule))
    }

    /// Registers a boxed struct rule.
    pub fn register_struct_box(&mut self, rule: StructRuleBox) -> &mut Self {
        self.struct_rules.push(rule);
        self
    }

    /// Tag rules that apply to `key`, in registration order.
    pub fn rules_for(&self, key: &str) -> impl Iterator<Item = &dyn TagRule> {
        let mut indices = self.every_entry.clone();
        if let Some(keyed) = self.by_key.get(&key.to_ascii_lowercase()) {
            indices.extend(keyed);
        }
        indices.sort_unstable();
        indices.dedup();
        indices.into_iter().map(|i| &*self.tag_rules[i])
    }

    /// All tag rules, in registration order.
    pub fn tag_rules(&self) -> impl Iterator<Item = &dyn TagRule> {
        self.tag_rules.iter().map(|rule| &**rule)
    }

    /// All struct rules, in registration order.
    pub fn struct_rules(&self) -> impl Iterator<Item = &dyn StructRule> {
        self.struct_rules.iter().map(|rule| &**rule)
    }

    /// Total number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tag_rules.len() + self.struct_rules.len()
    }

    /// Returns true if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
