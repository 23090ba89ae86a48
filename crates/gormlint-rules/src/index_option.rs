//! Rule validating options inside `index:` and `uniqueIndex:` values.
//!
//! An index value is `[name][,option...]` where options are `key:value`
//! pairs such as `sort:desc`, `priority:2` or `length:10`. Only options
//! with a fixed format are checked; free-form ones like `where:` or
//! `expression:` pass through.

use gormlint_core::{Diagnostic, FieldContext, RuleError, SeenKeys, Severity, TagEntry, TagRule};

use crate::numeric_value::is_numeric;

/// Rule code for index-option.
pub const CODE: &str = "GL015";

/// Rule name for index-option.
pub const NAME: &str = "index-option";

/// Keys whose value is an index declaration.
pub const INDEX_KEYS: &[&str] = &["index", "uniqueIndex"];

/// A parsed index declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexValue<'a> {
    /// Explicit index name, if given.
    pub name: Option<&'a str>,
    /// Options in order, as `(key, value)`; bare options have an empty value.
    pub options: Vec<(&'a str, &'a str)>,
}

impl<'a> IndexValue<'a> {
    /// Parses an index value.
    ///
    /// The first comma-separated segment is the name unless it contains `:`.
    #[must_use]
    pub fn parse(value: &'a str) -> Self {
        let mut segments = value.split(',').map(str::trim);
        let mut name = None;
        let mut options = Vec::new();

        if let Some(first) = segments.next() {
            if first.contains(':') {
                options.push(split_option(first));
            } else if !first.is_empty() {
                name = Some(first);
            }
        }
        options.extend(segments.filter(|s| !s.is_empty()).map(split_option));

        Self { name, options }
    }
}

fn split_option(segment: &str) -> (&str, &str) {
    match segment.split_once(':') {
        Some((key, value)) => (key.trim(), value.trim()),
        None => (segment, ""),
    }
}

/// Validates `sort`, `priority` and `length` index options.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexOption;

impl IndexOption {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagRule for IndexOption {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Validates sort, priority and length options of index declarations"
    }

    fn keys(&self) -> &'static [&'static str] {
        INDEX_KEYS
    }

    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        _seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let index = IndexValue::parse(&entry.value);
        tracing::trace!(name = ?index.name, options = index.options.len(), "parsed index value");
        let mut diagnostics = Vec::new();

        for (option, value) in index.options {
            let problem = match option.to_ascii_lowercase().as_str() {
                "sort" if !["asc", "desc"].iter().any(|v| v.eq_ignore_ascii_case(value)) => {
                    Some("expected asc or desc")
                }
                "priority" | "length" if !is_numeric(value) => {
                    Some("expected a non-negative integer")
                }
                _ => None,
            };
            if let Some(problem) = problem {
                diagnostics.push(
                    Diagnostic::new(
                        CODE,
                        NAME,
                        Severity::Error,
                        &ctx.scope(),
                        format!(
                            "invalid {} option {option} '{value}': {problem}",
                            entry.key
                        ),
                    )
                    .with_key(&entry.original),
                );
            }
        }

        Ok(diagnostics)
    }
}
