//! Quote checks on `comment` values.
//!
//! The comment ends up inside generated DDL, where an unbalanced quote
//! breaks the migration statement. Quotes preceded by `\` are ignored,
//! and inside a span opened by one quote kind the other kind is text.

use gormlint_core::quotes::QuoteBalance;
use gormlint_core::{Diagnostic, FieldContext, RuleError, SeenKeys, Severity, TagEntry, TagRule};

/// Rule code for comment-quotes.
pub const CODE: &str = "GL013";

/// Rule name for comment-quotes.
pub const NAME: &str = "comment-quotes";

/// Rule code for mixed-quotes.
pub const MIXED_CODE: &str = "GL014";

/// Rule name for mixed-quotes.
pub const MIXED_NAME: &str = "mixed-quotes";

const KEYS: &[&str] = &["comment"];

/// Requires balanced quotes in comment values.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentQuotes;

impl CommentQuotes {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagRule for CommentQuotes {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires balanced quotes in comment values"
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
        let unbalanced = QuoteBalance::scan(&entry.value).unbalanced();
        if unbalanced.is_empty() {
            return Ok(Vec::new());
        }
        let detail = unbalanced
            .iter()
            .map(|(kind, count)| format!("{count} {kind} quote{}", plural(*count)))
            .collect::<Vec<_>>()
            .join(" and ");
        Ok(vec![Diagnostic::new(
            CODE,
            NAME,
            Severity::Error,
            &ctx.scope(),
            format!("unbalanced quotes in comment: found {detail}"),
        )
        .with_key(&entry.original)])
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Warns when a comment value mixes quote styles.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixedQuotes;

impl MixedQuotes {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagRule for MixedQuotes {
    fn name(&self) -> &'static str {
        MIXED_NAME
    }

    fn code(&self) -> &'static str {
        MIXED_CODE
    }

    fn description(&self) -> &'static str {
        "Warns when a comment uses both single and double quotes"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
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
        if !QuoteBalance::scan(&entry.value).is_mixed() {
            return Ok(Vec::new());
        }
        Ok(vec![Diagnostic::new(
            MIXED_CODE,
            MIXED_NAME,
            Severity::Warning,
            &ctx.scope(),
            "comment mixes single and double quotes",
        )
        .with_key(&entry.original)])
    }
}
