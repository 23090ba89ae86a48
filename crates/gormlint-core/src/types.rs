//! Core types for tag diagnostics and results.

use serde::{Deserialize, Serialize};

/// Severity level for tag diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning that should be reviewed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A problem found in one field's struct tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Rule code (e.g., "GL001").
    pub code: String,
    /// Rule name (e.g., "duplicate-key").
    pub rule: String,
    /// Struct that owns the field.
    pub struct_name: String,
    /// Field the diagnostic is attributed to.
    pub field_name: String,
    /// Raw tag literal of the field, as written.
    pub tag: String,
    /// Human-readable message.
    pub message: String,
    /// Severity of this diagnostic.
    pub severity: Severity,
    /// Offending key, with its original casing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Diagnostic {
    /// Creates a new diagnostic without an offending key.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        scope: &Scope<'_>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            struct_name: scope.struct_name.to_string(),
            field_name: scope.field_name.to_string(),
            tag: scope.tag.to_string(),
            message: message.into(),
            severity,
            key: None,
        }
    }

    /// Attaches the offending key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Formats the diagnostic for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!(
            "{} {} at {}.{}\n",
            self.code, self.rule, self.struct_name, self.field_name,
        );
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if !self.tag.is_empty() {
            let _ = writeln!(output, "  = tag: `{}`", self.tag);
        }
        output
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}: {} [{}] {}",
            self.struct_name, self.field_name, self.severity, self.code, self.message
        )
    }
}

/// The struct/field/tag triple a diagnostic is scoped to.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    /// Struct name.
    pub struct_name: &'a str,
    /// Field name.
    pub field_name: &'a str,
    /// Raw tag literal.
    pub tag: &'a str,
}

/// Result of validating one or more documents.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Report {
    /// All diagnostics, in emission order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of structs that carried at least one tag.
    pub structs_checked: usize,
}

impl Report {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns diagnostics filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    /// Counts diagnostics by severity as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let errors = self
            .diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        (errors, self.diagnostics.len() - errors)
    }

    /// Keeps only the first `cap` diagnostics.
    pub fn truncate(&mut self, cap: usize) {
        self.diagnostics.truncate(cap);
    }

    /// Adds diagnostics from another report.
    pub fn extend(&mut self, other: Self) {
        self.diagnostics.extend(other.diagnostics);
        self.structs_checked += other.structs_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_diagnostic(severity: Severity) -> Diagnostic {
        let scope = Scope {
            struct_name: "User",
            field_name: "Name",
            tag: "gorm:\"size:abc\"",
        };
        Diagnostic::new("GL010", "numeric-value", severity, &scope, "bad size")
    }

    #[test]
    fn new_diagnostic_has_no_key() {
        assert!(make_diagnostic(Severity::Error).key.is_none());
    }

    #[test]
    fn with_key_sets_value() {
        let d = make_diagnostic(Severity::Error).with_key("size");
        assert_eq!(d.key.as_deref(), Some("size"));
    }

    #[test]
    fn format_includes_tag() {
        let formatted = make_diagnostic(Severity::Error).format();
        assert!(formatted.contains("GL010 numeric-value at User.Name"));
        assert!(formatted.contains("= tag: `gorm:\"size:abc\"`"));
    }

    #[test]
    fn display_is_one_line() {
        let display = format!("{}", make_diagnostic(Severity::Warning));
        assert_eq!(display, "User.Name: warning [GL010] bad size");
    }

    #[test]
    fn count_and_truncate() {
        let mut report = Report::new();
        report.diagnostics.push(make_diagnostic(Severity::Warning));
        report.diagnostics.push(make_diagnostic(Severity::Error));
        report.diagnostics.push(make_diagnostic(Severity::Error));
        assert_eq!(report.count_by_severity(), (2, 1));
        assert!(report.has_errors());

        report.truncate(1);
        assert_eq!(report.diagnostics.len(), 1);
        assert!(!report.has_errors());
    }

    #[test]
    fn key_is_omitted_from_json_when_absent() {
        let json = serde_json::to_string(&make_diagnostic(Severity::Error)).unwrap();
        assert!(!json.contains("\"key\""));
        assert!(json.contains("\"severity\":\"error\""));
    }
}
