//! Shared output formatting for check results.

use anyhow::Result;
use gormlint_core::{LocatedDiagnostic, Severity};
use miette::{GraphicalReportHandler, NamedSource, Report};
use serde::Serialize;
use std::path::PathBuf;

use crate::OutputFormat;

/// Diagnostics for one file.
#[derive(Debug, Serialize)]
pub struct FileResult {
    /// File path.
    pub path: PathBuf,
    /// File contents, for rendering snippets.
    #[serde(skip)]
    pub text: String,
    /// Located diagnostics in emission order.
    pub diagnostics: Vec<LocatedDiagnostic>,
}

/// Result of checking a set of files.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    /// Files with at least one diagnostic.
    pub files: Vec<FileResult>,
    /// Number of files read.
    pub files_checked: usize,
    /// Number of tagged structs validated.
    pub structs_checked: usize,
}

impl CheckResult {
    /// Counts diagnostics by severity as `(errors, warnings)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize) {
        let all = self.files.iter().flat_map(|f| &f.diagnostics);
        let (mut errors, mut warnings) = (0, 0);
        for located in all {
            match located.diagnostic.severity {
                Severity::Error => errors += 1,
                Severity::Warning => warnings += 1,
            }
        }
        (errors, warnings)
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.count_by_severity().0 > 0
    }
}

/// Print check results in the specified format.
pub fn print(result: &CheckResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => return print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &CheckResult) -> Result<()> {
    let handler = GraphicalReportHandler::new();

    for file in &result.files {
        let name = file.path.display().to_string();
        for located in &file.diagnostics {
            let report = Report::new(located.to_report(&file.text))
                .with_source_code(NamedSource::new(&name, file.text.clone()));
            let mut rendered = String::new();
            handler.render_report(&mut rendered, report.as_ref())?;
            println!("{rendered}");
        }
    }

    let (errors, warnings) = result.count_by_severity();
    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s) in {} struct(s) across {} file(s)\x1b[0m",
        summary_color, errors, warnings, result.structs_checked, result.files_checked
    );
    Ok(())
}

fn print_json(result: &CheckResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &CheckResult) {
    for file in &result.files {
        for line in compact_lines(file) {
            println!("{line}");
        }
    }
}

/// `path:line:col: severity [code] Struct.Field: message`, 1-based.
fn compact_lines(file: &FileResult) -> Vec<String> {
    file.diagnostics
        .iter()
        .map(|located| {
            let d = &located.diagnostic;
            format!(
                "{}:{}:{}: {} [{}] {}.{}: {}",
                file.path.display(),
                located.range.start.line + 1,
                located.range.start.character + 1,
                d.severity,
                d.code,
                d.struct_name,
                d.field_name,
                d.message,
            )
        })
        .collect()
}
