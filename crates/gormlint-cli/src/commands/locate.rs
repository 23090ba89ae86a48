//! Locate command implementation.

use anyhow::{Context, Result};
use gormlint_core::{locate, Config, Range};
use std::path::Path;

/// Runs the locate command.
pub fn run(
    file: &Path,
    struct_name: &str,
    field: &str,
    key: Option<&str>,
    config: &Config,
) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let range = locate(&text, struct_name, field, key, &config.validator.namespace);
    tracing::debug!(?range, "located {struct_name}.{field}");

    println!(
        "{}:{}:{}-{}:{}",
        file.display(),
        range.start.line + 1,
        range.start.character + 1,
        range.end.line + 1,
        range.end.character + 1,
    );
    if let Some(text) = snippet(&text, range) {
        println!("  {text}");
    }
    Ok(())
}

/// Text covered by a single-line range.
fn snippet(text: &str, range: Range) -> Option<String> {
    if range.start.line != range.end.line || range.is_degenerate() {
        return None;
    }
    let line = text.lines().nth(range.start.line)?;
    Some(
        line.chars()
            .skip(range.start.character)
            .take(range.end.character - range.start.character)
            .collect(),
    )
}
