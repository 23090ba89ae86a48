//! Check command implementation.

use anyhow::{Context, Result};
use gormlint_core::{publish, Config, Engine, RuleRegistry};
use gormlint_rules::Preset;
use std::path::{Path, PathBuf};

use super::output::{CheckResult, FileResult};
use crate::OutputFormat;

/// Options for the check command.
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Preset supplying the rules.
    pub preset: Preset,
    /// Comma-separated rule names or codes to keep.
    pub rules: Option<String>,
}

/// Runs the check command with an already resolved configuration.
pub fn run(paths: &[PathBuf], options: &CheckOptions, config: Config) -> Result<()> {
    let exclude = config.validator.exclude.clone();

    let registry = match &options.rules {
        Some(filter) => {
            let names: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_rules(options.preset, &names)
        }
        None => options.preset.registry(),
    };

    let namespace = config.validator.namespace.clone();
    let cap = config.validator.max_diagnostics;
    let engine = Engine::builder().registry(registry).config(config).build();

    let files = discover_files(paths, &exclude)?;
    tracing::info!(
        "Checking {} file(s) with {} rules",
        files.len(),
        engine.rule_count()
    );

    let mut result = CheckResult::default();
    for path in files {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let report = engine.validate_document(&text);
        result.structs_checked += report.structs_checked;
        result.files_checked += 1;
        if report.diagnostics.is_empty() {
            continue;
        }
        let diagnostics = publish(&text, &report.diagnostics, cap, &namespace);
        result.files.push(FileResult {
            path,
            text,
            diagnostics,
        });
    }

    super::output::print(&result, options.format)?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Keeps the preset's rules whose name or code is listed.
fn filter_rules(preset: Preset, names: &[&str]) -> RuleRegistry {
    let wanted = |name: &str, code: &str| {
        names
            .iter()
            .any(|n| n.eq_ignore_ascii_case(name) || n.eq_ignore_ascii_case(code))
    };

    let mut registry = RuleRegistry::new();
    for rule in preset.tag_rules() {
        if wanted(rule.name(), rule.code()) {
            registry.register_box(rule);
        }
    }
    for rule in preset.struct_rules() {
        if wanted(rule.name(), rule.code()) {
            registry.register_struct_box(rule);
        }
    }

    let known: Vec<_> = gormlint_rules::rule_catalog();
    for name in names {
        if !known
            .iter()
            .any(|r| r.name.eq_ignore_ascii_case(name) || r.code.eq_ignore_ascii_case(name))
        {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    registry
}

/// Collects `.go` files under `paths`, honoring `.gitignore` and `exclude`.
fn discover_files(paths: &[PathBuf], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let patterns: Vec<glob::Pattern> = exclude
        .iter()
        .filter_map(|p| match glob::Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                tracing::warn!("Ignoring invalid exclude pattern {}: {}", p, e);
                None
            }
        })
        .collect();

    let mut files = Vec::new();
    for root in paths {
        if root.is_file() {
            files.push(root.clone());
            continue;
        }

        let mut builder = ignore::WalkBuilder::new(root);
        builder.hidden(false).git_ignore(true);

        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("go") {
                continue;
            }
            if is_excluded(path, root, &patterns) {
                tracing::debug!("Excluding: {}", path.display());
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn is_excluded(path: &Path, root: &Path, patterns: &[glob::Pattern]) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path);
    patterns
        .iter()
        .any(|p| p.matches_path(path) || p.matches_path(rel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn discovers_go_files_and_skips_excluded() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("models")).unwrap();
        fs::create_dir_all(tmp.path().join("vendor/lib")).unwrap();
        fs::write(tmp.path().join("models/user.go"), "package models").unwrap();
        fs::write(tmp.path().join("models/notes.txt"), "").unwrap();
        fs::write(tmp.path().join("vendor/lib/lib.go"), "package lib").unwrap();

        let files = discover_files(
            &[tmp.path().to_path_buf()],
            &["**/vendor/**".to_string()],
        )
        .unwrap();
        assert_eq!(files, vec![tmp.path().join("models/user.go")]);
    }

    #[test]
    fn explicit_file_is_kept() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.go");
        fs::write(&file, "package a").unwrap();

        let files = discover_files(&[file.clone()], &[]).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn filter_by_name_or_code() {
        let registry = filter_rules(Preset::Recommended, &["duplicate-key", "GL030"]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.struct_rules().count(), 1);
    }
}
