//! Best-effort mapping from a diagnostic back to a text range.
//!
//! Extraction keeps no source offsets, so ranges are recovered by searching
//! the text again: find the struct's declaration line, then the first line
//! in its body that starts with the field name, then the key after the
//! namespace keyword. This is approximate. A field whose name prefixes an
//! earlier line's identifier, or a key that also occurs inside another
//! key, can resolve to the wrong spot.

use miette::{LabeledSpan, SourceSpan};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, KeyClass};
use crate::tag;
use crate::types::{Diagnostic, Severity};

/// Zero-based line and character column (Unicode scalar values).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line index.
    pub line: usize,
    /// Column index within the line.
    pub character: usize,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// Half-open range between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Start position.
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
}

impl Range {
    /// Creates a range.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    fn on_line(line: usize, text: &str, byte_start: usize, byte_len: usize) -> Self {
        let start = text[..byte_start].chars().count();
        let len = text[byte_start..byte_start + byte_len].chars().count();
        Self::new(Position::new(line, start), Position::new(line, start + len))
    }

    /// Returns true if the range is zero-width or ends before it starts.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }
}

/// Resolves the range to highlight for a struct/field/key triple.
///
/// Never fails: falls back to the struct name, then to the document start.
#[must_use]
pub fn locate(
    text: &str,
    struct_name: &str,
    field_name: &str,
    key: Option<&str>,
    namespace: &str,
) -> Range {
    let lines: Vec<&str> = text.lines().collect();

    let Some((decl_line, name_at)) = lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| declaration_name_offset(line, struct_name).map(|at| (i, at)))
    else {
        return Range::default();
    };

    let key = key.filter(|k| !k.is_empty());
    if let Some(range) = find_field(&lines, decl_line, field_name, key, namespace) {
        return range;
    }

    Range::on_line(decl_line, lines[decl_line], name_at, struct_name.len())
}

/// Byte offset of `name` if `line` declares `name` as a struct.
fn declaration_name_offset(line: &str, name: &str) -> Option<usize> {
    if name.is_empty() || !line.contains("struct") {
        return None;
    }
    let trimmed = line.trim_start();
    let indent = line.len() - trimmed.len();
    let (rest, skipped) = match trimmed.strip_prefix("type") {
        Some(after) if after.starts_with(char::is_whitespace) => {
            let body = after.trim_start();
            (body, trimmed.len() - body.len())
        }
        _ => (trimmed, 0),
    };
    let after_name = rest.strip_prefix(name)?;
    let boundary = after_name
        .chars()
        .next()
        .is_some_and(|c| c.is_whitespace() || c == '[');
    boundary.then_some(indent + skipped)
}

fn find_field(
    lines: &[&str],
    decl_line: usize,
    field_name: &str,
    key: Option<&str>,
    namespace: &str,
) -> Option<Range> {
    if field_name.is_empty() {
        return None;
    }

    let decl = lines[decl_line];
    let mut depth = brace_delta(decl);
    if let Some(open) = decl.find('{') {
        let body_start = open + 1;
        let body = &decl[body_start..];
        let lead = body.len() - body.trim_start().len();
        if let Some(range) = match_field(decl, body_start + lead, decl_line, field_name, key, namespace)
        {
            return Some(range);
        }
        if depth <= 0 {
            return None;
        }
    }

    for (i, line) in lines.iter().enumerate().skip(decl_line + 1) {
        let lead = line.len() - line.trim_start().len();
        if let Some(range) = match_field(line, lead, i, field_name, key, namespace) {
            return Some(range);
        }
        depth += brace_delta(line);
        if depth <= 0 {
            return None;
        }
    }
    None
}

/// Matches a field whose name starts at byte `at` of `line`.
fn match_field(
    line: &str,
    at: usize,
    line_no: usize,
    field_name: &str,
    key: Option<&str>,
    namespace: &str,
) -> Option<Range> {
    let after = line[at..].strip_prefix(field_name)?;
    if after
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
    {
        return None;
    }

    if let Some(key) = key {
        let segment = line[at..].find(['`', '"']).and_then(|open| {
            let literal = at + open + 1;
            tag::segment_offset(&line[literal..], namespace).map(|offset| literal + offset)
        });
        if let Some(search_from) = segment {
            if let Some(found) = find_key(&line[search_from..], key) {
                return Some(Range::on_line(line_no, line, search_from + found, key.len()));
            }
        }
    }

    Some(Range::on_line(line_no, line, at, field_name.len()))
}

/// Finds `key` in a tag segment, preferring an occurrence that is a whole entry key.
fn find_key(haystack: &str, key: &str) -> Option<usize> {
    let is_start = |c: char| matches!(c, '"' | '\'' | ';') || c.is_whitespace();
    let is_end = |c: char| matches!(c, ':' | ';' | '"' | '\'') || c.is_whitespace();

    let anchored = haystack.match_indices(key).map(|(i, _)| i).find(|&i| {
        let before = haystack[..i].chars().next_back().map_or(true, is_start);
        let after = haystack[i + key.len()..].chars().next().map_or(true, is_end);
        before && after
    });
    if anchored.is_some() {
        return anchored;
    }
    if let Some(i) = haystack.find(key) {
        return Some(i);
    }
    haystack
        .to_ascii_lowercase()
        .find(&key.to_ascii_lowercase())
}

/// Net `{` minus `}` outside literals and line comments.
fn brace_delta(line: &str) -> i64 {
    let mut delta = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut prev = '\0';
    for c in line.chars() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if c == '\\' && q == '"' {
                    escaped = true;
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '/' if prev == '/' => break,
                '`' | '"' => quote = Some(c),
                '{' => delta += 1,
                '}' => delta -= 1,
                _ => {}
            },
        }
        prev = c;
    }
    delta
}

/// A diagnostic with the range it should be shown at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatedDiagnostic {
    /// The diagnostic.
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
    /// Where to show it.
    pub range: Range,
}

impl LocatedDiagnostic {
    /// Converts to a miette report labelled at this diagnostic's range in `text`.
    #[must_use]
    pub fn to_report(&self, text: &str) -> TagReport {
        let start = byte_offset(text, self.range.start);
        let end = byte_offset(text, self.range.end).max(start);
        TagReport {
            message: format!(
                "{}.{}: {}",
                self.diagnostic.struct_name, self.diagnostic.field_name, self.diagnostic.message
            ),
            code: self.diagnostic.code.clone(),
            severity: match self.diagnostic.severity {
                Severity::Error => miette::Severity::Error,
                Severity::Warning => miette::Severity::Warning,
            },
            help: self.diagnostic.key.as_deref().and_then(key_help),
            span: SourceSpan::from((start, end - start)),
            label: self.diagnostic.rule.clone(),
        }
    }
}

fn key_help(key: &str) -> Option<String> {
    let spec = catalog::lookup(key)?;
    match spec.class {
        KeyClass::Deprecated { replacement } => Some(format!("use `{replacement}` instead")),
        _ => Some(format!("`{}`: {}", spec.name, spec.note)),
    }
}

/// A located diagnostic rendered through miette.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct TagReport {
    message: String,
    code: String,
    severity: miette::Severity,
    help: Option<String>,
    span: SourceSpan,
    label: String,
}

impl miette::Diagnostic for TagReport {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.label.clone()),
            self.span,
        ))))
    }
}

/// Byte offset of `pos` in `text`, clamped to the line's end.
fn byte_offset(text: &str, pos: Position) -> usize {
    let mut offset = 0;
    for (i, line) in text.split_inclusive('\n').enumerate() {
        if i == pos.line {
            let content = line.trim_end_matches(['\n', '\r']);
            let within = content
                .char_indices()
                .nth(pos.character)
                .map_or(content.len(), |(b, _)| b);
            return offset + within;
        }
        offset += line.len();
    }
    offset
}

/// Resolves ranges for the first `cap` diagnostics.
///
/// A degenerate range is replaced by one starting at the resolved start
/// and spanning the field name plus one character.
#[must_use]
pub fn publish(
    text: &str,
    diagnostics: &[Diagnostic],
    cap: usize,
    namespace: &str,
) -> Vec<LocatedDiagnostic> {
    diagnostics
        .iter()
        .take(cap)
        .map(|d| {
            let mut range = locate(
                text,
                &d.struct_name,
                &d.field_name,
                d.key.as_deref(),
                namespace,
            );
            if range.is_degenerate() {
                let width = d.field_name.chars().count() + 1;
                range = Range::new(
                    range.start,
                    Position::new(range.start.line, range.start.character + width),
                );
            }
            LocatedDiagnostic {
                diagnostic: d.clone(),
                range,
            }
        })
        .collect()
}
