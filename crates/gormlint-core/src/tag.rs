//! Tag decoding and entry parsing.
//!
//! A Go struct tag holds space-separated `name:"value"` pairs. [`decode`]
//! pulls out the value under one namespace keyword (e.g. `gorm`) and
//! [`parse_entries`] splits it into ordered `key[:value]` entries.

use crate::catalog;
use crate::model::TagEntry;

/// Separator between entries.
pub const ENTRY_SEPARATOR: char = ';';

/// Separator between a key and its value.
pub const VALUE_SEPARATOR: char = ':';

/// Extracts the segment stored under `namespace` from a raw tag literal.
///
/// Supports `ns:"..."`, `ns:'...'`, and bare `ns:token` forms, plus
/// `ns:\"...\"` as written inside an interpreted Go string. The bare form
/// ends at whitespace, `;`, or the end of the literal. Escapes are left as
/// written. Returns an empty string when no segment matches.
#[must_use]
pub fn decode<'a>(literal: &'a str, namespace: &str) -> &'a str {
    let Some(start) = segment_offset(literal, namespace) else {
        return "";
    };
    let rest = &literal[start..];

    if let Some(body) = rest.strip_prefix("\\\"") {
        return &body[..closing_escaped_quote(body.as_bytes(), 0).unwrap_or(body.len())];
    }

    match rest.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let body = &rest[1..];
            &body[..closing_quote(body.as_bytes(), 0, quote as u8).unwrap_or(body.len())]
        }
        Some(_) => {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == ENTRY_SEPARATOR)
                .unwrap_or(rest.len());
            &rest[..end]
        }
        None => "",
    }
}

/// Byte offset of the value stored under `namespace`, just past `namespace:`.
///
/// Walks the literal pair by pair, so a `namespace:` that appears inside
/// another pair's quoted value is never mistaken for the real one.
#[must_use]
pub fn segment_offset(literal: &str, namespace: &str) -> Option<usize> {
    if namespace.is_empty() {
        return None;
    }
    let bytes = literal.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let name_start = i;
        while i < bytes.len() && !bytes[i].is_ascii_whitespace() && !b":\"'\\".contains(&bytes[i])
        {
            i += 1;
        }
        match bytes.get(i) {
            None => return None,
            Some(b':') => {
                let name = &literal[name_start..i];
                i += 1;
                if name == namespace {
                    return Some(i);
                }
                i = value_end(bytes, i);
            }
            Some(_) => i = value_end(bytes, i),
        }
    }
    None
}

/// End of the pair value starting at `i`.
fn value_end(bytes: &[u8], i: usize) -> usize {
    match bytes.get(i) {
        Some(&quote @ (b'"' | b'\'')) => {
            closing_quote(bytes, i + 1, quote).map_or(bytes.len(), |j| j + 1)
        }
        Some(b'\\') if bytes.get(i + 1) == Some(&b'"') => {
            closing_escaped_quote(bytes, i + 2).map_or(bytes.len(), |j| j + 2)
        }
        _ => {
            let mut end = i;
            while end < bytes.len() && !bytes[end].is_ascii_whitespace() {
                end += 1;
            }
            end
        }
    }
}

/// Index of the first unescaped `quote` at or after `i`.
fn closing_quote(bytes: &[u8], mut i: usize, quote: u8) -> Option<usize> {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            c if c == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Index of the backslash of the closing `\"` at or after `i`.
///
/// `\\` pairs are skipped so an escaped backslash cannot open a delimiter.
fn closing_escaped_quote(bytes: &[u8], mut i: usize) -> Option<usize> {
    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1)) {
            (b'\\', Some(b'"')) => return Some(i),
            (b'\\', Some(_)) => i += 2,
            _ => i += 1,
        }
    }
    None
}

/// Splits a metadata segment into entries, in textual order.
///
/// A `;` preceded by a backslash belongs to the value and does not split.
/// Empty entries are dropped; everything else is kept, including
/// duplicates and entries that are only a key.
#[must_use]
pub fn parse_entries(segment: &str) -> Vec<TagEntry> {
    let mut raw_entries: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut pieces = segment.split(ENTRY_SEPARATOR).peekable();

    while let Some(piece) = pieces.next() {
        current.push_str(piece);
        if pieces.peek().is_some() && current.ends_with('\\') {
            current.pop();
            current.push(ENTRY_SEPARATOR);
            continue;
        }
        raw_entries.push(std::mem::take(&mut current));
    }

    raw_entries
        .iter()
        .map(|raw| raw.trim())
        .filter(|raw| !raw.is_empty())
        .map(parse_entry)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_double_quoted_segment() {
        assert_eq!(
            decode(r#"json:"id" gorm:"primaryKey;size:10""#, "gorm"),
            "primaryKey;size:10"
        );
    }

    #[test]
    fn decodes_single_quoted_segment() {
        assert_eq!(decode("gorm:'column:name' json:\"n\"", "gorm"), "column:name");
    }

    #[test]
    fn decodes_bare_segment() {
        assert_eq!(decode("gorm:primaryKey json:\"id\"", "gorm"), "primaryKey");
        assert_eq!(decode("gorm:index;unique", "gorm"), "index");
        assert_eq!(decode("gorm:-", "gorm"), "-");
    }

    #[test]
    fn escaped_quote_does_not_end_segment() {
        assert_eq!(
            decode(r#"gorm:"comment:say \"hi\"""#, "gorm"),
            r#"comment:say \"hi\""#
        );
    }

    #[test]
    fn requires_namespace_at_pair_boundary() {
        assert_eq!(decode(r#"xgorm:"size:1""#, "gorm"), "");
        assert_eq!(decode(r#"xgorm:"a" gorm:"b""#, "gorm"), "b");
    }

    #[test]
    fn namespace_inside_another_value_is_skipped() {
        assert_eq!(decode(r#"json:"a gorm:x" gorm:"size:abc""#, "gorm"), "size:abc");
        assert_eq!(decode(r#"json:'gorm:x' gorm:"b""#, "gorm"), "b");
        assert_eq!(decode(r#"json:"a gorm:x""#, "gorm"), "");
    }

    #[test]
    fn decodes_interpreted_string_form() {
        assert_eq!(decode(r#"gorm:\"size:10\""#, "gorm"), "size:10");
        assert_eq!(
            decode(r#"json:\"id\" gorm:\"primaryKey;column:id\""#, "gorm"),
            "primaryKey;column:id"
        );
        assert_eq!(decode(r#"gorm:\"size:10"#, "gorm"), "size:10");
    }

    #[test]
    fn missing_namespace_yields_empty() {
        assert_eq!(decode(r#"json:"name""#, "gorm"), "");
        assert_eq!(decode("", "gorm"), "");
        assert_eq!(decode("gorm:", "gorm"), "");
    }

    #[test]
    fn unterminated_quote_takes_rest() {
        assert_eq!(decode(r#"gorm:"size:10"#, "gorm"), "size:10");
    }

    #[test]
    fn parses_entries_in_order_with_duplicates() {
        let entries = parse_entries(" primaryKey ; column:user_id;;COLUMN:x; not null ");
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["primaryKey", "column", "column", "not null"]);
        assert_eq!(entries[1].value, "user_id");
        assert_eq!(entries[2].original, "COLUMN");
        assert!(entries[3].is_flag());
    }

    #[test]
    fn value_keeps_later_separators() {
        let entries = parse_entries("default:'a:b';index:idx,sort:desc");
        assert_eq!(entries[0].value, "'a:b'");
        assert_eq!(entries[1].value, "idx,sort:desc");
    }

    #[test]
    fn escaped_separator_stays_in_value() {
        let entries = parse_entries(r"comment:a\;b;size:10");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].value, "a;b");
        assert_eq!(entries[1].key, "size");

        let entries = parse_entries(r"default:x\");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, r"x\");
    }

    #[test]
    fn unknown_keys_keep_written_casing() {
        let entries = parse_entries("sizee:10;:orphan");
        assert_eq!(entries[0].key, "sizee");
        assert_eq!(entries[1].key, "");
        assert_eq!(entries[1].value, "orphan");
    }
}
