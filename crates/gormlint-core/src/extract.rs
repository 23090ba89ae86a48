//! Struct and field extraction from Go source text.
//!
//! This is not a Go parser. A small lexer removes comments and keeps
//! string literals intact, and a scanner picks out `type Name struct { ... }`
//! blocks and splits their bodies into field units. Anything it cannot
//! decompose is skipped rather than reported.

use tracing::debug;

use crate::model::{FieldDecl, StructDecl};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Ident,
    Punct(char),
    RawString,
    String,
    Rune,
    Number,
    Newline,
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
    terminated: bool,
}

impl Token {
    fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    fn is_ident(&self, source: &str, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.text(source) == word
    }

    fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    fn ends_unit(&self) -> bool {
        matches!(self.kind, TokenKind::Newline | TokenKind::Punct(';'))
    }
}

fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let token = |kind, end, terminated| Token {
            kind,
            start,
            end,
            terminated,
        };
        match c {
            '\n' => tokens.push(token(TokenKind::Newline, start + 1, true)),
            c if c.is_whitespace() => {}
            '/' if matches!(chars.peek(), Some((_, '/'))) => {
                while let Some(&(_, next)) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                chars.next();
                let mut saw_newline = false;
                let mut prev = '\0';
                for (i, next) in chars.by_ref() {
                    if next == '\n' {
                        saw_newline = true;
                    }
                    if prev == '*' && next == '/' {
                        if saw_newline {
                            tokens.push(token(TokenKind::Newline, i + 1, true));
                        }
                        break;
                    }
                    prev = next;
                }
            }
            '`' => {
                let mut end = source.len();
                let mut terminated = false;
                for (i, next) in chars.by_ref() {
                    if next == '`' {
                        end = i + 1;
                        terminated = true;
                        break;
                    }
                }
                tokens.push(token(TokenKind::RawString, end, terminated));
            }
            '"' | '\'' => {
                let kind = if c == '"' {
                    TokenKind::String
                } else {
                    TokenKind::Rune
                };
                let mut end = source.len();
                let mut terminated = false;
                let mut escaped = false;
                while let Some(&(i, next)) = chars.peek() {
                    if next == '\n' {
                        end = i;
                        break;
                    }
                    chars.next();
                    if escaped {
                        escaped = false;
                    } else if next == '\\' {
                        escaped = true;
                    } else if next == c {
                        end = i + 1;
                        terminated = true;
                        break;
                    }
                }
                tokens.push(token(kind, end, terminated));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut end = start + c.len_utf8();
                while let Some(&(i, next)) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' {
                        end = i + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(token(TokenKind::Ident, end, true));
            }
            c if c.is_ascii_digit() => {
                let mut end = start + 1;
                while let Some(&(i, next)) = chars.peek() {
                    if next.is_alphanumeric() || next == '.' || next == '_' {
                        end = i + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(token(TokenKind::Number, end, true));
            }
            c => tokens.push(token(TokenKind::Punct(c), start + c.len_utf8(), true)),
        }
    }

    tokens
}

/// Extracts every struct declaration from `source`, in appearance order.
///
/// Structs whose bodies yield no decomposable fields are still returned
/// with an empty field list.
#[must_use]
pub fn extract_structs(source: &str) -> Vec<StructDecl> {
    let tokens = tokenize(source);
    let mut scanner = Scanner {
        source,
        tokens: &tokens,
        structs: Vec::new(),
    };
    scanner.run();
    debug!("Extracted {} struct(s)", scanner.structs.len());
    scanner.structs
}

struct Scanner<'a> {
    source: &'a str,
    tokens: &'a [Token],
    structs: Vec<StructDecl>,
}

impl<'a> Scanner<'a> {
    fn run(&mut self) {
        let mut i = 0;
        while i < self.tokens.len() {
            if !self.tokens[i].is_ident(self.source, "type") {
                i += 1;
                continue;
            }
            i = self.skip_newlines(i + 1);
            match self.tokens.get(i) {
                Some(t) if t.kind == TokenKind::Ident => i = self.type_spec(i),
                Some(t) if t.is_punct('(') => i = self.type_group(i + 1),
                _ => {}
            }
        }
    }

    fn skip_newlines(&self, mut i: usize) -> usize {
        while self.tokens.get(i).is_some_and(|t| t.kind == TokenKind::Newline) {
            i += 1;
        }
        i
    }

    /// Scans `type ( ... )` starting right after the opening paren.
    fn type_group(&mut self, mut i: usize) -> usize {
        while let Some(t) = self.tokens.get(i) {
            if t.is_punct(')') {
                return i + 1;
            }
            if t.kind == TokenKind::Ident {
                i = self.type_spec(i);
                i = self.skip_spec(i);
            } else {
                i += 1;
            }
        }
        i
    }

    /// Handles one `Name [TypeParams] Type` spec starting at the name.
    fn type_spec(&mut self, name_idx: usize) -> usize {
        let name = self.tokens[name_idx].text(self.source);
        let mut i = name_idx + 1;

        if self.tokens.get(i).is_some_and(|t| t.is_punct('[')) {
            i = self.skip_balanced(i);
        }
        if self.tokens.get(i).is_some_and(|t| t.is_punct('=')) {
            i += 1;
        }

        let is_struct = self
            .tokens
            .get(i)
            .is_some_and(|t| t.is_ident(self.source, "struct"))
            && self.tokens.get(i + 1).is_some_and(|t| t.is_punct('{'));
        if !is_struct {
            return i;
        }

        let (units, end) = self.struct_body(i + 1);
        let mut decl = StructDecl::new(name);
        for unit in &units {
            decl.fields.extend(self.decompose(unit));
        }
        debug!("Struct {} has {} field(s)", decl.name, decl.fields.len());
        self.structs.push(decl);
        end
    }

    /// Skips a bracketed group starting at its opening token.
    fn skip_balanced(&self, open: usize) -> usize {
        let mut depth = 0usize;
        let mut i = open;
        while let Some(t) = self.tokens.get(i) {
            match t.kind {
                TokenKind::Punct('(' | '[' | '{') => depth += 1,
                TokenKind::Punct(')' | ']' | '}') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return i + 1;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        i
    }

    /// Skips the rest of a grouped type spec, stopping before the group's `)`.
    fn skip_spec(&self, mut i: usize) -> usize {
        let mut depth = 0usize;
        while let Some(t) = self.tokens.get(i) {
            match t.kind {
                TokenKind::Punct('(' | '[' | '{') => depth += 1,
                TokenKind::Punct(')') if depth == 0 => return i,
                TokenKind::Punct(')' | ']' | '}') => depth = depth.saturating_sub(1),
                TokenKind::Newline | TokenKind::Punct(';') if depth == 0 => return i + 1,
                _ => {}
            }
            i += 1;
        }
        i
    }

    /// Splits a struct body into field units; `open` is the `{` index.
    fn struct_body(&self, open: usize) -> (Vec<Vec<Token>>, usize) {
        let mut units = Vec::new();
        let mut current = Vec::new();
        let mut depth = 1usize;
        let mut i = open + 1;

        while let Some(&t) = self.tokens.get(i) {
            i += 1;
            match t.kind {
                TokenKind::Punct('{' | '(' | '[') => depth += 1,
                TokenKind::Punct('}') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                TokenKind::Punct(')' | ']') if depth > 1 => depth -= 1,
                _ if depth == 1 && t.ends_unit() => {
                    if !current.is_empty() {
                        units.push(std::mem::take(&mut current));
                    }
                    continue;
                }
                _ => {}
            }
            if t.kind != TokenKind::Newline {
                current.push(t);
            }
        }
        if !current.is_empty() {
            units.push(current);
        }
        (units, i)
    }

    /// Turns one field unit into zero or more field declarations.
    fn decompose(&self, unit: &[Token]) -> Vec<FieldDecl> {
        let (rest, tag) = match unit.split_last() {
            Some((last, rest))
                if !rest.is_empty()
                    && matches!(last.kind, TokenKind::RawString | TokenKind::String) =>
            {
                (rest, self.literal_body(last))
            }
            _ => (unit, ""),
        };

        let Some(first) = rest.first() else {
            return Vec::new();
        };

        if first.is_punct('*') || self.is_embedded(rest) {
            let Some(name) = rest
                .iter()
                .take_while(|t| !t.is_punct('['))
                .filter(|t| t.kind == TokenKind::Ident)
                .last()
            else {
                return Vec::new();
            };
            return vec![FieldDecl::new(
                name.text(self.source),
                self.span_text(rest),
                tag,
            )];
        }

        if first.kind != TokenKind::Ident {
            debug!("Skipping malformed field unit: {}", self.span_text(unit));
            return Vec::new();
        }

        let mut names = vec![first.text(self.source)];
        let mut i = 1;
        while i + 1 < rest.len() && rest[i].is_punct(',') && rest[i + 1].kind == TokenKind::Ident
        {
            names.push(rest[i + 1].text(self.source));
            i += 2;
        }

        let type_tokens = &rest[i..];
        if type_tokens.is_empty() || type_tokens[0].is_punct(',') {
            debug!("Skipping field unit without type: {}", self.span_text(unit));
            return Vec::new();
        }

        let declared_type = self.span_text(type_tokens);
        names
            .into_iter()
            .map(|name| FieldDecl::new(name, declared_type.clone(), tag))
            .collect()
    }

    /// `Base`, `pkg.Base`, or `Base[T]` with nothing after it.
    fn is_embedded(&self, rest: &[Token]) -> bool {
        match rest {
            [only] => only.kind == TokenKind::Ident,
            [a, dot, b] => {
                a.kind == TokenKind::Ident && dot.is_punct('.') && b.kind == TokenKind::Ident
            }
            [a, open, ..] if a.kind == TokenKind::Ident && open.is_punct('[') => {
                let end = self.skip_balanced_in(rest, 1);
                end == rest.len()
            }
            _ => false,
        }
    }

    fn skip_balanced_in(&self, tokens: &[Token], open: usize) -> usize {
        let mut depth = 0usize;
        for (i, t) in tokens.iter().enumerate().skip(open) {
            match t.kind {
                TokenKind::Punct('(' | '[' | '{') => depth += 1,
                TokenKind::Punct(')' | ']' | '}') => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return i + 1;
                    }
                }
                _ => {}
            }
        }
        tokens.len()
    }

    fn literal_body(&self, token: &Token) -> &'a str {
        let text = token.text(self.source);
        let inner = &text[1..];
        if token.terminated && !inner.is_empty() {
            &inner[..inner.len() - 1]
        } else {
            inner
        }
    }

    /// Source text covered by `tokens`, whitespace-collapsed.
    fn span_text(&self, tokens: &[Token]) -> String {
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => self.source[first.start..last.end]
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_names(decl: &StructDecl) -> Vec<&str> {
        decl.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn extracts_basic_struct() {
        let src = r#"
package models

type User struct {
    ID    uint   `gorm:"primaryKey"`
    Name  string `json:"name" gorm:"size:64"`
    Email string
}
"#;
        let structs = extract_structs(src);
        assert_eq!(structs.len(), 1);
        assert_eq!(structs[0].name, "User");
        assert_eq!(field_names(&structs[0]), vec!["ID", "Name", "Email"]);
        assert_eq!(structs[0].fields[0].tag, "gorm:\"primaryKey\"");
        assert_eq!(structs[0].fields[1].declared_type, "string");
        assert_eq!(structs[0].fields[2].tag, "");
    }

    #[test]
    fn interpreted_string_tag_decodes_to_segment() {
        let src = "type T struct {\n\tA string \"gorm:\\\"size:10\\\"\"\n}\n";
        let structs = extract_structs(src);
        let tag = &structs[0].fields[0].tag;
        assert_eq!(tag, r#"gorm:\"size:10\""#);
        assert_eq!(crate::tag::decode(tag, "gorm"), "size:10");
    }

    #[test]
    fn extracts_single_line_struct() {
        let src = "type User struct { ID uint `gorm:\"primaryKey;unique\"` }";
        let structs = extract_structs(src);
        assert_eq!(structs.len(), 1);
        assert_eq!(field_names(&structs[0]), vec!["ID"]);
        assert_eq!(structs[0].fields[0].tag, "gorm:\"primaryKey;unique\"");
    }

    #[test]
    fn nested_braces_do_not_close_struct() {
        let src = r#"
type Order struct {
    Meta struct {
        Source string
    } `gorm:"embedded"`
    Items map[string]struct{ N int } `gorm:"serializer:json"`
    Total int `gorm:"not null"`
}
"#;
        let structs = extract_structs(src);
        assert_eq!(structs.len(), 1);
        assert_eq!(field_names(&structs[0]), vec!["Meta", "Items", "Total"]);
        assert_eq!(structs[0].fields[0].tag, "gorm:\"embedded\"");
        assert_eq!(structs[0].fields[0].declared_type, "struct { Source string }");
        assert_eq!(structs[0].fields[2].tag, "gorm:\"not null\"");
    }

    #[test]
    fn comments_and_literals_are_ignored() {
        let src = r#"
// type Fake struct { X int }
/* type Other struct {
   Y int
} */
type Real struct {
    // Hidden int `gorm:"column:x"`
    URL string `gorm:"default:'http://example.com/{id}'"` // trailing { comment
    Count int /* inline */ `gorm:"size:10"`
}
"#;
        let structs = extract_structs(src);
        assert_eq!(structs.len(), 1);
        assert_eq!(structs[0].name, "Real");
        assert_eq!(field_names(&structs[0]), vec!["URL", "Count"]);
        assert_eq!(
            structs[0].fields[0].tag,
            "gorm:\"default:'http://example.com/{id}'\""
        );
    }

    #[test]
    fn grouped_and_generic_declarations() {
        let src = r#"
type (
    ID int64
    Account struct {
        Owner ID `gorm:"index"`
    }
    Handler interface {
        Handle() error
    }
    Page[T any] struct {
        Items []T
    }
)
"#;
        let structs = extract_structs(src);
        let names: Vec<&str> = structs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Account", "Page"]);
        assert_eq!(structs[1].fields[0].declared_type, "[]T");
    }

    #[test]
    fn embedded_and_multi_name_fields() {
        let src = r#"
type Post struct {
    gorm.Model
    *Base `gorm:"embedded;embeddedPrefix:base_"`
    Title, Slug string `gorm:"size:128"`
    Tags [4]string
}
"#;
        let structs = extract_structs(src);
        assert_eq!(
            field_names(&structs[0]),
            vec!["Model", "Base", "Title", "Slug", "Tags"]
        );
        assert_eq!(structs[0].fields[0].declared_type, "gorm.Model");
        assert_eq!(structs[0].fields[1].declared_type, "*Base");
        assert_eq!(structs[0].fields[3].tag, "gorm:\"size:128\"");
        assert_eq!(structs[0].fields[4].declared_type, "[4]string");
    }

    #[test]
    fn malformed_field_is_skipped() {
        let src = "type Broken struct {\n  ) nonsense\n  Good int `gorm:\"size:1\"`\n}";
        let structs = extract_structs(src);
        assert_eq!(field_names(&structs[0]), vec!["Good"]);
    }

    #[test]
    fn undecomposable_struct_keeps_empty_field_list() {
        let structs = extract_structs("type Empty struct {}\ntype Odd struct { ; ) }");
        assert_eq!(structs.len(), 2);
        assert!(structs.iter().all(|s| s.fields.is_empty()));
    }

    #[test]
    fn unterminated_struct_keeps_collected_fields() {
        let structs = extract_structs("type Cut struct {\n  A int `gorm:\"size:1\"`\n  B string");
        assert_eq!(structs.len(), 1);
        assert_eq!(field_names(&structs[0]), vec!["A", "B"]);
    }

    #[test]
    fn non_struct_types_are_ignored() {
        let structs = extract_structs("type Status int\ntype Fn func(a, b int) error\n");
        assert!(structs.is_empty());
    }
}
