//! Extracted declarations and parsed tag entries.

/// A struct declaration found in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    /// Struct name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDecl>,
}

impl StructDecl {
    /// Creates an empty struct declaration.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Returns true if at least one field carries a tag literal.
    #[must_use]
    pub fn has_tags(&self) -> bool {
        self.fields.iter().any(|f| !f.tag.is_empty())
    }
}

/// One struct member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field name.
    pub name: String,
    /// Declared type, as written.
    pub declared_type: String,
    /// Raw tag literal without its delimiters; empty if absent.
    pub tag: String,
}

impl FieldDecl {
    /// Creates a field declaration.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            tag: tag.into(),
        }
    }
}

/// One `key[:value]` entry of a metadata segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    /// Display casing: the catalog spelling for known keys, else as written.
    pub key: String,
    /// Value after the first `:`; empty for flag-only entries.
    pub value: String,
    /// Key exactly as written (trimmed).
    pub original: String,
}

impl TagEntry {
    /// Lowercased key used for every comparison.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.original.to_ascii_lowercase()
    }

    /// Returns true if the entry has no value.
    #[must_use]
    pub fn is_flag(&self) -> bool {
        self.value.is_empty()
    }
}
