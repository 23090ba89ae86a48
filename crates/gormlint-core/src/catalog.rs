//! Static classification of GORM tag keys.
//!
//! Keys are stored lowercased; lookups are case-insensitive. The table is
//! built once and never mutated, so it can be shared across threads.

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Classification tier of a tag key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    /// Current, recommended spelling.
    Recommended,
    /// Valid, but easy to misuse outside its intended context.
    CautionAdvised,
    /// Legacy spelling with a current replacement.
    Deprecated {
        /// Key to use instead.
        replacement: &'static str,
    },
    /// Not part of the vocabulary.
    Unknown,
}

/// Boolean view of a [`KeyClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyClassification {
    /// The key is part of the vocabulary.
    pub valid: bool,
    /// The key is the recommended spelling.
    pub recommended: bool,
}

impl KeyClass {
    /// Returns the boolean classification.
    #[must_use]
    pub fn classification(self) -> KeyClassification {
        KeyClassification {
            valid: !matches!(self, Self::Unknown),
            recommended: matches!(self, Self::Recommended),
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct KeySpec {
    /// Display spelling.
    pub name: &'static str,
    /// Classification tier.
    pub class: KeyClass,
    /// Short description for listings and messages.
    pub note: &'static str,
}

const RECOMMENDED: &[(&str, &str)] = &[
    ("column", "column name"),
    ("type", "column data type"),
    ("serializer", "serializer: json, gob, unixtime"),
    ("size", "column size or length"),
    ("primaryKey", "marks the primary key"),
    ("unique", "unique constraint"),
    ("default", "default value"),
    ("precision", "numeric precision"),
    ("scale", "numeric scale"),
    ("not null", "NOT NULL constraint"),
    ("autoIncrement", "auto increment"),
    ("autoIncrementIncrement", "auto increment step"),
    ("embedded", "embed the field's struct"),
    ("embeddedPrefix", "column prefix for embedded fields"),
    ("autoCreateTime", "track creation time: nano, milli"),
    ("autoUpdateTime", "track update time: nano, milli"),
    ("index", "create an index, optionally named"),
    ("uniqueIndex", "create a unique index, optionally named"),
    ("check", "check constraint"),
    ("<-", "write permission: create, update, false"),
    ("->", "read permission: false"),
    ("-", "ignore the field: all, migration"),
    ("comment", "column comment for migrations"),
    ("constraint", "relationship constraint: OnUpdate, OnDelete"),
];

const CAUTION: &[(&str, &str)] = &[
    ("foreignKey", "relationship key; belongs on association fields"),
    ("references", "relationship key; belongs on association fields"),
    ("polymorphic", "relationship key; belongs on association fields"),
    ("polymorphicValue", "relationship key; belongs on association fields"),
    ("many2many", "relationship key; belongs on association fields"),
    ("joinForeignKey", "relationship key; belongs on association fields"),
    ("joinReferences", "relationship key; belongs on association fields"),
    ("sort", "index option; normally inside index:/uniqueIndex:"),
    ("priority", "index option; normally inside index:/uniqueIndex:"),
    ("length", "index option; normally inside index:/uniqueIndex:"),
    ("class", "index option; normally inside index:/uniqueIndex:"),
    ("option", "index option; normally inside index:/uniqueIndex:"),
    ("where", "index option; normally inside index:/uniqueIndex:"),
    ("expression", "index option; normally inside index:/uniqueIndex:"),
    ("composite", "index option; normally inside index:/uniqueIndex:"),
];

const DEPRECATED: &[(&str, &str)] = &[
    ("primary_key", "primaryKey"),
    ("auto_increment", "autoIncrement"),
    ("unique_index", "uniqueIndex"),
    ("not_null", "not null"),
    ("embedded_prefix", "embeddedPrefix"),
    ("association_foreignkey", "references"),
    ("association_autoupdate", "constraint"),
    ("association_autocreate", "constraint"),
    ("association_save_reference", "constraint"),
    ("save_associations", "constraint"),
    ("jointable_foreignkey", "joinForeignKey"),
    ("association_jointable_foreignkey", "joinReferences"),
    ("preload", "Preload() at query time"),
    ("polymorphic_value", "polymorphicValue"),
];

static CATALOG: LazyLock<BTreeMap<String, KeySpec>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    for &(name, note) in RECOMMENDED {
        map.insert(
            name.to_ascii_lowercase(),
            KeySpec {
                name,
                class: KeyClass::Recommended,
                note,
            },
        );
    }
    for &(name, note) in CAUTION {
        map.insert(
            name.to_ascii_lowercase(),
            KeySpec {
                name,
                class: KeyClass::CautionAdvised,
                note,
            },
        );
    }
    for &(name, replacement) in DEPRECATED {
        map.insert(
            name.to_ascii_lowercase(),
            KeySpec {
                name,
                class: KeyClass::Deprecated { replacement },
                note: "GORM v1 spelling",
            },
        );
    }
    map
});

/// Looks up a key, case-insensitively.
#[must_use]
pub fn lookup(key: &str) -> Option<&'static KeySpec> {
    CATALOG.get(&key.trim().to_ascii_lowercase())
}

/// Classifies a key; absent keys are [`KeyClass::Unknown`].
#[must_use]
pub fn classify(key: &str) -> KeyClass {
    lookup(key).map_or(KeyClass::Unknown, |spec| spec.class)
}

/// Iterates the catalog in lowercase-key order.
pub fn entries() -> impl Iterator<Item = &'static KeySpec> {
    CATALOG.values()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("PRIMARYKEY").map(|s| s.name), Some("primaryKey"));
        assert_eq!(lookup(" Not Null ").map(|s| s.name), Some("not null"));
    }

    #[test]
    fn classifies_each_tier() {
        assert_eq!(classify("column"), KeyClass::Recommended);
        assert_eq!(classify("foreignKey"), KeyClass::CautionAdvised);
        assert_eq!(
            classify("primary_key"),
            KeyClass::Deprecated {
                replacement: "primaryKey"
            }
        );
        assert_eq!(classify("colum"), KeyClass::Unknown);
    }

    #[test]
    fn boolean_view() {
        let c = classify("unique").classification();
        assert!(c.valid && c.recommended);
        let c = classify("many2many").classification();
        assert!(c.valid && !c.recommended);
        let c = classify("bogus").classification();
        assert!(!c.valid && !c.recommended);
    }

    #[test]
    fn no_key_is_registered_twice() {
        let total = RECOMMENDED.len() + CAUTION.len() + DEPRECATED.len();
        assert_eq!(entries().count(), total);
    }
}
