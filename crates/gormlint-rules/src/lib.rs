//! # gormlint-rules
//!
//! Built-in GORM tag rules for gormlint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | GL001 | `duplicate-key` | Forbids repeating a key in one tag |
//! | GL002 | `unknown-key` | Reports keys GORM does not recognize |
//! | GL003 | `deprecated-key` | Warns on GORM v1 key spellings |
//! | GL004 | `caution-key` | Warns on relationship keys and top-level index options |
//! | GL010 | `numeric-value` | Requires digits-only values for size-like keys |
//! | GL011 | `enum-value` | Restricts enumerated keys to known values |
//! | GL012 | `required-value` | Requires a value for column, type and similar keys |
//! | GL013 | `comment-quotes` | Requires balanced quotes in comments |
//! | GL014 | `mixed-quotes` | Warns on comments mixing quote styles |
//! | GL015 | `index-option` | Validates options inside index declarations |
//! | GL020 | `primary-key-unique` | Forbids `primaryKey` with `unique` |
//! | GL021 | `ignore-with-keys` | Forbids other keys next to `-` |
//! | GL022 | `conflicting-permissions` | Forbids combining `<-`, `->` and `-` |
//! | GL023 | `foreign-key-without-references` | Warns on `foreignKey` alone |
//! | GL024 | `many2many-with-foreign-key` | Forbids `many2many` with `foreignKey`/`references` |
//! | GL025 | `embedded-with-column` | Forbids `column` on an embedded field |
//! | GL026 | `dual-timestamps` | Warns on `autoCreateTime` with `autoUpdateTime` |
//! | GL030 | `duplicate-column` | Forbids two fields with one column name |
//! | GL031 | `multiple-primary-keys` | Reports every field when several carry `primaryKey` |
//! | GL032 | `shared-index-name` | Warns on index names shared between fields |
//!
//! ## Usage
//!
//! ```ignore
//! use gormlint_core::Engine;
//!
//! let engine = Engine::builder()
//!     .registry(gormlint_rules::default_registry())
//!     .build();
//! let report = engine.validate_document(source);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod comment_quotes;
mod dual_timestamps;
mod duplicate_column;
mod duplicate_key;
mod embedded_with_column;
mod enum_value;
mod ignore_with_keys;
mod index_option;
mod key_class;
mod multiple_primary_keys;
mod numeric_value;
mod permissions;
mod presets;
mod primary_key_unique;
mod relationships;
mod required_value;
mod shared_index_name;

#[cfg(test)]
mod test_util;

pub use comment_quotes::{CommentQuotes, MixedQuotes};
pub use dual_timestamps::DualTimestamps;
pub use duplicate_column::DuplicateColumn;
pub use duplicate_key::DuplicateKey;
pub use embedded_with_column::EmbeddedWithColumn;
pub use enum_value::{allowed_values, EnumValue};
pub use ignore_with_keys::IgnoreWithKeys;
pub use index_option::{IndexOption, IndexValue};
pub use key_class::{CautionKey, DeprecatedKey, UnknownKey};
pub use multiple_primary_keys::MultiplePrimaryKeys;
pub use numeric_value::{is_numeric, NumericValue};
pub use permissions::ConflictingPermissions;
pub use presets::{
    all_struct_rules, all_tag_rules, default_registry, rule_catalog, Preset, RuleInfo,
};
pub use primary_key_unique::PrimaryKeyUnique;
pub use relationships::{ForeignKeyWithoutReferences, Many2ManyWithForeignKey};
pub use required_value::RequiredValue;
pub use shared_index_name::SharedIndexName;

/// Re-export core types for convenience.
pub use gormlint_core::{Diagnostic, Severity, StructRule, TagRule};
