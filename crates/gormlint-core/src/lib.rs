//! # gormlint-core
//!
//! Core framework for validating GORM struct tags in Go source text.
//!
//! This crate provides the pipeline that every rule plugs into:
//!
//! - [`extract_structs`] pulls struct declarations and their raw tag literals
//!   out of a document without a full Go parser
//! - [`tag::decode`] and [`tag::parse_entries`] isolate the namespace segment
//!   and split it into key/value entries
//! - [`TagRule`] and [`StructRule`] are the extension points, collected in a
//!   [`RuleRegistry`] keyed by tag key
//! - [`Engine`] runs the registry over a document and produces a [`Report`]
//! - [`locate`] and [`publish`] map diagnostics back to text ranges
//!
//! ## Example
//!
//! ```ignore
//! use gormlint_core::{Engine, RuleRegistry};
//!
//! let mut registry = RuleRegistry::new();
//! registry.register(MyRule::new());
//!
//! let engine = Engine::builder().registry(registry).build();
//! let report = engine.validate_document(source);
//! for d in &report.diagnostics {
//!     println!("{d}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod extract;
mod locate;
mod model;
mod rule;
mod types;

/// Static classification of tag keys.
pub mod catalog;
/// Quote balance scanning for free-text values.
pub mod quotes;
/// Tag literal decoding and entry parsing.
pub mod tag;

pub use catalog::{KeyClass, KeyClassification, KeySpec};
pub use config::{
    Config, ConfigError, RuleConfig, ValidatorConfig, DEFAULT_MAX_DIAGNOSTICS, DEFAULT_NAMESPACE,
};
pub use engine::{Engine, EngineBuilder, RULE_FAILURE_CODE, RULE_FAILURE_NAME};
pub use extract::extract_structs;
pub use locate::{locate, publish, LocatedDiagnostic, Position, Range, TagReport};
pub use model::{FieldDecl, StructDecl, TagEntry};
pub use rule::{
    FieldContext, ParsedField, RuleError, RuleRegistry, SeenKeys, StructContext, StructRule,
    StructRuleBox, TagRule, TagRuleBox,
};
pub use quotes::{QuoteBalance, QuoteKind};
pub use types::{Diagnostic, Report, Scope, Severity};
