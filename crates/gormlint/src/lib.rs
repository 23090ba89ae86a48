//! # gormlint
//!
//! Validator for GORM struct tags in Go source.
//!
//! This is the main facade crate that re-exports the core engine and the
//! built-in rules, plus a [`Linter`] that wires them together.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gormlint::Linter;
//!
//! let linter = Linter::new();
//! let report = linter.validate(source);
//! for d in &report.diagnostics {
//!     println!("{d}");
//! }
//! ```
//!
//! ## Editor Integration
//!
//! [`Linter::publish`] returns capped diagnostics with text ranges, ready
//! to hand to an editor:
//!
//! ```rust,ignore
//! for located in linter.publish(source) {
//!     let r = located.range;
//!     println!("{}:{}-{}:{} {}", r.start.line, r.start.character,
//!         r.end.line, r.end.character, located.diagnostic.message);
//! }
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use gormlint_core::*;

/// Built-in rules and presets.
pub mod rules {
    pub use gormlint_rules::*;
}

mod linter;

pub use linter::Linter;
