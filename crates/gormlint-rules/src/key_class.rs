//! Rules driven by the key catalog.
//!
//! Every entry is classified once against the static catalog:
//!
//! - unknown keys are errors (`GL002`); GORM ignores them silently, so a
//!   typo like `primarykye` just disables the setting
//! - GORM v1 spellings are warnings naming the v2 replacement (`GL003`)
//! - relationship keys and index options used at the top level are
//!   warnings (`GL004`); they are valid but only mean something in context

use gormlint_core::catalog::{self, KeyClass};
use gormlint_core::{Diagnostic, FieldContext, RuleError, SeenKeys, Severity, TagEntry, TagRule};

/// Rule code for unknown-key.
pub const UNKNOWN_CODE: &str = "GL002";
/// Rule name for unknown-key.
pub const UNKNOWN_NAME: &str = "unknown-key";

/// Rule code for deprecated-key.
pub const DEPRECATED_CODE: &str = "GL003";
/// Rule name for deprecated-key.
pub const DEPRECATED_NAME: &str = "deprecated-key";

/// Rule code for caution-key.
pub const CAUTION_CODE: &str = "GL004";
/// Rule name for caution-key.
pub const CAUTION_NAME: &str = "caution-key";

/// Reports keys missing from the catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownKey;

impl UnknownKey {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagRule for UnknownKey {
    fn name(&self) -> &'static str {
        UNKNOWN_NAME
    }

    fn code(&self) -> &'static str {
        UNKNOWN_CODE
    }

    fn description(&self) -> &'static str {
        "Reports keys GORM does not recognize"
    }

    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        _seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        if catalog::classify(&entry.original) != KeyClass::Unknown {
            return Ok(Vec::new());
        }
        Ok(vec![Diagnostic::new(
            UNKNOWN_CODE,
            UNKNOWN_NAME,
            Severity::Error,
            &ctx.scope(),
            format!("unknown key '{}'", entry.original),
        )
        .with_key(&entry.original)])
    }
}

/// Reports GORM v1 keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeprecatedKey;

impl DeprecatedKey {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagRule for DeprecatedKey {
    fn name(&self) -> &'static str {
        DEPRECATED_NAME
    }

    fn code(&self) -> &'static str {
        DEPRECATED_CODE
    }

    fn description(&self) -> &'static str {
        "Warns on GORM v1 key spellings"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        _seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let KeyClass::Deprecated { replacement } = catalog::classify(&entry.original) else {
            return Ok(Vec::new());
        };
        Ok(vec![Diagnostic::new(
            DEPRECATED_CODE,
            DEPRECATED_NAME,
            Severity::Warning,
            &ctx.scope(),
            format!(
                "deprecated key '{}'; use '{replacement}' instead",
                entry.original
            ),
        )
        .with_key(&entry.original)])
    }
}

/// Reports valid keys that only make sense in a narrower context.
#[derive(Debug, Clone, Copy, Default)]
pub struct CautionKey;

impl CautionKey {
    /// Creates a new rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagRule for CautionKey {
    fn name(&self) -> &'static str {
        CAUTION_NAME
    }

    fn code(&self) -> &'static str {
        CAUTION_CODE
    }

    fn description(&self) -> &'static str {
        "Warns on relationship keys and top-level index options"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(
        &self,
        ctx: &FieldContext,
        entry: &TagEntry,
        _seen: &SeenKeys,
    ) -> Result<Vec<Diagnostic>, RuleError> {
        let Some(spec) = catalog::lookup(&entry.original) else {
            return Ok(Vec::new());
        };
        if spec.class != KeyClass::CautionAdvised {
            return Ok(Vec::new());
        }
        Ok(vec![Diagnostic::new(
            CAUTION_CODE,
            CAUTION_NAME,
            Severity::Warning,
            &ctx.scope(),
            format!("'{}' needs care: {}", spec.name, spec.note),
        )
        .with_key(&entry.original)])
    }
}
