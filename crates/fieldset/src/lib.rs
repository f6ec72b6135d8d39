#![forbid(unsafe_code)]

//! Fieldset public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use fieldset::prelude::*;
//!
//! let mut engine = ValidationEngine::new();
//! engine.add_field(
//!     "card",
//!     FieldConfig::new()
//!         .with_rule("creditCard")
//!         .with_mask(MaskSpec::digits("9999 9999 9999 9999"))
//!         .required(),
//! );
//!
//! engine.apply(FieldEvent::changed("card", "4532015112830366"));
//! engine.advance(Duration::from_millis(300));
//!
//! assert_eq!(engine.feedback("card").unwrap().state, FieldState::Valid);
//! assert_eq!(
//!     engine.value("card").unwrap().as_text(),
//!     Some("4532 0151 1283 0366"),
//! );
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use fieldset_core::{
    EngineConfig, Feedback, FieldConfig, FieldEvent, FieldKind, FieldState, FieldValue, FileMeta,
    MaskFilter, MaskSpec,
};

// --- Rule re-exports -------------------------------------------------------

pub use fieldset_rules::{RuleFn, RuleRegistry, builtin, default_message, id as rule_id};

// --- Mask re-exports -------------------------------------------------------

pub use fieldset_mask::{BUILTIN_MASKS, BuiltinMask, Completeness, MaskPattern, PLACEHOLDER};

// --- Engine re-exports -----------------------------------------------------

pub use fieldset_engine::{
    AutosaveStore, CheckKind, CheckboxGroup, DateRange, FileStore, FormReport, FormSpec,
    MemoryStore, PASSWORD_CONFIRM, PASSWORD_STRENGTH, Scheduler, StorageError, Summary, TaskToken,
    ValidationEngine, ValidationOutcome,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for fieldset hosts.
#[derive(Debug)]
pub enum Error {
    /// Autosave storage failure.
    Storage(StorageError),
    /// Configuration or usage error with message.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Config(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Config(_) => None,
        }
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

/// Standard result type for fieldset APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Completeness, EngineConfig, Error, Feedback, FieldConfig, FieldEvent, FieldKind,
        FieldState, FieldValue, FormReport, FormSpec, MaskPattern, MaskSpec, Result, RuleRegistry,
        Summary, ValidationEngine,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_and_source() {
        let err = Error::Config("bad setup".into());
        assert_eq!(err.to_string(), "bad setup");

        let err = Error::from(StorageError::Corruption("oops".into()));
        assert!(err.to_string().contains("oops"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn facade_exposes_the_core_surface() {
        // Rule table, mask table and engine are all reachable.
        let registry = RuleRegistry::with_builtins();
        assert!(registry.contains(rule_id::CREDIT_CARD));
        assert!(MaskPattern::builtin("phone").is_some());
        let engine = ValidationEngine::new();
        assert_eq!(engine.config().password_min_length, 8);
    }
}
