#![forbid(unsafe_code)]

//! Field validation controller and form aggregator.
//!
//! The engine consumes a stream of field events, debounces live typing,
//! runs named rules and generic constraints, simulates availability
//! checks with cancelable latency, aggregates whole-form passes into a
//! summary, and autosaves form values to a key-value store.
//!
//! Time is virtual: the host drives it with
//! [`ValidationEngine::advance`], which makes every debounce and
//! staleness behavior deterministic under test.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use fieldset_core::{FieldConfig, FieldEvent, FieldState};
//! use fieldset_engine::ValidationEngine;
//!
//! let mut engine = ValidationEngine::new();
//! engine.add_field("email", FieldConfig::new().with_rule("email").required());
//!
//! engine.apply(FieldEvent::changed("email", "user@example.com"));
//! engine.advance(Duration::from_millis(300)); // debounce elapses
//!
//! assert_eq!(engine.feedback("email").unwrap().state, FieldState::Valid);
//! ```

pub mod autosave;
pub mod checks;
mod engine;
mod form;
pub mod scheduler;

pub use autosave::{AutosaveStore, FileStore, MemoryStore, StorageError, StorageResult, autosave_key};
pub use checks::{CheckKind, EMAIL_ASYNC, TAKEN_EMAILS, TAKEN_USERNAMES, USERNAME_ASYNC};
pub use engine::{PASSWORD_CONFIRM, PASSWORD_STRENGTH, ValidationEngine};
pub use form::{CheckboxGroup, DateRange, FormReport, FormSpec, Summary, ValidationOutcome};
pub use scheduler::{Scheduler, TaskToken};
