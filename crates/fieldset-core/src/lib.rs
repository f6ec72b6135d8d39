#![forbid(unsafe_code)]

//! Core vocabulary shared by the fieldset crates.
//!
//! This crate is the leaf of the workspace: it defines the types every
//! other crate speaks in — the per-field feedback classification
//! ([`FieldState`], [`Feedback`]), the command stream the engine consumes
//! ([`FieldEvent`]), field values ([`FieldValue`]), and the declarative
//! configuration surface a host attaches to each input ([`FieldConfig`],
//! [`EngineConfig`]).
//!
//! Nothing here touches timers, rules, or masks; those live in the crates
//! layered on top.

pub mod config;
pub mod event;
pub mod state;
pub mod value;

pub use config::{EngineConfig, FieldConfig, FieldKind, MaskFilter, MaskSpec};
pub use event::FieldEvent;
pub use state::{Feedback, FieldState};
pub use value::{FieldValue, FileMeta};
