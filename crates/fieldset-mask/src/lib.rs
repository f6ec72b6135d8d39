#![forbid(unsafe_code)]

//! Template-driven input masking.
//!
//! A mask is a template string where `'9'` marks a slot that accepts one
//! input character and every other character is a literal separator
//! inserted automatically. Formatting is a single left-to-right rebuild:
//! the typed text is filtered down to the characters the mask consumes,
//! then poured back through the template.
//!
//! # Example
//!
//! ```rust
//! use fieldset_mask::MaskPattern;
//!
//! let phone = MaskPattern::builtin("phone").unwrap();
//! assert_eq!(phone.apply("5551234567"), "(555) 123-4567");
//!
//! // Formatting is stable: reapplying changes nothing.
//! assert_eq!(phone.apply("(555) 123-4567"), "(555) 123-4567");
//! ```

mod pattern;
mod transform;

pub use pattern::{BUILTIN_MASKS, BuiltinMask, MaskPattern, PLACEHOLDER};
pub use transform::{Completeness, PARTIAL_FRACTION};
