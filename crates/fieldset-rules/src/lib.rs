#![forbid(unsafe_code)]

//! Rule registry and built-in validation predicates.
//!
//! A rule is a named, pure predicate over a string: total (never panics),
//! deterministic, and order-independent. The built-in table covers the
//! common formats (email, phones, postal codes, payment cards, dates,
//! times, IP addresses, character classes, passwords); hosts extend it at
//! runtime through [`RuleRegistry::register`].
//!
//! # Example
//!
//! ```rust
//! use fieldset_rules::RuleRegistry;
//!
//! let mut registry = RuleRegistry::with_builtins();
//! assert_eq!(registry.evaluate("email", "user@example.com"), Some(true));
//! assert_eq!(registry.evaluate("creditCard", "4532015112830366"), Some(true));
//!
//! // Unknown identifiers report None so callers can fall back to
//! // generic constraints.
//! assert_eq!(registry.evaluate("no-such-rule", "x"), None);
//!
//! registry.register("even-length", |v| v.len() % 2 == 0);
//! assert_eq!(registry.evaluate("even-length", "ab"), Some(true));
//! ```

pub mod builtin;
mod messages;
mod registry;

pub use messages::default_message;
pub use registry::{RuleFn, RuleRegistry};

/// Identifiers of the built-in rules, as used on the configuration
/// surface. The strings are the wire names hosts declare on inputs.
pub mod id {
    pub const REQUIRED: &str = "required";
    pub const EMAIL: &str = "email";
    pub const EMAIL_STRICT: &str = "emailStrict";
    pub const PHONE_US: &str = "phoneUS";
    pub const PHONE_INTERNATIONAL: &str = "phoneInternational";
    pub const URL: &str = "url";
    pub const ZIP_US: &str = "zipUS";
    pub const ZIP_CANADA: &str = "zipCanada";
    pub const ZIP_UK: &str = "zipUK";
    pub const CREDIT_CARD: &str = "creditCard";
    pub const CVV: &str = "cvv";
    pub const SSN: &str = "ssn";
    pub const DATE_ISO: &str = "dateISO";
    pub const DATE_US: &str = "dateUS";
    pub const TIME_12: &str = "time12";
    pub const TIME_24: &str = "time24";
    pub const IPV4: &str = "ipv4";
    pub const IPV6: &str = "ipv6";
    pub const ALPHANUMERIC: &str = "alphanumeric";
    pub const ALPHABETIC: &str = "alphabetic";
    pub const NUMERIC: &str = "numeric";
    pub const DECIMAL: &str = "decimal";
    pub const HEX_COLOR: &str = "hexColor";
    pub const USERNAME: &str = "username";
    pub const STRONG_PASSWORD: &str = "strongPassword";
}
