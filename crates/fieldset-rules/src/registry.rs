//! The mutable rule registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{builtin, id};

/// A named validation predicate. Predicates must be total and
/// deterministic: any input string yields a boolean, never a panic.
pub type RuleFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Runtime-extensible mapping from rule identifier to predicate.
///
/// The registry is explicit and mutable: hosts register new rules at any
/// time, and later registrations replace earlier ones under the same
/// identifier. Lookups for unknown identifiers return `None` so callers
/// can fall back to generic declarative constraints.
pub struct RuleRegistry {
    rules: HashMap<String, RuleFn>,
}

impl RuleRegistry {
    /// An empty registry with no rules at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// A registry seeded with the built-in rule table.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register(id::REQUIRED, builtin::required);
        registry.register(id::EMAIL, builtin::email);
        registry.register(id::EMAIL_STRICT, builtin::email_strict);
        registry.register(id::PHONE_US, builtin::phone_us);
        registry.register(id::PHONE_INTERNATIONAL, builtin::phone_international);
        registry.register(id::URL, builtin::url);
        registry.register(id::ZIP_US, builtin::zip_us);
        registry.register(id::ZIP_CANADA, builtin::zip_canada);
        registry.register(id::ZIP_UK, builtin::zip_uk);
        registry.register(id::CREDIT_CARD, builtin::credit_card);
        registry.register(id::CVV, builtin::cvv);
        registry.register(id::SSN, builtin::ssn);
        registry.register(id::DATE_ISO, builtin::date_iso);
        registry.register(id::DATE_US, builtin::date_us);
        registry.register(id::TIME_12, builtin::time_12);
        registry.register(id::TIME_24, builtin::time_24);
        registry.register(id::IPV4, builtin::ipv4);
        registry.register(id::IPV6, builtin::ipv6);
        registry.register(id::ALPHANUMERIC, builtin::alphanumeric);
        registry.register(id::ALPHABETIC, builtin::alphabetic);
        registry.register(id::NUMERIC, builtin::numeric);
        registry.register(id::DECIMAL, builtin::decimal);
        registry.register(id::HEX_COLOR, builtin::hex_color);
        registry.register(id::USERNAME, builtin::username);
        registry.register(id::STRONG_PASSWORD, builtin::strong_password);
        registry
    }

    /// Register (or replace) a rule under `rule_id`.
    pub fn register<F>(&mut self, rule_id: impl Into<String>, predicate: F)
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.rules.insert(rule_id.into(), Arc::new(predicate));
    }

    /// Look up the predicate registered under `rule_id`.
    #[must_use]
    pub fn lookup(&self, rule_id: &str) -> Option<&RuleFn> {
        self.rules.get(rule_id)
    }

    /// Run the rule against `value`. `None` means the identifier is
    /// unknown — the caller decides what that implies.
    #[must_use]
    pub fn evaluate(&self, rule_id: &str, value: &str) -> Option<bool> {
        self.rules.get(rule_id).map(|rule| rule(value))
    }

    /// Whether a rule is registered under `rule_id`.
    #[must_use]
    pub fn contains(&self, rule_id: &str) -> bool {
        self.rules.contains_key(rule_id)
    }

    /// All registered identifiers, unordered.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the registry has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    /// The default registry carries the built-in table.
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("[{} rules]", self.rules.len()))
            .finish()
    }
}
