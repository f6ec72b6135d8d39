//! Simulated availability checks for `-async` rule identifiers.
//!
//! These stand in for a backend lookup: after the engine's debounce and
//! simulated latency, the value is tested against a fixed taken-set.
//! Resolution is pure; all timing and staleness handling lives in the
//! engine.

use fieldset_core::Feedback;

/// Rule identifier for the username availability check.
pub const USERNAME_ASYNC: &str = "username-async";
/// Rule identifier for the email availability check.
pub const EMAIL_ASYNC: &str = "email-async";

/// Usernames the simulated backend reports as taken.
pub const TAKEN_USERNAMES: &[&str] = &["admin", "test", "user", "root"];
/// Emails the simulated backend reports as registered.
pub const TAKEN_EMAILS: &[&str] = &["test@example.com", "admin@example.com"];

/// Which availability check a rule identifier selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Username,
    Email,
}

impl CheckKind {
    /// Map a rule identifier to its check, if it is an async one.
    #[must_use]
    pub fn from_rule(rule_id: &str) -> Option<Self> {
        match rule_id {
            USERNAME_ASYNC => Some(Self::Username),
            EMAIL_ASYNC => Some(Self::Email),
            _ => None,
        }
    }

    /// The "in flight" message shown while the check is pending.
    #[must_use]
    pub fn probe_message(self) -> &'static str {
        match self {
            Self::Username => "Checking availability...",
            Self::Email => "Verifying email...",
        }
    }

    /// Resolve the check against the taken-set. Comparison is
    /// case-insensitive, matching how the simulated backend stores its
    /// entries.
    #[must_use]
    pub fn resolve(self, value: &str) -> Feedback {
        let lowered = value.to_lowercase();
        match self {
            Self::Username => {
                if TAKEN_USERNAMES.contains(&lowered.as_str()) {
                    Feedback::invalid("Username is already taken")
                } else {
                    Feedback::valid_with("Username is available")
                }
            }
            Self::Email => {
                if TAKEN_EMAILS.contains(&lowered.as_str()) {
                    Feedback::invalid("Email is already registered")
                } else {
                    Feedback::valid_with("Email is available")
                }
            }
        }
    }
}
