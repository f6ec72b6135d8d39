//! Property-based invariant tests for the built-in rule predicates.
//!
//! Invariants:
//!
//! 1. Every predicate is total: arbitrary input never panics.
//! 2. The Luhn check is invariant under inserting non-digit characters
//!    anywhere in the input.
//! 3. Separator-stripping rules agree with their bare-digit form.
//! 4. Predicates are deterministic.

use fieldset_rules::{RuleRegistry, builtin};
use proptest::prelude::*;

fn non_digit_char() -> impl Strategy<Value = char> {
    any::<char>().prop_filter("non-digit", |c| !c.is_ascii_digit())
}

fn digit_string(len: std::ops::Range<usize>) -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::char::range('0', '9'), len)
        .prop_map(|chars| chars.into_iter().collect())
}

// ── 1. Totality ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn predicates_never_panic(input in any::<String>()) {
        let registry = RuleRegistry::with_builtins();
        for name in registry.names() {
            // The value is irrelevant; the point is that this returns.
            let _ = registry.evaluate(name, &input);
        }
    }
}

// ── 2. Luhn invariance under non-digit insertion ────────────────────────

proptest! {
    #[test]
    fn luhn_ignores_non_digit_insertions(
        digits in digit_string(13..20),
        noise in non_digit_char(),
        pos_seed in any::<prop::sample::Index>(),
    ) {
        let baseline = builtin::credit_card(&digits);

        let chars: Vec<char> = digits.chars().collect();
        let pos = pos_seed.index(chars.len() + 1);
        let mut decorated: String = chars[..pos].iter().collect();
        decorated.push(noise);
        decorated.extend(chars[pos..].iter());

        prop_assert_eq!(
            builtin::credit_card(&decorated),
            baseline,
            "inserting {:?} at {} changed the verdict for {:?}",
            noise, pos, digits
        );
    }
}

// ── 3. Separator-stripping rules agree with bare digits ─────────────────

proptest! {
    #[test]
    fn phone_us_agrees_with_bare_digits(digits in digit_string(7..13)) {
        let formatted = format!("({}) {}-{}",
            &digits[..digits.len().min(3)],
            &digits[digits.len().min(3)..digits.len().min(6)],
            &digits[digits.len().min(6)..]);
        prop_assert_eq!(builtin::phone_us(&formatted), builtin::phone_us(&digits));
    }

    #[test]
    fn ssn_counts_digits_only(digits in digit_string(1..15), noise in non_digit_char()) {
        let mut decorated = String::new();
        for c in digits.chars() {
            decorated.push(c);
            decorated.push(noise);
        }
        prop_assert_eq!(builtin::ssn(&decorated), builtin::ssn(&digits));
    }
}

// ── 4. Determinism ──────────────────────────────────────────────────────

proptest! {
    #[test]
    fn predicates_are_deterministic(input in any::<String>()) {
        let registry = RuleRegistry::with_builtins();
        for name in registry.names() {
            prop_assert_eq!(
                registry.evaluate(name, &input),
                registry.evaluate(name, &input),
                "rule {} is not deterministic", name
            );
        }
    }
}
