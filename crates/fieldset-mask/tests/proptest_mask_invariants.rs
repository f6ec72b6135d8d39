//! Property-based invariant tests for mask reformatting.
//!
//! Invariants:
//!
//! 1. `apply` is idempotent for digit masks: reformatting a formatted
//!    value changes nothing.
//! 2. Output never exceeds the template length.
//! 3. The data characters of the output are a prefix of the filtered
//!    input.
//! 4. Output slots never hold more than the placeholder count.
//! 5. Completeness of a formatted value never reports more data than the
//!    pattern accepts.
//! 6. `backspace` removes exactly one data character, or nothing when
//!    there is none to remove.

use fieldset_mask::{Completeness, MaskPattern};
use proptest::prelude::*;

fn digit_mask() -> impl Strategy<Value = MaskPattern> {
    prop::sample::select(vec![
        "phone",
        "phone-intl",
        "date",
        "date-iso",
        "time",
        "credit-card",
        "ssn",
        "zip-plus4",
        "ip",
    ])
    .prop_map(|name| MaskPattern::builtin(name).expect("builtin mask"))
}

fn digits_only(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

proptest! {
    // ── 1. Idempotence ──────────────────────────────────────────────────
    #[test]
    fn apply_is_idempotent(mask in digit_mask(), raw in ".{0,40}") {
        let once = mask.apply(&raw);
        let twice = mask.apply(&once);
        prop_assert_eq!(&twice, &once, "raw = {:?}", raw);
    }

    // ── 2. Bounded output ───────────────────────────────────────────────
    #[test]
    fn output_is_bounded_by_template(mask in digit_mask(), raw in ".{0,60}") {
        let out = mask.apply(&raw);
        prop_assert!(out.chars().count() <= mask.len());
    }

    // ── 3. Data preserved in order ──────────────────────────────────────
    #[test]
    fn output_data_is_prefix_of_input_data(mask in digit_mask(), raw in ".{0,40}") {
        let input_digits = digits_only(&raw);
        let output_digits = digits_only(&mask.apply(&raw));
        prop_assert!(
            input_digits.starts_with(&output_digits),
            "output digits {:?} not a prefix of input digits {:?}",
            output_digits, input_digits
        );
    }

    // ── 4. Slot capacity ────────────────────────────────────────────────
    #[test]
    fn output_never_overfills_slots(mask in digit_mask(), raw in ".{0,60}") {
        let out = mask.apply(&raw);
        prop_assert!(mask.data_len(&out) <= mask.placeholder_count());
    }

    // ── 5. Formatted values never classify beyond Complete ──────────────
    #[test]
    fn formatted_completeness_is_consistent(mask in digit_mask(), raw in ".{0,60}") {
        let out = mask.apply(&raw);
        let expected = mask.placeholder_count();
        let actual = mask.data_len(&out);
        let class = mask.completeness(&out);
        match class {
            Completeness::Empty => prop_assert_eq!(actual, 0),
            Completeness::Complete => prop_assert_eq!(actual, expected),
            Completeness::Partial => {
                prop_assert!(actual * 2 > expected && actual < expected);
            }
            Completeness::Incomplete => {
                prop_assert!(actual > 0 && actual * 2 <= expected);
            }
        }
    }

    // ── 6. Backspace removes exactly one data character ─────────────────
    #[test]
    fn backspace_removes_one_data_char(
        mask in digit_mask(),
        digits in "[0-9]{1,20}",
        cursor_seed in any::<prop::sample::Index>(),
    ) {
        let formatted = mask.apply(&digits);
        let before = mask.data_len(&formatted);
        let cursor = cursor_seed.index(formatted.chars().count() + 1);
        let (after, caret) = mask.backspace(&formatted, cursor);
        let removed = before - mask.data_len(&after);
        if cursor == 0 {
            prop_assert_eq!(removed, 0);
        } else {
            // Deleting before any data char (inside a leading literal
            // run) removes nothing; anywhere else removes exactly one.
            prop_assert!(removed <= 1, "removed {} chars", removed);
        }
        prop_assert!(caret <= after.chars().count().max(cursor));
    }
}
