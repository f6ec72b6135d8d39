//! Mask patterns and the built-in mask table.

use fieldset_core::config::{MaskFilter, MaskSpec};

/// The template character that accepts one input character.
pub const PLACEHOLDER: char = '9';

/// One entry in the built-in mask table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinMask {
    /// Name hosts use to select the mask ("phone", "date-iso", …).
    pub name: &'static str,
    /// Template string.
    pub template: &'static str,
    /// Character class consumed into slots.
    pub filter: MaskFilter,
    /// Placeholder hint shown in an empty input.
    pub hint: &'static str,
}

/// Built-in masks, addressable by name.
pub const BUILTIN_MASKS: &[BuiltinMask] = &[
    BuiltinMask { name: "phone", template: "(999) 999-9999", filter: MaskFilter::Digits, hint: "(___) ___-____" },
    BuiltinMask { name: "phone-intl", template: "+9 (999) 999-9999", filter: MaskFilter::Digits, hint: "+_ (___) ___-____" },
    BuiltinMask { name: "date", template: "99/99/9999", filter: MaskFilter::Digits, hint: "MM/DD/YYYY" },
    BuiltinMask { name: "date-iso", template: "9999-99-99", filter: MaskFilter::Digits, hint: "YYYY-MM-DD" },
    BuiltinMask { name: "time", template: "99:99", filter: MaskFilter::Digits, hint: "HH:MM" },
    BuiltinMask { name: "time-24", template: "99:99:99", filter: MaskFilter::Digits, hint: "HH:MM:SS" },
    BuiltinMask { name: "credit-card", template: "9999 9999 9999 9999", filter: MaskFilter::Digits, hint: "#### #### #### ####" },
    BuiltinMask { name: "credit-card-amex", template: "9999 999999 99999", filter: MaskFilter::Digits, hint: "#### ###### #####" },
    BuiltinMask { name: "cvv", template: "999", filter: MaskFilter::Digits, hint: "###" },
    BuiltinMask { name: "cvv-4", template: "9999", filter: MaskFilter::Digits, hint: "####" },
    BuiltinMask { name: "currency", template: "$9,999.99", filter: MaskFilter::DigitsDot, hint: "$0.00" },
    BuiltinMask { name: "currency-euro", template: "€9.999,99", filter: MaskFilter::DigitsDotComma, hint: "€0,00" },
    BuiltinMask { name: "ssn", template: "999-99-9999", filter: MaskFilter::Digits, hint: "###-##-####" },
    BuiltinMask { name: "zip", template: "99999", filter: MaskFilter::Digits, hint: "#####" },
    BuiltinMask { name: "zip-plus4", template: "99999-9999", filter: MaskFilter::Digits, hint: "#####-####" },
    BuiltinMask { name: "percentage", template: "99.99%", filter: MaskFilter::DigitsDot, hint: "0.00%" },
    BuiltinMask { name: "ip", template: "999.999.999.999", filter: MaskFilter::Digits, hint: "0.0.0.0" },
];

/// A compiled mask: template plus character filter.
///
/// The template is held as a char vector so slot arithmetic is by
/// character position, matching how cursors are reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskPattern {
    template: Vec<char>,
    filter: MaskFilter,
}

impl MaskPattern {
    /// Compile a custom template.
    #[must_use]
    pub fn new(template: impl AsRef<str>, filter: MaskFilter) -> Self {
        Self {
            template: template.as_ref().chars().collect(),
            filter,
        }
    }

    /// Compile a digits-only template, the common case.
    #[must_use]
    pub fn digits(template: impl AsRef<str>) -> Self {
        Self::new(template, MaskFilter::Digits)
    }

    /// Compile from a declarative [`MaskSpec`].
    #[must_use]
    pub fn from_spec(spec: &MaskSpec) -> Self {
        Self::new(&spec.template, spec.filter)
    }

    /// Look up a built-in mask by name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        BUILTIN_MASKS
            .iter()
            .find(|mask| mask.name == name)
            .map(|mask| Self::new(mask.template, mask.filter))
    }

    /// The template string.
    #[must_use]
    pub fn template(&self) -> String {
        self.template.iter().collect()
    }

    /// The character filter.
    #[must_use]
    pub fn filter(&self) -> MaskFilter {
        self.filter
    }

    /// Template length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.template.len()
    }

    /// Whether the template is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.template.is_empty()
    }

    /// Number of placeholder slots; the expected data-character count for
    /// a complete value.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.template.iter().filter(|&&c| c == PLACEHOLDER).count()
    }

    /// Whether the template character at `pos` is a literal separator.
    /// Positions past the end report `false`.
    #[must_use]
    pub fn is_literal_at(&self, pos: usize) -> bool {
        self.template.get(pos).is_some_and(|&c| c != PLACEHOLDER)
    }

    pub(crate) fn template_chars(&self) -> &[char] {
        &self.template
    }
}
