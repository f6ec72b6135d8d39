//! Engine and per-field configuration.

use std::time::Duration;

/// Engine-wide timing and password-policy constants.
///
/// Hosts read these back through the engine; the defaults mirror the
/// behavior the rest of this workspace is tested against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Quiet period before a live-typing evaluation fires.
    pub debounce_delay: Duration,
    /// Simulated latency for availability checks.
    pub async_check_delay: Duration,
    /// Minimum accepted password length.
    pub password_min_length: usize,
    /// Maximum accepted password length.
    pub password_max_length: usize,
    /// Idle period before an autosave snapshot is written.
    pub autosave_delay: Duration,
    /// How long a success summary stays up before auto-dismissal.
    pub summary_dismiss: Duration,
    /// How long the attention trigger stays set after a rule failure.
    pub shake_duration: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_delay: Duration::from_millis(300),
            async_check_delay: Duration::from_millis(500),
            password_min_length: 8,
            password_max_length: 128,
            autosave_delay: Duration::from_secs(2),
            summary_dismiss: Duration::from_secs(3),
            shake_duration: Duration::from_millis(500),
        }
    }
}

/// Default ceiling for file uploads: 5 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5_242_880;

/// Which typed characters a mask consumes into placeholder slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MaskFilter {
    /// ASCII digits only (phone, date, card numbers, …).
    #[default]
    Digits,
    /// Digits plus the decimal point (currency, percentage).
    DigitsDot,
    /// Digits, decimal point and comma (European currency).
    DigitsDotComma,
}

impl MaskFilter {
    /// Whether `c` is consumed into a placeholder slot.
    #[must_use]
    pub fn accepts(self, c: char) -> bool {
        match self {
            Self::Digits => c.is_ascii_digit(),
            Self::DigitsDot => c.is_ascii_digit() || c == '.',
            Self::DigitsDotComma => c.is_ascii_digit() || c == '.' || c == ',',
        }
    }
}

/// Declarative mask attachment for a field: the template string plus the
/// character class it consumes. `'9'` in the template marks a slot; every
/// other character is a literal separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskSpec {
    pub template: String,
    pub filter: MaskFilter,
}

impl MaskSpec {
    #[must_use]
    pub fn new(template: impl Into<String>, filter: MaskFilter) -> Self {
        Self {
            template: template.into(),
            filter,
        }
    }

    /// A digits-only mask, the common case.
    #[must_use]
    pub fn digits(template: impl Into<String>) -> Self {
        Self::new(template, MaskFilter::Digits)
    }
}

/// What kind of input a field is. Determines which validation category
/// the field participates in during a form pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Ordinary text-like input (includes dates and masked inputs).
    #[default]
    Text,
    /// Password input; candidates for confirmation pairing.
    Password,
    /// Checkbox-group member.
    Checkbox,
    /// File input.
    File,
}

/// The declarative configuration a host attaches to one field.
///
/// Every knob corresponds to a configuration option on the host side;
/// unset options simply skip their check. Built with the `with_*`
/// builder methods.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldConfig {
    /// What kind of input this is.
    pub kind: FieldKind,
    /// Named validation rule to run, if any. Identifiers unknown to the
    /// rule registry fall back to the generic constraints below.
    pub rule: Option<String>,
    /// Whether an empty value is a hard failure.
    pub required: bool,
    /// Input mask, if the field is masked.
    pub mask: Option<MaskSpec>,
    /// Minimum accepted length in characters.
    pub min_length: Option<usize>,
    /// Maximum accepted length in characters.
    pub max_length: Option<usize>,
    /// Minimum accepted numeric value.
    pub min: Option<f64>,
    /// Maximum accepted numeric value.
    pub max: Option<f64>,
    /// Custom regex the value must match.
    pub pattern: Option<String>,
    /// Overrides the rule's default failure message.
    pub error_message: Option<String>,
    /// Human-facing name used in summary labels.
    pub display_name: Option<String>,
    /// Declared input name; used for autosave keys and as a label
    /// fallback.
    pub name: Option<String>,
    /// Byte ceiling for file inputs; defaults to [`DEFAULT_MAX_FILE_SIZE`].
    pub max_file_size: Option<u64>,
    /// MIME allow-list for file inputs; empty means any type.
    pub allowed_types: Vec<String>,
}

impl FieldConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_mask(mut self, mask: MaskSpec) -> Self {
        self.mask = Some(mask);
        self
    }

    #[must_use]
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    #[must_use]
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = Some(bytes);
        self
    }

    #[must_use]
    pub fn with_allowed_types(mut self, types: Vec<String>) -> Self {
        self.allowed_types = types;
        self
    }

    /// Effective file-size ceiling.
    #[must_use]
    pub fn file_size_limit(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.debounce_delay, Duration::from_millis(300));
        assert_eq!(cfg.async_check_delay, Duration::from_millis(500));
        assert_eq!(cfg.password_min_length, 8);
        assert_eq!(cfg.password_max_length, 128);
        assert_eq!(cfg.autosave_delay, Duration::from_secs(2));
        assert_eq!(cfg.summary_dismiss, Duration::from_secs(3));
    }

    #[test]
    fn mask_filters() {
        assert!(MaskFilter::Digits.accepts('7'));
        assert!(!MaskFilter::Digits.accepts('.'));
        assert!(MaskFilter::DigitsDot.accepts('.'));
        assert!(!MaskFilter::DigitsDot.accepts(','));
        assert!(MaskFilter::DigitsDotComma.accepts(','));
        assert!(!MaskFilter::DigitsDotComma.accepts('x'));
    }

    #[test]
    fn builder_chain() {
        let cfg = FieldConfig::new()
            .with_rule("email")
            .required()
            .with_min_length(3)
            .with_display_name("Email");
        assert_eq!(cfg.rule.as_deref(), Some("email"));
        assert!(cfg.required);
        assert_eq!(cfg.min_length, Some(3));
        assert_eq!(cfg.display_name.as_deref(), Some("Email"));
        assert_eq!(cfg.kind, FieldKind::Text);
    }

    #[test]
    fn file_size_default_is_5_mib() {
        assert_eq!(FieldConfig::new().file_size_limit(), 5 * 1024 * 1024);
        assert_eq!(
            FieldConfig::new().with_max_file_size(100).file_size_limit(),
            100
        );
    }
}
