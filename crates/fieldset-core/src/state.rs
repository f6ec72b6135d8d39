//! Per-field feedback classification.

/// The feedback classification currently shown for one input.
///
/// A field's state is rebuilt from scratch on every evaluation pass and is
/// never persisted. `Unvalidated` is the state before the first pass;
/// `Empty` means the trimmed value was empty and the field is not required
/// (no message is shown for either).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldState {
    /// No evaluation has run for this field yet.
    #[default]
    Unvalidated,
    /// Trimmed value is empty and the field is not required.
    Empty,
    /// Soft failure: the input is incomplete or could be stronger.
    Warning,
    /// Hard failure: the field blocks submission.
    Invalid,
    /// The field passed its checks.
    Valid,
    /// An availability probe is in flight ("checking…").
    Info,
}

impl FieldState {
    /// Whether this state blocks form submission.
    #[must_use]
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Invalid)
    }

    /// Stable lowercase name, suitable for styling hooks and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unvalidated => "unvalidated",
            Self::Empty => "empty",
            Self::Warning => "warning",
            Self::Invalid => "invalid",
            Self::Valid => "valid",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for FieldState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unit of feedback rendered for a single field: a state, an optional
/// message, and a transient attention trigger.
///
/// `shake` is set when a named rule fails and is cleared by the engine
/// after a short interval; renderers use it to nudge the input visually.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feedback {
    pub state: FieldState,
    pub message: Option<String>,
    pub shake: bool,
}

impl Feedback {
    /// Feedback for a field that has not been evaluated.
    #[must_use]
    pub fn unvalidated() -> Self {
        Self::default()
    }

    /// Feedback for an empty, non-required field (no message).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            state: FieldState::Empty,
            message: None,
            shake: false,
        }
    }

    /// Passing feedback with no message.
    #[must_use]
    pub fn valid() -> Self {
        Self {
            state: FieldState::Valid,
            message: None,
            shake: false,
        }
    }

    /// Passing feedback with a message ("Strong password", size summaries).
    #[must_use]
    pub fn valid_with(message: impl Into<String>) -> Self {
        Self {
            state: FieldState::Valid,
            message: Some(message.into()),
            shake: false,
        }
    }

    /// Failing feedback.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            state: FieldState::Invalid,
            message: Some(message.into()),
            shake: false,
        }
    }

    /// Failing feedback with the attention trigger set.
    #[must_use]
    pub fn invalid_shake(message: impl Into<String>) -> Self {
        Self {
            state: FieldState::Invalid,
            message: Some(message.into()),
            shake: true,
        }
    }

    /// Advisory feedback that does not block submission.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            state: FieldState::Warning,
            message: Some(message.into()),
            shake: false,
        }
    }

    /// Transient "checking…" feedback while a probe is in flight.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            state: FieldState::Info,
            message: Some(message.into()),
            shake: false,
        }
    }

    /// Whether the field currently passes (Valid, Empty, Warning and
    /// Unvalidated all count as non-blocking).
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.state.is_blocking()
    }
}
