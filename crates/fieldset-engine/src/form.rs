//! Form-level descriptors, outcomes and the validation summary.

use chrono::NaiveDate;

/// A checkbox group with cardinality bounds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckboxGroup {
    /// Group label used in the summary ("Checkbox Group" when unset).
    pub name: Option<String>,
    /// Field ids of the member checkboxes.
    pub members: Vec<String>,
    /// Minimum number of checked members, if bounded below.
    pub min_checked: Option<usize>,
    /// Maximum number of checked members, if bounded above.
    pub max_checked: Option<usize>,
}

impl CheckboxGroup {
    #[must_use]
    pub fn new(members: Vec<String>) -> Self {
        Self {
            members,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_min_checked(mut self, min: usize) -> Self {
        self.min_checked = Some(min);
        self
    }

    #[must_use]
    pub fn with_max_checked(mut self, max: usize) -> Self {
        self.max_checked = Some(max);
        self
    }
}

/// A start/end date field pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    /// Field id of the start date.
    pub start: String,
    /// Field id of the end date.
    pub end: String,
}

impl DateRange {
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Everything the aggregator needs to know about one form.
///
/// `fields` lists the member field ids in document order; the categories
/// a field participates in are derived from its configuration, so the
/// spec only declares structure the fields themselves cannot express
/// (groups and range pairings).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSpec {
    pub id: String,
    /// Whether edits to member fields schedule autosave snapshots.
    pub autosave: bool,
    /// Member field ids, in document order.
    pub fields: Vec<String>,
    pub checkbox_groups: Vec<CheckboxGroup>,
    pub date_ranges: Vec<DateRange>,
}

impl FormSpec {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_autosave(mut self) -> Self {
        self.autosave = true;
        self
    }

    #[must_use]
    pub fn with_field(mut self, id: impl Into<String>) -> Self {
        self.fields.push(id.into());
        self
    }

    #[must_use]
    pub fn with_checkbox_group(mut self, group: CheckboxGroup) -> Self {
        self.checkbox_groups.push(group);
        self
    }

    #[must_use]
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_ranges.push(range);
        self
    }

    /// Whether `field_id` is a member of this form.
    #[must_use]
    pub fn contains(&self, field_id: &str) -> bool {
        self.fields.iter().any(|f| f == field_id)
            || self
                .checkbox_groups
                .iter()
                .any(|g| g.members.iter().any(|m| m == field_id))
            || self
                .date_ranges
                .iter()
                .any(|r| r.start == field_id || r.end == field_id)
    }
}

/// Per-unit result of a form pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Field id the outcome belongs to.
    pub field: String,
    /// Label used in the summary.
    pub label: String,
    pub is_valid: bool,
    /// The failure (or informational) message, if any.
    pub message: Option<String>,
}

/// The summary panel rendered inside the form after a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Summary {
    /// At least one unit failed.
    Errors {
        title: String,
        /// One line per failing unit: "{label} is invalid".
        items: Vec<String>,
        /// Hosts should bring the summary into view.
        scroll_into_view: bool,
    },
    /// Everything passed; dismissed automatically after a few seconds.
    Success { title: String },
}

impl Summary {
    pub(crate) const ERROR_TITLE: &'static str = "Please correct the following errors:";
    pub(crate) const SUCCESS_TITLE: &'static str = "\u{2713} Form is valid and ready to submit!";

    pub(crate) fn errors(labels: &[String]) -> Self {
        Self::Errors {
            title: Self::ERROR_TITLE.to_string(),
            items: labels.iter().map(|l| format!("{l} is invalid")).collect(),
            scroll_into_view: true,
        }
    }

    pub(crate) fn success() -> Self {
        Self::Success {
            title: Self::SUCCESS_TITLE.to_string(),
        }
    }

    /// Whether this is a success banner.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// The result of a whole-form pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormReport {
    /// True iff no unit failed.
    pub is_valid: bool,
    /// One outcome per participating unit, in category order.
    pub outcomes: Vec<ValidationOutcome>,
    /// The summary that was stored for the form.
    pub summary: Summary,
}

/// Parse a date in either ISO (`2024-06-10`) or US (`06/10/2024`) form.
#[must_use]
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%m/%d/%Y"))
        .ok()
}
