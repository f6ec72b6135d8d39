//! The field validation controller and form aggregator.
//!
//! One [`ValidationEngine`] owns every per-field runtime state object,
//! the timer queue, the rule registry and the autosave store. Hosts feed
//! it [`FieldEvent`]s and drive time with [`advance`](ValidationEngine::advance);
//! everything else — debouncing, availability checks, feedback state,
//! summaries, autosave — happens inside.
//!
//! # State machine
//!
//! Each field moves through `{unvalidated, empty, warning, invalid,
//! valid, info}`. Transitions are driven by three inputs: a change event
//! (debounced), a blur event (immediate), and the completion of an
//! availability check. All per-field state lives in an explicit map
//! keyed by field id: created on first sight, dropped on removal.
//!
//! # Timing invariants
//!
//! - Rescheduling cancels the prior pending task; a superseded timer
//!   never fires.
//! - A debounced evaluation reads the value at fire time, not at
//!   schedule time.
//! - Availability results carry a monotonic token; a result whose token
//!   no longer matches the field's current token is discarded.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

use fieldset_core::{
    EngineConfig, Feedback, FieldConfig, FieldEvent, FieldKind, FieldState, FieldValue,
};
use fieldset_mask::{Completeness, MaskPattern};
use fieldset_rules::{RuleRegistry, default_message, id as rule_id};
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::autosave::{AutosaveStore, MemoryStore, autosave_key};
use crate::checks::CheckKind;
use crate::form::{
    CheckboxGroup, DateRange, FormReport, FormSpec, Summary, ValidationOutcome, parse_date,
};
use crate::scheduler::{Scheduler, TaskToken};

/// Rule identifier that selects the password-strength ladder.
pub const PASSWORD_STRENGTH: &str = "password-strength";
/// Rule identifier that selects the password-confirmation pairing.
pub const PASSWORD_CONFIRM: &str = "password-confirm";

/// Rules that validate the formatted value (separators included) when
/// the field is masked; every other rule sees the digit-stripped value.
const FORMATTED_VALUE_RULES: &[&str] = &[
    rule_id::DATE_ISO,
    rule_id::DATE_US,
    rule_id::TIME_12,
    rule_id::TIME_24,
    rule_id::IPV4,
    rule_id::IPV6,
    rule_id::URL,
];

/// Internal timer payloads.
#[derive(Debug, Clone)]
enum Task {
    /// Debounce window elapsed; run the field's live validation.
    Debounce { field: String },
    /// Simulated check latency elapsed; apply the availability result.
    Resolve {
        field: String,
        token: u64,
        value: String,
    },
    /// Clear the transient attention trigger.
    ClearShake { field: String },
    /// Auto-dismiss a success summary.
    DismissSummary { form: String },
    /// Idle period elapsed; write the form snapshot.
    AutosaveFlush { form: String },
}

/// Per-field runtime state. One exists per known field id; the whole
/// struct is dropped when the field is removed.
#[derive(Debug)]
struct FieldRuntime {
    config: FieldConfig,
    mask: Option<MaskPattern>,
    /// Compiled custom pattern; a pattern that fails to compile is
    /// logged and ignored rather than failing the field.
    pattern: Option<Regex>,
    value: FieldValue,
    feedback: Feedback,
    debounce: Option<TaskToken>,
    resolve: Option<TaskToken>,
    /// Monotonic version for availability checks; results for older
    /// versions are stale.
    check_token: u64,
}

impl FieldRuntime {
    fn new(config: FieldConfig) -> Self {
        let mask = config.mask.as_ref().map(MaskPattern::from_spec);
        let pattern = config.pattern.as_deref().and_then(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(err) => {
                tracing::warn!(pattern = p, %err, "custom pattern does not compile, ignoring");
                None
            }
        });
        let value = match config.kind {
            FieldKind::Checkbox => FieldValue::Checked(false),
            FieldKind::File => FieldValue::File(None),
            FieldKind::Text | FieldKind::Password => FieldValue::Text(String::new()),
        };
        Self {
            config,
            mask,
            pattern,
            value,
            feedback: Feedback::unvalidated(),
            debounce: None,
            resolve: None,
            check_token: 0,
        }
    }

    fn text(&self) -> &str {
        self.value.as_text().unwrap_or("")
    }
}

/// Whether the field declares anything that makes it live-validated.
/// Fields with no rule, no constraints and no mask are left alone by
/// change events (date-range members still validate through their
/// pairing).
fn has_declared_constraints(config: &FieldConfig) -> bool {
    config.rule.is_some()
        || config.required
        || config.mask.is_some()
        || config.min_length.is_some()
        || config.max_length.is_some()
        || config.min.is_some()
        || config.max.is_some()
        || config.pattern.is_some()
}

/// A passing core evaluation is `valid` or `empty`; warnings (incomplete
/// mask) and failures both block.
fn core_pass_ok(feedback: &Feedback) -> bool {
    matches!(feedback.state, FieldState::Valid | FieldState::Empty)
}

/// The validation engine: field controller plus form aggregator.
pub struct ValidationEngine {
    config: EngineConfig,
    registry: RuleRegistry,
    scheduler: Scheduler<Task>,
    fields: HashMap<String, FieldRuntime>,
    forms: HashMap<String, FormSpec>,
    summaries: HashMap<String, Summary>,
    store: Box<dyn AutosaveStore>,
    autosave_timers: HashMap<String, TaskToken>,
}

impl ValidationEngine {
    /// Engine with default configuration, the built-in rule table and an
    /// in-memory autosave store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Engine with custom timing/password configuration.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            registry: RuleRegistry::with_builtins(),
            scheduler: Scheduler::new(),
            fields: HashMap::new(),
            forms: HashMap::new(),
            summaries: HashMap::new(),
            store: Box::new(MemoryStore::new()),
            autosave_timers: HashMap::new(),
        }
    }

    /// Swap the autosave store (builder style).
    #[must_use]
    pub fn with_store(mut self, store: Box<dyn AutosaveStore>) -> Self {
        self.store = store;
        self
    }

    // --- Host-facing configuration -------------------------------------

    /// Register (or replace) a named validation rule.
    pub fn register_rule<F>(&mut self, rule_id: impl Into<String>, predicate: F)
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.registry.register(rule_id, predicate);
    }

    /// The rule table.
    #[must_use]
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// The engine's configuration constants.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Declare a field. Replaces any existing declaration under the same
    /// id and resets its runtime state.
    pub fn add_field(&mut self, id: impl Into<String>, config: FieldConfig) {
        let id = id.into();
        self.remove_field(&id);
        self.fields.insert(id, FieldRuntime::new(config));
    }

    /// Drop a field's runtime state and cancel its pending timers.
    pub fn remove_field(&mut self, id: &str) {
        if let Some(rt) = self.fields.remove(id) {
            if let Some(token) = rt.debounce {
                self.scheduler.cancel(token);
            }
            if let Some(token) = rt.resolve {
                self.scheduler.cancel(token);
            }
            tracing::trace!(field = id, "field state dropped");
        }
    }

    /// Declare (or replace) a form.
    pub fn add_form(&mut self, spec: FormSpec) {
        self.forms.insert(spec.id.clone(), spec);
    }

    // --- State access ---------------------------------------------------

    /// Current feedback for a field.
    #[must_use]
    pub fn feedback(&self, id: &str) -> Option<&Feedback> {
        self.fields.get(id).map(|rt| &rt.feedback)
    }

    /// Current value of a field.
    #[must_use]
    pub fn value(&self, id: &str) -> Option<&FieldValue> {
        self.fields.get(id).map(|rt| &rt.value)
    }

    /// The summary currently shown for a form, if any.
    #[must_use]
    pub fn summary(&self, form_id: &str) -> Option<&Summary> {
        self.summaries.get(form_id)
    }

    /// The engine's virtual clock.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.scheduler.now()
    }

    // --- Event intake ---------------------------------------------------

    /// Process one field event.
    pub fn apply(&mut self, event: FieldEvent) {
        match event {
            FieldEvent::Changed { id, value } => self.on_changed(&id, value),
            FieldEvent::Blurred { id } => self.on_blurred(&id),
            FieldEvent::Removed { id } => self.remove_field(&id),
        }
    }

    /// Advance the virtual clock, firing every timer that comes due.
    /// Tasks scheduled by fired tasks still run if they land inside the
    /// window.
    pub fn advance(&mut self, elapsed: Duration) {
        let target = self.scheduler.now() + elapsed;
        while let Some((_, task)) = self.scheduler.pop_due(target) {
            self.run_task(task);
        }
        self.scheduler.settle(target);
    }

    fn on_changed(&mut self, id: &str, value: FieldValue) {
        if !self.fields.contains_key(id) {
            tracing::trace!(field = id, "field first seen, creating runtime state");
            self.fields
                .insert(id.to_string(), FieldRuntime::new(FieldConfig::default()));
        }

        let (kind, live) = {
            let Some(rt) = self.fields.get_mut(id) else {
                return;
            };
            rt.value = match (&rt.mask, value) {
                (Some(mask), FieldValue::Text(raw)) => FieldValue::Text(mask.apply(&raw)),
                (_, other) => other,
            };
            (rt.config.kind, has_declared_constraints(&rt.config))
        };

        self.schedule_autosave_for(id);

        match kind {
            FieldKind::Checkbox => self.validate_groups_containing(id),
            FieldKind::File => {
                self.validate_file(id);
            }
            FieldKind::Text | FieldKind::Password => {
                if live {
                    self.schedule_debounce(id);
                }
                self.validate_ranges_containing(id);
            }
        }
    }

    fn on_blurred(&mut self, id: &str) {
        let Some(rt) = self.fields.get(id) else {
            return;
        };
        if !matches!(rt.config.kind, FieldKind::Text | FieldKind::Password) {
            return;
        }
        let rule = rt.config.rule.clone();
        if !has_declared_constraints(&rt.config) {
            return;
        }
        match rule.as_deref() {
            // Availability checks only run from the debounced path.
            Some(r) if CheckKind::from_rule(r).is_some() => {}
            Some(PASSWORD_STRENGTH) => {
                self.run_password_strength(id);
            }
            Some(PASSWORD_CONFIRM) => {
                self.run_password_match(id);
            }
            _ => {
                self.evaluate_field(id);
            }
        }
    }

    // --- Timer plumbing -------------------------------------------------

    fn schedule_debounce(&mut self, id: &str) {
        let delay = self.config.debounce_delay;
        let Some(rt) = self.fields.get_mut(id) else {
            return;
        };
        if let Some(token) = rt.debounce.take() {
            self.scheduler.cancel(token);
        }
        if let Some(token) = rt.resolve.take() {
            // A pending availability result is superseded outright.
            self.scheduler.cancel(token);
        }
        rt.check_token += 1;
        let token = self.scheduler.schedule(
            delay,
            Task::Debounce {
                field: id.to_string(),
            },
        );
        rt.debounce = Some(token);
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Debounce { field } => {
                if let Some(rt) = self.fields.get_mut(&field) {
                    rt.debounce = None;
                } else {
                    return;
                }
                self.run_live_validation(&field);
            }
            Task::Resolve {
                field,
                token,
                value,
            } => self.finish_check(&field, token, &value),
            Task::ClearShake { field } => {
                if let Some(rt) = self.fields.get_mut(&field) {
                    rt.feedback.shake = false;
                }
            }
            Task::DismissSummary { form } => {
                self.summaries.remove(&form);
            }
            Task::AutosaveFlush { form } => {
                self.autosave_timers.remove(&form);
                self.flush_autosave(&form);
            }
        }
    }

    fn run_live_validation(&mut self, id: &str) {
        let Some(rt) = self.fields.get(id) else {
            return;
        };
        let rule = rt.config.rule.clone();
        if let Some(r) = rule.as_deref() {
            if let Some(kind) = CheckKind::from_rule(r) {
                self.start_check(id, kind);
                return;
            }
            if r == PASSWORD_STRENGTH {
                self.run_password_strength(id);
                self.recheck_confirm_partner(id);
                return;
            }
            if r == PASSWORD_CONFIRM {
                self.run_password_match(id);
                return;
            }
        }
        self.evaluate_field(id);
    }

    // --- Availability checks --------------------------------------------

    fn start_check(&mut self, id: &str, kind: CheckKind) {
        let delay = self.config.async_check_delay;
        let Some(rt) = self.fields.get_mut(id) else {
            return;
        };
        let value = rt.text().to_string();
        if value.is_empty() {
            return;
        }
        if kind == CheckKind::Email
            && self.registry.evaluate(rule_id::EMAIL, &value) != Some(true)
        {
            return;
        }
        rt.check_token += 1;
        let token = rt.check_token;
        rt.feedback = Feedback::info(kind.probe_message());
        let task = self.scheduler.schedule(
            delay,
            Task::Resolve {
                field: id.to_string(),
                token,
                value,
            },
        );
        rt.resolve = Some(task);
        tracing::debug!(field = id, token, "availability check started");
    }

    fn finish_check(&mut self, id: &str, token: u64, value: &str) {
        let Some(rt) = self.fields.get_mut(id) else {
            return;
        };
        rt.resolve = None;
        if token != rt.check_token {
            tracing::debug!(
                field = id,
                token,
                current = rt.check_token,
                "stale availability result discarded"
            );
            return;
        }
        let Some(kind) = rt.config.rule.as_deref().and_then(CheckKind::from_rule) else {
            return;
        };
        rt.feedback = kind.resolve(value);
        tracing::debug!(field = id, token, state = %rt.feedback.state, "availability check resolved");
    }

    // --- Feedback -------------------------------------------------------

    fn set_feedback(&mut self, id: &str, feedback: Feedback) {
        let shake = feedback.shake;
        let duration = self.config.shake_duration;
        if let Some(rt) = self.fields.get_mut(id) {
            tracing::trace!(field = id, state = %feedback.state, "feedback updated");
            rt.feedback = feedback;
        } else {
            return;
        }
        if shake {
            self.scheduler.schedule(
                duration,
                Task::ClearShake {
                    field: id.to_string(),
                },
            );
        }
    }

    // --- Core evaluation ------------------------------------------------

    /// Run the synchronous evaluation pass for one field and store its
    /// feedback. Returns whether the field passes (valid or legitimately
    /// empty).
    pub fn validate_field(&mut self, id: &str) -> bool {
        self.evaluate_field(id)
    }

    fn evaluate_field(&mut self, id: &str) -> bool {
        let Some(feedback) = self.core_feedback(id) else {
            return true;
        };
        let ok = core_pass_ok(&feedback);
        self.set_feedback(id, feedback);
        ok
    }

    /// The evaluation ladder: emptiness, mask completeness, named rule,
    /// then the generic constraints in declaration order.
    fn core_feedback(&self, id: &str) -> Option<Feedback> {
        let rt = self.fields.get(id)?;
        let cfg = &rt.config;
        let raw = rt.text();

        if raw.trim().is_empty() {
            return Some(if cfg.required {
                Feedback::invalid("This field is required")
            } else {
                Feedback::empty()
            });
        }

        let mut test_value = raw.to_string();
        if let Some(mask) = &rt.mask {
            let needs_formatted = cfg
                .rule
                .as_deref()
                .is_some_and(|r| FORMATTED_VALUE_RULES.contains(&r));
            if !needs_formatted {
                test_value = raw.chars().filter(char::is_ascii_digit).collect();
            }
            match mask.completeness(raw) {
                Completeness::Complete | Completeness::Empty => {}
                Completeness::Partial | Completeness::Incomplete => {
                    return Some(Feedback::warning("Please complete the input"));
                }
            }
        }

        if let Some(rule) = cfg.rule.as_deref()
            && let Some(passed) = self.registry.evaluate(rule, &test_value)
        {
            return Some(if passed {
                Feedback::valid()
            } else {
                let message = cfg
                    .error_message
                    .clone()
                    .unwrap_or_else(|| default_message(rule).to_string());
                Feedback::invalid_shake(message)
            });
        }

        // Length limits count user-visible characters, not code points.
        let len = raw.graphemes(true).count();
        if let Some(min) = cfg.min_length
            && len < min
        {
            return Some(Feedback::invalid(format!(
                "Minimum {min} characters required"
            )));
        }
        if let Some(max) = cfg.max_length
            && len > max
        {
            return Some(Feedback::invalid(format!(
                "Maximum {max} characters allowed"
            )));
        }
        if let Ok(number) = raw.parse::<f64>() {
            if let Some(min) = cfg.min
                && number < min
            {
                return Some(Feedback::invalid(format!("Value must be at least {min}")));
            }
            if let Some(max) = cfg.max
                && number > max
            {
                return Some(Feedback::invalid(format!("Value must be at most {max}")));
            }
        }
        if let Some(re) = &rt.pattern
            && !re.is_match(raw)
        {
            let message = cfg
                .error_message
                .clone()
                .unwrap_or_else(|| "Invalid format".to_string());
            return Some(Feedback::invalid(message));
        }

        Some(Feedback::valid())
    }

    // --- Password strength and confirmation -----------------------------

    fn run_password_strength(&mut self, id: &str) -> bool {
        let Some(feedback) = self.password_strength_feedback(id) else {
            return true;
        };
        let ok = !feedback.is_blocking();
        self.set_feedback(id, feedback);
        ok
    }

    /// The strength ladder: required, length bounds, two non-terminal
    /// advisories for short passwords, then the composite rule.
    fn password_strength_feedback(&self, id: &str) -> Option<Feedback> {
        let rt = self.fields.get(id)?;
        let value = rt.text();
        let min = self.config.password_min_length;
        let max = self.config.password_max_length;

        if value.is_empty() {
            return Some(Feedback::invalid("Password is required"));
        }
        let len = value.graphemes(true).count();
        if len < min {
            return Some(Feedback::invalid(format!(
                "Password must be at least {min} characters"
            )));
        }
        if len > max {
            return Some(Feedback::invalid(format!(
                "Password must not exceed {max} characters"
            )));
        }
        if len < 10 && !value.chars().any(|c| c.is_ascii_uppercase()) {
            return Some(Feedback::warning(
                "Consider using uppercase letters for stronger password",
            ));
        }
        if len < 10 && !value.chars().any(|c| c.is_ascii_digit()) {
            return Some(Feedback::warning(
                "Consider adding numbers for stronger password",
            ));
        }
        if self.registry.evaluate(rule_id::STRONG_PASSWORD, value) == Some(true) {
            return Some(Feedback::valid_with("Strong password"));
        }
        Some(Feedback::valid())
    }

    fn run_password_match(&mut self, confirm_id: &str) -> bool {
        let Some(feedback) = self.password_match_feedback(confirm_id) else {
            return true;
        };
        let ok = !feedback.is_blocking();
        self.set_feedback(confirm_id, feedback);
        ok
    }

    fn password_match_feedback(&self, confirm_id: &str) -> Option<Feedback> {
        let confirm = self.fields.get(confirm_id)?;
        let partner_id = self.confirm_partner(confirm_id)?;
        let partner = self.fields.get(&partner_id)?;
        Some(if confirm.text().is_empty() {
            Feedback::invalid("Please confirm your password")
        } else if partner.text() != confirm.text() {
            Feedback::invalid("Passwords do not match")
        } else {
            Feedback::valid_with("Passwords match")
        })
    }

    /// Locate the password the confirmation field pairs with: the
    /// strength-checked field if the form has one, else any other
    /// password-typed field.
    fn confirm_partner(&self, confirm_id: &str) -> Option<String> {
        let scoped: Vec<String> = match self.forms.values().find(|s| s.contains(confirm_id)) {
            Some(spec) => spec.fields.clone(),
            None => {
                let mut all: Vec<String> = self.fields.keys().cloned().collect();
                all.sort();
                all
            }
        };
        scoped
            .iter()
            .find(|fid| {
                self.fields
                    .get(*fid)
                    .is_some_and(|rt| rt.config.rule.as_deref() == Some(PASSWORD_STRENGTH))
            })
            .or_else(|| {
                scoped.iter().find(|fid| {
                    fid.as_str() != confirm_id
                        && self.fields.get(*fid).is_some_and(|rt| {
                            rt.config.kind == FieldKind::Password
                                && rt.config.rule.as_deref() != Some(PASSWORD_CONFIRM)
                        })
                })
            })
            .cloned()
    }

    /// Typing in a password re-checks its confirmation field, but only
    /// once the confirmation has content.
    fn recheck_confirm_partner(&mut self, password_id: &str) {
        let confirm_id = self
            .forms
            .values()
            .find(|s| s.contains(password_id))
            .and_then(|spec| {
                spec.fields
                    .iter()
                    .find(|fid| {
                        self.fields.get(*fid).is_some_and(|rt| {
                            rt.config.rule.as_deref() == Some(PASSWORD_CONFIRM)
                                && !rt.text().is_empty()
                        })
                    })
                    .cloned()
            });
        if let Some(confirm_id) = confirm_id {
            self.run_password_match(&confirm_id);
        }
    }

    // --- Checkbox groups ------------------------------------------------

    fn validate_group(&mut self, group: &CheckboxGroup) -> bool {
        let checked = group
            .members
            .iter()
            .filter(|m| self.fields.get(*m).is_some_and(|rt| rt.value.is_checked()))
            .count();

        let failure = if let Some(min) = group.min_checked
            && checked < min
        {
            Some(format!("Select at least {min} options"))
        } else if let Some(max) = group.max_checked
            && checked > max
        {
            Some(format!("Select at most {max} options"))
        } else {
            None
        };

        let members = group.members.clone();
        match failure {
            Some(message) => {
                for member in &members {
                    self.set_feedback(member, Feedback::invalid(message.clone()));
                }
                false
            }
            None => {
                for member in &members {
                    self.set_feedback(member, Feedback::valid());
                }
                true
            }
        }
    }

    fn validate_groups_containing(&mut self, id: &str) {
        let groups: Vec<CheckboxGroup> = self
            .forms
            .values()
            .flat_map(|spec| spec.checkbox_groups.iter())
            .filter(|group| group.members.iter().any(|m| m == id))
            .cloned()
            .collect();
        for group in groups {
            self.validate_group(&group);
        }
    }

    // --- File inputs ----------------------------------------------------

    fn file_check(&self, id: &str) -> (bool, Option<Feedback>) {
        let Some(rt) = self.fields.get(id) else {
            return (true, None);
        };
        let cfg = &rt.config;
        let Some(meta) = rt.value.as_file() else {
            return if cfg.required {
                (false, Some(Feedback::invalid("Please select a file")))
            } else {
                (true, None)
            };
        };
        let limit = cfg.file_size_limit();
        if meta.size_bytes > limit {
            let max_mb = limit as f64 / (1024.0 * 1024.0);
            return (
                false,
                Some(Feedback::invalid(format!(
                    "File size must not exceed {max_mb:.2}MB"
                ))),
            );
        }
        if !cfg.allowed_types.is_empty() && !cfg.allowed_types.iter().any(|t| t == &meta.mime) {
            return (false, Some(Feedback::invalid("File type not allowed")));
        }
        let kb = meta.size_bytes as f64 / 1024.0;
        (
            true,
            Some(Feedback::valid_with(format!("{} ({kb:.2}KB)", meta.name))),
        )
    }

    fn validate_file(&mut self, id: &str) -> bool {
        let (ok, feedback) = self.file_check(id);
        if let Some(feedback) = feedback {
            self.set_feedback(id, feedback);
        }
        ok
    }

    // --- Date ranges ----------------------------------------------------

    fn validate_range(&mut self, range: &DateRange) -> bool {
        let start_text = self
            .fields
            .get(&range.start)
            .map(|rt| rt.text().to_string())
            .unwrap_or_default();
        let end_text = self
            .fields
            .get(&range.end)
            .map(|rt| rt.text().to_string())
            .unwrap_or_default();
        let (Some(start), Some(end)) = (parse_date(&start_text), parse_date(&end_text)) else {
            // An unparseable end fails the pairing without touching
            // either field's feedback.
            return false;
        };
        if start > end {
            self.set_feedback(&range.end, Feedback::invalid("End date must be after start date"));
            return false;
        }
        self.set_feedback(&range.start, Feedback::valid());
        self.set_feedback(&range.end, Feedback::valid());
        true
    }

    fn validate_ranges_containing(&mut self, id: &str) {
        let ranges: Vec<DateRange> = self
            .forms
            .values()
            .flat_map(|spec| spec.date_ranges.iter())
            .filter(|range| range.start == id || range.end == id)
            .cloned()
            .collect();
        for range in ranges {
            self.validate_range(&range);
        }
    }

    // --- Form aggregation -----------------------------------------------

    /// Validate every unit of a form, in category order, store a summary
    /// and return the report. `None` for an unknown form id.
    pub fn validate_form(&mut self, form_id: &str) -> Option<FormReport> {
        let spec = self.forms.get(form_id)?.clone();

        let mut rule_fields = Vec::new();
        let mut strength_fields = Vec::new();
        let mut confirm_field: Option<String> = None;
        let mut file_fields = Vec::new();
        for fid in &spec.fields {
            let Some(rt) = self.fields.get(fid) else {
                continue;
            };
            match rt.config.rule.as_deref() {
                Some(PASSWORD_STRENGTH) => strength_fields.push(fid.clone()),
                Some(PASSWORD_CONFIRM) => {
                    if confirm_field.is_none() {
                        confirm_field = Some(fid.clone());
                    }
                }
                _ => match rt.config.kind {
                    FieldKind::File => file_fields.push(fid.clone()),
                    FieldKind::Checkbox => {}
                    FieldKind::Text | FieldKind::Password => {
                        if has_declared_constraints(&rt.config) {
                            rule_fields.push(fid.clone());
                        }
                    }
                },
            }
        }

        let mut outcomes = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        for fid in &rule_fields {
            let ok = self.evaluate_field(fid);
            let label = self.label_for(fid, "Field");
            self.push_outcome(&mut outcomes, fid, &label, ok);
            if !ok {
                errors.push(label);
            }
        }

        for fid in &strength_fields {
            let ok = self.run_password_strength(fid);
            self.push_outcome(&mut outcomes, fid, "Password", ok);
            if !ok {
                errors.push("Password".to_string());
            }
        }

        if let Some(confirm_id) = &confirm_field
            && self.confirm_partner(confirm_id).is_some()
        {
            let ok = self.run_password_match(confirm_id);
            self.push_outcome(&mut outcomes, confirm_id, "Password Confirmation", ok);
            if !ok {
                errors.push("Password Confirmation".to_string());
            }
        }

        for group in &spec.checkbox_groups {
            let ok = self.validate_group(group);
            let label = group
                .name
                .clone()
                .unwrap_or_else(|| "Checkbox Group".to_string());
            for member in &group.members {
                self.push_outcome(&mut outcomes, member, &label, ok);
            }
            if !ok {
                errors.push(label);
            }
        }

        for fid in &file_fields {
            let ok = self.validate_file(fid);
            let label = self.label_for(fid, "File");
            self.push_outcome(&mut outcomes, fid, &label, ok);
            if !ok {
                errors.push(label);
            }
        }

        for range in &spec.date_ranges {
            let ok = self.validate_range(range);
            self.push_outcome(&mut outcomes, &range.end, "Date Range", ok);
            if !ok {
                errors.push("Date Range".to_string());
            }
        }

        let is_valid = errors.is_empty();
        let summary = if is_valid {
            self.scheduler.schedule(
                self.config.summary_dismiss,
                Task::DismissSummary {
                    form: form_id.to_string(),
                },
            );
            Summary::success()
        } else {
            Summary::errors(&errors)
        };
        self.summaries.insert(form_id.to_string(), summary.clone());

        tracing::debug!(
            form = form_id,
            valid = is_valid,
            failures = errors.len(),
            "form validated"
        );
        Some(FormReport {
            is_valid,
            outcomes,
            summary,
        })
    }

    fn push_outcome(
        &self,
        outcomes: &mut Vec<ValidationOutcome>,
        field: &str,
        label: &str,
        is_valid: bool,
    ) {
        let message = self
            .fields
            .get(field)
            .and_then(|rt| rt.feedback.message.clone());
        outcomes.push(ValidationOutcome {
            field: field.to_string(),
            label: label.to_string(),
            is_valid,
            message,
        });
    }

    fn label_for(&self, id: &str, fallback: &str) -> String {
        self.fields
            .get(id)
            .and_then(|rt| {
                rt.config
                    .display_name
                    .clone()
                    .or_else(|| rt.config.name.clone())
            })
            .unwrap_or_else(|| fallback.to_string())
    }

    // --- Autosave -------------------------------------------------------

    fn schedule_autosave_for(&mut self, field_id: &str) {
        let form_ids: Vec<String> = self
            .forms
            .values()
            .filter(|spec| spec.autosave && spec.contains(field_id))
            .map(|spec| spec.id.clone())
            .collect();
        let delay = self.config.autosave_delay;
        for form_id in form_ids {
            if let Some(token) = self.autosave_timers.remove(&form_id) {
                self.scheduler.cancel(token);
            }
            let token = self.scheduler.schedule(
                delay,
                Task::AutosaveFlush {
                    form: form_id.clone(),
                },
            );
            self.autosave_timers.insert(form_id, token);
        }
    }

    fn flush_autosave(&mut self, form_id: &str) {
        let Some(spec) = self.forms.get(form_id) else {
            return;
        };
        let mut snapshot: BTreeMap<String, String> = BTreeMap::new();
        let member_ids = spec
            .fields
            .iter()
            .chain(spec.checkbox_groups.iter().flat_map(|g| g.members.iter()));
        for fid in member_ids {
            let Some(rt) = self.fields.get(fid) else {
                continue;
            };
            let name = rt.config.name.clone().unwrap_or_else(|| fid.clone());
            match &rt.value {
                FieldValue::Text(text) => {
                    snapshot.insert(name, text.clone());
                }
                FieldValue::Checked(checked) => {
                    snapshot.insert(name, checked.to_string());
                }
                // File contents never reach the store.
                FieldValue::File(_) => {}
            }
        }

        let key = autosave_key(form_id);
        match serde_json::to_string(&snapshot) {
            Ok(payload) => match self.store.save(&key, &payload) {
                Ok(()) => {
                    tracing::debug!(form = form_id, fields = snapshot.len(), "form auto-saved");
                }
                Err(err) => {
                    tracing::warn!(form = form_id, %err, "autosave write failed");
                }
            },
            Err(err) => {
                tracing::warn!(form = form_id, %err, "autosave serialization failed");
            }
        }
    }

    /// Rehydrate a form's fields from the autosave store, matching by
    /// declared name. Corrupt or missing payloads are logged and
    /// ignored. Returns the number of fields restored.
    pub fn restore_form(&mut self, form_id: &str) -> usize {
        let Some(spec) = self.forms.get(form_id).cloned() else {
            return 0;
        };
        let key = autosave_key(form_id);
        let payload = match self.store.load(&key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return 0,
            Err(err) => {
                tracing::warn!(form = form_id, %err, "autosave read failed");
                return 0;
            }
        };
        let data: HashMap<String, String> = match serde_json::from_str(&payload) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(form = form_id, %err, "failed to restore form data");
                return 0;
            }
        };

        let member_ids: Vec<String> = spec
            .fields
            .iter()
            .cloned()
            .chain(
                spec.checkbox_groups
                    .iter()
                    .flat_map(|g| g.members.iter().cloned()),
            )
            .collect();
        let mut restored = 0;
        for fid in member_ids {
            let Some(rt) = self.fields.get_mut(&fid) else {
                continue;
            };
            let name = rt.config.name.clone().unwrap_or_else(|| fid.clone());
            let Some(value) = data.get(&name) else {
                continue;
            };
            match rt.config.kind {
                // File inputs are excluded from snapshots both ways.
                FieldKind::File => {}
                FieldKind::Checkbox => {
                    rt.value = FieldValue::Checked(value == "true");
                    restored += 1;
                }
                FieldKind::Text | FieldKind::Password => {
                    rt.value = FieldValue::Text(value.clone());
                    restored += 1;
                }
            }
        }
        tracing::debug!(form = form_id, restored, "form state restored");
        restored
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValidationEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationEngine")
            .field("fields", &self.fields.len())
            .field("forms", &self.forms.len())
            .field("pending_tasks", &self.scheduler.pending())
            .field("store", &self.store.name())
            .finish()
    }
}
