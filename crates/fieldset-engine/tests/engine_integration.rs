//! End-to-end engine scenarios: availability checks with cancellation,
//! whole-form aggregation, summaries, and autosave round-trips.

use std::time::Duration;

use fieldset_core::{FieldConfig, FieldEvent, FieldKind, FieldState, FieldValue, FileMeta, MaskSpec};
use fieldset_engine::{
    CheckboxGroup, DateRange, FileStore, FormSpec, MemoryStore, PASSWORD_CONFIRM,
    PASSWORD_STRENGTH, Summary, USERNAME_ASYNC, ValidationEngine, autosave_key,
};
use fieldset_engine::AutosaveStore;

const MS: Duration = Duration::from_millis(1);

// ── Availability checks ─────────────────────────────────────────────────

#[test]
fn username_check_goes_info_then_resolves() {
    let mut engine = ValidationEngine::new();
    engine.add_field("username", FieldConfig::new().with_rule(USERNAME_ASYNC));

    engine.apply(FieldEvent::changed("username", "somebody"));
    engine.advance(300 * MS); // debounce fires, probe starts

    let feedback = engine.feedback("username").unwrap();
    assert_eq!(feedback.state, FieldState::Info);
    assert_eq!(feedback.message.as_deref(), Some("Checking availability..."));

    engine.advance(500 * MS); // simulated latency elapses
    let feedback = engine.feedback("username").unwrap();
    assert_eq!(feedback.state, FieldState::Valid);
    assert_eq!(feedback.message.as_deref(), Some("Username is available"));
}

#[test]
fn taken_username_is_rejected() {
    let mut engine = ValidationEngine::new();
    engine.add_field("username", FieldConfig::new().with_rule(USERNAME_ASYNC));

    engine.apply(FieldEvent::changed("username", "admin"));
    engine.advance(800 * MS); // debounce + latency in one window

    let feedback = engine.feedback("username").unwrap();
    assert_eq!(feedback.state, FieldState::Invalid);
    assert_eq!(feedback.message.as_deref(), Some("Username is already taken"));
}

#[test]
fn retyping_cancels_pending_check() {
    let mut engine = ValidationEngine::new();
    engine.add_field("username", FieldConfig::new().with_rule(USERNAME_ASYNC));

    // "admin" would resolve to taken at t = 800ms...
    engine.apply(FieldEvent::changed("username", "admin"));
    engine.advance(400 * MS); // probe in flight, resolves at 800

    // ...but retyping at t = 400ms supersedes it entirely.
    engine.apply(FieldEvent::changed("username", "adminx"));
    engine.advance(200 * MS); // t = 600: debounce for "adminx" pending

    // The stale resolve deadline has passed without firing.
    engine.advance(100 * MS); // t = 700: "adminx" debounce fired, new probe
    let feedback = engine.feedback("username").unwrap();
    assert_eq!(feedback.state, FieldState::Info);

    engine.advance(500 * MS); // t = 1200: fresh probe resolves
    let feedback = engine.feedback("username").unwrap();
    assert_eq!(feedback.state, FieldState::Valid);
    assert_eq!(feedback.message.as_deref(), Some("Username is available"));
}

#[test]
fn email_check_requires_plausible_email_first() {
    let mut engine = ValidationEngine::new();
    engine.add_field("email", FieldConfig::new().with_rule("email-async"));

    engine.apply(FieldEvent::changed("email", "not-an-email"));
    engine.advance(800 * MS);
    // Not probed at all: feedback untouched.
    assert_eq!(engine.feedback("email").unwrap().state, FieldState::Unvalidated);

    engine.apply(FieldEvent::changed("email", "test@example.com"));
    engine.advance(800 * MS);
    let feedback = engine.feedback("email").unwrap();
    assert_eq!(feedback.state, FieldState::Invalid);
    assert_eq!(feedback.message.as_deref(), Some("Email is already registered"));
}

// ── Whole-form aggregation ──────────────────────────────────────────────

fn build_signup_engine() -> ValidationEngine {
    let mut engine = ValidationEngine::new();
    engine.add_field(
        "email",
        FieldConfig::new()
            .with_rule("email")
            .required()
            .with_display_name("Email"),
    );
    engine.add_field(
        "phone",
        FieldConfig::new()
            .with_rule("phoneUS")
            .with_mask(MaskSpec::digits("(999) 999-9999"))
            .with_display_name("Phone"),
    );
    engine.add_field(
        "password",
        FieldConfig::new()
            .with_rule(PASSWORD_STRENGTH)
            .with_kind(FieldKind::Password),
    );
    engine.add_field(
        "confirm",
        FieldConfig::new()
            .with_rule(PASSWORD_CONFIRM)
            .with_kind(FieldKind::Password),
    );
    engine.add_field("avatar", FieldConfig::new().with_kind(FieldKind::File));
    for id in ["interest-a", "interest-b", "interest-c"] {
        engine.add_field(id, FieldConfig::new().with_kind(FieldKind::Checkbox));
    }
    engine.add_field("from", FieldConfig::new().with_name("from"));
    engine.add_field("to", FieldConfig::new().with_name("to"));

    engine.add_form(
        FormSpec::new("signup")
            .with_field("email")
            .with_field("phone")
            .with_field("password")
            .with_field("confirm")
            .with_field("avatar")
            .with_field("from")
            .with_field("to")
            .with_checkbox_group(
                CheckboxGroup::new(vec![
                    "interest-a".into(),
                    "interest-b".into(),
                    "interest-c".into(),
                ])
                .with_name("Interests")
                .with_min_checked(1),
            )
            .with_date_range(DateRange::new("from", "to")),
    );
    engine
}

fn fill_valid(engine: &mut ValidationEngine) {
    engine.apply(FieldEvent::changed("email", "user@example.com"));
    engine.apply(FieldEvent::changed("phone", "5551234567"));
    engine.apply(FieldEvent::changed("password", "Abcdef1!"));
    engine.apply(FieldEvent::changed("confirm", "Abcdef1!"));
    engine.apply(FieldEvent::Changed {
        id: "avatar".into(),
        value: FieldValue::File(Some(FileMeta::new("me.png", 4096, "image/png"))),
    });
    engine.apply(FieldEvent::changed("interest-a", true));
    engine.apply(FieldEvent::changed("from", "2024-06-01"));
    engine.apply(FieldEvent::changed("to", "2024-06-10"));
}

#[test]
fn valid_form_reports_success_and_dismisses_summary() {
    let mut engine = build_signup_engine();
    fill_valid(&mut engine);

    let report = engine.validate_form("signup").expect("known form");
    assert!(report.is_valid, "outcomes: {:?}", report.outcomes);
    assert!(report.summary.is_success());
    assert!(engine.summary("signup").is_some());

    // The success banner goes away on its own.
    engine.advance(Duration::from_secs(3));
    assert!(engine.summary("signup").is_none());
}

#[test]
fn failing_form_lists_labels_in_category_order() {
    let mut engine = build_signup_engine();
    fill_valid(&mut engine);
    // Break one unit per category.
    engine.apply(FieldEvent::changed("email", "broken"));
    engine.apply(FieldEvent::changed("password", "abc"));
    engine.apply(FieldEvent::changed("confirm", "different"));
    engine.apply(FieldEvent::changed("interest-a", false));
    engine.apply(FieldEvent::Changed {
        id: "avatar".into(),
        value: FieldValue::File(Some(FileMeta::new("huge.png", 50_000_000, "image/png"))),
    });
    engine.apply(FieldEvent::changed("to", "2024-05-01"));

    let report = engine.validate_form("signup").expect("known form");
    assert!(!report.is_valid);
    match &report.summary {
        Summary::Errors {
            title,
            items,
            scroll_into_view,
        } => {
            assert_eq!(title, "Please correct the following errors:");
            assert!(*scroll_into_view);
            assert_eq!(
                items,
                &[
                    "Email is invalid",
                    "Password is invalid",
                    "Password Confirmation is invalid",
                    "Interests is invalid",
                    "File is invalid",
                    "Date Range is invalid",
                ]
            );
        }
        Summary::Success { .. } => panic!("expected an error summary"),
    }
    // A later pass replaces the summary.
    fill_valid(&mut engine);
    let report = engine.validate_form("signup").expect("known form");
    assert!(report.is_valid);
    assert!(engine.summary("signup").is_some_and(Summary::is_success));
}

#[test]
fn incomplete_mask_blocks_the_form() {
    let mut engine = build_signup_engine();
    fill_valid(&mut engine);
    engine.apply(FieldEvent::changed("phone", "5551"));

    let report = engine.validate_form("signup").expect("known form");
    assert!(!report.is_valid);
    let feedback = engine.feedback("phone").unwrap();
    assert_eq!(feedback.state, FieldState::Warning);
    assert_eq!(feedback.message.as_deref(), Some("Please complete the input"));
}

#[test]
fn unknown_form_is_none() {
    let mut engine = ValidationEngine::new();
    assert!(engine.validate_form("nope").is_none());
}

// ── Autosave ────────────────────────────────────────────────────────────

fn autosave_engine() -> ValidationEngine {
    let mut engine = ValidationEngine::new();
    engine.add_field("name", FieldConfig::new().with_name("name"));
    engine.add_field("email", FieldConfig::new().with_name("email"));
    engine.add_field(
        "subscribe",
        FieldConfig::new().with_kind(FieldKind::Checkbox).with_name("subscribe"),
    );
    engine.add_field("cv", FieldConfig::new().with_kind(FieldKind::File).with_name("cv"));
    engine.add_form(
        FormSpec::new("contact")
            .with_autosave()
            .with_field("name")
            .with_field("email")
            .with_field("subscribe")
            .with_field("cv"),
    );
    engine
}

#[test]
fn autosave_waits_for_idle_and_excludes_files() {
    let mut engine = autosave_engine();

    engine.apply(FieldEvent::changed("name", "Ada"));
    engine.advance(Duration::from_secs(1));
    // Still typing: the idle timer was rescheduled.
    engine.apply(FieldEvent::changed("email", "ada@example.com"));
    engine.apply(FieldEvent::changed("subscribe", true));
    engine.apply(FieldEvent::Changed {
        id: "cv".into(),
        value: FieldValue::File(Some(FileMeta::new("cv.pdf", 1024, "application/pdf"))),
    });
    engine.advance(Duration::from_secs(2));

    // Clearing the fields schedules a new snapshot; the latest write is
    // what restore sees.
    engine.apply(FieldEvent::changed("name", ""));
    engine.apply(FieldEvent::changed("email", ""));
    engine.advance(Duration::from_secs(2));

    let restored = engine.restore_form("contact");
    assert_eq!(restored, 3); // name, email, subscribe — never the file
    assert_eq!(engine.value("name").unwrap().as_text(), Some(""));
}

#[test]
fn autosave_round_trips_through_a_file_store() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("autosave.json");

    {
        let mut engine =
            autosave_engine().with_store(Box::new(FileStore::new(&path)));
        engine.apply(FieldEvent::changed("name", "Grace"));
        engine.apply(FieldEvent::changed("email", "grace@example.com"));
        engine.apply(FieldEvent::changed("subscribe", true));
        engine.advance(Duration::from_secs(2));
        assert!(path.exists());
    }

    // A brand-new engine over the same file sees the snapshot.
    let mut engine = autosave_engine().with_store(Box::new(FileStore::new(&path)));
    let restored = engine.restore_form("contact");
    assert_eq!(restored, 3);
    assert_eq!(engine.value("name").unwrap().as_text(), Some("Grace"));
    assert_eq!(
        engine.value("email").unwrap().as_text(),
        Some("grace@example.com")
    );
    assert!(engine.value("subscribe").unwrap().is_checked());
    assert_eq!(engine.value("cv").unwrap(), &FieldValue::File(None));
}

#[test]
fn corrupt_autosave_payload_is_swallowed() {
    let store = MemoryStore::new();
    store
        .save(&autosave_key("contact"), "{ not valid json at all")
        .unwrap();

    let mut engine = autosave_engine().with_store(Box::new(store));
    engine.apply(FieldEvent::changed("name", "before"));
    let restored = engine.restore_form("contact");
    assert_eq!(restored, 0);
    // The field keeps its current value; nothing surfaced to the user.
    assert_eq!(engine.value("name").unwrap().as_text(), Some("before"));
    assert_eq!(engine.feedback("name").unwrap().state, FieldState::Unvalidated);
}

#[test]
fn forms_without_autosave_never_write() {
    let mut engine = ValidationEngine::new();
    engine.add_field("q", FieldConfig::new().with_name("q"));
    engine.add_form(FormSpec::new("search").with_field("q")); // no autosave
    engine.apply(FieldEvent::changed("q", "hello"));
    engine.advance(Duration::from_secs(5));
    assert_eq!(engine.restore_form("search"), 0);
}
