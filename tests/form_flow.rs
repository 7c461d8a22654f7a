use schemaform::core::date::Date;
use schemaform::core::path::IssuePath;
use schemaform::core::value::FieldInput;
use schemaform::form::{ErrorPolicy, FormController, FormStatus, SubmitOutcome};
use schemaform::runtime::FormApp;
use schemaform::runtime::focus::Focus;
use schemaform::schema::{FieldSchema, Issue, Schema, loader, presets};
use schemaform::terminal::{KeyCode, KeyEvent};
use serde_json::json;
use std::sync::{Arc, Mutex};

const TODAY: Date = Date::new(2026, 10, 18);

fn recording_controller(schema: Schema) -> (FormController, Arc<Mutex<Vec<serde_json::Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    let controller = FormController::new(schema, move |data| {
        sink.lock().expect("lock").push(data.to_json());
    });
    (controller, received)
}

fn press(app: &mut FormApp, code: KeyCode) {
    app.handle_key(KeyEvent::plain(code));
}

fn type_text(app: &mut FormApp, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

#[test]
fn blog_post_submits_once_and_resets() {
    let (mut form, received) = recording_controller(presets::blog_post());

    form.apply("title", FieldInput::Text("My First Post".into()));
    form.apply("publishDate", FieldInput::Date(Date::new(2030, 1, 15)));
    form.apply("topic", FieldInput::Text("NBA".into()));
    form.apply("featured", FieldInput::Bool(true));

    assert_eq!(form.submit(), SubmitOutcome::Submitted);
    assert_eq!(form.submissions(), 1);
    assert!(form.state().is_empty());
    assert!(form.errors().is_empty());
    assert_eq!(form.status(), FormStatus::Editing);

    let received = received.lock().expect("lock");
    assert_eq!(
        received.as_slice(),
        &[json!({
            "title": "My First Post",
            "slug": "my-first-post",
            "publishDate": "2030-01-15",
            "topic": "NBA",
            "featured": true,
        })]
    );
}

#[test]
fn failed_submit_keeps_values_and_reports_each_field() {
    let (mut form, received) = recording_controller(presets::blog_post());
    form.apply("title", FieldInput::Text("Draft".into()));
    form.apply("topic", FieldInput::Text("Curling".into()));

    let outcome = form.submit();
    assert_eq!(outcome, SubmitOutcome::Invalid { errors: 2 });
    assert_eq!(form.status(), FormStatus::Invalid);
    assert!(received.lock().expect("lock").is_empty());

    assert_eq!(form.state().text("title"), Some("Draft"));
    assert_eq!(form.error("publishDate"), Some("Publish date is required"));
    assert!(
        form.error("topic")
            .is_some_and(|message| message.starts_with("Invalid enum value"))
    );
    assert_eq!(form.error("title"), None);
    assert_eq!(form.error("slug"), None);
}

#[test]
fn editing_slug_does_not_touch_title() {
    let (mut form, _) = recording_controller(presets::blog_post());
    form.apply("title", FieldInput::Text("Hello".into()));
    form.apply("slug", FieldInput::Text("Custom Slug".into()));

    assert_eq!(form.state().text("title"), Some("Hello"));
    assert_eq!(form.state().text("slug"), Some("custom-slug"));

    form.apply("title", FieldInput::Text("Hello Again".into()));
    assert_eq!(form.state().text("slug"), Some("hello-again"));
}

#[test]
fn refinement_issues_route_to_fields_and_general() {
    let schema = Schema::builder()
        .field("password", FieldSchema::text().min_length(4))
        .field("confirm", FieldSchema::text())
        .refine(|data| {
            let mut issues = Vec::new();
            if data.get("password") != data.get("confirm") {
                issues.push(Issue::at("confirm", "Passwords do not match"));
                issues.push(Issue::new(IssuePath::root(), "Please review the form"));
            }
            issues
        })
        .build();

    let (mut form, received) = recording_controller(schema);
    form.apply("password", FieldInput::Text("hunter2".into()));
    form.apply("confirm", FieldInput::Text("hunter3".into()));

    assert!(matches!(form.submit(), SubmitOutcome::Invalid { .. }));
    assert_eq!(form.error("confirm"), Some("Passwords do not match"));
    assert_eq!(form.errors().general(), ["Please review the form".to_string()]);
    assert!(received.lock().expect("lock").is_empty());
}

#[test]
fn aggregate_policy_joins_messages() {
    let schema = Schema::builder()
        .field(
            "code",
            FieldSchema::text()
                .min_length(5)
                .pattern(regex::Regex::new("^[0-9]+$").expect("regex")),
        )
        .build();
    let (form, _) = recording_controller(schema);
    let mut form = form.with_error_policy(ErrorPolicy::Aggregate);
    form.apply("code", FieldInput::Text("ab".into()));
    form.submit();

    assert_eq!(
        form.error("code"),
        Some("String must contain at least 5 character(s); Invalid")
    );
}

#[test]
fn yaml_demo_schema_drives_the_same_flow() {
    let schema = loader::load(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/blog-post.yaml"))
        .expect("demo schema");
    let (mut form, received) = recording_controller(schema);

    form.apply("title", FieldInput::Text("Playoffs Preview".into()));
    form.apply("publishDate", FieldInput::Date(Date::new(2031, 4, 1)));
    form.apply("topic", FieldInput::Text("NHL".into()));

    assert_eq!(form.submit(), SubmitOutcome::Submitted);
    assert_eq!(
        received.lock().expect("lock")[0]["slug"],
        json!("playoffs-preview")
    );
}

#[test]
fn keyboard_session_fills_and_submits_the_form() {
    let mut app = FormApp::new(presets::blog_post()).with_today(TODAY);

    type_text(&mut app, "Game Day");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.focus(), Focus::Field(1));
    press(&mut app, KeyCode::Tab);

    // Date picker: open, move one week ahead, pick.
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Tab);

    // Topic: first choice.
    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Tab);

    // Featured toggle, then the submit button.
    press(&mut app, KeyCode::Char(' '));
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus(), Focus::Submit);
    press(&mut app, KeyCode::Enter);

    let submissions = app.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions[0].to_json(),
        json!({
            "title": "Game Day",
            "slug": "game-day",
            "publishDate": "2026-10-25",
            "topic": "NFL",
            "featured": true,
        })
    );
    assert!(app.controller().state().is_empty());
    assert_eq!(app.focus(), Focus::Field(0));
    assert!(
        app.status()
            .is_some_and(|status| status.text.starts_with("Submitted: "))
    );
}

#[test]
fn rendered_frame_shows_inline_errors_after_failed_submit() {
    let mut app = FormApp::new(presets::blog_post()).with_today(TODAY);
    app.handle_key(KeyEvent::ctrl('s'));

    let text: Vec<String> = app
        .render()
        .lines
        .iter()
        .map(schemaform::ui::span::line_text)
        .collect();
    assert!(text.iter().any(|line| line == "  Slug is required"));
    assert!(text.iter().any(|line| line == "  Topic is required"));
    assert!(text.iter().any(|line| line == "Fix 4 errors before submitting"));
}
