//! End-to-end tests for the wizard session and generation handoff,
//! driven the way the shell drives them: submit outcome -> service
//! call -> complete/fail -> routing.

use pitchline::generate::{
    GenerateError, GenerationService, MockGenerationService, ScriptId, ScriptRequest, ScriptStore,
    TemplateScriptService,
};
use pitchline::router::{RecordingRouter, ScriptRouter};
use pitchline::wizard::{FieldKey, LifecycleStatus, NavOutcome, StepId, WizardSession, WizardState};

fn fill_session(session: &mut WizardSession) {
    session.set_field(FieldKey::Product, "Cloud CRM");
    session.set_field(FieldKey::Persona, "Sales Directors at mid-size B2B companies");
    session.set_field(FieldKey::Industry, "Technology");
    session.set_field(FieldKey::Goal, "schedule-demo");
    session.set_field(FieldKey::Tone, "consultative");
    session.set_field(FieldKey::Objections, "We're happy with our current solution");
}

fn advance_to_submit(session: &mut WizardSession) {
    for _ in 1..6 {
        assert!(matches!(session.go_forward(), NavOutcome::Moved { .. }));
    }
    assert_eq!(session.go_forward(), NavOutcome::Submit);
}

/// One round of what the shell does once a session submits.
async fn drive_generation(
    session: &mut WizardSession,
    service: &dyn GenerationService,
    router: &mut RecordingRouter,
) -> Result<ScriptId, GenerateError> {
    let request = ScriptRequest::from_form(session.form()).expect("gate passed, goal parses");
    match service.generate(&request).await {
        Ok(id) => {
            if session.complete() {
                router.route_to(&id);
            }
            Ok(id)
        }
        Err(err) => {
            session.fail(err.to_string());
            Err(err)
        }
    }
}

#[tokio::test]
async fn happy_path_routes_to_the_generated_script() {
    let service = MockGenerationService::succeeding_with("42");
    let mut router = RecordingRouter::new();
    let mut session = WizardSession::new();

    fill_session(&mut session);
    advance_to_submit(&mut session);
    assert_eq!(session.state(), WizardState::Submitting);

    let id = drive_generation(&mut session, &service, &mut router)
        .await
        .unwrap();

    assert_eq!(id, ScriptId::new("42"));
    assert_eq!(session.state(), WizardState::Completed);
    assert_eq!(router.routed, vec![ScriptId::new("42")]);
    assert_eq!(service.call_count(), 1);

    // The payload carried every answer.
    let request = &service.requests()[0];
    assert_eq!(request.product, "Cloud CRM");
    assert_eq!(request.industry, "Technology");
}

#[tokio::test]
async fn repeated_forward_never_submits_twice() {
    let service = MockGenerationService::succeeding_with("7");
    let mut router = RecordingRouter::new();
    let mut session = WizardSession::new();

    fill_session(&mut session);
    advance_to_submit(&mut session);

    // Mash the forward key while the generation is in flight.
    for _ in 0..5 {
        assert_eq!(session.go_forward(), NavOutcome::Stay);
    }

    drive_generation(&mut session, &service, &mut router)
        .await
        .unwrap();
    assert_eq!(service.call_count(), 1);

    // And after completion the session stays terminal.
    assert_eq!(session.go_forward(), NavOutcome::Stay);
    assert_eq!(session.go_back(), NavOutcome::Stay);
    assert_eq!(router.routed.len(), 1);
}

#[tokio::test]
async fn failed_generation_recovers_and_can_resubmit() {
    let service = MockGenerationService::succeeding_with("9");
    service.push_response(Err(GenerateError::Unavailable(
        "script backend down".to_string(),
    )));
    let mut router = RecordingRouter::new();
    let mut session = WizardSession::new();

    fill_session(&mut session);
    advance_to_submit(&mut session);

    let err = drive_generation(&mut session, &service, &mut router).await;
    assert!(err.is_err());

    // Back on the final step, answers intact, notice surfaced, nothing routed.
    assert_eq!(session.state(), WizardState::AtStep(StepId::LAST));
    assert_eq!(session.status(), LifecycleStatus::Idle);
    assert!(session.notice().unwrap().contains("script backend down"));
    assert_eq!(session.form().get(FieldKey::Product), "Cloud CRM");
    assert!(router.routed.is_empty());

    // Second attempt goes through.
    assert_eq!(session.go_forward(), NavOutcome::Submit);
    drive_generation(&mut session, &service, &mut router)
        .await
        .unwrap();
    assert_eq!(session.state(), WizardState::Completed);
    assert_eq!(router.routed, vec![ScriptId::new("9")]);
    assert_eq!(service.call_count(), 2);
}

#[tokio::test]
async fn template_service_produces_a_loadable_artifact() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = ScriptStore::new(temp.path().join("scripts"));
    let service = TemplateScriptService::new(store.clone());
    let mut router = RecordingRouter::new();
    let mut session = WizardSession::new();

    fill_session(&mut session);
    advance_to_submit(&mut session);

    let id = drive_generation(&mut session, &service, &mut router)
        .await
        .unwrap();

    let script = store.load(&id).unwrap();
    assert_eq!(script.request.product, "Cloud CRM");
    assert!(script.opener.contains("Cloud CRM"));
    assert!(script.closing.contains("Schedule a demo"));
    assert_eq!(router.routed, vec![id]);
}
