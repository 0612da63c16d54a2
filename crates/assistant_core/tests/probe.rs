use assistant_core::{update, AppState, Effect, Msg, BACKEND_FALLBACK_MESSAGE};

#[test]
fn startup_requests_a_probe() {
    let (next, effects) = update(AppState::new(), Msg::Started);
    assert_eq!(effects, vec![Effect::ProbeBackend]);
    assert_eq!(next, AppState::new());
}

#[test]
fn probe_greeting_is_shown() {
    let (state, _) = update(
        AppState::new(),
        Msg::ProbeCompleted {
            message: Some("AI Career Assistant Backend is running.".to_string()),
        },
    );
    assert_eq!(
        state.view().backend_message.as_deref(),
        Some("AI Career Assistant Backend is running.")
    );
}

#[test]
fn probe_failure_shows_fallback() {
    let (mut state, effects) = update(AppState::new(), Msg::ProbeCompleted { message: None });
    assert!(effects.is_empty());
    assert_eq!(
        state.view().backend_message.as_deref(),
        Some(BACKEND_FALLBACK_MESSAGE)
    );
    assert!(state.consume_dirty());
}
