use assistant_core::{update, AppState, Msg, ResultsPanel, SelectedFile};

#[test]
fn selecting_a_file_overwrites_the_previous_one() {
    let (state, _) = update(
        AppState::new(),
        Msg::ResumeSelected(SelectedFile::from_path("old.pdf")),
    );
    let (mut state, effects) = update(
        state,
        Msg::ResumeSelected(SelectedFile::from_path("new.pdf")),
    );

    assert!(effects.is_empty());
    assert_eq!(state.selected_file().unwrap().file_name, "new.pdf");
    assert_eq!(state.view().selected_file_name.as_deref(), Some("new.pdf"));
    assert!(state.consume_dirty());
}

#[test]
fn job_description_tracks_latest_text() {
    let (state, _) = update(AppState::new(), Msg::JobDescriptionChanged("Ru".to_string()));
    let (mut state, effects) = update(state, Msg::JobDescriptionChanged("Rust ✓".to_string()));

    assert!(effects.is_empty());
    assert_eq!(state.job_description(), "Rust ✓");
    assert_eq!(state.view().job_description_chars, 6);
    assert!(state.consume_dirty());
}

#[test]
fn unchanged_description_does_not_mark_dirty() {
    let (mut state, _) = update(AppState::new(), Msg::JobDescriptionChanged("same".to_string()));
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::JobDescriptionChanged("same".to_string()));
    assert!(!state.consume_dirty());
}

#[test]
fn fresh_state_allows_submit_and_hides_results() {
    let view = AppState::new().view();
    assert!(view.submit_enabled);
    assert_eq!(view.selected_file_name, None);
    assert_eq!(view.backend_message, None);
    assert_eq!(view.results, ResultsPanel::Hidden);
}
