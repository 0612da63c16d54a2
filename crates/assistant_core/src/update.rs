use crate::{validate_submission, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::ProbeBackend],
        Msg::ResumeSelected(file) => {
            state.set_selected_file(file);
            Vec::new()
        }
        Msg::JobDescriptionChanged(text) => {
            state.set_job_description(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // The submit control is disabled while a request is in flight.
            if state.is_loading() {
                return (state, Vec::new());
            }
            match validate_submission(state.selected_file(), state.job_description()) {
                Ok(submission) => {
                    let submission_id = state.begin_submission();
                    vec![Effect::SubmitAnalysis {
                        submission_id,
                        submission,
                    }]
                }
                Err(err) => vec![Effect::ShowAlert(err)],
            }
        }
        Msg::AnalysisCompleted {
            submission_id,
            outcome,
        } => {
            state.complete_submission(submission_id, outcome);
            Vec::new()
        }
        Msg::ProbeCompleted { message } => {
            state.set_backend_message(message);
            Vec::new()
        }
    };

    (state, effects)
}
