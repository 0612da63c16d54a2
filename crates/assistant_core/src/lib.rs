//! Career assistant core: pure submission state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod validation;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AnalysisOutcome, AppState, SelectedFile, Submission, SubmissionId, SubmissionState,
    BACKEND_FALLBACK_MESSAGE, GENERIC_ANALYSIS_ERROR,
};
pub use update::update;
pub use validation::{validate_submission, ValidationError};
pub use view_model::{AppViewModel, ResultsPanel};
