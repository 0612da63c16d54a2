use crate::{Submission, SubmissionId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the backend root for its greeting.
    ProbeBackend,
    /// Post the resume and job description to the analysis service.
    SubmitAnalysis {
        submission_id: SubmissionId,
        submission: Submission,
    },
    /// Blocking notification; the submission was not attempted.
    ShowAlert(ValidationError),
}
