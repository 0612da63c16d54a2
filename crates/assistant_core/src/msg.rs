#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application finished starting up.
    Started,
    /// User picked a resume file.
    ResumeSelected(crate::SelectedFile),
    /// User edited the job description (full current text).
    JobDescriptionChanged(String),
    /// User pressed the submit control.
    SubmitClicked,
    /// Engine finished a submission.
    AnalysisCompleted {
        submission_id: crate::SubmissionId,
        outcome: crate::AnalysisOutcome,
    },
    /// Engine finished the connectivity probe; `None` when it failed.
    ProbeCompleted { message: Option<String> },
}
