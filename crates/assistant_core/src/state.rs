use std::path::{Path, PathBuf};

use crate::view_model::{AppViewModel, ResultsPanel};

pub type SubmissionId = u64;

/// Shown instead of the backend greeting when the probe fails.
pub const BACKEND_FALLBACK_MESSAGE: &str = "Could not connect to backend.";
/// Shown when a failed analysis carries no `detail` from the service.
pub const GENERIC_ANALYSIS_ERROR: &str = "Error analyzing resume.";

const PDF_MIME: &str = "application/pdf";
const OCTET_STREAM_MIME: &str = "application/octet-stream";

/// The resume picked by the user. The path is the handle; contents are read
/// only when a submission is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
}

impl SelectedFile {
    /// Derives the file name and MIME type from the path. The MIME type is a
    /// hint taken from the extension; the file itself is never inspected.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        let mime_type = mime_for_path(&path).to_string();
        Self {
            path,
            file_name,
            mime_type,
        }
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        PDF_MIME
    } else {
        OCTET_STREAM_MIME
    }
}

/// Snapshot of the form taken at the moment of submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub resume: SelectedFile,
    pub job_description: String,
}

/// What the analysis service produced for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// Markdown analysis returned by the service.
    Analysis(String),
    /// Transport or server failure, with the service's `detail` if it sent one.
    Failed { detail: Option<String> },
}

impl AnalysisOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, AnalysisOutcome::Failed { .. })
    }

    /// Human-readable failure message, falling back to the generic text.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            AnalysisOutcome::Analysis(_) => None,
            AnalysisOutcome::Failed { detail } => Some(
                detail
                    .as_deref()
                    .filter(|d| !d.is_empty())
                    .unwrap_or(GENERIC_ANALYSIS_ERROR),
            ),
        }
    }

    /// The markdown shown in the results panel. Failures get a bold prefix.
    pub fn display_markdown(&self) -> String {
        match self {
            AnalysisOutcome::Analysis(text) => text.clone(),
            AnalysisOutcome::Failed { .. } => {
                let message = self.error_message().unwrap_or(GENERIC_ANALYSIS_ERROR);
                format!("**Error:** {message}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading {
        submission_id: SubmissionId,
    },
    Done(AnalysisOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    selected_file: Option<SelectedFile>,
    job_description: String,
    submission: SubmissionState,
    last_submission_id: SubmissionId,
    backend_message: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let results = match &self.submission {
            SubmissionState::Idle => ResultsPanel::Hidden,
            SubmissionState::Loading { .. } => ResultsPanel::Progress,
            SubmissionState::Done(outcome) => ResultsPanel::Markdown {
                text: outcome.display_markdown(),
                is_error: outcome.is_error(),
            },
        };

        AppViewModel {
            backend_message: self.backend_message.clone(),
            selected_file_name: self.selected_file.as_ref().map(|f| f.file_name.clone()),
            job_description_chars: self.job_description.chars().count(),
            submit_enabled: !self.is_loading(),
            results,
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.submission, SubmissionState::Loading { .. })
    }

    /// Returns whether a re-render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_selected_file(&mut self, file: SelectedFile) {
        self.selected_file = Some(file);
        self.dirty = true;
    }

    pub(crate) fn set_job_description(&mut self, text: String) {
        if self.job_description != text {
            self.job_description = text;
            self.dirty = true;
        }
    }

    pub(crate) fn set_backend_message(&mut self, message: Option<String>) {
        let message = message.unwrap_or_else(|| BACKEND_FALLBACK_MESSAGE.to_string());
        self.backend_message = Some(message);
        self.dirty = true;
    }

    /// Enters `Loading` with a fresh id; any previous result is dropped.
    pub(crate) fn begin_submission(&mut self) -> SubmissionId {
        self.last_submission_id += 1;
        let submission_id = self.last_submission_id;
        self.submission = SubmissionState::Loading { submission_id };
        self.dirty = true;
        submission_id
    }

    /// Leaves `Loading` if `submission_id` is the request in flight.
    /// Returns false for stale or duplicate completions, which change nothing.
    pub(crate) fn complete_submission(
        &mut self,
        submission_id: SubmissionId,
        outcome: AnalysisOutcome,
    ) -> bool {
        match self.submission {
            SubmissionState::Loading { submission_id: in_flight } if in_flight == submission_id => {
                self.submission = SubmissionState::Done(outcome);
                self.dirty = true;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_extension_maps_to_pdf_mime() {
        let file = SelectedFile::from_path("/tmp/Resume.PDF");
        assert_eq!(file.file_name, "Resume.PDF");
        assert_eq!(file.mime_type, "application/pdf");
    }

    #[test]
    fn other_extensions_map_to_octet_stream() {
        let file = SelectedFile::from_path("cv.docx");
        assert_eq!(file.file_name, "cv.docx");
        assert_eq!(file.mime_type, "application/octet-stream");
    }

    #[test]
    fn empty_detail_uses_generic_message() {
        let outcome = AnalysisOutcome::Failed {
            detail: Some(String::new()),
        };
        assert_eq!(outcome.error_message(), Some(GENERIC_ANALYSIS_ERROR));
    }

    #[test]
    fn analysis_is_displayed_verbatim() {
        let outcome = AnalysisOutcome::Analysis("## Fit\n- good".to_string());
        assert_eq!(outcome.display_markdown(), "## Fit\n- good");
        assert!(!outcome.is_error());
        assert_eq!(outcome.error_message(), None);
    }
}
