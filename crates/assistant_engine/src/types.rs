use std::fmt;
use std::path::PathBuf;

pub type SubmissionId = u64;

/// Everything needed to build the multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub resume_path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
    pub job_description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    /// Markdown produced by the service.
    pub analysis: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ProbeCompleted {
        result: Result<String, AnalysisError>,
    },
    AnalysisCompleted {
        submission_id: SubmissionId,
        result: Result<AnalysisReport, AnalysisError>,
    },
}

/// A failed call to the analysis service. `detail` is the service's own
/// explanation, taken from the error body when it sent one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisError {
    pub kind: FailureKind,
    pub message: String,
    pub detail: Option<String>,
}

impl AnalysisError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub(crate) fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

impl std::error::Error for AnalysisError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The resume could not be read from disk.
    Io,
    InvalidRequest,
    Network,
    Timeout,
    HttpStatus(u16),
    /// 2xx with a body that does not match the wire contract.
    InvalidResponse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Io => write!(f, "resume unreadable"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
        }
    }
}
