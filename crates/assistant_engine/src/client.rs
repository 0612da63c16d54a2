use assistant_logging::{assistant_debug, assistant_info, assistant_warn};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;

use crate::{AnalysisError, AnalysisReport, AnalysisRequest, ClientSettings, FailureKind};

pub const ANALYZE_PATH: &str = "api/analyze-resume";
pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

#[derive(Debug, Deserialize)]
struct GreetingBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnalysisBody {
    analysis: Option<String>,
}

/// FastAPI error body. `detail` is a string for raised HTTP errors and a list
/// for request validation errors; only the string form is shown to users.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<Value>,
}

#[async_trait::async_trait]
pub trait AnalysisService: Send + Sync {
    /// Fetches the greeting from the service root.
    async fn probe(&self) -> Result<String, AnalysisError>;

    /// Uploads the resume and job description and returns the analysis.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalysisService {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestAnalysisService {
    pub fn new(settings: ClientSettings) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| AnalysisError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn build_form(&self, request: &AnalysisRequest) -> Result<Form, AnalysisError> {
        let bytes = tokio::fs::read(&request.resume_path).await.map_err(|err| {
            AnalysisError::new(
                FailureKind::Io,
                format!("{}: {err}", request.resume_path.display()),
            )
        })?;
        assistant_debug!(
            "Building upload file_name={} mime={} bytes={} job_description_len={}",
            request.file_name,
            request.mime_type,
            bytes.len(),
            request.job_description.len()
        );

        let resume = Part::bytes(bytes)
            .file_name(request.file_name.clone())
            .mime_str(&request.mime_type)
            .map_err(|err| AnalysisError::new(FailureKind::InvalidRequest, err.to_string()))?;

        Ok(Form::new()
            .part(RESUME_FIELD, resume)
            .text(JOB_DESCRIPTION_FIELD, request.job_description.clone()))
    }
}

#[async_trait::async_trait]
impl AnalysisService for ReqwestAnalysisService {
    async fn probe(&self) -> Result<String, AnalysisError> {
        let url = self.settings.endpoint("");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let greeting: GreetingBody = serde_json::from_slice(&body).map_err(invalid_response)?;
        greeting.message.ok_or_else(|| {
            AnalysisError::new(FailureKind::InvalidResponse, "greeting has no message field")
        })
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        let url = self.settings.endpoint(ANALYZE_PATH);
        let form = self.build_form(request).await?;
        assistant_info!("POST {} file_name={}", url, request.file_name);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            let err = status_error(status, &body);
            assistant_warn!("Analysis rejected: {}", err);
            return Err(err);
        }

        let parsed: AnalysisBody = serde_json::from_slice(&body).map_err(invalid_response)?;
        let analysis = parsed.analysis.ok_or_else(|| {
            AnalysisError::new(FailureKind::InvalidResponse, "response has no analysis field")
        })?;
        assistant_info!("Analysis received chars={}", analysis.chars().count());
        Ok(AnalysisReport { analysis })
    }
}

fn status_error(status: reqwest::StatusCode, body: &[u8]) -> AnalysisError {
    AnalysisError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
        .with_detail(extract_detail(body))
}

/// Pulls a string `detail` out of an error body, if there is one.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.detail? {
        Value::String(detail) => Some(detail),
        _ => None,
    }
}

fn invalid_response(err: serde_json::Error) -> AnalysisError {
    AnalysisError::new(FailureKind::InvalidResponse, err.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> AnalysisError {
    if err.is_timeout() {
        return AnalysisError::new(FailureKind::Timeout, err.to_string());
    }
    AnalysisError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::extract_detail;

    #[test]
    fn string_detail_is_extracted() {
        assert_eq!(
            extract_detail(br#"{"detail": "Please upload a PDF file."}"#),
            Some("Please upload a PDF file.".to_string())
        );
    }

    #[test]
    fn list_detail_and_garbage_are_ignored() {
        assert_eq!(
            extract_detail(br#"{"detail": [{"loc": ["body", "resume"], "msg": "field required"}]}"#),
            None
        );
        assert_eq!(extract_detail(b"<html>502</html>"), None);
        assert_eq!(extract_detail(br#"{"error": "x"}"#), None);
    }
}
