use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use assistant_engine::{
    AnalysisError, AnalysisReport, AnalysisRequest, AnalysisService, ChannelEventSink,
    ClientSettings, EngineEvent, EngineHandle,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

/// Echoes the job description back as the analysis and records each call.
#[derive(Default)]
struct EchoService {
    calls: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl AnalysisService for EchoService {
    async fn probe(&self) -> Result<String, AnalysisError> {
        Ok("hello".to_string())
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReport, AnalysisError> {
        self.calls
            .lock()
            .unwrap()
            .push(request.job_description.clone());
        Ok(AnalysisReport {
            analysis: format!("# {}", request.job_description),
        })
    }
}

fn request(job_description: &str) -> AnalysisRequest {
    AnalysisRequest {
        resume_path: PathBuf::from("resume.pdf"),
        file_name: "resume.pdf".to_string(),
        mime_type: "application/pdf".to_string(),
        job_description: job_description.to_string(),
    }
}

#[test]
fn submit_reports_completion_with_its_id() {
    let service = Arc::new(EchoService::default());
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(service.clone(), Arc::new(ChannelEventSink::new(tx))).unwrap();

    engine.submit(42, request("Platform Engineer"));

    let event = rx.recv_timeout(WAIT).expect("engine event");
    assert_eq!(
        event,
        EngineEvent::AnalysisCompleted {
            submission_id: 42,
            result: Ok(AnalysisReport {
                analysis: "# Platform Engineer".to_string(),
            }),
        }
    );
    assert_eq!(*service.calls.lock().unwrap(), vec!["Platform Engineer"]);
}

#[test]
fn probe_reports_greeting() {
    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(
        Arc::new(EchoService::default()),
        Arc::new(ChannelEventSink::new(tx)),
    )
    .unwrap();

    engine.probe();

    assert_eq!(
        rx.recv_timeout(WAIT).expect("engine event"),
        EngineEvent::ProbeCompleted {
            result: Ok("hello".to_string()),
        }
    );
}

#[tokio::test]
async fn reqwest_engine_reports_probe_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "detail": "down" })))
        .expect(1)
        .mount(&server)
        .await;

    let (tx, rx) = mpsc::channel();
    let settings = ClientSettings::default().with_base_url(&server.uri()).unwrap();
    let engine = EngineHandle::with_settings(settings, Arc::new(ChannelEventSink::new(tx))).unwrap();
    engine.probe();

    let event = tokio::task::spawn_blocking(move || rx.recv_timeout(WAIT))
        .await
        .unwrap()
        .expect("engine event");

    match event {
        EngineEvent::ProbeCompleted { result: Err(err) } => {
            assert_eq!(err.detail.as_deref(), Some("down"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
