use assistant_engine::{AnalysisService, ClientSettings, FailureKind, ReqwestAnalysisService};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> ReqwestAnalysisService {
    let settings = ClientSettings::default().with_base_url(&server.uri()).unwrap();
    ReqwestAnalysisService::new(settings).unwrap()
}

#[tokio::test]
async fn probe_returns_greeting() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "AI Career Assistant Backend is running." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let message = service_for(&server).probe().await.expect("probe ok");
    assert_eq!(message, "AI Career Assistant Backend is running.");
}

#[tokio::test]
async fn probe_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = service_for(&server).probe().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(503));
}

#[tokio::test]
async fn probe_without_message_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let err = service_for(&server).probe().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidResponse);
}
