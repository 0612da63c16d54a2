use std::sync::{mpsc, Arc};
use std::thread;

use assistant_logging::{assistant_debug, assistant_warn};

use crate::client::{AnalysisService, ReqwestAnalysisService};
use crate::{AnalysisError, AnalysisRequest, ClientSettings, EngineEvent, SubmissionId};

/// Receives engine results. Called from the engine's runtime threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Probe,
    Analyze {
        submission_id: SubmissionId,
        request: AnalysisRequest,
    },
}

/// Runs service calls on a background tokio runtime. Each command becomes one
/// task; there is no queueing, retry or cancellation.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(service: Arc<dyn AnalysisService>, sink: Arc<dyn EventSink>) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("assistant-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let service = service.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(service.as_ref(), sink.as_ref(), command).await;
                    });
                }
                assistant_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    /// Builds the engine around the reqwest-backed service.
    pub fn with_settings(
        settings: ClientSettings,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, AnalysisError> {
        let service = ReqwestAnalysisService::new(settings)?;
        Self::new(Arc::new(service), sink).map_err(|err| {
            AnalysisError::new(crate::FailureKind::Network, format!("engine start failed: {err}"))
        })
    }

    pub fn probe(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Probe);
    }

    pub fn submit(&self, submission_id: SubmissionId, request: AnalysisRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Analyze {
            submission_id,
            request,
        });
    }
}

async fn handle_command(service: &dyn AnalysisService, sink: &dyn EventSink, command: EngineCommand) {
    match command {
        EngineCommand::Probe => {
            let result = service.probe().await;
            if let Err(err) = &result {
                assistant_warn!("Backend probe failed: {}", err);
            }
            sink.emit(EngineEvent::ProbeCompleted { result });
        }
        EngineCommand::Analyze {
            submission_id,
            request,
        } => {
            let result = service.analyze(&request).await;
            if let Err(err) = &result {
                assistant_warn!("Submission {} failed: {}", submission_id, err);
            }
            sink.emit(EngineEvent::AnalysisCompleted {
                submission_id,
                result,
            });
        }
    }
}
