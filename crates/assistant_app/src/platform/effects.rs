use std::sync::{mpsc, Arc};

use anyhow::{Context, Result};
use assistant_core::{AnalysisOutcome, Effect, Msg, Submission};
use assistant_engine::{
    AnalysisRequest, ClientSettings, EngineEvent, EngineHandle, EventSink,
};
use assistant_logging::{assistant_debug, assistant_info};

use super::app::AppEvent;

/// Forwards engine results into the app loop as core messages.
struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Msg(map_event(event)));
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, event_tx: mpsc::Sender<AppEvent>) -> Result<Self> {
        let sink = Arc::new(MsgSink { tx: event_tx });
        let engine = EngineHandle::with_settings(settings, sink).context("starting engine")?;
        Ok(Self { engine })
    }

    /// Runs the effects the app loop does not handle itself.
    pub fn enqueue(&self, effect: Effect) {
        match effect {
            Effect::ProbeBackend => {
                assistant_debug!("Probing backend");
                self.engine.probe();
            }
            Effect::SubmitAnalysis {
                submission_id,
                submission,
            } => {
                assistant_info!(
                    "SubmitAnalysis submission_id={} file_name={} job_description_chars={}",
                    submission_id,
                    submission.resume.file_name,
                    submission.job_description.chars().count()
                );
                self.engine.submit(submission_id, to_request(submission));
            }
            Effect::ShowAlert(err) => {
                assistant_debug!("Alert not handled by the app loop: {}", err);
            }
        }
    }
}

fn to_request(submission: Submission) -> AnalysisRequest {
    AnalysisRequest {
        resume_path: submission.resume.path,
        file_name: submission.resume.file_name,
        mime_type: submission.resume.mime_type,
        job_description: submission.job_description,
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ProbeCompleted { result } => Msg::ProbeCompleted {
            message: result.ok(),
        },
        EngineEvent::AnalysisCompleted {
            submission_id,
            result,
        } => Msg::AnalysisCompleted {
            submission_id,
            outcome: match result {
                Ok(report) => AnalysisOutcome::Analysis(report.analysis),
                Err(err) => AnalysisOutcome::Failed { detail: err.detail },
            },
        },
    }
}
