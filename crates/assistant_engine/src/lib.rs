//! Career assistant engine: analysis service client, background execution
//! and markdown rendering.
mod client;
mod engine;
mod markdown;
mod settings;
mod types;

pub use client::{
    extract_detail, AnalysisService, ReqwestAnalysisService, ANALYZE_PATH,
    JOB_DESCRIPTION_FIELD, RESUME_FIELD,
};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use markdown::{
    markdown_options, parse_markdown, plain_text, render_blocks, Block, ColumnAlign,
    MarkdownRenderer, RenderStyle, Span, SpanStyle, TerminalRenderer,
};
pub use settings::{ClientSettings, ConfigError, API_URL_ENV, DEFAULT_API_URL};
pub use types::{
    AnalysisError, AnalysisReport, AnalysisRequest, EngineEvent, FailureKind, SubmissionId,
};
