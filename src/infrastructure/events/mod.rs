//! Event Sink Implementations
//!
//! Provides concrete implementations of PipelineEventSink:
//! - JsonEventSink: NDJSON output for CI/automation
//! - TextEventSink: Human-readable progress

mod json;
mod text;

pub use json::JsonEventSink;
pub use text::TextEventSink;
