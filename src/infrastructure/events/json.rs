//! JSON Event Sink
//!
//! Outputs pipeline events as NDJSON for CI/automation consumption.

use crate::domain::ports::{PipelineEvent, PipelineEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl PipelineEventSink for JsonEventSink {
    fn on_event(&self, event: PipelineEvent) {
        let json = match event {
            PipelineEvent::Started { module, output } => serde_json::json!({
                "event": "start",
                "module": module,
                "output": output.display().to_string(),
            }),

            PipelineEvent::StageStarted { module, stage } => serde_json::json!({
                "event": "stage",
                "module": module,
                "stage": stage,
            }),

            PipelineEvent::FileWritten { path } => serde_json::json!({
                "event": "file_written",
                "path": path.display().to_string(),
            }),

            PipelineEvent::CommandStarted { stage, command } => serde_json::json!({
                "event": "command",
                "stage": stage,
                "command": command,
            }),

            PipelineEvent::StageSkipped { module, stage } => serde_json::json!({
                "event": "stage_skipped",
                "module": module,
                "stage": stage,
            }),

            PipelineEvent::ArtifactRelocated { from, to } => serde_json::json!({
                "event": "artifact",
                "from": from.display().to_string(),
                "to": to.display().to_string(),
            }),

            PipelineEvent::Completed { module, files } => serde_json::json!({
                "event": "complete",
                "status": "success",
                "module": module,
                "files": files,
            }),

            PipelineEvent::Failed {
                module,
                stage,
                message,
            } => serde_json::json!({
                "event": "complete",
                "status": "failed",
                "module": module,
                "stage": stage,
                "error": message,
            }),
        };

        self.write_event(json);
    }
}
