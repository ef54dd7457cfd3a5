//! PipelineEventSink port - progress reporting
//!
//! The pipeline emits events as it goes; sinks render them as text, NDJSON
//! or nothing at all.

use std::path::PathBuf;

use crate::domain::value_objects::Stage;

/// Something that happened during a run
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// A module run started
    Started { module: String, output: PathBuf },
    /// A stage started
    StageStarted { module: String, stage: Stage },
    /// A scaffold file was written
    FileWritten { path: PathBuf },
    /// An external command is about to run
    CommandStarted { stage: Stage, command: String },
    /// A stage was skipped on request
    StageSkipped { module: String, stage: Stage },
    /// The compiled artifact was copied into the module directory
    ArtifactRelocated { from: PathBuf, to: PathBuf },
    /// The run finished successfully
    Completed { module: String, files: usize },
    /// The run stopped with an error
    Failed { module: String, stage: Stage, message: String },
}

/// Receives pipeline events
pub trait PipelineEventSink {
    fn on_event(&self, event: PipelineEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

impl PipelineEventSink for NullEventSink {
    fn on_event(&self, _event: PipelineEvent) {}
}

/// Collects events for assertions
#[cfg(test)]
#[derive(Default)]
pub struct RecordingEventSink {
    pub events: std::sync::Mutex<Vec<PipelineEvent>>,
}

#[cfg(test)]
impl RecordingEventSink {
    pub fn stages(&self) -> Vec<Stage> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                PipelineEvent::StageStarted { stage, .. } => Some(*stage),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl PipelineEventSink for RecordingEventSink {
    fn on_event(&self, event: PipelineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
