//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod events;
pub mod file_system;
pub mod generator;
pub mod process_runner;

pub use events::{NullEventSink, PipelineEvent, PipelineEventSink};
pub use file_system::{FileSystem, FsError, FsResult};
pub use generator::{BindingGenerator, GenerationRequest, GeneratorError};
pub use process_runner::{ProcessOutcome, ProcessRunner, ProcessStep};

#[cfg(test)]
pub use events::RecordingEventSink;
#[cfg(test)]
pub use file_system::MockFileSystem;
#[cfg(test)]
pub use process_runner::MockProcessRunner;
