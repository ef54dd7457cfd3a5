//! Text Event Sink
//!
//! Human-readable progress lines.

use crate::domain::ports::{PipelineEvent, PipelineEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that prints progress for people
pub struct TextEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    /// Also list every written file and external command
    verbose: bool,
}

impl TextEventSink {
    pub fn stdout(verbose: bool) -> Self {
        Self::with_writer(io::stdout(), verbose)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, verbose: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            verbose,
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
            let _ = writer.flush();
        }
    }
}

impl PipelineEventSink for TextEventSink {
    fn on_event(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::Started { module, output } => {
                self.line(format!("==> {} ({})", module, output.display()));
            }
            PipelineEvent::StageStarted { stage, .. } => {
                self.line(format!("  {}", stage));
            }
            PipelineEvent::FileWritten { path } if self.verbose => {
                self.line(format!("    wrote {}", path.display()));
            }
            PipelineEvent::CommandStarted { command, .. } if self.verbose => {
                self.line(format!("    $ {}", command));
            }
            PipelineEvent::StageSkipped { stage, .. } => {
                self.line(format!("  {} (skipped)", stage));
            }
            PipelineEvent::ArtifactRelocated { to, .. } => {
                self.line(format!("    -> {}", to.display()));
            }
            PipelineEvent::Completed { module, files } => {
                self.line(format!("done: {} ({} files written)", module, files));
            }
            PipelineEvent::Failed { module, stage, .. } => {
                self.line(format!("failed: {} during {}", module, stage));
            }
            _ => {}
        }
    }
}
