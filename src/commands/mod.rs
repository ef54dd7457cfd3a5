//! Command handlers
//!
//! Shared plumbing: configuration loading, module resolution, event sinks.

pub mod build;
pub mod init;
pub mod layout;
pub mod verify;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Result};

use bindkit::config::ConfigWarning;
use bindkit::domain::ports::PipelineEventSink;
use bindkit::infrastructure::{JsonEventSink, TextEventSink};
use bindkit::{Config, ModuleDescriptor};

use crate::cli::ModuleArgs;

/// Load the configuration and print unknown-key warnings to stderr.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let (config, warnings) = Config::load_or_default(explicit)?;
    for warning in &warnings {
        print_warning(warning);
    }
    Ok(config)
}

fn print_warning(warning: &ConfigWarning) {
    let location = match warning.line {
        Some(line) => format!("{}:{}", warning.file.display(), line),
        None => warning.file.display().to_string(),
    };
    match &warning.suggestion {
        Some(suggestion) => eprintln!(
            "Warning: unknown config key '{}' at {} (did you mean '{}'?)",
            warning.key, location, suggestion
        ),
        None => eprintln!(
            "Warning: unknown config key '{}' at {}",
            warning.key, location
        ),
    }
}

/// Progress sink for the chosen output mode
pub fn event_sink(json: bool, verbose: u8) -> Arc<dyn PipelineEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(TextEventSink::stdout(verbose > 0))
    }
}

impl ModuleArgs {
    fn is_empty(&self) -> bool {
        self.namespace.is_none()
            && self.header.is_none()
            && self.source.is_none()
            && self.output.is_none()
    }

    /// The module named on the command line, or every `[[modules]]` entry.
    pub fn descriptors(&self, config: &Config) -> Result<Vec<ModuleDescriptor>> {
        if self.is_empty() {
            if config.modules.is_empty() {
                bail!("no module given: pass --namespace, --header, --source and --output, or list [[modules]] in bindkit.toml");
            }
            return Ok(config.modules.clone());
        }
        Ok(vec![self.descriptor(self.source.clone())?])
    }

    /// One module, with `source` as its implementation file
    pub fn descriptor(&self, source: Option<PathBuf>) -> Result<ModuleDescriptor> {
        let mut missing = Vec::new();
        if self.namespace.is_none() {
            missing.push("--namespace");
        }
        if self.header.is_none() {
            missing.push("--header");
        }
        if source.is_none() {
            missing.push("--source");
        }
        if self.output.is_none() {
            missing.push("--output");
        }

        match (&self.namespace, &self.header, source, &self.output) {
            (Some(namespace), Some(header), Some(source), Some(output)) => Ok(
                ModuleDescriptor::new(namespace.clone(), header.clone(), source, output.clone()),
            ),
            _ => bail!("missing {}", missing.join(", ")),
        }
    }

    /// Descriptor for commands that never read the implementation file
    pub fn descriptor_without_source(&self) -> Result<ModuleDescriptor> {
        let source = self
            .source
            .clone()
            .or_else(|| self.header.as_ref().map(|h| h.with_extension("cpp")));
        self.descriptor(source)
    }
}
