//! System process runner
//!
//! Spawns children with `std::process::Command`, inheriting stdio so the
//! user sees compiler output as it happens.

use std::ffi::OsString;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::ports::{ProcessOutcome, ProcessRunner, ProcessStep};

/// Runs steps as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner {
    /// Silence child stdout (keeps NDJSON output parseable)
    quiet: bool,
}

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Inherited PATH with `dirs` in front
    fn joined_path(step: &ProcessStep) -> Option<OsString> {
        if step.path_prepend.is_empty() {
            return None;
        }
        let inherited = std::env::var_os("PATH").unwrap_or_default();
        let dirs = step
            .path_prepend
            .iter()
            .cloned()
            .chain(std::env::split_paths(&inherited));
        std::env::join_paths(dirs).ok()
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, step: &ProcessStep) -> std::io::Result<ProcessOutcome> {
        debug!(label = %step.label, cwd = %step.cwd.display(), command = %step.command_line(), "spawning");

        let mut cmd = Command::new(&step.program);
        cmd.args(&step.args)
            .current_dir(&step.cwd)
            .envs(&step.env)
            .stdin(Stdio::null());

        if let Some(path) = Self::joined_path(step) {
            cmd.env("PATH", path);
        }

        if self.quiet {
            cmd.stdout(Stdio::null()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        let status = cmd.status()?;
        Ok(ProcessOutcome {
            code: status.code(),
        })
    }
}
