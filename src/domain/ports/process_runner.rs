//! ProcessRunner port - blocking execution of external tools
//!
//! Used for the configure step, the build step and command-line binding
//! generators. Runs block until the child exits; there is no timeout.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// One external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessStep {
    /// Short name for logs ("configure", "build", "generate")
    pub label: String,
    pub program: String,
    pub args: Vec<String>,
    /// Working directory of the child
    pub cwd: PathBuf,
    /// Variables set on top of the inherited environment
    pub env: BTreeMap<String, String>,
    /// Directories prepended to the inherited PATH
    pub path_prepend: Vec<PathBuf>,
}

impl ProcessStep {
    pub fn new(label: impl Into<String>, program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            env: BTreeMap::new(),
            path_prepend: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn envs(mut self, env: &BTreeMap<String, String>) -> Self {
        self.env.extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    pub fn path_prepend(mut self, dirs: &[PathBuf]) -> Self {
        self.path_prepend.extend(dirs.iter().cloned());
        self
    }

    /// Shell-like rendering for logs and error messages
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(|part| {
                if part.contains(char::is_whitespace) {
                    format!("\"{}\"", part)
                } else {
                    part.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How a child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl ProcessOutcome {
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for ProcessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exited with code {}", code),
            None => write!(f, "was terminated by a signal"),
        }
    }
}

/// Executes external commands
pub trait ProcessRunner {
    /// Run `step` to completion. `Err` means the process could not be started.
    fn run(&self, step: &ProcessStep) -> std::io::Result<ProcessOutcome>;
}

/// Scripted runner for tests: records every step and replies with queued codes.
#[cfg(test)]
#[derive(Default)]
pub struct MockProcessRunner {
    pub steps: std::sync::Mutex<Vec<ProcessStep>>,
    codes: std::sync::Mutex<std::collections::VecDeque<i32>>,
    on_run: Option<Box<dyn Fn(&ProcessStep) + Send + Sync>>,
}

#[cfg(test)]
impl MockProcessRunner {
    /// Every step exits 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with these exit codes in order, then 0.
    pub fn with_codes(codes: &[i32]) -> Self {
        Self {
            codes: std::sync::Mutex::new(codes.iter().copied().collect()),
            ..Self::default()
        }
    }

    /// Side effect run for every step before it "exits" (e.g. create an artifact).
    pub fn on_run(mut self, f: impl Fn(&ProcessStep) + Send + Sync + 'static) -> Self {
        self.on_run = Some(Box::new(f));
        self
    }

    pub fn labels(&self) -> Vec<String> {
        self.steps
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.label.clone())
            .collect()
    }
}

#[cfg(test)]
impl ProcessRunner for MockProcessRunner {
    fn run(&self, step: &ProcessStep) -> std::io::Result<ProcessOutcome> {
        self.steps.lock().unwrap().push(step.clone());
        if let Some(f) = &self.on_run {
            f(step);
        }
        let code = self.codes.lock().unwrap().pop_front().unwrap_or(0);
        Ok(ProcessOutcome::exited(code))
    }
}
