//! Command-line binding generator
//!
//! Runs an external program (by default the Python driver written into the
//! build root) with the path of the serialized request. The program runs in
//! the current directory so relative paths in the request stay valid, and is
//! expected to rewrite the marked regions in place and exit 0.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::info;

use crate::domain::ports::{
    BindingGenerator, GenerationRequest, GeneratorError, ProcessRunner, ProcessStep,
};

/// Placeholder in the argument list replaced with the request path
pub const REQUEST_ARG: &str = "{request}";
/// Placeholder replaced with the directory holding the request
pub const BUILD_ROOT_ARG: &str = "{build_root}";

/// Generator run as a child process
pub struct CommandGenerator {
    name: String,
    program: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    path_prepend: Vec<PathBuf>,
    runner: Box<dyn ProcessRunner>,
}

impl CommandGenerator {
    pub fn new(
        name: impl Into<String>,
        program: impl Into<String>,
        args: Vec<String>,
        runner: Box<dyn ProcessRunner>,
    ) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args,
            env: BTreeMap::new(),
            path_prepend: Vec::new(),
            runner,
        }
    }

    /// The default litgen driver: `<python> {build_root}/litgen_driver.py {request}`
    pub fn litgen(python: impl Into<String>, runner: Box<dyn ProcessRunner>) -> Self {
        Self::new(
            "litgen",
            python,
            vec![
                format!("{}/litgen_driver.py", BUILD_ROOT_ARG),
                REQUEST_ARG.to_string(),
            ],
            runner,
        )
    }

    pub fn with_env(mut self, env: BTreeMap<String, String>, path_prepend: Vec<PathBuf>) -> Self {
        self.env = env;
        self.path_prepend = path_prepend;
        self
    }

    /// Build the step for a request; the request path is substituted or appended.
    pub fn step(&self, request: &GenerationRequest) -> ProcessStep {
        let request_path = request.request_file.display().to_string();
        let build_root = request
            .request_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ".".to_string());

        let mut substituted = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|a| {
                if a.contains(REQUEST_ARG) {
                    substituted = true;
                }
                a.replace(REQUEST_ARG, &request_path)
                    .replace(BUILD_ROOT_ARG, &build_root)
            })
            .collect();
        if !substituted {
            args.push(request_path);
        }

        ProcessStep::new("generate", &self.program, ".")
            .args(args)
            .envs(&self.env)
            .path_prepend(&self.path_prepend)
    }
}

impl BindingGenerator for CommandGenerator {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, request: &GenerationRequest) -> Result<(), GeneratorError> {
        let step = self.step(request);
        let command = step.command_line();
        info!(generator = %self.name, %command, "running binding generator");

        let outcome = self
            .runner
            .run(&step)
            .map_err(|source| GeneratorError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !outcome.success() {
            return Err(GeneratorError::Failed {
                command,
                status: outcome.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockProcessRunner;
    use crate::domain::value_objects::GeneratorOptions;

    fn request() -> GenerationRequest {
        GenerationRequest {
            root_namespace: "Example01".to_string(),
            header_files: vec![PathBuf::from("out/build/src/cpp/Example01.h")],
            bindings_source: PathBuf::from("out/build/src/cpp/out.cpp"),
            stub_file: PathBuf::from("out/__init__.pyi"),
            request_file: PathBuf::from("out/build/litgen_request.json"),
            options: GeneratorOptions::default(),
        }
    }

    #[test]
    fn litgen_step_runs_driver_from_build_root() {
        let generator = CommandGenerator::litgen("python3", Box::new(MockProcessRunner::new()));
        let step = generator.step(&request());
        assert_eq!(step.program, "python3");
        assert_eq!(
            step.args,
            vec!["out/build/litgen_driver.py", "out/build/litgen_request.json"]
        );
        assert_eq!(step.cwd, PathBuf::from("."));
    }

    #[test]
    fn request_path_is_appended_without_placeholder() {
        let generator = CommandGenerator::new(
            "custom",
            "my-gen",
            vec!["--strict".to_string()],
            Box::new(MockProcessRunner::new()),
        );
        let step = generator.step(&request());
        assert_eq!(step.args, vec!["--strict", "out/build/litgen_request.json"]);
    }

    #[test]
    fn non_zero_exit_is_failure() {
        let generator =
            CommandGenerator::litgen("python3", Box::new(MockProcessRunner::with_codes(&[2])));
        let err = generator.generate(&request()).unwrap_err();
        assert!(matches!(err, GeneratorError::Failed { .. }));
        assert!(err.to_string().ends_with("exited with code 2"));
    }
}
