//! Test environment builder for isolated bindkit testing.
//!
//! Provides `TestEnv` - an isolated project directory and home directory,
//! plus helpers to run the bindkit binary inside them.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Environment variables that would leak the developer's setup into a test
const BINDKIT_VARS: &[&str] = &[
    "BINDKIT_TOOLCHAIN",
    "BINDKIT_PYTHON",
    "BINDKIT_CMAKE",
    "BINDKIT_MSBUILD",
    "BINDKIT_KEEP_BUILD",
];

/// Result of running a bindkit CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Check if command succeeded
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Every stdout line parsed as JSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l)
                    .unwrap_or_else(|e| panic!("stdout line is not JSON ({}): {}", e, l))
            })
            .collect()
    }
}

/// Isolated test environment with temp directories.
pub struct TestEnv {
    /// Temporary directory the CLI runs in
    pub project_root: TempDir,
    /// Temporary directory for HOME (keeps the user config out)
    pub home_dir: TempDir,
    bindkit_bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("Failed to create project dir"),
            home_dir: tempfile::tempdir().expect("Failed to create home dir"),
            bindkit_bin: PathBuf::from(env!("CARGO_BIN_EXE_bindkit")),
        }
    }

    /// Project with the Example01 header and source under `cpp/`
    pub fn with_example01() -> Self {
        let env = Self::new();
        env.write_project_file("cpp/Example01.h", super::EXAMPLE01_HEADER);
        env.write_project_file("cpp/Example01.cpp", super::EXAMPLE01_SOURCE);
        env
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Run bindkit in this environment from project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, &[])
    }

    /// Run bindkit from project root with extra env vars.
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    /// Run bindkit from a specific directory with extra env vars.
    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.bindkit_bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("USERPROFILE", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"));

        for var in BINDKIT_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute bindkit");
        Self::output_to_result(output)
    }

    fn output_to_result(output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Read a project file's content
    pub fn read_project_file(&self, relative_path: &str) -> String {
        let full_path = self.project_path(relative_path);
        std::fs::read_to_string(&full_path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    /// Write an executable shell script to the project directory
    #[cfg(unix)]
    pub fn write_project_script(&self, relative_path: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        self.write_project_file(relative_path, &format!("#!/bin/sh\n{}", body));
        let full_path = self.project_path(relative_path);
        let mut perms = std::fs::metadata(&full_path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&full_path, perms).expect("Failed to chmod script");
        full_path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
