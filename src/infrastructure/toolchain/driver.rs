//! Toolchain driver
//!
//! Runs a strategy's configure and build steps through a [`ProcessRunner`],
//! then finds the compiled extension and copies it into the module directory.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::strategy::ToolchainStrategy;
use crate::domain::entities::Layout;
use crate::domain::ports::{FileSystem, ProcessRunner, ProcessStep};
use crate::domain::value_objects::Stage;
use crate::error::{BindkitError, BindkitResult};

/// File extensions a Python extension module may have
pub const ARTIFACT_EXTENSIONS: &[&str] = &["so", "pyd", "dylib"];

pub struct ToolchainDriver<'a> {
    strategy: &'a dyn ToolchainStrategy,
    runner: &'a dyn ProcessRunner,
    fs: &'a dyn FileSystem,
}

impl<'a> ToolchainDriver<'a> {
    pub fn new(
        strategy: &'a dyn ToolchainStrategy,
        runner: &'a dyn ProcessRunner,
        fs: &'a dyn FileSystem,
    ) -> Self {
        Self {
            strategy,
            runner,
            fs,
        }
    }

    /// Run one step; a failed start or a non-zero exit is a `Build` error.
    pub fn run_step(&self, stage: Stage, step: &ProcessStep) -> BindkitResult<()> {
        let command = step.command_line();
        info!(toolchain = self.strategy.name(), %stage, %command, "running");

        let outcome = self.runner.run(step).map_err(|e| BindkitError::Build {
            step: stage,
            command: command.clone(),
            status: format!("could not be started: {}", e),
        })?;

        if !outcome.success() {
            return Err(BindkitError::Build {
                step: stage,
                command,
                status: outcome.to_string(),
            });
        }
        Ok(())
    }

    /// Configure then build. `before` sees each step just before it runs.
    /// The build step never runs after a failed configure.
    pub fn compile(
        &self,
        layout: &Layout,
        before: &dyn Fn(Stage, &ProcessStep),
    ) -> BindkitResult<()> {
        for (stage, step) in [
            (Stage::Configure, self.strategy.configure_step(layout)),
            (Stage::Build, self.strategy.build_step(layout)),
        ] {
            before(stage, &step);
            self.run_step(stage, &step)?;
        }
        Ok(())
    }

    /// First `_<module>.{so,pyd,dylib}` in the strategy's artifact directories
    pub fn locate_artifact(&self, layout: &Layout) -> BindkitResult<PathBuf> {
        let dirs = self.strategy.artifact_dirs(layout);
        let native = layout.native_module_name();

        for dir in &dirs {
            if !self.fs.exists(dir) {
                continue;
            }
            let mut files = self
                .fs
                .list_files(dir)
                .map_err(|e| BindkitError::filesystem(dir, e))?;
            files.sort();
            if let Some(found) = files.into_iter().find(|f| is_extension_artifact(f, &native)) {
                debug!(artifact = %found.display(), "found compiled extension");
                return Ok(found);
            }
        }

        Err(BindkitError::ArtifactNotFound {
            module: layout.module_name().to_string(),
            searched: dirs
                .iter()
                .map(|d| d.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Copy the artifact next to the stub. Returns the destination.
    pub fn relocate(&self, layout: &Layout, artifact: &Path) -> BindkitResult<PathBuf> {
        let file_name = artifact
            .file_name()
            .ok_or_else(|| BindkitError::ArtifactNotFound {
                module: layout.module_name().to_string(),
                searched: artifact.display().to_string(),
            })?;
        let dest = layout.module_dir().join(file_name);
        self.fs
            .copy(artifact, &dest)
            .map_err(|e| BindkitError::filesystem(&dest, e))?;
        info!(from = %artifact.display(), to = %dest.display(), "relocated extension");
        Ok(dest)
    }
}

/// Whether `path` is a compiled extension for the native module `native`
/// (`_py_example01.cpython-311-x86_64-linux-gnu.so`, `_py_example01.pyd`)
pub fn is_extension_artifact(path: &Path, native: &str) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    name.strip_prefix(native)
        .is_some_and(|rest| rest.starts_with('.'))
        && ARTIFACT_EXTENSIONS.contains(&extension)
}
