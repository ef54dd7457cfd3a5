//! Toolchain Strategy
//!
//! Defines the commands that configure and compile a build tree, and where
//! the compiled extension ends up.

use std::path::PathBuf;

use crate::config::{ToolchainConfig, ToolchainKind};
use crate::domain::entities::Layout;
use crate::domain::ports::ProcessStep;

use super::cmake::CMakeToolchain;
use super::msbuild::MsBuildToolchain;

/// Strategy for turning a scaffolded build tree into a native extension
pub trait ToolchainStrategy: Send + Sync {
    /// Name of this toolchain (for logging)
    fn name(&self) -> &'static str;

    /// Generate the native build system inside the build root
    fn configure_step(&self, layout: &Layout) -> ProcessStep;

    /// Compile the extension in release configuration
    fn build_step(&self, layout: &Layout) -> ProcessStep;

    /// Directories searched for the compiled extension, in order
    fn artifact_dirs(&self, layout: &Layout) -> Vec<PathBuf>;
}

/// Strategy selected by the configuration
pub fn strategy_for(config: &ToolchainConfig) -> Box<dyn ToolchainStrategy> {
    match config.kind {
        ToolchainKind::Cmake => Box::new(CMakeToolchain::new(config.clone())),
        ToolchainKind::Msbuild => Box::new(MsBuildToolchain::new(config.clone())),
    }
}

/// Configure arguments shared by every CMake based toolchain
pub(super) fn python_args(config: &ToolchainConfig) -> Vec<String> {
    let mut args = vec![format!("-DPython_EXECUTABLE={}", config.python)];
    if let Some(prefix) = &config.prefix_path {
        args.push(format!("-DCMAKE_PREFIX_PATH={}", prefix.display()));
    }
    args
}

/// Common step skeleton: runs in the build root with the configured environment
pub(super) fn step(
    label: &str,
    program: &str,
    layout: &Layout,
    config: &ToolchainConfig,
) -> ProcessStep {
    ProcessStep::new(label, program, layout.build_root())
        .envs(&config.env)
        .path_prepend(&config.path_prepend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_follows_configured_kind() {
        let mut config = ToolchainConfig::default();
        assert_eq!(strategy_for(&config).name(), "cmake");

        config.kind = ToolchainKind::Msbuild;
        assert_eq!(strategy_for(&config).name(), "msbuild");
    }

    #[test]
    fn python_args_include_prefix_path_when_set() {
        let mut config = ToolchainConfig {
            python: "python3".to_string(),
            ..ToolchainConfig::default()
        };
        assert_eq!(python_args(&config), vec!["-DPython_EXECUTABLE=python3"]);

        config.prefix_path = Some(PathBuf::from("/opt/pybind11"));
        assert_eq!(
            python_args(&config),
            vec![
                "-DPython_EXECUTABLE=python3",
                "-DCMAKE_PREFIX_PATH=/opt/pybind11"
            ]
        );
    }
}
