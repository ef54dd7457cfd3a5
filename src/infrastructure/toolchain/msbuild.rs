//! Visual Studio toolchain
//!
//! Configures in place with the Visual Studio 2022 generator and compiles
//! the generated solution with msbuild.

use std::path::PathBuf;

use super::strategy::{python_args, step, ToolchainStrategy};
use crate::config::ToolchainConfig;
use crate::domain::entities::Layout;
use crate::domain::ports::ProcessStep;

pub const VISUAL_STUDIO_GENERATOR: &str = "Visual Studio 17 2022";

pub struct MsBuildToolchain {
    config: ToolchainConfig,
}

impl MsBuildToolchain {
    pub fn new(config: ToolchainConfig) -> Self {
        Self { config }
    }
}

impl ToolchainStrategy for MsBuildToolchain {
    fn name(&self) -> &'static str {
        "msbuild"
    }

    fn configure_step(&self, layout: &Layout) -> ProcessStep {
        step("configure", &self.config.cmake, layout, &self.config)
            .arg("-G")
            .arg(VISUAL_STUDIO_GENERATOR)
            .args(python_args(&self.config))
            .arg("./")
    }

    fn build_step(&self, layout: &Layout) -> ProcessStep {
        // The solution is named after the CMake project, which is the module
        step("build", &self.config.msbuild, layout, &self.config)
            .arg(format!("{}.sln", layout.module_name()))
            .arg("/p:Configuration=Release")
    }

    fn artifact_dirs(&self, layout: &Layout) -> Vec<PathBuf> {
        vec![layout.build_root().join("Release")]
    }
}
