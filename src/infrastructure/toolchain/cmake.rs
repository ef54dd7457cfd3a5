//! Generic CMake toolchain
//!
//! Configures into `build/cmake-build` and compiles with `cmake --build`,
//! which picks whatever native tool the chosen generator uses.

use std::path::PathBuf;

use super::strategy::{python_args, step, ToolchainStrategy};
use crate::config::ToolchainConfig;
use crate::domain::entities::Layout;
use crate::domain::ports::ProcessStep;

/// Binary directory, relative to the build root
pub const BINARY_DIR: &str = "cmake-build";

pub struct CMakeToolchain {
    config: ToolchainConfig,
}

impl CMakeToolchain {
    pub fn new(config: ToolchainConfig) -> Self {
        Self { config }
    }
}

impl ToolchainStrategy for CMakeToolchain {
    fn name(&self) -> &'static str {
        "cmake"
    }

    fn configure_step(&self, layout: &Layout) -> ProcessStep {
        let mut s = step("configure", &self.config.cmake, layout, &self.config)
            .args(["-S", ".", "-B", BINARY_DIR])
            .args(python_args(&self.config));
        if let Some(generator) = &self.config.generator_name {
            s = s.arg("-G").arg(generator);
        }
        s
    }

    fn build_step(&self, layout: &Layout) -> ProcessStep {
        step("build", &self.config.cmake, layout, &self.config).args([
            "--build",
            BINARY_DIR,
            "--config",
            "Release",
        ])
    }

    fn artifact_dirs(&self, layout: &Layout) -> Vec<PathBuf> {
        let binary_dir = layout.build_root().join(BINARY_DIR);
        vec![
            binary_dir.clone(),
            binary_dir.join("Release"),
            layout.build_root().join(layout.module_name()),
        ]
    }
}
