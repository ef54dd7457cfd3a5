//! Native build toolchains

mod cmake;
mod driver;
mod msbuild;
mod strategy;

pub use cmake::CMakeToolchain;
pub use driver::{is_extension_artifact, ToolchainDriver, ARTIFACT_EXTENSIONS};
pub use msbuild::MsBuildToolchain;
pub use strategy::{strategy_for, ToolchainStrategy};
