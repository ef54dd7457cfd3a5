//! Application Layer
//!
//! Use cases that orchestrate the domain services through the ports.

pub mod build;

pub use build::{BuildOptions, BuildPipeline, BuildReport};
