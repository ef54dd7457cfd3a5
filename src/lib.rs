//! bindkit - scaffolds, generates and builds Python extension modules
//!
//! Given a C++ header, its implementation and an output package directory,
//! bindkit lays out a CMake build tree, composes a bindings source and a
//! type stub around marked regions, lets an external generator fill those
//! regions, checks that nothing else was touched, then compiles the
//! extension and drops it next to the stub.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{BuildOptions, BuildPipeline, BuildReport};
pub use config::{Config, ToolchainKind};
pub use domain::entities::{ComposedDocument, Layout, ModuleDescriptor};
pub use domain::value_objects::{RegionKind, Stage};
pub use error::{BindkitError, BindkitResult};
