//! Infrastructure Layer
//!
//! Concrete implementations of the domain ports: the local filesystem,
//! child processes, binding generators, native toolchains and event sinks.

pub mod events;
pub mod fs;
pub mod generator;
pub mod process;
pub mod toolchain;

pub use events::{JsonEventSink, TextEventSink};
pub use fs::LocalFs;
pub use generator::CommandGenerator;
pub use process::SystemProcessRunner;
pub use toolchain::{strategy_for, ToolchainDriver, ToolchainStrategy};
