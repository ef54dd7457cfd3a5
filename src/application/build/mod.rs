//! Build Use Case Module
//!
//! Scaffold, generate, verify and compile one Python extension module.

mod options;
mod result;
mod use_case;


pub use options::BuildOptions;
pub use result::BuildReport;
pub use use_case::BuildPipeline;
