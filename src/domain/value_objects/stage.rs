//! Pipeline stages, used for progress events and error attribution.

use std::fmt;

use serde::Serialize;

/// One step of the scaffold/generate/build pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Loading and validating configuration
    Config,
    /// Deriving the layout from the module descriptor
    Plan,
    /// Filling the static templates
    Render,
    /// Assembling the bindings source and stub skeletons
    Compose,
    /// Creating directories and writing the scaffold
    Scaffold,
    /// Running the external binding generator
    Generate,
    /// Checking the generator only touched marked regions
    Verify,
    /// External build-configuration step
    Configure,
    /// External build step
    Build,
    /// Moving the artifact into the module directory
    Relocate,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Config => "config",
            Stage::Plan => "plan",
            Stage::Render => "render",
            Stage::Compose => "compose",
            Stage::Scaffold => "scaffold",
            Stage::Generate => "generate",
            Stage::Verify => "verify",
            Stage::Configure => "configure",
            Stage::Build => "build",
            Stage::Relocate => "relocate",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
