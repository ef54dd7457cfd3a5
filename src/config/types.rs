//! Configuration type definitions

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::entities::ModuleDescriptor;
use crate::domain::value_objects::GeneratorOptions;
use crate::error::{BindkitError, BindkitResult};

use super::loader::{self, ConfigWarning};

/// Native build toolchain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolchainKind {
    /// Generic CMake configure + `cmake --build`
    #[default]
    Cmake,
    /// Visual Studio generator + msbuild
    Msbuild,
}

impl ToolchainKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cmake => "cmake",
            Self::Msbuild => "msbuild",
        }
    }
}

impl fmt::Display for ToolchainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolchainKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cmake" => Ok(Self::Cmake),
            "msbuild" | "visual-studio" | "vs" => Ok(Self::Msbuild),
            other => Err(format!(
                "unknown toolchain '{}' (expected cmake or msbuild)",
                other
            )),
        }
    }
}

/// `[toolchain]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub kind: ToolchainKind,
    /// Interpreter used for the generator driver and passed to CMake
    pub python: String,
    pub cmake: String,
    pub msbuild: String,
    /// Extra `CMAKE_PREFIX_PATH` for configure
    pub prefix_path: Option<PathBuf>,
    /// CMake generator name (`-G`); the msbuild toolchain forces its own
    pub generator_name: Option<String>,
    /// Variables set for every child process
    pub env: BTreeMap<String, String>,
    /// Directories prepended to PATH for every child process
    pub path_prepend: Vec<PathBuf>,
    /// Keep `build/` after the artifact is relocated
    pub keep_build_dir: bool,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            kind: ToolchainKind::default(),
            python: default_python(),
            cmake: "cmake".to_string(),
            msbuild: "msbuild".to_string(),
            prefix_path: None,
            generator_name: None,
            env: BTreeMap::new(),
            path_prepend: Vec::new(),
            keep_build_dir: false,
        }
    }
}

fn default_python() -> String {
    if cfg!(windows) {
        "python".to_string()
    } else {
        "python3".to_string()
    }
}

/// `[generator]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Replacement command line; `{request}` and `{build_root}` are substituted.
    /// Empty means the bundled litgen driver.
    pub command: Vec<String>,
    pub options: GeneratorOptions,
}

/// `[scaffold]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Mirror the header's directory into `build/src_original`
    pub copy_header_tree: bool,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            copy_header_tree: true,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub toolchain: ToolchainConfig,
    pub generator: GeneratorConfig,
    pub scaffold: ScaffoldConfig,
    pub modules: Vec<ModuleDescriptor>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> BindkitResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> BindkitResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Explicit file, project file, user file or defaults
    pub fn load_or_default(explicit: Option<&Path>) -> BindkitResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(explicit)
    }

    /// Apply environment variable overrides (BINDKIT_* prefix)
    pub fn with_env_overrides(self) -> BindkitResult<Self> {
        loader::with_env_overrides(self)
    }

    /// Semantic checks serde cannot express
    pub fn validate(&self, file: &Path) -> BindkitResult<()> {
        self.generator
            .options
            .validate()
            .map_err(|message| BindkitError::Config {
                file: file.to_path_buf(),
                message: format!("generator.options: {}", message),
            })?;
        for (i, module) in self.modules.iter().enumerate() {
            module.validate().map_err(|e| BindkitError::Config {
                file: file.to_path_buf(),
                message: format!("modules[{}]: {}", i, e),
            })?;
        }
        Ok(())
    }
}
