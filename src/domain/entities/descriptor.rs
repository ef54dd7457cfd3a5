//! ModuleDescriptor entity - one C++ library to expose as a Python module

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::is_identifier;
use crate::error::{BindkitError, BindkitResult};

/// The inputs of a single run.
///
/// The Python module name is not stored separately: it is the last
/// component of `output_directory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Root C++ namespace to bind (also the CMake library target name)
    #[serde(rename = "namespace")]
    pub root_namespace: String,
    /// Declaration header handed to the generator
    #[serde(rename = "header")]
    pub header_path: PathBuf,
    /// Hand-written implementation, copied verbatim into the bindings source
    #[serde(rename = "source")]
    pub source_path: PathBuf,
    /// Python package directory this run owns
    #[serde(rename = "output")]
    pub output_directory: PathBuf,
}

impl ModuleDescriptor {
    pub fn new(
        root_namespace: impl Into<String>,
        header_path: impl Into<PathBuf>,
        source_path: impl Into<PathBuf>,
        output_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            root_namespace: root_namespace.into(),
            header_path: header_path.into(),
            source_path: source_path.into(),
            output_directory: output_directory.into(),
        }
    }

    /// Python package name (final component of the output directory)
    pub fn module_name(&self) -> Option<&str> {
        self.output_directory.file_name().and_then(|n| n.to_str())
    }

    /// File name of the header, used for the copy inside the build tree
    pub fn header_file_name(&self) -> Option<&str> {
        self.header_path.file_name().and_then(|n| n.to_str())
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Check the descriptor can be turned into a layout.
    pub fn validate(&self) -> BindkitResult<()> {
        if !is_identifier(&self.root_namespace) {
            return Err(invalid(format!(
                "root namespace '{}' is not an identifier",
                self.root_namespace
            )));
        }

        match self.module_name() {
            Some(name) if is_identifier(name) => {}
            Some(name) => {
                return Err(invalid(format!(
                    "module name '{}' (from output directory {}) is not an identifier",
                    name,
                    self.output_directory.display()
                )))
            }
            None => {
                return Err(invalid(format!(
                    "output directory {} has no usable final component",
                    self.output_directory.display()
                )))
            }
        }

        if self.header_file_name().is_none() {
            return Err(invalid(format!(
                "header path {} has no file name",
                self.header_path.display()
            )));
        }
        if self.source_path.as_os_str().is_empty() {
            return Err(invalid("source path is empty".to_string()));
        }

        Ok(())
    }
}

fn invalid(message: String) -> BindkitError {
    BindkitError::InvalidDescriptor { message }
}
