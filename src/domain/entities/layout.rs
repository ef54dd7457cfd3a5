//! Layout entity - the fully determined set of paths for one run
//!
//! Computed once from a [`ModuleDescriptor`] with a fixed naming convention
//! and never mutated afterwards.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use super::ModuleDescriptor;
use crate::domain::ports::FileSystem;
use crate::error::{BindkitError, BindkitResult};

const BUILD_DIR: &str = "build";
const ORIGINAL_DIR: &str = "src_original";
const SRC_DIR: &str = "src";
const CPP_DIR: &str = "cpp";
const ENTRY_POINT_FILE: &str = "module.cpp";
const DESCRIPTOR_FILE: &str = "CMakeLists.txt";
const HELPER_FILE: &str = "litgen_cmake.cmake";
const DRIVER_FILE: &str = "litgen_driver.py";
const REQUEST_FILE: &str = "litgen_request.json";
const STUB_FILE: &str = "__init__.pyi";
const SHIM_FILE: &str = "__init__.py";

/// Output paths for one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    module_name: String,
    root_namespace: String,
    module_dir: PathBuf,
    build_root: PathBuf,
    original_dir: PathBuf,
    src_dir: PathBuf,
    cpp_dir: PathBuf,
    header_copy: PathBuf,
    bindings_source: PathBuf,
    entry_point: PathBuf,
    build_descriptor: PathBuf,
    helper_descriptor: PathBuf,
    library_descriptor: PathBuf,
    generator_driver: PathBuf,
    generator_request: PathBuf,
    stub: PathBuf,
    shim: PathBuf,
}

impl Layout {
    /// Derive every path from the descriptor. Pure: touches no filesystem.
    pub fn plan(descriptor: &ModuleDescriptor) -> BindkitResult<Self> {
        descriptor.validate()?;

        // validate() guarantees both names exist
        let module_name = descriptor.module_name().unwrap_or_default().to_string();
        let header_name = descriptor.header_file_name().unwrap_or_default();

        let module_dir = descriptor.output_directory().to_path_buf();
        let build_root = module_dir.join(BUILD_DIR);
        let src_dir = build_root.join(SRC_DIR);
        let cpp_dir = src_dir.join(CPP_DIR);

        let layout = Self {
            root_namespace: descriptor.root_namespace.clone(),
            original_dir: build_root.join(ORIGINAL_DIR),
            header_copy: cpp_dir.join(header_name),
            bindings_source: cpp_dir.join(format!("{}.cpp", module_name)),
            entry_point: cpp_dir.join(ENTRY_POINT_FILE),
            build_descriptor: build_root.join(DESCRIPTOR_FILE),
            helper_descriptor: build_root.join(HELPER_FILE),
            library_descriptor: src_dir.join(DESCRIPTOR_FILE),
            generator_driver: build_root.join(DRIVER_FILE),
            generator_request: build_root.join(REQUEST_FILE),
            stub: module_dir.join(STUB_FILE),
            shim: module_dir.join(SHIM_FILE),
            module_name,
            module_dir,
            build_root,
            src_dir,
            cpp_dir,
        };
        layout.check_collisions()?;
        Ok(layout)
    }

    fn check_collisions(&self) -> BindkitResult<()> {
        let mut seen: HashMap<&Path, &'static str> = HashMap::new();
        for (role, path) in self.files() {
            if let Some(first) = seen.insert(path, role) {
                return Err(BindkitError::LayoutCollision {
                    first,
                    second: role,
                    path: path.to_path_buf(),
                });
            }
        }
        Ok(())
    }

    /// Create every directory of the layout. Existing directories are fine.
    pub fn materialize(&self, fs: &dyn FileSystem) -> BindkitResult<()> {
        for dir in self.directories() {
            fs.create_dir_all(dir)
                .map_err(|e| BindkitError::filesystem(dir, e))?;
        }
        Ok(())
    }

    /// Directories in creation order (parents first)
    pub fn directories(&self) -> [&Path; 5] {
        [
            self.module_dir.as_path(),
            self.build_root.as_path(),
            self.original_dir.as_path(),
            self.src_dir.as_path(),
            self.cpp_dir.as_path(),
        ]
    }

    /// Every file a run may write, keyed by role
    pub fn files(&self) -> Vec<(&'static str, &Path)> {
        vec![
            ("header copy", self.header_copy.as_path()),
            ("bindings source", self.bindings_source.as_path()),
            ("entry point", self.entry_point.as_path()),
            ("build descriptor", self.build_descriptor.as_path()),
            ("helper descriptor", self.helper_descriptor.as_path()),
            ("library descriptor", self.library_descriptor.as_path()),
            ("generator driver", self.generator_driver.as_path()),
            ("generator request", self.generator_request.as_path()),
            ("stub", self.stub.as_path()),
            ("shim", self.shim.as_path()),
        ]
    }

    /// `path` relative to the build root, with forward slashes
    pub fn relative_to_build(&self, path: &Path) -> String {
        to_posix(path.strip_prefix(&self.build_root).unwrap_or(path))
    }

    /// `path` relative to the library source directory, with forward slashes
    pub fn relative_to_src(&self, path: &Path) -> String {
        to_posix(path.strip_prefix(&self.src_dir).unwrap_or(path))
    }

    /// Name of the compiled extension (`_<module>`)
    pub fn native_module_name(&self) -> String {
        format!("_{}", self.module_name)
    }

    /// Name of the C++ function the generated pydefs live in
    pub fn init_function_name(&self) -> String {
        format!("py_init_module_{}", self.module_name)
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn root_namespace(&self) -> &str {
        &self.root_namespace
    }

    pub fn module_dir(&self) -> &Path {
        &self.module_dir
    }

    pub fn build_root(&self) -> &Path {
        &self.build_root
    }

    pub fn original_dir(&self) -> &Path {
        &self.original_dir
    }

    pub fn src_dir(&self) -> &Path {
        &self.src_dir
    }

    pub fn cpp_dir(&self) -> &Path {
        &self.cpp_dir
    }

    pub fn header_copy(&self) -> &Path {
        &self.header_copy
    }

    pub fn bindings_source(&self) -> &Path {
        &self.bindings_source
    }

    pub fn entry_point(&self) -> &Path {
        &self.entry_point
    }

    pub fn build_descriptor(&self) -> &Path {
        &self.build_descriptor
    }

    pub fn helper_descriptor(&self) -> &Path {
        &self.helper_descriptor
    }

    pub fn library_descriptor(&self) -> &Path {
        &self.library_descriptor
    }

    pub fn generator_driver(&self) -> &Path {
        &self.generator_driver
    }

    pub fn generator_request(&self) -> &Path {
        &self.generator_request
    }

    pub fn stub(&self) -> &Path {
        &self.stub
    }

    pub fn shim(&self) -> &Path {
        &self.shim
    }
}

fn to_posix(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
