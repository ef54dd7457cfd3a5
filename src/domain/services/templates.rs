//! Scaffold templates
//!
//! The static files of a build tree: CMake descriptors, the extension entry
//! point, the re-export shim and the generator driver script.

use std::path::PathBuf;

use super::template::{Template, TemplateError, TemplateVars};
use crate::domain::entities::Layout;

/// Top-level `CMakeLists.txt` of the build root
pub const BUILD_DESCRIPTOR: Template = Template::new(
    "CMakeLists.txt",
    r#"cmake_minimum_required(VERSION 3.15...3.27)
project({py_package_name} VERSION "0.0.1")

set(CMAKE_CXX_STANDARD 20)
set(CMAKE_POSITION_INDEPENDENT_CODE ON)

include(litgen_cmake.cmake)
litgen_find_pybind11()

# C++ library holding the original sources and the generated bindings
add_subdirectory({path_to_src})

# Native extension: only the entry point, everything else comes from the library
pybind11_add_module(_{py_package_name} {path_to_module_cpp})

litgen_setup_module(
    {cpp_module_name}
    _{py_package_name}
    {py_package_name}
    ${{CMAKE_CURRENT_LIST_DIR}}
)
"#,
);

/// `src/CMakeLists.txt` declaring the bound library
pub const LIBRARY_DESCRIPTOR: Template = Template::new(
    "src/CMakeLists.txt",
    r#"add_library({cpp_namespace} STATIC {path_to_cpp} {path_to_header})
target_include_directories({cpp_namespace} PUBLIC ${{CMAKE_CURRENT_LIST_DIR}}/..)
target_link_libraries({cpp_namespace} PUBLIC pybind11::pybind11)

if (WIN32)
    set_target_properties({cpp_namespace} PROPERTIES WINDOWS_EXPORT_ALL_SYMBOLS ON)
endif()
"#,
);

/// `module.cpp`, the `PYBIND11_MODULE` entry point
pub const ENTRY_POINT: Template = Template::new(
    "module.cpp",
    r#"#include <pybind11/pybind11.h>

namespace py = pybind11;

void {init_function}(py::module& m);

PYBIND11_MODULE(_{py_package_name}, m)
{{
    {init_function}(m);
}}
"#,
);

/// `__init__.py` re-exporting the compiled extension
pub const REEXPORT_SHIM: Template = Template::new(
    "__init__.py",
    "from .{native_module} import *  # type: ignore # noqa: F403\n",
);

/// `litgen_cmake.cmake`, copied as is
pub const HELPER_DESCRIPTOR: &str = r#"# Helpers used by the generated CMakeLists.txt
#
#   litgen_find_pybind11()
#       Finds Python and pybind11. Outside scikit-build the pybind11 CMake
#       directory is queried from the pip-installed package.
#
#   litgen_setup_module(bound_library native_module python_module bindings_folder)
#       Links the native module to the bound library, installs it next to
#       the Python package and copies it into bindings_folder after build.

function(_lg_add_pybind11_pip_cmake_prefix_path)
    execute_process(
        COMMAND "${Python_EXECUTABLE}" -c
        "import pybind11; print(pybind11.get_cmake_dir())"
        OUTPUT_VARIABLE pybind11_cmake_dir
        OUTPUT_STRIP_TRAILING_WHITESPACE COMMAND_ECHO STDOUT
        RESULT_VARIABLE _result
    )
    if(NOT _result EQUAL 0)
        message(FATAL_ERROR "pybind11 is not importable from ${Python_EXECUTABLE} (pip install pybind11)")
    endif()
    set(CMAKE_PREFIX_PATH ${CMAKE_PREFIX_PATH} "${pybind11_cmake_dir}" PARENT_SCOPE)
endfunction()

function(litgen_find_pybind11)
    if(SKBUILD)
        find_package(Python 3.8 REQUIRED COMPONENTS Interpreter Development.Module)
    else()
        find_package(Python 3.8 REQUIRED COMPONENTS Interpreter Development)
    endif()
    set(Python_EXECUTABLE ${Python_EXECUTABLE} CACHE PATH "Python executable" FORCE)

    if(NOT SKBUILD)
        _lg_add_pybind11_pip_cmake_prefix_path()
    endif()

    find_package(pybind11 CONFIG REQUIRED)
endfunction()

function(litgen_setup_module bound_library python_native_module_name python_module_name bindings_folder)
    target_link_libraries(${python_native_module_name} PRIVATE ${bound_library})
    install(TARGETS ${python_native_module_name} DESTINATION ${python_module_name})
    target_compile_definitions(${python_native_module_name} PRIVATE VERSION_INFO=${PROJECT_VERSION})

    set(bindings_module_folder ${bindings_folder}/${python_module_name})
    set(python_native_module_editable_location ${bindings_module_folder}/$<TARGET_FILE_NAME:${python_native_module_name}>)
    add_custom_target(
        ${python_module_name}_deploy_editable
        ALL
        COMMAND ${CMAKE_COMMAND} -E copy $<TARGET_FILE:${python_native_module_name}> ${python_native_module_editable_location}
        DEPENDS ${python_native_module_name}
    )
endfunction()
"#;

/// `litgen_driver.py`: reads a JSON request and calls litgen
pub const GENERATOR_DRIVER: &str = r#"import json
import sys

import litgen


def main(request_path):
    with open(request_path, encoding="utf-8") as f:
        request = json.load(f)

    options = litgen.LitgenOptions()
    for key, value in request["options"].items():
        if value is None:
            continue
        if key == "fn_template_options":
            for spec in value:
                options.fn_template_options.add_specialization(
                    spec["name_regex"], spec["cpp_types"], spec["add_suffix"]
                )
        else:
            setattr(options, key, value)

    litgen.write_generated_code_for_files(
        options=options,
        input_cpp_header_files=request["input_cpp_header_files"],
        output_cpp_pydef_file=request["output_cpp_pydef_file"],
        output_stub_pyi_file=request["output_stub_pyi_file"],
    )


if __name__ == "__main__":
    main(sys.argv[1])
"#;

/// A rendered scaffold file, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub content: String,
}

/// Renders every static file of a layout.
pub struct ScaffoldTemplates;

impl ScaffoldTemplates {
    /// Variables derived from the layout, shared by all templates
    pub fn vars(layout: &Layout) -> TemplateVars {
        TemplateVars::new()
            .set("py_package_name", layout.module_name())
            .set("cpp_module_name", layout.root_namespace())
            .set("cpp_namespace", layout.root_namespace())
            .set("init_function", layout.init_function_name())
            .set("native_module", layout.native_module_name())
            .set("path_to_src", layout.relative_to_build(layout.src_dir()))
            .set(
                "path_to_module_cpp",
                layout.relative_to_build(layout.entry_point()),
            )
            .set("path_to_cpp", layout.relative_to_src(layout.bindings_source()))
            .set("path_to_header", layout.relative_to_src(layout.header_copy()))
    }

    /// Render the build tree files (everything except the shim, which is
    /// written only once an artifact exists).
    pub fn render_all(layout: &Layout) -> Result<Vec<RenderedFile>, TemplateError> {
        let vars = Self::vars(layout);
        Ok(vec![
            RenderedFile {
                path: layout.build_descriptor().to_path_buf(),
                content: BUILD_DESCRIPTOR.render(&vars)?,
            },
            RenderedFile {
                path: layout.helper_descriptor().to_path_buf(),
                content: HELPER_DESCRIPTOR.to_string(),
            },
            RenderedFile {
                path: layout.library_descriptor().to_path_buf(),
                content: LIBRARY_DESCRIPTOR.render(&vars)?,
            },
            RenderedFile {
                path: layout.entry_point().to_path_buf(),
                content: ENTRY_POINT.render(&vars)?,
            },
            RenderedFile {
                path: layout.generator_driver().to_path_buf(),
                content: GENERATOR_DRIVER.to_string(),
            },
        ])
    }

    /// Render the re-export shim.
    pub fn render_shim(layout: &Layout) -> Result<RenderedFile, TemplateError> {
        Ok(RenderedFile {
            path: layout.shim().to_path_buf(),
            content: REEXPORT_SHIM.render(&Self::vars(layout))?,
        })
    }
}
