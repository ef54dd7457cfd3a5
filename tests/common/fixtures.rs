//! Reusable C++ inputs

pub const EXAMPLE01_HEADER: &str = r#"#pragma once

namespace Example01
{
    // Adds two numbers
    int add(int a, int b);
}
"#;

pub const EXAMPLE01_SOURCE: &str = r#"#include "Example01.h"

namespace Example01
{
    int add(int a, int b) { return a + b; }
}
"#;

/// Source that already carries a generator marker
pub const MARKED_SOURCE: &str = r#"#include "Example01.h"
// <litgen_pydef>  // Autogenerated code below! Do not edit!
"#;

/// Module flags for Example01 written to `python/py_example01`
pub const EXAMPLE01_ARGS: &[&str] = &[
    "--namespace",
    "Example01",
    "--header",
    "cpp/Example01.h",
    "--source",
    "cpp/Example01.cpp",
    "--output",
    "python/py_example01",
];
