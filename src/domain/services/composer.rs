//! Marker-based source composer
//!
//! Builds the bindings source and the stub skeleton around empty generator
//! regions. Composition is pure; callers write the result only after every
//! input has been accepted.

use crate::domain::entities::{ensure_unmarked, ComposeError, ComposedDocument};
use crate::domain::value_objects::RegionKind;

/// Includes every bindings source starts with
pub const SOURCE_PREAMBLE: &str = "#include <pybind11/pybind11.h>\n\
#include <pybind11/stl.h>\n\
#include <pybind11/functional.h>\n\
#include <pybind11/numpy.h>\n\n";

/// Namespace alias the generated pydefs rely on
pub const NAMESPACE_ALIAS: &str = "namespace py = pybind11;\n\n";

/// Imports every stub file starts with
pub const STUB_PREAMBLE: &str = "from typing import overload, List\n\
import numpy as np\n\n\
NumberType = (int, float, np.number)\n\n";

/// Regions of a bindings source, in document order
pub const SOURCE_REGIONS: [RegionKind; 2] = [RegionKind::GlueCode, RegionKind::Pydef];

/// Regions of a stub file
pub const STUB_REGIONS: [RegionKind; 1] = [RegionKind::Stub];

/// Opening line of the module init function
pub fn init_block_open(module_name: &str) -> String {
    format!("void py_init_module_{}(py::module& m) {{\n\n", module_name)
}

/// Closing of the module init function
pub const INIT_BLOCK_CLOSE: &str = "\n}";

/// Compose the bindings source: preamble, alias, the original text verbatim,
/// the glue region, the init function holding the pydef region.
pub fn compose_source(original: &str, module_name: &str) -> Result<ComposedDocument, ComposeError> {
    ensure_unmarked(original, "original source")?;

    let mut doc = ComposedDocument::new();
    doc.push_fixed(SOURCE_PREAMBLE);
    doc.push_fixed(NAMESPACE_ALIAS);
    doc.push_fixed(original);
    doc.push_framed_region(RegionKind::GlueCode)?;
    doc.push_fixed(init_block_open(module_name));
    doc.push_framed_region(RegionKind::Pydef)?;
    doc.push_fixed(INIT_BLOCK_CLOSE);
    Ok(doc)
}

/// Compose the stub skeleton: imports and one stub region.
pub fn compose_stub() -> Result<ComposedDocument, ComposeError> {
    let mut doc = ComposedDocument::new();
    doc.push_fixed(STUB_PREAMBLE);
    doc.push_framed_region(RegionKind::Stub)?;
    Ok(doc)
}
