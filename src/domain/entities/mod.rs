//! Domain Entities
//!
//! - `ModuleDescriptor` - what the user asked to bind
//! - `Layout` - every path a run writes, derived from the descriptor
//! - `ComposedDocument` - a text artifact split into fixed and generated segments
//! - `WrittenFile` - a file the scaffold stage produced

mod descriptor;
mod document;
mod layout;
mod written_file;

pub use descriptor::ModuleDescriptor;
pub use document::{ensure_unmarked, ComposeError, ComposedDocument, RegionSpan, Segment};
pub use layout::Layout;
pub use written_file::WrittenFile;
