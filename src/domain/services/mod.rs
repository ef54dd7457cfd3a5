//! Domain Services
//!
//! Stateless text transformations:
//!
//! - `template` - placeholder substitution
//! - `templates` - the static files of a build tree
//! - `composer` - bindings source and stub skeletons
//! - `integrity` - post-generation checks

pub mod composer;
pub mod integrity;
pub mod template;
pub mod templates;

pub use composer::{compose_source, compose_stub, SOURCE_REGIONS, STUB_REGIONS};
pub use integrity::{check_markers, verify_generated};
pub use template::{Template, TemplateError, TemplateVars};
pub use templates::{RenderedFile, ScaffoldTemplates};
