//! Value Objects
//!
//! Immutable types with no identity: region kinds and their marker frames,
//! pipeline stages, identifier checks, generator options and content
//! hashes.

mod generator_options;
mod hash;
mod identifier;
mod region;
mod stage;

pub use generator_options::{GeneratorOptions, TemplateSpecialization};
pub use hash::ContentHash;
pub use identifier::is_identifier;
pub use region::{RegionKind, BANNER_CLOSE, BANNER_OPEN};
pub use stage::Stage;
