//! Domain Layer
//!
//! The scaffolding protocol as pure logic: descriptors and layouts, the
//! marked-region document model, templates and composition.
//!
//! ## Structure
//!
//! - `entities/` - ModuleDescriptor, Layout, ComposedDocument, WrittenFile
//! - `value_objects/` - RegionKind, Stage, GeneratorOptions, ContentHash
//! - `services/` - template rendering, composition, integrity checks
//! - `ports/` - file system, process, generator and event interfaces
//!
//! Nothing in here touches the disk or spawns processes except through
//! `ports`.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
