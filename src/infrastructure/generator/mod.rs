//! Binding generator adapters

mod command;

pub use command::{CommandGenerator, BUILD_ROOT_ARG, REQUEST_ARG};
