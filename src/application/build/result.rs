//! Build Report
//!
//! What a successful pipeline run produced.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::entities::{Layout, WrittenFile};

/// Result of one module run
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Python module name
    pub module: String,
    pub layout: Layout,
    /// Files written by bindkit itself, in write order
    pub written: Vec<WrittenFile>,
    /// Whether the generator ran and its output passed verification
    pub generated: bool,
    /// Relocated extension, when the toolchain ran
    pub artifact: Option<PathBuf>,
    /// Whether `build/` is still on disk
    pub build_tree_kept: bool,
}

impl BuildReport {
    pub fn new(layout: Layout) -> Self {
        Self {
            module: layout.module_name().to_string(),
            layout,
            written: Vec::new(),
            generated: false,
            artifact: None,
            build_tree_kept: true,
        }
    }

    pub fn file_count(&self) -> usize {
        self.written.len()
    }
}
