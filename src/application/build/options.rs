//! Build Options
//!
//! Per-run switches for the build pipeline.

use crate::domain::value_objects::GeneratorOptions;

/// Options for one pipeline run
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Remove a build tree left by a previous run instead of failing
    pub clean: bool,
    /// Leave the marked regions empty
    pub skip_generate: bool,
    /// Stop after verification (no configure, build or relocation)
    pub skip_build: bool,
    /// Keep `build/` after the artifact is relocated
    pub keep_build_dir: bool,
    /// Mirror the header's directory into `build/src_original`
    pub copy_header_tree: bool,
    /// Forwarded to the binding generator
    pub generator_options: GeneratorOptions,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self {
            clean: false,
            skip_generate: false,
            skip_build: false,
            keep_build_dir: false,
            copy_header_tree: true,
            generator_options: GeneratorOptions::default(),
        }
    }

    /// Scaffold only: no generator, no toolchain, build tree kept.
    pub fn scaffold_only() -> Self {
        Self::new()
            .with_skip_generate(true)
            .with_skip_build(true)
            .with_keep_build_dir(true)
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn with_skip_generate(mut self, skip: bool) -> Self {
        self.skip_generate = skip;
        self
    }

    pub fn with_skip_build(mut self, skip: bool) -> Self {
        self.skip_build = skip;
        self
    }

    pub fn with_keep_build_dir(mut self, keep: bool) -> Self {
        self.keep_build_dir = keep;
        self
    }

    pub fn with_copy_header_tree(mut self, copy: bool) -> Self {
        self.copy_header_tree = copy;
        self
    }

    pub fn with_generator_options(mut self, options: GeneratorOptions) -> Self {
        self.generator_options = options;
        self
    }
}
