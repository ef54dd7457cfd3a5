//! Error types for bindkit
//!
//! Uses `thiserror` for library errors. Every variant maps to the pipeline
//! stage that raised it so the CLI can report where a run stopped.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::ComposeError;
use crate::domain::ports::FsError;
use crate::domain::services::TemplateError;
use crate::domain::value_objects::Stage;

/// Result type alias for bindkit operations
pub type BindkitResult<T> = Result<T, BindkitError>;

/// Main error type for bindkit operations
#[derive(Error, Debug)]
pub enum BindkitError {
    /// Module descriptor failed validation
    #[error("invalid module descriptor: {message}")]
    InvalidDescriptor { message: String },

    /// Two layout roles resolved to the same file
    #[error("layout collision: {first} and {second} both resolve to {path}")]
    LayoutCollision {
        first: &'static str,
        second: &'static str,
        path: PathBuf,
    },

    /// The output directory still holds files from a previous run
    #[error("{path} is left from a previous run - remove it or rerun with --clean")]
    StaleOutput { path: PathBuf },

    /// Directory creation, copy or write failure
    #[error("filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// Template referenced an unknown placeholder or was malformed
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Composition rejected the input text
    #[error(transparent)]
    Compose(#[from] ComposeError),

    /// Markers were removed or damaged after generation
    #[error("marked regions in {path} are corrupted: {source}")]
    MarkerCorrupted {
        path: PathBuf,
        #[source]
        source: ComposeError,
    },

    /// Generator touched content outside the marked regions
    #[error("generator altered content outside marked regions in {path}:\n{diff}")]
    Integrity { path: PathBuf, diff: String },

    /// External binding generator failed
    #[error("binding generator '{generator}' failed: {message}")]
    Generator { generator: String, message: String },

    /// Configure or build step exited non-zero (or could not start)
    #[error("{step} step failed: `{command}` {status}")]
    Build {
        step: Stage,
        command: String,
        status: String,
    },

    /// Build reported success but produced no artifact
    #[error("compiled artifact for module '{module}' not found (searched: {searched})")]
    ArtifactNotFound { module: String, searched: String },

    /// Invalid configuration file or value
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },
}

impl BindkitError {
    /// Wrap a filesystem failure with the path it happened at.
    pub fn filesystem(path: impl Into<PathBuf>, source: impl Into<FsError>) -> Self {
        Self::Filesystem {
            path: path.into(),
            source: source.into(),
        }
    }

    /// The pipeline stage this error is attributed to.
    pub fn stage(&self) -> Stage {
        match self {
            Self::InvalidDescriptor { .. }
            | Self::LayoutCollision { .. }
            | Self::StaleOutput { .. } => Stage::Plan,
            Self::Filesystem { .. } => Stage::Scaffold,
            Self::Template(_) => Stage::Render,
            Self::Compose(_) => Stage::Compose,
            Self::Generator { .. } => Stage::Generate,
            Self::MarkerCorrupted { .. } | Self::Integrity { .. } => Stage::Verify,
            Self::Build { step, .. } => *step,
            Self::ArtifactNotFound { .. } => Stage::Relocate,
            Self::Config { .. } => Stage::Config,
        }
    }
}
