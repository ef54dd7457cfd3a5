//! Post-generation integrity checks
//!
//! After the generator rewrote a file in place, its markers must still be
//! there and everything outside the regions must be byte-identical to the
//! skeleton that was handed over.

use std::path::Path;

use similar::TextDiff;

use crate::domain::entities::ComposedDocument;
use crate::domain::value_objects::RegionKind;
use crate::error::{BindkitError, BindkitResult};

/// Re-split `text` read from `path` into the given regions.
pub fn check_markers(
    path: &Path,
    text: &str,
    kinds: &[RegionKind],
) -> BindkitResult<ComposedDocument> {
    ComposedDocument::parse(text, kinds).map_err(|source| BindkitError::MarkerCorrupted {
        path: path.to_path_buf(),
        source,
    })
}

/// Check a generated file against the skeleton it was produced from.
pub fn verify_generated(
    path: &Path,
    skeleton: &ComposedDocument,
    generated: &str,
) -> BindkitResult<ComposedDocument> {
    let doc = check_markers(path, generated, &skeleton.region_kinds())?;

    if doc.fixed_segments() != skeleton.fixed_segments() {
        let expected = skeleton.fixed_text();
        let actual = doc.fixed_text();
        let mut diff = TextDiff::from_lines(expected.as_str(), actual.as_str())
            .unified_diff()
            .context_radius(2)
            .header("scaffold", "generated")
            .to_string();
        if diff.is_empty() {
            diff = "text moved across a region boundary".to_string();
        }
        return Err(BindkitError::Integrity {
            path: path.to_path_buf(),
            diff,
        });
    }

    Ok(doc)
}
