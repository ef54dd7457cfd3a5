//! Verify command - check the markers of an existing module

use std::path::Path;

use anyhow::{Context, Result};

use bindkit::domain::services::{check_markers, SOURCE_REGIONS, STUB_REGIONS};
use bindkit::{Layout, RegionKind};

use crate::cli::ModuleArgs;

pub fn cmd_verify(module: &ModuleArgs, json: bool) -> Result<()> {
    let layout = Layout::plan(&module.descriptor_without_source()?)?;

    let mut checked = Vec::new();
    check(layout.stub(), &STUB_REGIONS)?;
    checked.push(layout.stub().to_path_buf());

    // The bindings source only exists while the build tree is kept
    let source_present = layout.bindings_source().exists();
    if source_present {
        check(layout.bindings_source(), &SOURCE_REGIONS)?;
        checked.push(layout.bindings_source().to_path_buf());
    }

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "verified",
                "module": layout.module_name(),
                "files": checked.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
            })
        );
    } else {
        for path in &checked {
            println!("ok: {}", path.display());
        }
        if !source_present {
            println!(
                "skipped: {} (build tree removed)",
                layout.bindings_source().display()
            );
        }
    }
    Ok(())
}

fn check(path: &Path, kinds: &[RegionKind]) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    check_markers(path, &text, kinds)?;
    Ok(())
}
