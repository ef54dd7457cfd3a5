//! Init command - write a commented bindkit.toml

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use bindkit::config::{DEFAULT_CONFIG, PROJECT_CONFIG_FILE};

pub fn cmd_init(dir: &Path, force: bool, json: bool) -> Result<()> {
    let path = dir.join(PROJECT_CONFIG_FILE);

    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    fs::write(&path, DEFAULT_CONFIG).with_context(|| format!("writing {}", path.display()))?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "created",
                "path": path.display().to_string(),
            })
        );
    } else {
        println!("Created {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = tempdir().unwrap();
        cmd_init(dir.path(), false, true).unwrap();
        assert!(cmd_init(dir.path(), false, true).is_err());
        cmd_init(dir.path(), true, true).unwrap();

        let written = fs::read_to_string(dir.path().join(PROJECT_CONFIG_FILE)).unwrap();
        assert_eq!(written, DEFAULT_CONFIG);
    }
}
