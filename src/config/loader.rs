//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BindkitError, BindkitResult};

use super::types::{Config, ToolchainKind};

/// Project configuration file, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "bindkit.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> BindkitResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| BindkitError::filesystem(path, e))?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BindkitError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    config.validate(path)?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from the explicit path, the project file, the user file, or defaults.
///
/// An explicit path must exist; the other locations are optional.
pub fn load_or_default(explicit: Option<&Path>) -> BindkitResult<(Config, Vec<ConfigWarning>)> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => [
            Some(PathBuf::from(PROJECT_CONFIG_FILE)),
            user_config_path(),
        ]
        .into_iter()
        .flatten()
        .find(|p| p.exists()),
    };

    let (config, warnings) = match candidate {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            load_with_warnings(&path)?
        }
        None => (Config::default(), Vec::new()),
    };

    Ok((with_env_overrides(config)?, warnings))
}

/// `~/.config/bindkit/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("bindkit").join("config.toml"))
}

/// Apply environment variable overrides (BINDKIT_* prefix)
pub fn with_env_overrides(mut config: Config) -> BindkitResult<Config> {
    // BINDKIT_TOOLCHAIN
    if let Ok(kind) = std::env::var("BINDKIT_TOOLCHAIN") {
        config.toolchain.kind = kind
            .parse::<ToolchainKind>()
            .map_err(|message| BindkitError::Config {
                file: PathBuf::from("BINDKIT_TOOLCHAIN"),
                message,
            })?;
    }

    if let Ok(python) = std::env::var("BINDKIT_PYTHON") {
        config.toolchain.python = python;
    }
    if let Ok(cmake) = std::env::var("BINDKIT_CMAKE") {
        config.toolchain.cmake = cmake;
    }
    if let Ok(msbuild) = std::env::var("BINDKIT_MSBUILD") {
        config.toolchain.msbuild = msbuild;
    }

    // BINDKIT_KEEP_BUILD
    if let Ok(val) = std::env::var("BINDKIT_KEEP_BUILD") {
        config.toolchain.keep_build_dir = val.to_lowercase() != "false" && val != "0";
    }

    Ok(config)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "toolchain",
        "kind",
        "python",
        "cmake",
        "msbuild",
        "prefix_path",
        "generator_name",
        "env",
        "path_prepend",
        "keep_build_dir",
        "generator",
        "command",
        "options",
        "namespaces_root",
        "exclude_functions",
        "exclude_params",
        "override_virtual_classes",
        "template_specializations",
        "force_reference_return",
        "boxed_params",
        "vectorize_namespaces",
        "vectorize_functions",
        "format_stubs",
        "scaffold",
        "copy_header_tree",
        "modules",
        "namespace",
        "header",
        "source",
        "output",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

/// Commented starting point written by `bindkit init`
pub const DEFAULT_CONFIG: &str = r#"# bindkit configuration
#
# Values here are overridden by BINDKIT_* environment variables and CLI flags.

[toolchain]
# "cmake" (any platform) or "msbuild" (Visual Studio 2022)
kind = "cmake"
# python = "python3"
# cmake = "cmake"
# msbuild = "msbuild"
# prefix_path = "/opt/pybind11"
# generator_name = "Ninja"
# path_prepend = []
keep_build_dir = false

# [toolchain.env]
# CMAKE_BUILD_PARALLEL_LEVEL = "8"

[generator]
# command = ["python3", "{build_root}/litgen_driver.py", "{request}"]

[generator.options]
# namespaces_root = []
# exclude_functions = "^priv_"
# vectorize_namespaces = "^MathFunctions$"
format_stubs = false

# [[generator.options.template_specializations]]
# name = "^add$"
# types = ["int", "double"]
# add_suffix = true

[scaffold]
copy_header_tree = true

# [[modules]]
# namespace = "Example01"
# header = "cpp/Example01.h"
# source = "cpp/Example01.cpp"
# output = "python/py_example01"
"#;
