//! Configuration module for bindkit
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (BINDKIT_*)
//! 3. `--config <path>` or project config (./bindkit.toml)
//! 4. User config (~/.config/bindkit/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning, DEFAULT_CONFIG, PROJECT_CONFIG_FILE};
pub use types::{Config, GeneratorConfig, ScaffoldConfig, ToolchainConfig, ToolchainKind};
