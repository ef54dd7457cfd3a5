use std::path::PathBuf;

use bindkit::ToolchainKind;
use clap::{Args, Parser, Subcommand};

/// bindkit - build Python extension modules from C++ headers
#[derive(Parser, Debug)]
#[command(name = "bindkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI (NDJSON events and JSON results on stdout)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: ./bindkit.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// The module a command works on
#[derive(Args, Debug, Clone, Default)]
pub struct ModuleArgs {
    /// Root C++ namespace to bind
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// C++ declaration header
    #[arg(long)]
    pub header: Option<PathBuf>,

    /// Hand-written C++ implementation
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Python package directory (its name is the module name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scaffold, generate, verify and compile a module
    ///
    /// Without module flags, builds every [[modules]] entry of the config.
    Build {
        #[command(flatten)]
        module: ModuleArgs,

        /// Remove a build tree left by a previous run
        #[arg(long)]
        clean: bool,

        /// Leave the generated regions empty
        #[arg(long)]
        skip_generate: bool,

        /// Stop after verification (no native build)
        #[arg(long)]
        skip_build: bool,

        /// Keep the build tree after relocating the extension
        #[arg(long)]
        keep_build: bool,

        /// Native toolchain (cmake or msbuild)
        #[arg(long)]
        toolchain: Option<ToolchainKind>,
    },

    /// Write the build tree and skeletons only
    Scaffold {
        #[command(flatten)]
        module: ModuleArgs,

        /// Remove a build tree left by a previous run
        #[arg(long)]
        clean: bool,
    },

    /// Show the planned output paths
    Layout {
        #[command(flatten)]
        module: ModuleArgs,
    },

    /// Check the marked regions of an existing module
    Verify {
        #[command(flatten)]
        module: ModuleArgs,
    },

    /// Create a commented bindkit.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
