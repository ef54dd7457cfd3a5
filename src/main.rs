//! bindkit CLI
//!
//! Usage: bindkit <COMMAND>
//!
//! Commands:
//!   build     Scaffold, generate, verify and compile a module
//!   scaffold  Write the build tree and skeletons only
//!   layout    Show the planned output paths
//!   verify    Check the marked regions of an existing module
//!   init      Create a commented bindkit.toml

mod cli;
mod commands;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use bindkit::BindkitError;
use cli::{Cli, Commands};
use commands::build::BuildFlags;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<BindkitError>() {
            Some(e) => eprintln!("Error [{}]: {:#}", e.stage(), err),
            None => eprintln!("Error: {:#}", err),
        }
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr; stdout stays free for results and NDJSON.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Build {
            module,
            clean,
            skip_generate,
            skip_build,
            keep_build,
            toolchain,
        } => {
            let flags = BuildFlags {
                clean,
                skip_generate,
                skip_build,
                keep_build,
                toolchain,
            };
            commands::build::cmd_build(config, &module, &flags, cli.json, cli.verbose)
        }
        Commands::Scaffold { module, clean } => {
            commands::build::cmd_scaffold(config, &module, clean, cli.json, cli.verbose)
        }
        Commands::Layout { module } => commands::layout::cmd_layout(&module, cli.json),
        Commands::Verify { module } => commands::verify::cmd_verify(&module, cli.json),
        Commands::Init { force } => commands::init::cmd_init(Path::new("."), force, cli.json),
    }
}
