//! Build and scaffold commands

use std::path::Path;

use anyhow::{Context, Result};

use bindkit::infrastructure::{strategy_for, CommandGenerator, LocalFs, SystemProcessRunner};
use bindkit::{BuildOptions, BuildPipeline, BuildReport, Config, ModuleDescriptor, ToolchainKind};

use super::{event_sink, load_config};
use crate::cli::ModuleArgs;

/// Switches of `bindkit build`
#[derive(Debug, Clone, Default)]
pub struct BuildFlags {
    pub clean: bool,
    pub skip_generate: bool,
    pub skip_build: bool,
    pub keep_build: bool,
    pub toolchain: Option<ToolchainKind>,
}

pub fn cmd_build(
    config_path: Option<&Path>,
    module: &ModuleArgs,
    flags: &BuildFlags,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(kind) = flags.toolchain {
        config.toolchain.kind = kind;
    }

    let options = BuildOptions::new()
        .with_clean(flags.clean)
        .with_skip_generate(flags.skip_generate)
        .with_skip_build(flags.skip_build)
        .with_keep_build_dir(flags.keep_build || config.toolchain.keep_build_dir)
        .with_copy_header_tree(config.scaffold.copy_header_tree)
        .with_generator_options(config.generator.options.clone());

    let modules = module.descriptors(&config)?;
    run_modules(&config, &modules, &options, json, verbose)
}

pub fn cmd_scaffold(
    config_path: Option<&Path>,
    module: &ModuleArgs,
    clean: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let config = load_config(config_path)?;
    let options = BuildOptions::scaffold_only()
        .with_clean(clean)
        .with_copy_header_tree(config.scaffold.copy_header_tree)
        .with_generator_options(config.generator.options.clone());

    let modules = module.descriptors(&config)?;
    run_modules(&config, &modules, &options, json, verbose)
}

/// Real-world pipeline: local disk, child processes, configured toolchain
pub fn pipeline_for(config: &Config, json: bool) -> BuildPipeline<LocalFs> {
    let runner = SystemProcessRunner::new().quiet(json);

    let generator = match config.generator.command.split_first() {
        Some((program, args)) => {
            CommandGenerator::new("command", program.clone(), args.to_vec(), Box::new(runner))
        }
        None => CommandGenerator::litgen(config.toolchain.python.clone(), Box::new(runner)),
    }
    .with_env(
        config.toolchain.env.clone(),
        config.toolchain.path_prepend.clone(),
    );

    BuildPipeline::new(
        LocalFs::new(),
        Box::new(runner),
        Box::new(generator),
        strategy_for(&config.toolchain),
    )
}

fn run_modules(
    config: &Config,
    modules: &[ModuleDescriptor],
    options: &BuildOptions,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let pipeline = pipeline_for(config, json);
    let events = event_sink(json, verbose);

    let mut reports = Vec::with_capacity(modules.len());
    for module in modules {
        reports.push(pipeline.run_with_events(module, options, events.clone())?);
    }

    if json {
        let out = serde_json::json!({
            "event": "result",
            "modules": serde_json::to_value(&reports).context("serializing build reports")?,
        });
        println!("{}", out);
    } else {
        for report in &reports {
            print_summary(report);
        }
    }
    Ok(())
}

fn print_summary(report: &BuildReport) {
    match &report.artifact {
        Some(artifact) => println!("{}: {}", report.module, artifact.display()),
        None => println!(
            "{}: scaffold in {}",
            report.module,
            report.layout.build_root().display()
        ),
    }
}
