mod cli_args;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use log;
use std::path::PathBuf;
use std::process;

use cli_args::{BundleOpts, Cli};
use dirmd_core::{AppError, Bundler, Config, config::expand_path};

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);
    let quiet = cli_args.quiet;

    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args) {
        Ok(summary) => {
            output::print_summary(&summary, quiet);
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            let exit_code = exit_code_for(&e);
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AppError>() {
        Some(AppError::InvalidArgument(_)) => 5,
        Some(AppError::Config(_)) | Some(AppError::TomlParse(_)) => 1,
        Some(AppError::Internal(_)) | Some(AppError::WorkerPool(_)) => 1,
        Some(AppError::FileRead { .. })
        | Some(AppError::FileWrite { .. })
        | Some(AppError::DirCreation { .. })
        | Some(AppError::WalkDir(_))
        | Some(AppError::Ignore(_))
        | Some(AppError::IgnoreSource { .. }) => 2,
        Some(_) => 1,
        None => 1,
    }
}

fn run_app(cli: Cli) -> Result<dirmd_core::BundleSummary> {
    let root_dir = Config::determine_root_dir(&cli.directory)
        .context("Invalid directory argument")?;
    log::info!("Root directory determined: {}", root_dir.display());

    let config = load_config(root_dir, &cli)?;
    log::debug!("Effective configuration: {:?}", config);

    let bundler = Bundler::new(config).context("Failed to initialize ignore rules")?;
    let quiet = cli.quiet;
    bundler
        .bundle_with_progress(&mut |stage| output::print_progress(&stage, quiet))
        .context("Failed to bundle directory")
}

fn load_config(root_dir: PathBuf, cli: &Cli) -> Result<Config> {
    let config_path = Config::resolve_config_path(
        &root_dir,
        cli.config_file.config.as_deref(),
        cli.config_file.no_config,
    )
    .context("Failed to resolve configuration path")?;

    let config = match &config_path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    Ok(merge_config_with_cli_overrides(
        Config { root_dir, ..config },
        &cli.bundle,
    ))
}

fn merge_config_with_cli_overrides(mut config: Config, args: &BundleOpts) -> Config {
    log::trace!("Applying CLI overrides to config...");

    if let Some(output) = &args.output {
        config.output_path = expand_path(output);
    }
    if let Some(ignore_file) = &args.ignore_file {
        config.ignore_file_path = Some(expand_path(ignore_file));
    }
    if let Some(workers) = args.workers {
        config.set_workers(workers);
    }
    if args.include_hidden {
        config.include_hidden = true;
    }

    log::trace!("Config after CLI overrides: {:?}", config);
    config
}
