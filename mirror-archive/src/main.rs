//! Mirror-clone a GitHub repository into a zstd-compressed tarball.
//!
//! Reads `GITHUB_TOKEN` and `GITHUB_REPOSITORY`, removes outputs of earlier
//! runs, then runs `git clone --mirror`, `tar`, `zstd`, and a best-effort `ls`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use mirror_archive::core::plan::build_plan;
use mirror_archive::core::settings::DEFAULT_SETTINGS_FILE;
use mirror_archive::exit_codes;
use mirror_archive::io::config::load_run_config;
use mirror_archive::io::process::SystemRunner;
use mirror_archive::logging;
use mirror_archive::pipeline::{ArchiveRequest, run_archive};
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "mirror-archive",
    version,
    about = "Mirror-clone a repository and package it as a zstd-compressed tarball"
)]
struct Cli {
    /// Settings file; relative paths resolve against the working directory.
    /// Defaults to `mirror-archive.toml`, which may be absent. An explicit
    /// path must exist.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run in this directory instead of the current one.
    #[arg(short = 'C', long)]
    workdir: Option<PathBuf>,

    /// Print the planned commands (token redacted) without running anything.
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init();

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            exit_codes::FAILED
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    info!("Starting repository mirror archive");

    let workdir = match resolve_workdir(cli.workdir.as_deref()) {
        Ok(workdir) => workdir,
        Err(err) => {
            error!("{err:#}");
            return Ok(exit_codes::CONFIG);
        }
    };
    let (settings_path, missing_ok) = match &cli.config {
        Some(path) => (workdir.join(path), false),
        None => (workdir.join(DEFAULT_SETTINGS_FILE), true),
    };
    let config = match load_run_config(&settings_path, missing_ok) {
        Ok(config) => config,
        Err(err) => {
            error!("{err:#}");
            return Ok(exit_codes::CONFIG);
        }
    };

    let steps = build_plan(&config.credentials, &config.settings);
    if cli.dry_run {
        for step in &steps {
            println!("{}", step.display_command());
        }
        return Ok(exit_codes::OK);
    }

    let runner = SystemRunner::new(config.settings.step_timeout_secs.map(Duration::from_secs));
    let report = run_archive(
        &runner,
        &ArchiveRequest {
            workdir: &workdir,
            settings: &config.settings,
            steps: &steps,
        },
    )?;

    if report.succeeded() {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::FAILED)
    }
}

fn resolve_workdir(requested: Option<&Path>) -> Result<PathBuf> {
    match requested {
        Some(dir) => {
            if !dir.is_dir() {
                bail!("workdir {} is not a directory", dir.display());
            }
            Ok(dir.to_path_buf())
        }
        None => std::env::current_dir().context("resolve current directory"),
    }
}
