// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! colawater - facility identifier tools for the water network

mod commands;
mod sink;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use commands::{fids, qc};
use cw_core::Config;
use cw_storage::JsonTableStore;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::sink::ConsoleSink;

#[derive(Parser)]
#[command(
    name = "colawater",
    version,
    about = "Assign and validate facility identifiers"
)]
struct Cli {
    /// Log more (-v info, -vv debug); RUST_LOG takes over when unset
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (default: ./colawater.toml, then the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate facility identifiers for rows holding a placeholder
    Fids(fids::FidsArgs),
    /// Run quality control checks
    Qc(qc::QcArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("cannot read current directory")?;
    let config = load_config(cli.config.as_deref(), &cwd)?;
    let store = JsonTableStore::new(cwd);
    let mut sink = ConsoleSink::stdio();

    let completed = match cli.command {
        Commands::Fids(args) => fids::handle(args, &config, &store, &mut sink)?,
        Commands::Qc(args) => qc::handle(args, &config, &store, &mut sink)?,
    };

    Ok(if completed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => Config::discover(cwd),
    };
    match path {
        Some(path) => {
            Config::load(&path).with_context(|| format!("invalid config {}", path.display()))
        }
        None => Ok(Config::default()),
    }
}

fn setup_logging(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).without_time())
        .init();
}
