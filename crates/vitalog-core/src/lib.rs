pub mod calendar;
pub mod cli;
pub mod commands;
pub mod config;
pub mod datetime;
pub mod entry;
pub mod filter;
pub mod logbook;
pub mod range;
pub mod render;
pub mod sample;
pub mod state;
pub mod timeline;

use std::ffi::OsString;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::{debug, info};

#[tracing::instrument(skip_all)]
pub fn run(raw_args: Vec<OsString>) -> anyhow::Result<()> {
    let cli = cli::GlobalCli::parse_from(raw_args);

    cli::init_tracing(cli.verbose, cli.quiet)?;

    info!(verbose = cli.verbose, quiet = cli.quiet, "starting vitalog CLI");

    let cfg = config::Config::load(cli.config.as_deref())?;

    // "Today" is resolved once at the boundary; everything below takes
    // it as a parameter.
    let today = Local::now().date_naive();
    debug!(%today, "resolved local date");

    let entries = match cli.entries.as_deref().or(cfg.entries_path.as_deref()) {
        Some(path) => logbook::load_entries(path)
            .with_context(|| format!("failed to load entries from {}", path.display()))?,
        None => {
            debug!("no entries file configured; using built-in sample data");
            sample::entries()
        }
    };

    let mut renderer = render::Renderer::new(&cfg);
    let inv = cli::Invocation::parse(cli.rest);

    commands::dispatch(&cfg, &mut renderer, &entries, inv, today)?;

    info!("done");
    Ok(())
}
