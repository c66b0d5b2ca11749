//! `spaceport` - HTTP server binary
//!
//! Opens (or creates) the database named on the command line, ensures the
//! schema and reference rows exist, then serves the API and HTML pages.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use spaceport::cli::Cli;
use spaceport::server::{self, pages, AppState};
use spaceport::storage::bootstrap::seed_if_empty;
use spaceport::{init_logging, Config, Storage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let mut config = Config::load_from(cli.config.clone())?;
    cli.apply_overrides(&mut config);
    config.validate()?;
    let addr = config.bind_addr()?;

    let storage = Storage::open(&cli.database)?;
    storage.set_busy_timeout(config.busy_timeout())?;

    if config.storage.seed {
        let report = seed_if_empty(&storage)?;
        if !report.is_empty() {
            info!(
                "Seeded {} companies and {} rockets",
                report.companies, report.rockets
            );
        }
    }

    let stats = storage.stats()?;
    info!(
        "Store holds {} companies, {} rockets, {} launches",
        stats.companies, stats.rockets, stats.launches
    );

    let templates = pages::load_templates(config.server.templates_dir.as_deref())?;
    let state = AppState::new(storage, templates);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to listen on {addr}"))?;
    server::serve(listener, state).await?;

    Ok(())
}
