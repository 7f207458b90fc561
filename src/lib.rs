pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod logging;
pub mod pagination;
pub mod parsing;
pub mod rate_limiter;
pub mod retry;
pub mod services;
pub mod timeseries;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;

use crate::config::AppConfig;
use crate::domain::RunProgress;
use crate::services::IngestionService;

pub fn interpret() -> Cli {
    Cli::parse()
}

pub fn handle_scrape(cli: &Cli) -> Result<()> {
    let config = AppConfig::load(&cli.configfile)?;
    log::info!(
        "Loaded {} markets from {}",
        config.markets.len(),
        cli.configfile.display()
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    runtime.block_on(async {
        let mut service = IngestionService::connect(config, &cli.host, cli.port)?;
        let mut progress = RunProgress::new(service.total_pages());
        service.run(&mut progress).await;
        progress.ensure_complete()
    })
}
