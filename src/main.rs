use anyhow::Result;
use colored::Colorize;

use rappelz_ranking::logging::LogGuard;
use rappelz_ranking::{handle_scrape, interpret};

fn main() {
    let log_guard = setup_logging();
    let result = parse_and_execute();
    drop(log_guard);

    if let Err(e) = result {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

fn setup_logging() -> LogGuard {
    sensible_env_logger::init!();
    LogGuard::new()
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    handle_scrape(&cli)
}
