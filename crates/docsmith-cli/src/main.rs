use clap::Parser;
use docsmith_config::config::Config;
use docsmith_operations::{sync, types::SyncReport};
use tracing::{error, info};

use crate::{
    cli::{Args, Commands},
    logging::setup_logging,
};

mod cli;
mod logging;

fn main() -> miette::Result<()> {
    let args = Args::parse();
    setup_logging(&args);

    let config = Config::from_file(&args.config)?;

    match args.command {
        Commands::List => {
            list_sources(&config);
            Ok(())
        }
        Commands::Sync { source } => {
            let report = match source {
                Some(name) => sync::sync_source(&config, &name)?,
                None => sync::sync_all(&config),
            };
            finish(report)
        }
    }
}

fn list_sources(config: &Config) {
    if config.sources.is_empty() {
        info!("No sources configured");
        return;
    }

    for source in &config.sources {
        println!("{} ({})", source.name, source.url);
        for tag in &source.tags {
            println!("  {tag}");
        }
    }
}

fn finish(report: SyncReport) -> miette::Result<()> {
    let total = report.synced.len() + report.failed.len();
    info!(
        "Synced {}/{} source tags",
        report.synced.len(),
        total
    );

    if report.is_success() {
        return Ok(());
    }

    for failure in &report.failed {
        error!("{}@{}: {}", failure.source, failure.tag, failure.error);
    }
    Err(miette::miette!(
        "{} of {} source tags failed to sync",
        report.failed.len(),
        total
    ))
}
