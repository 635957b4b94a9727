use crate::cli::Cli;
use crate::config::MapConfig;
use crate::domain::UrlSeed;
use crate::errors::MapError;
use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod boundary;
mod cli;
mod config;
mod domain;
mod errors;
mod geometry;
mod map;
mod markup;
mod replay;
mod resolver;
mod session;
mod sinks;
mod store;
mod sync;
mod templates;

#[cfg(test)]
mod tests;

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the snapshots.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,listing_map=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = MapConfig::from_env().context("Failed to load configuration")?;

    let html = std::fs::read_to_string(&cli.listings)
        .with_context(|| format!("Failed to read {}", cli.listings.display()))?;
    let page = markup::read_listing_markup(&html)?;

    let seed = match cli.url.as_deref() {
        Some(url) => UrlSeed::from_url(url).context("Failed to read filters from --url")?,
        None => UrlSeed::default(),
    };

    let mut session = match session::start_headless(&page.records, page.card_ids, seed, &config) {
        Ok(session) => session,
        Err(MapError::NoListings) => {
            // Already logged; there is no map to drive.
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let stdout = io::stdout().lock();
    let applied = match &cli.triggers {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            replay::run_script(&mut session, BufReader::new(file), stdout)?
        }
        None => replay::run_script(&mut session, io::stdin().lock(), stdout)?,
    };

    tracing::info!(applied, "✅ Trigger script finished");
    Ok(())
}
