use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use crate::cli::Cli;
use crate::config::{load_settings, RunConfiguration};
use crate::fetcher::HttpFetcher;

// Import modules
mod cli;
mod config;
mod error;
mod extractors;
mod fetcher;
mod record;
mod scrape_images;
mod utilities;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("Error: {:#}", e).red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration settings
    let settings = load_settings(cli.config.as_deref()).context("Failed to load settings")?;
    let config = RunConfiguration::from_cli(&cli, settings)?;

    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let summary = scrape_images::scrape_images(&config, &fetcher).await?;

    if config.html_dump && config.input_list.is_none() {
        return Ok(());
    }

    if config.dump {
        eprintln!("\n{} image URLs found.", summary.resolved_urls.len());
    } else {
        eprintln!(
            "{}",
            format!("\n{} images downloaded.", summary.downloaded()).green()
        );
    }

    if let Some(path) = &summary.log_path {
        println!("Output log to {}.", path.display());
    }

    if summary.failures > 0 {
        eprintln!(
            "{}",
            format!("{} images could not be retrieved.", summary.failures).yellow()
        );
    }

    Ok(())
}
