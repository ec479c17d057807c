//! NTvG scraper CLI
//!
//! Downloads article PDFs into `<output_dir>/<year>/<identifier>.pdf`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use ntvg::{
    error::Result, models::Config, pipeline, services::ArticleScraper, storage::LocalStorage,
};

/// ntvg-scraper - Nederlands Tijdschrift voor Geneeskunde PDF scraper
#[derive(Parser, Debug)]
#[command(name = "ntvg-scraper", version, about = "Scrape article PDFs from ntvg.nl")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "ntvg.toml", global = true)]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape a range of listing pages
    Run {
        /// First listing page to visit
        #[arg(long)]
        begin_page: Option<u32>,

        /// Listing page to stop at (exclusive)
        #[arg(long)]
        end_page: Option<u32>,

        /// Root directory of the PDF archive
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Run {
            begin_page,
            end_page,
            output_dir,
        } => {
            if let Some(page) = begin_page {
                config.run.begin_page = page;
            }
            if let Some(page) = end_page {
                config.run.end_page = page;
            }
            if let Some(dir) = output_dir {
                config.run.output_dir = dir;
            }

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }

            let config = Arc::new(config);
            let storage = LocalStorage::new(&config.run.output_dir);
            let scraper = ArticleScraper::new(Arc::clone(&config))?;

            pipeline::run_scraper(&config, &scraper, &storage).await?;

            log::info!(
                "All articles from Nederlands Tijdschrift voor Geneeskunde are scraped for page range {}-{}.",
                config.run.begin_page,
                config.run.end_page
            );
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK (pages {}..{}, output {})",
                config.run.begin_page,
                config.run.end_page,
                config.run.output_dir.display()
            );
        }
    }

    Ok(())
}
