//! File merger CLI
//!
//! Finds all files in nested folders below a root that contain the same
//! search term and combines them into a single file per term.
//!
//! ```text
//! filemerger -r ./test -o topic -v "test1,test2"
//! filemerger -r ./test -o year -v "1990,2000"
//! ```

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use ntvg::{error::Result, models::MergeOption, pipeline};

/// filemerger - merge nested files by topic or year
#[derive(Parser, Debug)]
#[command(name = "filemerger", version, about = "Merge nested files by topic or year")]
struct Cli {
    /// Folder to start searching from
    #[arg(short, long)]
    root: PathBuf,

    /// Search option: TOPIC or YEAR
    #[arg(short, long)]
    option: MergeOption,

    /// Comma-separated search values; for YEAR exactly a start and an end year
    #[arg(short, long, value_delimiter = ',', required = true)]
    values: Vec<String>,

    /// Directory the merged files are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Extension of the merged files
    #[arg(long, default_value = "txt")]
    extension: String,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Bad value counts are usage errors, reported the same way as unknown flags.
    if let Err(e) = cli.option.search_terms(&cli.values) {
        Cli::command().error(ErrorKind::ValueValidation, e).exit();
    }

    init_logging(cli.verbose);

    if let Err(e) = pipeline::run_merge(
        &cli.root,
        cli.option,
        &cli.values,
        &cli.output_dir,
        &cli.extension,
    ) {
        log::error!("Merge failed: {}", e);
        return Err(e);
    }

    Ok(())
}
