// src/pipeline/merge.rs

//! Merge pipeline entry point.

use std::path::Path;

use crate::error::Result;
use crate::models::{MergeOption, MergeOutcome};
use crate::services::FileMerger;

/// Merge the files under `root` by `option`, writing outputs to `output_dir`.
pub fn run_merge(
    root: &Path,
    option: MergeOption,
    values: &[String],
    output_dir: &Path,
    extension: &str,
) -> Result<Vec<MergeOutcome>> {
    let merger = FileMerger::new(root)
        .with_output_dir(output_dir)
        .with_extension(extension);

    let outcomes = merger.merge(option, values)?;

    let merged: usize = outcomes.iter().map(|o| o.sources.len()).sum();
    log::info!(
        "Done: {} files merged by {} in root {} into {} outputs",
        merged,
        option,
        root.display(),
        outcomes.len()
    );
    Ok(outcomes)
}
