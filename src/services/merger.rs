//! File merger service.
//!
//! Collects every file under a root whose path mentions a search term and
//! concatenates them into `<term>.<extension>`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{AppError, Result};
use crate::models::{MergeOption, MergeOutcome};

/// Service for merging nested files by search term.
#[derive(Debug, Clone)]
pub struct FileMerger {
    root: PathBuf,
    output_dir: PathBuf,
    extension: String,
}

impl FileMerger {
    /// Merge files under `root`, writing `<term>.txt` to the current directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output_dir: PathBuf::from("."),
            extension: "txt".to_string(),
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Output file for a search term.
    pub fn output_path(&self, term: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", term, self.extension))
    }

    /// Expand `values` according to `option` and merge once per search term.
    ///
    /// An output file is written for every term, empty when nothing matched.
    pub fn merge(&self, option: MergeOption, values: &[String]) -> Result<Vec<MergeOutcome>> {
        let terms = option.search_terms(values)?;
        if !self.root.is_dir() {
            return Err(AppError::merge(format!(
                "root {} is not a directory",
                self.root.display()
            )));
        }
        fs::create_dir_all(&self.output_dir)?;

        let outputs = self.output_set(&terms)?;
        let files = self.collect_files(&outputs)?;
        log::info!(
            "Merging {} files under {} by {} into {} terms",
            files.len(),
            self.root.display(),
            option,
            terms.len()
        );

        terms
            .iter()
            .map(|term| self.merge_term(term, &files))
            .collect()
    }

    fn merge_term(&self, term: &str, files: &[PathBuf]) -> Result<MergeOutcome> {
        let (document, sources) = Self::concat_matching(term, files)?;
        let output = self.output_path(term);
        fs::write(&output, document.as_bytes())?;
        log::info!(
            "Merged {} files for '{}' into {}",
            sources.len(),
            term,
            output.display()
        );

        Ok(MergeOutcome {
            term: term.to_string(),
            output,
            sources,
            bytes_written: document.len(),
        })
    }

    /// Concatenate every file whose walked path, root included, contains
    /// `term` ignoring case, in walk order.
    fn concat_matching(term: &str, files: &[PathBuf]) -> Result<(String, Vec<PathBuf>)> {
        let needle = term.to_lowercase();
        let mut document = String::new();
        let mut sources = Vec::new();

        for path in files {
            if !path.to_string_lossy().to_lowercase().contains(&needle) {
                continue;
            }
            let bytes = fs::read(path)?;
            document.push_str(&String::from_utf8_lossy(&bytes));
            sources.push(path.clone());
        }
        Ok((document, sources))
    }

    /// All regular files under the root in sorted walk order, minus this run's outputs.
    fn collect_files(&self, outputs: &HashSet<PathBuf>) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| AppError::merge(format!("walk failed: {e}")))?;
            if !entry.file_type().is_file() {
                continue;
            }
            log::debug!("{}", entry.path().display());
            if !outputs.is_empty() && Self::is_output(entry.path(), outputs) {
                log::debug!("Skipping merge output {}", entry.path().display());
                continue;
            }
            files.push(entry.into_path());
        }
        Ok(files)
    }

    fn output_set(&self, terms: &[String]) -> Result<HashSet<PathBuf>> {
        let dir = fs::canonicalize(&self.output_dir)?;
        Ok(terms
            .iter()
            .map(|term| dir.join(format!("{}.{}", term, self.extension)))
            .collect())
    }

    fn is_output(path: &Path, outputs: &HashSet<PathBuf>) -> bool {
        fs::canonicalize(path)
            .map(|p| outputs.contains(&p))
            .unwrap_or(false)
    }
}
