//! Merge modes and results.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{AppError, Result};

/// How merge values are turned into search terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOption {
    /// Every value is a search term
    Topic,
    /// Two values, start and end year, expanded to the inclusive range
    Year,
}

impl MergeOption {
    /// Expand raw values into the search terms to merge on.
    pub fn search_terms(self, values: &[String]) -> Result<Vec<String>> {
        match self {
            Self::Topic => {
                let terms: Vec<String> = values
                    .iter()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect();
                if terms.is_empty() {
                    return Err(AppError::merge("TOPIC needs at least one value"));
                }
                if let Some(bad) = terms.iter().find(|t| !is_file_stem(t)) {
                    return Err(AppError::merge(format!(
                        "'{bad}' cannot name an output file"
                    )));
                }
                Ok(terms)
            }
            Self::Year => {
                let [start, end] = values else {
                    return Err(AppError::merge(format!(
                        "YEAR takes exactly two values (start,end), got {}",
                        values.len()
                    )));
                };
                let start = parse_year(start)?;
                let end = parse_year(end)?;
                if start > end {
                    return Err(AppError::merge(format!(
                        "start year {start} is after end year {end}"
                    )));
                }
                Ok((start..=end).map(|year| year.to_string()).collect())
            }
        }
    }
}

/// Terms become `<term>.<ext>` in the output directory, so they may not
/// contain separators or be a relative directory name.
fn is_file_stem(term: &str) -> bool {
    term != "." && term != ".." && !term.contains(['/', '\\'])
}

fn parse_year(value: &str) -> Result<i32> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::merge(format!("'{value}' is not a year")))
}

impl FromStr for MergeOption {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TOPIC" => Ok(Self::Topic),
            "YEAR" => Ok(Self::Year),
            other => Err(AppError::merge(format!(
                "option is not implemented: {other} (expected TOPIC or YEAR)"
            ))),
        }
    }
}

impl fmt::Display for MergeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Topic => f.write_str("TOPIC"),
            Self::Year => f.write_str("YEAR"),
        }
    }
}

/// Result of merging one search term.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub term: String,
    pub output: PathBuf,
    /// Input files in the order they were concatenated
    pub sources: Vec<PathBuf>,
    pub bytes_written: usize,
}
