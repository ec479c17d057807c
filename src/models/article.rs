//! Articles discovered on the journal site.

use std::fmt;
use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

/// Punctuation allowed in generated file names besides ASCII letters and digits.
const FILENAME_PUNCTUATION: &str = "-_.() ";

/// Slug identifying an article; the last path segment of its URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleRef(String);

impl ArticleRef {
    /// Build a reference from an anchor `href`, keeping the part after the last `/`.
    ///
    /// Returns `None` when nothing is left, e.g. for `"/artikelen/"`.
    pub fn from_href(href: &str) -> Option<Self> {
        let slug = href.rsplit('/').next().unwrap_or_default().trim();
        if slug.is_empty() {
            None
        } else {
            Some(Self(slug.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Publication details parsed from an article's citation.
///
/// Both fields are always non-empty; a citation that yields only one of them
/// does not produce a record at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// `VOLUME-ISSUE`, used as the PDF file stem
    pub identifier: String,
    /// Publication year, used as the directory name
    pub year: String,
}

impl ArticleRecord {
    /// Parse a citation such as
    /// `"Citeer dit artikel als: Ned Tijdschr Geneeskd. 1968;112:630"`.
    ///
    /// The last `;` segment becomes the identifier (spaces dropped, `:` turned
    /// into `-`), the last word of the segment before it becomes the year and
    /// must be all digits.
    pub fn from_citation(citation: &str) -> Option<Self> {
        let segments: Vec<&str> = citation.split(';').collect();
        if segments.len() < 2 {
            return None;
        }

        let last = segments[segments.len() - 1];
        let identifier = sanitize_filename(&last.replace(' ', "").replace(':', "-"));
        let year = segments[segments.len() - 2].split_whitespace().last()?;

        // The year names a directory under the archive root, so only digits pass.
        if identifier.is_empty() || year.is_empty() || !year.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self {
            identifier,
            year: year.to_string(),
        })
    }

    /// File name of the downloaded PDF.
    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.identifier)
    }

    /// Destination of the PDF under an archive root: `<root>/<year>/<identifier>.pdf`.
    pub fn destination(&self, root: &Path) -> PathBuf {
        root.join(&self.year).join(self.file_name())
    }
}

/// Fold text to ASCII and keep only characters that are safe in file names.
///
/// Accented letters decompose to their base letter (`é` becomes `e`);
/// everything outside letters, digits and `-_.() ` is dropped.
pub fn sanitize_filename(text: &str) -> String {
    text.nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || FILENAME_PUNCTUATION.contains(*c))
        .collect()
}
