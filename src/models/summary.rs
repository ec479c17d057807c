use chrono::{DateTime, Utc};

/// What happened to a single article.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// PDF fetched and written
    Downloaded,
    /// Destination file was already present
    AlreadyExists,
    /// Info page had no usable citation
    NoInfo,
    /// Article page had no download link
    NoPdf,
}

/// Counters for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeSummary {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub pages: u32,
    pub articles: usize,
    pub downloaded: usize,
    pub already_present: usize,
    pub no_info: usize,
    pub no_pdf: usize,
}

impl ScrapeSummary {
    pub fn start() -> Self {
        Self {
            start_time: Utc::now(),
            end_time: None,
            pages: 0,
            articles: 0,
            downloaded: 0,
            already_present: 0,
            no_info: 0,
            no_pdf: 0,
        }
    }

    pub fn record(&mut self, outcome: DownloadOutcome) {
        self.articles += 1;
        match outcome {
            DownloadOutcome::Downloaded => self.downloaded += 1,
            DownloadOutcome::AlreadyExists => self.already_present += 1,
            DownloadOutcome::NoInfo => self.no_info += 1,
            DownloadOutcome::NoPdf => self.no_pdf += 1,
        }
    }

    pub fn finish(&mut self) {
        self.end_time = Some(Utc::now());
    }

    /// Elapsed wall-clock seconds, up to now if the run has not finished.
    pub fn elapsed_secs(&self) -> i64 {
        let end = self.end_time.unwrap_or_else(Utc::now);
        (end - self.start_time).num_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts() {
        let mut summary = ScrapeSummary::start();
        summary.record(DownloadOutcome::Downloaded);
        summary.record(DownloadOutcome::NoInfo);
        summary.record(DownloadOutcome::NoPdf);
        summary.record(DownloadOutcome::AlreadyExists);
        summary.record(DownloadOutcome::Downloaded);
        summary.finish();

        assert_eq!(summary.articles, 5);
        assert_eq!(summary.downloaded, 2);
        assert_eq!(summary.already_present, 1);
        assert_eq!(summary.no_info, 1);
        assert_eq!(summary.no_pdf, 1);
        assert!(summary.elapsed_secs() >= 0);
    }
}
