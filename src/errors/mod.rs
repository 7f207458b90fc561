use thiserror::Error;

/// Failures of the scrape-to-timeseries pipeline for a single page
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("page unavailable: {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("page unavailable: {strategy} wants match #{wanted} but the page has {found}")]
    Locate {
        strategy: String,
        wanted: usize,
        found: usize,
    },

    #[error("row {row}: invalid {field} {value:?}")]
    Parse {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("time-series write failed: {0}")]
    Sink(String),

    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
}

impl ScrapeError {
    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Network, HTTP status and missing-table failures all mean the page
    /// could not be used at all.
    pub fn is_page_unavailable(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Locate { .. })
    }

    /// Only transport-level failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Sink(_))
    }
}
