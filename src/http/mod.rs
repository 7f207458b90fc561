mod client;
#[cfg(test)]
pub(crate) mod stub;

pub use client::RateLimitedClient;

use crate::errors::ScrapeError;

/// Anything that can hand back the markup of a leaderboard page
#[allow(async_fn_in_trait)]
pub trait PageSource {
    async fn fetch_page(&mut self, url: &str) -> Result<String, ScrapeError>;
}
