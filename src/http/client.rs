use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use super::PageSource;
use crate::errors::ScrapeError;
use crate::rate_limiter::RateLimiter;

/// HTTP client with built-in rate limiting
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    pub async fn get(&mut self, url: &str) -> reqwest::Result<reqwest::Response> {
        self.rate_limiter.wait().await;
        self.client.get(url).send().await
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }
}

impl PageSource for RateLimitedClient {
    async fn fetch_page(&mut self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .get(url)
            .await
            .map_err(|e| ScrapeError::fetch(url, e))?;

        check_response_status(url, &response)?;

        response
            .text()
            .await
            .map_err(|e| ScrapeError::fetch(url, format!("failed to read body: {}", e)))
    }
}

fn check_response_status(url: &str, response: &reqwest::Response) -> Result<(), ScrapeError> {
    if !response.status().is_success() {
        return Err(ScrapeError::fetch(
            url,
            format!("HTTP error: {}", response.status()),
        ));
    }
    Ok(())
}
