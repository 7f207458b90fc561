use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use std::time::Duration;

use super::PointSink;
use super::line_protocol::encode_batch;
use crate::config::InfluxSettings;
use crate::domain::TimeSeriesPoint;
use crate::errors::ScrapeError;

/// Writes point batches to an InfluxDB 1.x HTTP endpoint
pub struct InfluxSink {
    client: Client,
    write_url: String,
    database: String,
    user: String,
    password: String,
}

impl InfluxSink {
    pub fn new(host: &str, port: u16, settings: &InfluxSettings, timeout_secs: u64) -> Result<Self> {
        let client = Self::build_client(timeout_secs)?;

        Ok(Self {
            client,
            write_url: Self::build_write_url(host, port),
            database: settings.dbname.clone(),
            user: settings.user.clone(),
            password: settings.password.clone(),
        })
    }

    pub fn write_url(&self) -> &str {
        &self.write_url
    }

    // No idle connections are kept between batches.
    fn build_client(timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .pool_max_idle_per_host(0)
            .build()
            .context("Failed to build InfluxDB client")
    }

    fn build_write_url(host: &str, port: u16) -> String {
        format!("http://{}:{}/write", host, port)
    }
}

impl PointSink for InfluxSink {
    async fn write_points(&mut self, points: &[TimeSeriesPoint]) -> Result<(), ScrapeError> {
        let body = encode_batch(points);
        debug!("Writing {} points to {}", points.len(), self.database);

        let response = self
            .client
            .post(&self.write_url)
            .query(&[("db", self.database.as_str()), ("precision", "s")])
            .basic_auth(&self.user, Some(&self.password))
            .body(body)
            .send()
            .await
            .map_err(|e| ScrapeError::Sink(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Sink(format!("HTTP {}: {}", status, detail.trim())));
        }

        Ok(())
    }
}
