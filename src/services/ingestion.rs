use anyhow::Result;
use log::{debug, error, info, warn};
use scraper::Html;
use tokio::time::sleep;

use crate::config::{AppConfig, MarketConfig};
use crate::domain::{
    MeasurementSource, RankingRow, RunProgress, TimeSeriesPoint, assemble_points,
    today_snapshot_time,
};
use crate::errors::ScrapeError;
use crate::fetchers::TableLocator;
use crate::http::{PageSource, RateLimitedClient};
use crate::pagination::PageSpec;
use crate::parsing::RowParser;
use crate::retry::RetryPolicy;
use crate::timeseries::{InfluxSink, PointSink};

/// Walks every market, server and page, storing each page's ranking as
/// one batch of points.
pub struct IngestionService<P, S> {
    config: AppConfig,
    source: P,
    sink: S,
    locator: TableLocator,
    parser: RowParser,
    retry: RetryPolicy,
}

impl IngestionService<RateLimitedClient, InfluxSink> {
    /// Service wired to the leaderboard site and an InfluxDB at `host:port`
    pub fn connect(config: AppConfig, host: &str, port: u16) -> Result<Self> {
        let scraper = &config.scraper;
        let source = RateLimitedClient::new(
            &scraper.user_agent,
            scraper.timeout_secs,
            scraper.rate_limit_ms,
        )?;
        let sink = InfluxSink::new(host, port, &config.influx, scraper.timeout_secs)?;
        info!("Writing points to {} (db: {})", sink.write_url(), config.influx.dbname);

        Self::new(config, source, sink)
    }
}

impl<P: PageSource, S: PointSink> IngestionService<P, S> {
    pub fn new(config: AppConfig, source: P, sink: S) -> Result<Self> {
        let retry = config.retry;

        Ok(Self {
            config,
            source,
            sink,
            locator: TableLocator::ranking_table()?,
            parser: RowParser::new()?,
            retry,
        })
    }

    pub fn with_locator(mut self, locator: TableLocator) -> Self {
        self.locator = locator;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn total_pages(&self) -> usize {
        self.config.total_pages()
    }

    #[cfg(test)]
    fn source(&self) -> &P {
        &self.source
    }

    #[cfg(test)]
    fn sink(&self) -> &S {
        &self.sink
    }

    /// Scrape the full page range of every configured server.
    ///
    /// A failing page is logged and counted; the run moves on to the next one.
    pub async fn run(&mut self, progress: &mut RunProgress) {
        info!("=== Starting Ranking Scrape ===");
        info!(
            "Using {} for the ranking table, measurement per {}",
            self.locator.strategy_name(),
            self.config.measurement
        );

        let markets = self.config.markets.clone();
        for market in &markets {
            self.scrape_market(market, progress).await;
        }

        progress.log_summary();
        info!("=== Scrape Complete ===");
    }

    async fn scrape_market(&mut self, market: &MarketConfig, progress: &mut RunProgress) {
        info!("Market {}: {} servers", market.name, market.servers.len());

        for server in &market.servers {
            for page in self.config.pagination.pages() {
                let spec = PageSpec::new(&market.name, server, page);

                match self.process_page(&spec, &market.url_template).await {
                    Ok(count) => progress.record_written(count),
                    Err(e) => {
                        error!("  → {}/{} page {} skipped: {}", spec.market, spec.server, page, e);
                        progress.record_failed();
                    }
                }
            }
        }
    }

    /// Fetch, parse and store one page; returns the number of points written.
    pub async fn process_page(&mut self, spec: &PageSpec<'_>, template: &str) -> Result<usize, ScrapeError> {
        let url = spec.url(template);
        info!("  → {}", url);

        let body = self.fetch_with_retry(&url).await?;
        let rows = self.extract_rows(&body)?;

        let measurement = self.measurement_name(spec);
        let points = assemble_points(rows, measurement, today_snapshot_time());
        if points.is_empty() {
            debug!("  → No ranking rows on {}", url);
            return Ok(0);
        }

        self.write_with_retry(&points).await?;
        Ok(points.len())
    }

    fn extract_rows(&self, body: &str) -> Result<Vec<RankingRow>, ScrapeError> {
        let document = Html::parse_document(body);
        let table = self.locator.locate(&document)?;
        self.parser.parse(table)
    }

    fn measurement_name<'a>(&self, spec: &PageSpec<'a>) -> &'a str {
        match self.config.measurement {
            MeasurementSource::Market => spec.market,
            MeasurementSource::Server => spec.server,
        }
    }

    // --- Retry ---

    async fn fetch_with_retry(&mut self, url: &str) -> Result<String, ScrapeError> {
        let mut attempt = 1;
        loop {
            match self.source.fetch_page(url).await {
                Ok(body) => return Ok(body),
                Err(e) if self.retry.should_retry(&e, attempt) => {
                    self.back_off(attempt, &e).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn write_with_retry(&mut self, points: &[TimeSeriesPoint]) -> Result<(), ScrapeError> {
        let mut attempt = 1;
        loop {
            match self.sink.write_points(points).await {
                Ok(()) => return Ok(()),
                Err(e) if self.retry.should_retry(&e, attempt) => {
                    self.back_off(attempt, &e).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn back_off(&self, attempt: u32, error: &ScrapeError) {
        let delay = self.retry.backoff(attempt);
        warn!(
            "  → Attempt {}/{} failed ({}), retrying in {:?}",
            attempt,
            self.retry.max_attempts(),
            error,
            delay
        );
        sleep(delay).await;
    }
}
