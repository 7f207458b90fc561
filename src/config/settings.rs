use anyhow::{Context, Result, bail};
use ini::{Ini, ParseOption, Properties};
use log::warn;
use std::path::Path;
use std::str::FromStr;

use super::markets::MarketConfig;
use crate::domain::MeasurementSource;
use crate::pagination::{PaginationConfig, has_placeholders};
use crate::retry::RetryPolicy;

const COMMON_SECTION: &str = "common";
const INFLUX_SECTION: &str = "influx";

/// Credentials of the time-series store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfluxSettings {
    pub user: String,
    pub password: String,
    pub dbname: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperSettings {
    pub rate_limit_ms: u64,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            rate_limit_ms: 0,
            user_agent: "RappelzRanking/1.0".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Everything a scrape run needs, read once from the INI config file
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub markets: Vec<MarketConfig>,
    pub pagination: PaginationConfig,
    pub measurement: MeasurementSource,
    pub influx: InfluxSettings,
    pub scraper: ScraperSettings,
    pub retry: RetryPolicy,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let ini = Ini::load_from_file_opt(path, parse_option())
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_ini(&ini)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let ini = Ini::load_from_str_opt(text, parse_option()).context("Failed to parse config")?;
        Self::from_ini(&ini)
    }

    pub fn from_ini(ini: &Ini) -> Result<Self> {
        let common = section(ini, COMMON_SECTION)?;

        let market_names = json_list(common, COMMON_SECTION, "markets")?;
        let markets = market_names
            .iter()
            .map(|name| load_market(ini, name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            markets,
            pagination: PaginationConfig::new(required(common, COMMON_SECTION, "limit")?),
            measurement: optional(common, "measurement")?.unwrap_or_default(),
            influx: load_influx(ini)?,
            scraper: load_scraper(common)?,
            retry: load_retry(common)?,
        })
    }

    /// Number of pages a full run visits
    pub fn total_pages(&self) -> usize {
        let servers: usize = self.markets.iter().map(|m| m.servers.len()).sum();
        servers * self.pagination.page_count()
    }
}

fn load_market(ini: &Ini, market: &str) -> Result<MarketConfig> {
    let name = MarketConfig::section_name(market);
    let props = section(ini, &name)?;

    let servers = json_list(props, &name, "servers")?;
    let url: String = required(props, &name, "url")?;
    if !has_placeholders(&url) {
        warn!("URL template of [{}] lacks SERVER or PAGE: {}", name, url);
    }

    Ok(MarketConfig::new(market, servers, &url))
}

fn load_influx(ini: &Ini) -> Result<InfluxSettings> {
    let props = section(ini, INFLUX_SECTION)?;

    Ok(InfluxSettings {
        user: required(props, INFLUX_SECTION, "USER")?,
        password: required(props, INFLUX_SECTION, "PASSWORD")?,
        dbname: required(props, INFLUX_SECTION, "DBNAME")?,
    })
}

fn load_scraper(common: &Properties) -> Result<ScraperSettings> {
    let defaults = ScraperSettings::default();

    Ok(ScraperSettings {
        rate_limit_ms: optional(common, "delay_ms")?.unwrap_or(defaults.rate_limit_ms),
        user_agent: optional(common, "user_agent")?.unwrap_or(defaults.user_agent),
        timeout_secs: optional(common, "timeout_secs")?.unwrap_or(defaults.timeout_secs),
    })
}

fn load_retry(common: &Properties) -> Result<RetryPolicy> {
    let retries = optional(common, "retries")?.unwrap_or(0);
    let backoff_ms = optional(common, "backoff_ms")?.unwrap_or(1000);
    Ok(RetryPolicy::new(retries, backoff_ms))
}

// --- INI helpers ---

/// Values are taken verbatim: JSON lists keep their quotes.
fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    }
}

fn section<'a>(ini: &'a Ini, name: &str) -> Result<&'a Properties> {
    ini.section(Some(name))
        .with_context(|| format!("Missing config section [{}]", name))
}

/// Keys match regardless of case (`USER`, `user`, `User`).
fn lookup<'a>(props: &'a Properties, key: &str) -> Option<&'a str> {
    props.get(key).or_else(|| {
        props
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value)
    })
}

fn required<T>(props: &Properties, section: &str, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(props, key) else {
        bail!("Missing key '{}' in section [{}]", key, section);
    };
    convert(raw, key)
}

fn optional<T>(props: &Properties, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(props, key).map(|raw| convert(raw, key)).transpose()
}

fn convert<T>(raw: &str, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid value for '{}': {} ({})", key, raw, e))
}

fn json_list(props: &Properties, section: &str, key: &str) -> Result<Vec<String>> {
    let raw: String = required(props, section, key)?;
    serde_json::from_str(&raw)
        .with_context(|| format!("'{}' in [{}] must be a JSON list of strings", key, section))
}
