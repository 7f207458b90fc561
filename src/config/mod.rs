mod markets;
pub mod settings;

pub use markets::MarketConfig;
pub use settings::{AppConfig, InfluxSettings, ScraperSettings};
