use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One character entry from a ranking table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingRow {
    pub rank: u32,
    pub name: String,
    pub class: String,
    pub guild: String,
    pub server: String,
    pub level: u32,
}

/// String-valued, indexed dimensions of a point
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointTags {
    pub pseudonyme: String,
    pub classe: String,
    pub guilde: String,
    pub serveur: String,
}

impl PointTags {
    /// Tag pairs in key order, as the store expects them.
    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("classe", self.classe.as_str()),
            ("guilde", self.guilde.as_str()),
            ("pseudonyme", self.pseudonyme.as_str()),
            ("serveur", self.serveur.as_str()),
        ]
    }
}

/// Integer-valued dimensions of a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointFields {
    pub rang: i64,
    pub niveau: i64,
}

impl PointFields {
    pub fn pairs(&self) -> [(&'static str, i64); 2] {
        [("niveau", self.niveau), ("rang", self.rang)]
    }
}

/// A ranking snapshot of one character, ready for the time-series store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub measurement: String,
    pub time: DateTime<Utc>,
    pub tags: PointTags,
    pub fields: PointFields,
}

/// Which part of a page's coordinates names the measurement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSource {
    #[default]
    Market,
    Server,
}

impl FromStr for MeasurementSource {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "market" => Ok(Self::Market),
            "server" => Ok(Self::Server),
            other => Err(format!(
                "unknown measurement source '{}', expected 'market' or 'server'",
                other
            )),
        }
    }
}

impl fmt::Display for MeasurementSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => write!(f, "market"),
            Self::Server => write!(f, "server"),
        }
    }
}
