use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::PointSink;
use crate::domain::{PointFields, PointTags, TimeSeriesPoint};
use crate::errors::ScrapeError;

type PointKey = (String, PointTags, DateTime<Utc>);

/// In-memory store with the same point identity rules as InfluxDB
#[derive(Default)]
pub struct MemorySink {
    points: BTreeMap<PointKey, PointFields>,
    pub batches: usize,
    pub fail_writes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `count` writes with a sink error.
    pub fn failing(count: usize) -> Self {
        Self {
            fail_writes: count,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn measurements(&self) -> Vec<String> {
        let mut names: Vec<_> = self.points.keys().map(|(m, _, _)| m.clone()).collect();
        names.dedup();
        names
    }

    pub fn snapshot(&self) -> Vec<(PointKey, PointFields)> {
        self.points
            .iter()
            .map(|(key, fields)| (key.clone(), *fields))
            .collect()
    }
}

impl PointSink for MemorySink {
    async fn write_points(&mut self, points: &[TimeSeriesPoint]) -> Result<(), ScrapeError> {
        if self.fail_writes > 0 {
            self.fail_writes -= 1;
            return Err(ScrapeError::Sink("store unavailable".into()));
        }

        for point in points {
            let key = (point.measurement.clone(), point.tags.clone(), point.time);
            self.points.insert(key, point.fields);
        }
        self.batches += 1;
        Ok(())
    }
}
