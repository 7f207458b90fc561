mod influx;
pub mod line_protocol;
#[cfg(test)]
pub mod memory;

pub use influx::InfluxSink;

use crate::domain::TimeSeriesPoint;
use crate::errors::ScrapeError;

/// Destination for batches of ranking points
#[allow(async_fn_in_trait)]
pub trait PointSink {
    /// Persist the whole batch; partial writes are not reported.
    async fn write_points(&mut self, points: &[TimeSeriesPoint]) -> Result<(), ScrapeError>;
}
