use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::models::{PointFields, PointTags, RankingRow, TimeSeriesPoint};

/// Hour of day (UTC) every daily snapshot is stamped with
const SNAPSHOT_HOUR: u32 = 3;

/// Daily snapshot instant for the given day.
///
/// Points written on the same day share this instant, so a second run
/// overwrites the first instead of appending to it.
pub fn snapshot_time(day: NaiveDate) -> DateTime<Utc> {
    let at = NaiveTime::from_hms_opt(SNAPSHOT_HOUR, 0, 0).unwrap_or_default();
    day.and_time(at).and_utc()
}

/// Snapshot instant for today's UTC date
pub fn today_snapshot_time() -> DateTime<Utc> {
    snapshot_time(Utc::now().date_naive())
}

/// Convert a page of ranking rows into points sharing one timestamp
pub fn assemble_points(
    rows: Vec<RankingRow>,
    measurement: &str,
    time: DateTime<Utc>,
) -> Vec<TimeSeriesPoint> {
    rows.into_iter()
        .map(|row| to_point(row, measurement, time))
        .collect()
}

fn to_point(row: RankingRow, measurement: &str, time: DateTime<Utc>) -> TimeSeriesPoint {
    TimeSeriesPoint {
        measurement: measurement.to_string(),
        time,
        fields: PointFields {
            rang: i64::from(row.rank),
            niveau: i64::from(row.level),
        },
        tags: PointTags {
            pseudonyme: row.name,
            classe: row.class,
            guilde: row.guild,
            serveur: row.server,
        },
    }
}
