use crate::domain::TimeSeriesPoint;

/// Encode a batch as InfluxDB line protocol with second precision
pub fn encode_batch(points: &[TimeSeriesPoint]) -> String {
    points.iter().map(encode_point).collect::<Vec<_>>().join("\n")
}

/// `measurement,tag=value,... field=1i,... <unix seconds>`
///
/// Tags with empty values are left out; the store refuses them.
pub fn encode_point(point: &TimeSeriesPoint) -> String {
    let mut line = escape_measurement(&point.measurement);

    for (key, value) in point.tags.pairs() {
        if value.is_empty() {
            continue;
        }
        line.push(',');
        line.push_str(&escape_key(key));
        line.push('=');
        line.push_str(&escape_key(value));
    }

    let fields = point
        .fields
        .pairs()
        .iter()
        .map(|(key, value)| format!("{}={}i", escape_key(key), value))
        .collect::<Vec<_>>()
        .join(",");

    format!("{} {} {}", line, fields, point.time.timestamp())
}

fn escape_measurement(raw: &str) -> String {
    escape(raw, &[',', ' '])
}

fn escape_key(raw: &str) -> String {
    escape(raw, &[',', '=', ' '])
}

/// Backslashes are doubled and newlines written as `\n` so a value can
/// neither escape the next separator nor break the line.
fn escape(raw: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c if special.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}
