// Time series domain model
use crate::domain::reading::Reading;
use serde_json::Value;

/// Only this many trailing points of a history series are shown.
pub const HISTORY_WINDOW: usize = 24;

/// When a point was measured, or the source's own text when that is not an epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointTime {
    /// Seconds since the Unix epoch.
    Epoch(i64),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub time: PointTime,
    pub reading: Reading,
}

impl TimeSeriesPoint {
    #[cfg(test)]
    pub fn new(timestamp: i64, reading: Reading) -> Self {
        Self {
            time: PointTime::Epoch(timestamp),
            reading,
        }
    }

    /// Reads a `[timestamp, value, ..]` pair or a `{timestamp, value}` mapping.
    /// Every entry yields a point: a timestamp that is not an epoch keeps its
    /// text, and a scalar entry becomes an untimed point showing the entry itself.
    pub fn from_json(entry: &Value) -> Self {
        let (timestamp, value) = match entry {
            Value::Array(items) => (
                items.first().unwrap_or(&Value::Null),
                items.get(1).unwrap_or(&Value::Null),
            ),
            Value::Object(map) => (
                map.get("timestamp").unwrap_or(&Value::Null),
                map.get("value").unwrap_or(&Value::Null),
            ),
            scalar => {
                return Self {
                    time: PointTime::Raw(String::new()),
                    reading: Reading::from_json(scalar),
                };
            }
        };

        let time = match coerce_timestamp(timestamp) {
            Some(seconds) => PointTime::Epoch(seconds),
            None => PointTime::Raw(raw_text(timestamp)),
        };
        Self {
            time,
            reading: Reading::from_json(value),
        }
    }
}

fn coerce_timestamp(raw: &Value) -> Option<i64> {
    let seconds = match raw {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))?,
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite())? as i64,
        _ => return None,
    };
    Some(seconds)
}

fn raw_text(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The trailing window of a raw series, in original order.
pub fn last_window(entries: &[Value]) -> &[Value] {
    let start = entries.len().saturating_sub(HISTORY_WINDOW);
    &entries[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pair_entry() {
        let point = TimeSeriesPoint::from_json(&json!([1700000000, 31]));
        assert_eq!(point.time, PointTime::Epoch(1_700_000_000));
        assert_eq!(point.reading.text, "31");
    }

    #[test]
    fn test_object_entry_and_missing_value() {
        let point = TimeSeriesPoint::from_json(&json!({"timestamp": "1700000600"}));
        assert_eq!(point.time, PointTime::Epoch(1_700_000_600));
        assert_eq!(point.reading.text, "");
    }

    #[test]
    fn test_unusable_timestamps_keep_their_text() {
        let point = TimeSeriesPoint::from_json(&json!(["yesterday", 4]));
        assert_eq!(point.time, PointTime::Raw("yesterday".to_string()));
        assert_eq!(point.reading.text, "4");

        let point = TimeSeriesPoint::from_json(&json!([null, 40]));
        assert_eq!(point.time, PointTime::Raw("null".to_string()));
        assert_eq!(point.reading.value, Some(40.0));

        let point = TimeSeriesPoint::from_json(&json!([]));
        assert_eq!(point.time, PointTime::Raw("null".to_string()));
        assert_eq!(point.reading.text, "");
    }

    #[test]
    fn test_scalar_entry_is_untimed() {
        let point = TimeSeriesPoint::from_json(&json!("garbage"));
        assert_eq!(point.time, PointTime::Raw(String::new()));
        assert_eq!(point.reading.text, "garbage");
        assert_eq!(point.reading.value, None);
    }

    #[test]
    fn test_last_window() {
        let long: Vec<Value> = (0..30).map(|i| json!([i, i])).collect();
        let window = last_window(&long);
        assert_eq!(window.len(), HISTORY_WINDOW);
        assert_eq!(window[0], json!([6, 6]));
        assert_eq!(window[23], json!([29, 29]));

        let short: Vec<Value> = (0..3).map(|i| json!([i, i])).collect();
        assert_eq!(last_window(&short).len(), 3);
    }
}
