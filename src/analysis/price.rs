use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use super::numeric::is_truthy;
use crate::types::PriceDataReport;

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f UTC",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Millisecond timestamp of a row's `block_time`, if it can be read.
pub fn block_time_millis(row: &Value) -> Option<i64> {
    match row.get("block_time")? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => parse_timestamp(s),
        _ => None,
    }
}

/// Dune renders timestamps as `2025-04-20 13:05:00.000 UTC`; RFC 3339 and
/// bare dates are accepted too. All naive forms are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Stable ascending sort by block time; rows without a readable time go first.
pub fn sort_by_block_time(rows: &mut [Value]) {
    rows.sort_by_key(block_time_millis);
}

/// Price of the chronologically last row, or 0 when there is none.
pub fn latest_price(sorted_rows: &[Value]) -> Value {
    sorted_rows
        .last()
        .and_then(|row| row.get("price"))
        .filter(|price| is_truthy(price))
        .cloned()
        .unwrap_or_else(|| Value::from(0))
}

pub fn build_report(mut rows: Vec<Value>) -> PriceDataReport {
    sort_by_block_time(&mut rows);
    let latest_price = latest_price(&rows);
    PriceDataReport { rows, latest_price }
}
