use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;

use crate::config::model::DataSource;
use crate::foundation::error::{CalendarError, CalendarResult};

/// Timestamp layouts accepted in addition to RFC 3339, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    // CDEC CSV responses
    "%Y%m%d %H%M",
];

/// Date-only layouts.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y%m%d"];

/// One dated sample; `value` is `None` when the cell was empty, non-numeric or non-finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawObservation {
    /// Observation time.
    pub timestamp: NaiveDateTime,
    /// Observed value, if any.
    pub value: Option<f64>,
}

impl RawObservation {
    /// Build an observation; non-finite values are stored as missing.
    pub fn new(timestamp: NaiveDateTime, value: Option<f64>) -> Self {
        Self {
            timestamp,
            value: value.filter(|v| v.is_finite()),
        }
    }

    /// Observation at midnight of `date`.
    pub fn on_date(date: NaiveDate, value: Option<f64>) -> Self {
        Self::new(date.and_time(chrono::NaiveTime::MIN), value)
    }
}

/// Parse a timestamp cell.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Some(d.and_time(chrono::NaiveTime::MIN));
        }
    }
    None
}

fn parse_value(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read observations from CSV with a header row, picking `date_column` and `value_column`.
pub fn read_observations<R: std::io::Read>(
    r: R,
    date_column: &str,
    value_column: &str,
) -> CalendarResult<Vec<RawObservation>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(r);

    let headers = reader
        .headers()
        .map_err(|e| CalendarError::data_format(format!("read csv header: {e}")))?
        .clone();
    let column = |name: &str| {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            CalendarError::data_format(format!(
                "column '{name}' not found (available: {})",
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })
    };
    let date_idx = column(date_column)?;
    let value_idx = column(value_column)?;

    let mut out = Vec::new();
    let mut missing = 0usize;
    for (i, record) in reader.records().enumerate() {
        // 1-based data row, header excluded.
        let row = i + 1;
        let record = record
            .map_err(|e| CalendarError::data_format(format!("csv row {row}: {e}")))?;
        let date_text = record.get(date_idx).unwrap_or_default();
        let timestamp = parse_timestamp(date_text).ok_or_else(|| {
            CalendarError::data_format(format!(
                "row {row}: cannot parse '{date_text}' in column '{date_column}' as a date"
            ))
        })?;
        let value = record.get(value_idx).and_then(parse_value);
        if value.is_none() {
            missing += 1;
        }
        out.push(RawObservation::new(timestamp, value));
    }

    tracing::debug!(rows = out.len(), missing, "observations read");
    Ok(out)
}

/// Load observations from the CSV file described by `source`.
#[tracing::instrument(skip(source), fields(path = %source.path.display()))]
pub fn load_observations(source: &DataSource) -> CalendarResult<Vec<RawObservation>> {
    load_observations_from_path(&source.path, &source.date_column, &source.value_column)
}

/// Load observations from a CSV file.
pub fn load_observations_from_path(
    path: &Path,
    date_column: &str,
    value_column: &str,
) -> CalendarResult<Vec<RawObservation>> {
    let f = File::open(path).map_err(|e| {
        CalendarError::data_format(format!("open data file '{}': {e}", path.display()))
    })?;
    read_observations(BufReader::new(f), date_column, value_column).map_err(|e| match e {
        CalendarError::DataFormat(msg) => {
            CalendarError::data_format(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/stats/observation.rs"]
mod tests;
