//! Output formatting and persistence for exposure summaries.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;

use crate::exposure::{ExposureSummary, TrendDirection};

/// One exported summary, flattened for CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub records: usize,
    pub daily_average: f64,
    pub weekly_trend: String,
    pub weekly_trend_direction: TrendDirection,
    pub highest_value: f64,
    pub highest_location: String,
    pub exposure_above_who: String,
    pub current_aqi: i64,
}

impl SummaryRow {
    pub fn new(source: &str, records: usize, summary: &ExposureSummary) -> Self {
        Self {
            timestamp: Utc::now(),
            source: source.to_string(),
            records,
            daily_average: summary.daily_average,
            weekly_trend: summary.weekly_trend.clone(),
            weekly_trend_direction: summary.weekly_trend_direction,
            highest_value: summary.highest_value,
            highest_location: summary.highest_location.clone(),
            exposure_above_who: summary.exposure_above_who.clone(),
            current_aqi: summary.current_aqi,
        }
    }
}

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Writes a value as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Appends a [`SummaryRow`] to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_summary(path: &Path, row: &SummaryRow) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(row)?;
    writer.flush()?;

    Ok(())
}
