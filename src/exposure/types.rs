//! Record and summary types for exposure aggregation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aqi::AqiCategory;

/// One calendar day of pollutant exposure, as loaded from the daily dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExposureRecord {
    pub date: NaiveDate,
    pub pm25: f64,
    pub pm10: f64,
    pub location: String,
    #[serde(rename = "aqiCategory", alias = "aqi_category")]
    pub aqi_category: AqiCategory,
}

/// One hourly reading at a visited location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyExposure {
    pub time: String,
    pub pm25: f64,
    pub pm10: f64,
    pub location: String,
    pub date: NaiveDate,
}

/// Average concentrations and time spent at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub location: String,
    pub pm25_avg: f64,
    pub pm10_avg: f64,
    pub exposure_minutes: f64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Typical concentration for a weekday and time-of-day window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPattern {
    pub day: String,
    pub time_range: String,
    pub pm25: f64,
    pub pm10: f64,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

impl TrendDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
        }
    }
}

/// Aggregate figures derived from a list of [`ExposureRecord`]s.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureSummary {
    pub daily_average: f64,
    /// Relative change between the two halves, e.g. `"-12.5%"`.
    pub weekly_trend: String,
    pub weekly_trend_direction: TrendDirection,
    pub highest_value: f64,
    pub highest_location: String,
    /// Daily average relative to the WHO guideline, e.g. `"80%"`.
    #[serde(rename = "exposureAboveWHO")]
    pub exposure_above_who: String,
    pub current_aqi: i64,
}

/// Peak hourly reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighestExposure {
    pub location: String,
    pub time: String,
    pub value: f64,
}
