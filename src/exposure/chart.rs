//! Reshapes exposure records into the series chart renderers expect.

use chrono::NaiveDate;
use serde::Serialize;

use super::types::{ExposureRecord, HourlyExposure, LocationData, WeeklyPattern};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    #[serde(rename = "PM2.5")]
    pub pm25: f64,
    #[serde(rename = "PM10")]
    pub pm10: f64,
    /// Axis label such as `Jan 5`.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyPoint {
    pub name: String,
    pub value: f64,
    pub hour: String,
    pub pm25: f64,
    pub pm10: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub id: String,
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub x: String,
    pub y: f64,
    pub value: f64,
    pub day: String,
    pub time: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapRow {
    pub id: String,
    pub data: Vec<HeatmapCell>,
}

pub fn line_chart(records: &[ExposureRecord]) -> Vec<DailyPoint> {
    records
        .iter()
        .map(|r| DailyPoint {
            date: r.date,
            pm25: r.pm25,
            pm10: r.pm10,
            name: r.date.format("%b %-d").to_string(),
        })
        .collect()
}

pub fn hourly_chart(hours: &[HourlyExposure]) -> Vec<HourlyPoint> {
    hours
        .iter()
        .map(|h| HourlyPoint {
            name: h.time.clone(),
            value: h.pm25,
            hour: h.time.clone(),
            pm25: h.pm25,
            pm10: h.pm10,
        })
        .collect()
}

pub fn pie_chart(locations: &[LocationData]) -> Vec<Slice> {
    locations
        .iter()
        .map(|l| Slice {
            id: l.location.clone(),
            name: l.location.clone(),
            value: l.pm25_avg,
        })
        .collect()
}

/// Groups weekly patterns into one row per day, days in first-seen order.
pub fn heatmap(patterns: &[WeeklyPattern]) -> Vec<HeatmapRow> {
    let mut rows: Vec<HeatmapRow> = Vec::new();

    for p in patterns {
        let cell = HeatmapCell {
            x: p.time_range.clone(),
            y: p.pm25,
            value: p.pm25,
            day: p.day.clone(),
            time: p.time_range.clone(),
            location: p.location.clone(),
        };
        match rows.iter_mut().find(|row| row.id == p.day) {
            Some(row) => row.data.push(cell),
            None => rows.push(HeatmapRow {
                id: p.day.clone(),
                data: vec![cell],
            }),
        }
    }

    rows
}
