//! Exposure aggregation over daily and hourly pollutant records.
//!
//! This module reduces loaded records into the dashboard's summary figures,
//! maps AQI values onto their six named bands, and reshapes records into the
//! label/value series consumed by chart renderers.

pub mod aqi;
pub mod chart;
pub mod health;
pub mod summary;
pub mod types;
pub mod utility;

pub use aqi::{AqiCategory, aqi_category};
pub use summary::{calculate_exposure_summary, highest_hourly_exposure};
pub use types::{ExposureRecord, ExposureSummary, HighestExposure, HourlyExposure, TrendDirection};
