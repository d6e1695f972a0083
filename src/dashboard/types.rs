//! Payload shapes exchanged with the dashboard's data script.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::routes::RouteWithAlternatives;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pollutants {
    pub pm25: f64,
    pub pm10: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentAqi {
    pub aqi: f64,
    pub city: String,
    /// ISO-8601 timestamp as written by the producer, possibly without offset.
    pub timestamp: String,
    pub pollutants: Pollutants,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyTrendPoint {
    pub day: String,
    #[serde(rename = "PM25")]
    pub pm25: f64,
    #[serde(rename = "PM10")]
    pub pm10: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationValue {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyReading {
    pub time: String,
    pub value: f64,
    pub temperature: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub wind_direction: String,
    pub precipitation: f64,
    pub pressure: f64,
    pub conditions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCorrelation {
    pub parameter: String,
    pub correlation: f64,
    pub effect: String,
    pub impact_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub hour: String,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub aqi_forecast: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPattern {
    pub month: String,
    pub avg_temp: f64,
    pub avg_humidity: f64,
    pub avg_aqi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiLevel {
    pub level: String,
    pub description: String,
    pub health_implications: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub current_weather: CurrentWeather,
    #[serde(default)]
    pub correlations: Vec<WeatherCorrelation>,
    #[serde(default)]
    pub hourly_forecast: Vec<HourlyForecast>,
    #[serde(default)]
    pub seasonal_patterns: Vec<SeasonalPattern>,
    #[serde(default)]
    pub aqi_levels_explanation: Vec<AqiLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub last_updated: String,
    pub fetch_time_seconds: f64,
    #[serde(default)]
    pub data_sources: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub current_aqi: CurrentAqi,
    #[serde(default)]
    pub weekly_trend: Vec<WeeklyTrendPoint>,
    #[serde(default)]
    pub locations: Vec<LocationValue>,
    #[serde(default)]
    pub hourly_exposure: Vec<HourlyReading>,
    #[serde(default)]
    pub route_optimization: Vec<RouteWithAlternatives>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_weather: Option<WeatherData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Envelope returned to dashboard clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub success: bool,
    pub message: String,
    pub fetch_time: f64,
    pub data: DashboardData,
}

/// Result of running the full source refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshReport {
    pub success: bool,
    pub message: String,
    pub output: String,
    pub metadata: Option<Value>,
}
