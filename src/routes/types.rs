use serde::{Deserialize, Serialize};

/// A regular trip with its measured pollution along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRoute {
    pub id: String,
    pub name: String,
    pub start: String,
    pub end: String,
    pub distance_km: f64,
    pub avg_pm25: f64,
    pub avg_pm10: f64,
    pub exposure_time_mins: f64,
    #[serde(default = "default_peak_factor")]
    pub peak_hours_factor: f64,
    pub total_exposure: i64,
}

fn default_peak_factor() -> f64 {
    1.0
}

impl BaseRoute {
    /// Builds a route, deriving `total_exposure` as PM2.5 weighted by travel
    /// time: `round(avg_pm25 * exposure_time_mins / 10)`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: &str,
        name: &str,
        start: &str,
        end: &str,
        distance_km: f64,
        avg_pm25: f64,
        avg_pm10: f64,
        exposure_time_mins: f64,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            distance_km,
            avg_pm25,
            avg_pm10,
            exposure_time_mins,
            peak_hours_factor: 1.0,
            total_exposure: (avg_pm25 * exposure_time_mins / 10.0).round() as i64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAlternative {
    pub id: String,
    pub name: String,
    pub distance_km: f64,
    pub avg_pm25: i64,
    pub avg_pm10: i64,
    pub exposure_time_mins: i64,
    pub reduction_percent: u8,
    /// Extra minutes compared to the base route at 6 min/km; negative when faster.
    pub extra_time_mins: i64,
    pub total_exposure: i64,
    pub exposure_reduction: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteWithAlternatives {
    pub base_route: BaseRoute,
    pub alternatives: Vec<RouteAlternative>,
}
