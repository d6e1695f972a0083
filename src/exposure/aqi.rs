use serde::{Deserialize, Serialize};
use std::fmt;

/// The six AQI bands used for Kathmandu Valley readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    Good,
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// Map colour for the band.
    pub fn color_hex(&self) -> &'static str {
        match self {
            AqiCategory::Good => "#00E400",
            AqiCategory::Moderate => "#FFFF00",
            AqiCategory::UnhealthyForSensitiveGroups => "#FF7E00",
            AqiCategory::Unhealthy => "#FF0000",
            AqiCategory::VeryUnhealthy => "#8F3F97",
            AqiCategory::Hazardous => "#7E0023",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Converts an AQI value into its band.
///
/// | Range       | Band                           |
/// |-------------|--------------------------------|
/// | <= 50       | Good                           |
/// | <= 100      | Moderate                       |
/// | <= 150      | Unhealthy for Sensitive Groups |
/// | <= 200      | Unhealthy                      |
/// | <= 300      | Very Unhealthy                 |
/// | > 300       | Hazardous                      |
pub fn aqi_category(value: f64) -> AqiCategory {
    match value {
        v if v <= 50.0 => AqiCategory::Good,
        v if v <= 100.0 => AqiCategory::Moderate,
        v if v <= 150.0 => AqiCategory::UnhealthyForSensitiveGroups,
        v if v <= 200.0 => AqiCategory::Unhealthy,
        v if v <= 300.0 => AqiCategory::VeryUnhealthy,
        _ => AqiCategory::Hazardous,
    }
}
