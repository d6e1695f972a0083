//! Fixed payload served when live dashboard data is unavailable.

use chrono::Utc;
use serde_json::json;

use super::types::{
    AqiLevel, CurrentAqi, CurrentWeather, DashboardData, DashboardResponse, HourlyForecast,
    HourlyReading, LocationValue, Metadata, Pollutants, SeasonalPattern, WeatherCorrelation,
    WeatherData, WeeklyTrendPoint,
};
use crate::routes::{optimize_routes, sample_base_routes};

pub fn mock_dashboard() -> DashboardResponse {
    let now = Utc::now().to_rfc3339();

    DashboardResponse {
        success: true,
        message: "Mock data generated due to API execution failure".to_string(),
        fetch_time: 0.1,
        data: DashboardData {
            current_aqi: CurrentAqi {
                aqi: 156.0,
                city: "Kathmandu".to_string(),
                timestamp: now.clone(),
                pollutants: Pollutants {
                    pm25: 78.0,
                    pm10: 125.0,
                },
            },
            weekly_trend: weekly_trend(),
            locations: [
                ("Thamel", 65.0),
                ("Kalanki", 180.0),
                ("Balaju", 125.0),
                ("Bhaktapur", 80.0),
                ("Lalitpur", 55.0),
            ]
            .into_iter()
            .map(|(name, value)| LocationValue {
                name: name.to_string(),
                value,
            })
            .collect(),
            hourly_exposure: hourly_exposure(),
            route_optimization: optimize_routes(&sample_base_routes()),
            detailed_weather: Some(detailed_weather()),
            metadata: Some(Metadata {
                last_updated: now,
                fetch_time_seconds: 0.1,
                data_sources: json!({
                    "current_aqi": true,
                    "openaq": true,
                    "weather": true,
                }),
            }),
        },
    }
}

fn weekly_trend() -> Vec<WeeklyTrendPoint> {
    [
        ("Mon", 65.0, 110.0),
        ("Tue", 75.0, 130.0),
        ("Wed", 90.0, 145.0),
        ("Thu", 70.0, 115.0),
        ("Fri", 55.0, 95.0),
        ("Sat", 40.0, 80.0),
        ("Sun", 85.0, 140.0),
    ]
    .into_iter()
    .map(|(day, pm25, pm10)| WeeklyTrendPoint {
        day: day.to_string(),
        pm25,
        pm10,
    })
    .collect()
}

fn hourly_exposure() -> Vec<HourlyReading> {
    [
        ("6am", 15.0, 20.0, 65.0),
        ("8am", 85.0, 22.0, 60.0),
        ("10am", 60.0, 24.0, 55.0),
        ("12pm", 45.0, 26.0, 50.0),
        ("2pm", 30.0, 28.0, 45.0),
        ("4pm", 55.0, 27.0, 48.0),
        ("6pm", 95.0, 25.0, 52.0),
        ("8pm", 40.0, 23.0, 58.0),
    ]
    .into_iter()
    .map(|(time, value, temperature, humidity)| HourlyReading {
        time: time.to_string(),
        value,
        temperature,
        humidity,
    })
    .collect()
}

fn detailed_weather() -> WeatherData {
    let correlations = [
        (
            "Temperature",
            0.65,
            "Higher temperatures generally increase pollutant concentrations due to increased photochemical reactions",
            "High",
        ),
        (
            "Wind Speed",
            -0.78,
            "Higher wind speeds disperse pollutants, reducing concentrations",
            "Very High",
        ),
        (
            "Humidity",
            -0.42,
            "Higher humidity can reduce some particulate matter, but increase others",
            "Medium",
        ),
        (
            "Precipitation",
            -0.85,
            "Rain washes out particulate matter, significantly improving air quality",
            "Very High",
        ),
        (
            "Pressure",
            0.32,
            "High pressure systems can trap pollution near the ground",
            "Medium",
        ),
    ]
    .into_iter()
    .map(|(parameter, correlation, effect, impact_level)| WeatherCorrelation {
        parameter: parameter.to_string(),
        correlation,
        effect: effect.to_string(),
        impact_level: impact_level.to_string(),
    })
    .collect();

    let hourly_forecast = [
        ("6:00", 23.0, 75.0, 5.0, 45.0),
        ("9:00", 25.0, 70.0, 6.0, 65.0),
        ("12:00", 28.0, 65.0, 7.0, 85.0),
        ("15:00", 30.0, 60.0, 8.0, 95.0),
        ("18:00", 28.0, 65.0, 7.0, 110.0),
        ("21:00", 25.0, 70.0, 6.0, 90.0),
    ]
    .into_iter()
    .map(
        |(hour, temperature, humidity, wind_speed, aqi_forecast)| HourlyForecast {
            hour: hour.to_string(),
            temperature,
            humidity,
            wind_speed,
            aqi_forecast,
        },
    )
    .collect();

    let seasonal_patterns = [
        ("Jan", 12.0, 55.0, 180.0),
        ("Feb", 14.0, 50.0, 160.0),
        ("Mar", 18.0, 45.0, 150.0),
        ("Apr", 22.0, 40.0, 120.0),
        ("May", 25.0, 55.0, 100.0),
        ("Jun", 27.0, 70.0, 70.0),
        ("Jul", 28.0, 85.0, 50.0),
        ("Aug", 27.0, 80.0, 55.0),
        ("Sep", 26.0, 75.0, 65.0),
        ("Oct", 22.0, 60.0, 90.0),
        ("Nov", 18.0, 50.0, 130.0),
        ("Dec", 14.0, 55.0, 170.0),
    ]
    .into_iter()
    .map(|(month, avg_temp, avg_humidity, avg_aqi)| SeasonalPattern {
        month: month.to_string(),
        avg_temp,
        avg_humidity,
        avg_aqi,
    })
    .collect();

    WeatherData {
        current_weather: CurrentWeather {
            temperature: 28.0,
            humidity: 65.0,
            wind_speed: 8.0,
            wind_direction: "SE".to_string(),
            precipitation: 40.0,
            pressure: 1012.0,
            conditions: "Partly cloudy".to_string(),
        },
        correlations,
        hourly_forecast,
        seasonal_patterns,
        aqi_levels_explanation: aqi_levels(),
    }
}

fn aqi_levels() -> Vec<AqiLevel> {
    [
        (
            "Good (0-50)",
            "Air quality is satisfactory, and air pollution poses little or no risk.",
            "None for the general population.",
            "#00E400",
        ),
        (
            "Moderate (51-100)",
            "Air quality is acceptable. However, some pollutants may be a concern for a small number of people.",
            "Unusually sensitive individuals should consider limiting prolonged outdoor exertion.",
            "#FFFF00",
        ),
        (
            "Unhealthy for Sensitive Groups (101-150)",
            "Members of sensitive groups may experience health effects.",
            "People with respiratory or heart disease, the elderly and children should limit prolonged outdoor exertion.",
            "#FF7E00",
        ),
        (
            "Unhealthy (151-200)",
            "Everyone may begin to experience health effects; members of sensitive groups may experience more serious health effects.",
            "People with respiratory or heart disease, the elderly and children should avoid prolonged outdoor exertion; everyone else should limit prolonged outdoor exertion.",
            "#FF0000",
        ),
        (
            "Very Unhealthy (201-300)",
            "Health alert: everyone may experience more serious health effects.",
            "People with respiratory or heart disease, the elderly and children should avoid any outdoor activity; everyone else should avoid prolonged outdoor exertion.",
            "#8F3F97",
        ),
        (
            "Hazardous (301-500)",
            "Health warnings of emergency conditions. The entire population is more likely to be affected.",
            "Everyone should avoid all outdoor exertion.",
            "#7E0023",
        ),
    ]
    .into_iter()
    .map(|(level, description, health_implications, color)| AqiLevel {
        level: level.to_string(),
        description: description.to_string(),
        health_implications: health_implications.to_string(),
        color: color.to_string(),
    })
    .collect()
}
