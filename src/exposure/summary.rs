//! Reduces exposure records into dashboard summary figures.

use tracing::debug;

use super::types::{
    ExposureRecord, ExposureSummary, HighestExposure, HourlyExposure, TrendDirection,
};
use super::utility::{mean_by, percent_change};

/// WHO 24-hour PM2.5 guideline used as the normalisation baseline, in µg/m³.
pub const WHO_PM25_GUIDELINE: f64 = 25.0;

/// Linear PM2.5 to AQI scale used for the headline "current AQI" figure.
pub const PM25_TO_AQI_FACTOR: f64 = 2.1;

/// Index of the first element holding the maximum of `value`.
fn first_max_index<T>(items: &[T], value: impl Fn(&T) -> f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, item) in items.iter().enumerate() {
        let v = value(item);
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((idx, v)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// Computes the exposure summary for records given in date order.
///
/// Returns `None` for empty input. The record list is split at `len / 2`: the
/// first half is compared against the second to produce the weekly trend.
/// When the first half is empty or averages zero the trend is `0.0%` and
/// points up. The most recent record is the last one; input is not re-sorted.
/// Ties for the highest reading resolve to the earliest record.
pub fn calculate_exposure_summary(records: &[ExposureRecord]) -> Option<ExposureSummary> {
    let latest = records.last()?;

    let daily_average = mean_by(records, |r| r.pm25);

    let highest = &records[first_max_index(records, |r| r.pm25)?];

    let midpoint = records.len() / 2;
    let last_week = mean_by(&records[..midpoint], |r| r.pm25);
    let this_week = mean_by(&records[midpoint..], |r| r.pm25);
    let trend = percent_change(last_week, this_week);

    let weekly_trend_direction = if trend >= 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };

    let current_aqi = (latest.pm25 * PM25_TO_AQI_FACTOR).round() as i64;
    let who_percent = (daily_average / WHO_PM25_GUIDELINE * 100.0).round();

    debug!(
        records = records.len(),
        daily_average, last_week, this_week, current_aqi, "Exposure summary computed"
    );

    Some(ExposureSummary {
        daily_average,
        weekly_trend: format!("{trend:.1}%"),
        weekly_trend_direction,
        highest_value: highest.pm25,
        highest_location: highest.location.clone(),
        exposure_above_who: format!("{who_percent:.0}%"),
        current_aqi,
    })
}

/// Finds the hour with the highest PM2.5 reading, earliest first among ties.
pub fn highest_hourly_exposure(hours: &[HourlyExposure]) -> Option<HighestExposure> {
    let highest = &hours[first_max_index(hours, |h| h.pm25)?];
    Some(HighestExposure {
        location: highest.location.clone(),
        time: highest.time.clone(),
        value: highest.pm25,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exposure::aqi::AqiCategory;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn record(day: u32, pm25: f64, location: &str) -> ExposureRecord {
        ExposureRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            pm25,
            pm10: pm25 * 1.6,
            location: location.to_string(),
            aqi_category: AqiCategory::Moderate,
        }
    }

    fn records(values: &[f64]) -> Vec<ExposureRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| record(i as u32 + 1, *v, &format!("loc{i}")))
            .collect()
    }

    #[test]
    fn test_empty_input_is_none() {
        assert!(calculate_exposure_summary(&[]).is_none());
    }

    #[test]
    fn test_three_records() {
        let data = vec![
            record(1, 10.0, "Thamel"),
            record(2, 20.0, "Patan"),
            record(3, 30.0, "Kalanki"),
        ];
        let summary = calculate_exposure_summary(&data).unwrap();

        assert_eq!(summary.daily_average, 20.0);
        assert_eq!(summary.highest_value, 30.0);
        assert_eq!(summary.highest_location, "Kalanki");
        assert_eq!(summary.current_aqi, 63);
        // last week = [10], this week = [20, 30] -> +150%
        assert_eq!(summary.weekly_trend, "150.0%");
        assert_eq!(summary.weekly_trend_direction, TrendDirection::Up);
        assert_eq!(summary.exposure_above_who, "80%");
    }

    #[test]
    fn test_downward_trend() {
        let summary = calculate_exposure_summary(&records(&[80.0, 80.0, 60.0, 60.0])).unwrap();
        assert_eq!(summary.weekly_trend, "-25.0%");
        assert_eq!(summary.weekly_trend_direction, TrendDirection::Down);
    }

    #[test]
    fn test_zero_baseline_trend_is_finite() {
        let summary = calculate_exposure_summary(&records(&[0.0, 0.0, 40.0, 50.0])).unwrap();
        assert_eq!(summary.weekly_trend, "0.0%");
        assert_eq!(summary.weekly_trend_direction, TrendDirection::Up);
    }

    #[test]
    fn test_single_record() {
        let summary = calculate_exposure_summary(&records(&[42.0])).unwrap();
        assert_eq!(summary.daily_average, 42.0);
        assert_eq!(summary.weekly_trend, "0.0%");
        assert_eq!(summary.weekly_trend_direction, TrendDirection::Up);
        assert_eq!(summary.current_aqi, 88);
    }

    #[test]
    fn test_highest_tie_picks_first_in_input_order() {
        let data = vec![
            record(1, 55.0, "Balaju"),
            record(2, 90.0, "Koteshwor"),
            record(3, 90.0, "Kalanki"),
        ];
        let summary = calculate_exposure_summary(&data).unwrap();
        assert_eq!(summary.highest_location, "Koteshwor");
    }

    #[test]
    fn test_current_aqi_uses_last_record_not_latest_date() {
        let data = vec![record(5, 100.0, "Thamel"), record(1, 10.0, "Patan")];
        let summary = calculate_exposure_summary(&data).unwrap();
        assert_eq!(summary.current_aqi, 21);
    }

    #[test]
    fn test_summary_json_field_names() {
        let summary = calculate_exposure_summary(&records(&[10.0, 20.0])).unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["weeklyTrendDirection"], "up");
        assert_eq!(json["exposureAboveWHO"], "60%");
        assert_eq!(json["currentAqi"], 42);
    }

    #[test]
    fn test_random_lists_average_and_direction() {
        let mut rng = StdRng::seed_from_u64(0x6b61_746d);

        for _ in 0..200 {
            let len = rng.gen_range(1..40);
            let values: Vec<f64> = (0..len).map(|_| rng.gen_range(0.0..400.0)).collect();
            let summary = calculate_exposure_summary(&records(&values)).unwrap();

            let expected = values.iter().sum::<f64>() / values.len() as f64;
            assert!((summary.daily_average - expected).abs() < 1e-9);

            let mid = values.len() / 2;
            if mid > 0 {
                let first = values[..mid].iter().sum::<f64>() / mid as f64;
                let second = values[mid..].iter().sum::<f64>() / (values.len() - mid) as f64;
                let expected_up = second >= first;
                assert_eq!(
                    summary.weekly_trend_direction == TrendDirection::Up,
                    expected_up,
                    "values: {values:?}"
                );
            }
        }
    }

    #[test]
    fn test_highest_hourly_exposure() {
        let hour = |time: &str, pm25: f64, location: &str| HourlyExposure {
            time: time.to_string(),
            pm25,
            pm10: 0.0,
            location: location.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        };
        let hours = vec![
            hour("6am", 15.0, "Home"),
            hour("8am", 95.0, "Commuting"),
            hour("6pm", 95.0, "Office"),
        ];

        let highest = highest_hourly_exposure(&hours).unwrap();
        assert_eq!(highest.time, "8am");
        assert_eq!(highest.location, "Commuting");
        assert_eq!(highest.value, 95.0);

        assert!(highest_hourly_exposure(&[]).is_none());
    }
}
