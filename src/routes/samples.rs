use super::types::BaseRoute;

/// The commutes shipped with the dashboard, used when no live route data is
/// available.
pub fn sample_base_routes() -> Vec<BaseRoute> {
    vec![
        BaseRoute {
            id: "route1".into(),
            name: "Home to Office".into(),
            start: "Thamel".into(),
            end: "New Baneshwor".into(),
            distance_km: 6.5,
            avg_pm25: 85.0,
            avg_pm10: 136.0,
            exposure_time_mins: 39.0,
            peak_hours_factor: 1.5,
            total_exposure: 331,
        },
        BaseRoute {
            id: "route2".into(),
            name: "Office to Gym".into(),
            start: "New Baneshwor".into(),
            end: "Patan".into(),
            distance_km: 4.2,
            avg_pm25: 72.0,
            avg_pm10: 115.2,
            exposure_time_mins: 25.0,
            peak_hours_factor: 1.0,
            total_exposure: 180,
        },
        BaseRoute {
            id: "route3".into(),
            name: "Weekend Shopping".into(),
            start: "Thamel".into(),
            end: "Bhatbhateni".into(),
            distance_km: 3.8,
            avg_pm25: 90.0,
            avg_pm10: 144.0,
            exposure_time_mins: 22.0,
            peak_hours_factor: 1.0,
            total_exposure: 198,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_ids_are_unique() {
        let routes = sample_base_routes();
        let ids: HashSet<_> = routes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), routes.len());
    }
}
