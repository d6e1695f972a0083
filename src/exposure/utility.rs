/// Mean of the values extracted from `items`. Returns 0.0 for empty input.
pub fn mean_by<T>(items: &[T], value: impl Fn(&T) -> f64) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    items.iter().map(value).sum::<f64>() / items.len() as f64
}

/// Percentage change from `previous` to `current`.
///
/// A zero (or empty) baseline has no defined relative change, so it reports 0.0.
pub fn percent_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_by_empty() {
        let empty: [f64; 0] = [];
        assert_eq!(mean_by(&empty, |v| *v), 0.0);
    }

    #[test]
    fn test_mean_by_values() {
        assert_eq!(mean_by(&[10.0, 20.0, 30.0], |v| *v), 20.0);
    }

    #[test]
    fn test_percent_change_zero_baseline() {
        assert_eq!(percent_change(0.0, 40.0), 0.0);
        assert!(percent_change(0.0, 40.0).is_finite());
    }

    #[test]
    fn test_percent_change_values() {
        assert_eq!(percent_change(50.0, 75.0), 50.0);
        assert_eq!(percent_change(80.0, 60.0), -25.0);
    }
}
