use super::types::ExposureSummary;

/// Health impacts expected at the summary's daily PM2.5 average.
///
/// Thresholds are cumulative: a higher average lists every lower tier too.
pub fn health_impacts(summary: &ExposureSummary) -> Vec<&'static str> {
    let avg = summary.daily_average;
    let mut impacts = Vec::new();

    if avg > 35.0 {
        impacts.push("Increased risk of respiratory symptoms");
    }
    if avg > 50.0 {
        impacts.push("Potential aggravation of existing conditions");
    }
    if avg > 75.0 {
        impacts.push("Long-term cardiovascular stress if sustained");
    }
    if avg > 100.0 {
        impacts.push("Significantly increased risk of respiratory infections");
        impacts.push("Reduced lung function during physical activity");
    }

    impacts
}
