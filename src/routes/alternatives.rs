use tracing::debug;

use super::types::{BaseRoute, RouteAlternative, RouteWithAlternatives};

/// Travel time assumed for the base route, in minutes per km.
const BASE_MINS_PER_KM: f64 = 6.0;

/// PM10 is estimated from PM2.5 with a fixed ratio.
const PM10_PER_PM25: f64 = 1.6;

/// Fixed recipe for one alternative.
struct Variant {
    suffix: &'static str,
    name: &'static str,
    distance_factor: f64,
    pm25_factor: f64,
    mins_per_km: f64,
    reduction_percent: u8,
}

static VARIANTS: &[Variant] = &[
    Variant {
        suffix: "alt1",
        name: "Alternative 1: Less polluted route",
        distance_factor: 1.15,
        pm25_factor: 0.65,
        mins_per_km: 6.0,
        reduction_percent: 35,
    },
    Variant {
        suffix: "alt2",
        name: "Alternative 2: Travel during off-peak hours",
        distance_factor: 1.0,
        pm25_factor: 0.75,
        mins_per_km: 6.0,
        reduction_percent: 25,
    },
    Variant {
        suffix: "alt3",
        name: "Alternative 3: Use different transport mode",
        distance_factor: 1.0,
        pm25_factor: 0.5,
        mins_per_km: 7.0,
        reduction_percent: 50,
    },
];

fn derive(base: &BaseRoute, variant: &Variant) -> RouteAlternative {
    let distance = base.distance_km * variant.distance_factor;
    let pm25 = base.avg_pm25 * variant.pm25_factor;
    let minutes = distance * variant.mins_per_km;

    let exposure_time_mins = minutes.round() as i64;
    let base_minutes = (base.distance_km * BASE_MINS_PER_KM).round() as i64;
    let total_exposure = (pm25 * minutes / 10.0).round() as i64;

    RouteAlternative {
        id: format!("{}_{}", base.id, variant.suffix),
        name: variant.name.to_string(),
        distance_km: (distance * 10.0).round() / 10.0,
        avg_pm25: pm25.round() as i64,
        avg_pm10: (pm25 * PM10_PER_PM25).round() as i64,
        exposure_time_mins,
        reduction_percent: variant.reduction_percent,
        extra_time_mins: exposure_time_mins - base_minutes,
        total_exposure,
        exposure_reduction: base.total_exposure - total_exposure,
    }
}

/// Derives the three alternatives for `base`, best exposure reduction first.
///
/// Alternatives with equal reductions keep their generation order.
pub fn generate_alternatives(base: &BaseRoute) -> Vec<RouteAlternative> {
    let mut alternatives: Vec<RouteAlternative> =
        VARIANTS.iter().map(|v| derive(base, v)).collect();

    alternatives.sort_by(|a, b| b.exposure_reduction.cmp(&a.exposure_reduction));

    debug!(
        route_id = %base.id,
        best = %alternatives[0].id,
        best_reduction = alternatives[0].exposure_reduction,
        "Route alternatives ranked"
    );

    alternatives
}

pub fn optimize_routes(routes: &[BaseRoute]) -> Vec<RouteWithAlternatives> {
    routes
        .iter()
        .map(|route| RouteWithAlternatives {
            base_route: route.clone(),
            alternatives: generate_alternatives(route),
        })
        .collect()
}
