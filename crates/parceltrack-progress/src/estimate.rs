use std::fmt;

use parceltrack_core::{GeoPoint, RouteSnapshot};
use parceltrack_geo::{
    haversine_distance_miles, interpolate_great_circle, planar_distance_degrees, GeoError,
};

pub const DEFAULT_AVERAGE_SPEED_MPH: f64 = 50.0;

const HOURS_PER_DAY: f64 = 24.0;

/// How the completion ratio is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatioMethod {
    /// Ratio of great-circle miles, consistent with the displayed distances.
    #[default]
    Haversine,
    /// Ratio of flat lat/lon degree distances, matching legacy tracking pages.
    Planar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorConfig {
    pub average_speed_mph: f64,
    pub ratio_method: RatioMethod,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            average_speed_mph: DEFAULT_AVERAGE_SPEED_MPH,
            ratio_method: RatioMethod::Haversine,
        }
    }
}

/// Time left until delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eta {
    Delivered,
    Remaining { days: u64, hours: u64 },
}

impl Eta {
    fn from_hours(hours_remaining: f64) -> Self {
        let days = (hours_remaining / HOURS_PER_DAY).floor();
        if days > 0.0 {
            return Self::Remaining {
                days: days as u64,
                hours: (hours_remaining % HOURS_PER_DAY).floor() as u64,
            };
        }

        Self::Remaining {
            days: 0,
            hours: hours_remaining.floor() as u64,
        }
    }
}

impl fmt::Display for Eta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delivered => f.write_str("Delivered"),
            Self::Remaining { days: 0, hours } => write!(f, "{hours}h remaining"),
            Self::Remaining { days, hours } => write!(f, "{days}d {hours}h remaining"),
        }
    }
}

/// Derived progress for one route evaluation. Never updated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressResult {
    pub percent_complete: f64,
    pub traveled_miles: f64,
    pub remaining_miles: f64,
    pub eta: Eta,
}

impl ProgressResult {
    #[must_use]
    pub fn eta_label(&self) -> String {
        self.eta.to_string()
    }

    #[must_use]
    pub fn percent_rounded(&self) -> f64 {
        self.percent_complete.round()
    }

    #[must_use]
    pub fn traveled_miles_rounded(&self) -> f64 {
        self.traveled_miles.round()
    }

    #[must_use]
    pub fn remaining_miles_rounded(&self) -> f64 {
        self.remaining_miles.round()
    }
}

/// Progress, distances and ETA for `route` with the default configuration.
#[must_use]
pub fn estimate(route: &RouteSnapshot) -> ProgressResult {
    compute_progress(route, &EstimatorConfig::default())
}

#[must_use]
pub fn compute_progress(route: &RouteSnapshot, config: &EstimatorConfig) -> ProgressResult {
    let total_miles = haversine_distance_miles(&route.origin, &route.destination);
    let traveled_miles = haversine_distance_miles(&route.origin, &route.current);
    let remaining_miles = clamp_non_negative(total_miles - traveled_miles);

    if route.delivered {
        return ProgressResult {
            percent_complete: 100.0,
            traveled_miles,
            remaining_miles,
            eta: Eta::Delivered,
        };
    }

    let (traveled, total) = match config.ratio_method {
        RatioMethod::Haversine => (traveled_miles, total_miles),
        RatioMethod::Planar => (
            planar_distance_degrees(&route.origin, &route.current),
            planar_distance_degrees(&route.origin, &route.destination),
        ),
    };
    let percent_complete = completion_percent(traveled, total);

    tracing::trace!(
        origin = route.origin.label(),
        destination = route.destination.label(),
        current = route.current.label(),
        total_miles,
        traveled_miles,
        percent_complete,
        "computed shipment progress"
    );

    ProgressResult {
        percent_complete,
        traveled_miles,
        remaining_miles,
        eta: Eta::from_hours(remaining_miles / config.average_speed_mph),
    }
}

/// Position of the progress marker at `percent` along the route.
pub fn marker_position(route: &RouteSnapshot, percent: f64) -> Result<GeoPoint, GeoError> {
    let fraction = percent / 100.0;
    let fraction = if fraction > 1.0 { 1.0 } else { fraction };
    let fraction = if fraction < 0.0 { 0.0 } else { fraction };
    interpolate_great_circle(&route.origin, &route.destination, fraction, "marker")
}

// Comparisons rather than f64::min/max so NaN inputs stay NaN.
fn completion_percent(traveled: f64, total: f64) -> f64 {
    if total == 0.0 {
        tracing::debug!("route has zero length; reporting 0% progress");
        return 0.0;
    }

    let percent = traveled / total * 100.0;
    if percent > 100.0 {
        100.0
    } else {
        percent
    }
}

fn clamp_non_negative(value: f64) -> f64 {
    if value < 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use parceltrack_core::{GeoPoint, RouteSnapshot};

    use super::{
        compute_progress, estimate, marker_position, EstimatorConfig, Eta, RatioMethod,
    };

    fn dallas() -> GeoPoint {
        GeoPoint::new(32.9481, -96.7591, "Dallas")
    }

    fn denver() -> GeoPoint {
        GeoPoint::new(39.7392, -104.9903, "Denver")
    }

    fn amarillo() -> GeoPoint {
        GeoPoint::new(36.1699, -101.3864, "Amarillo")
    }

    #[test]
    fn eta_formats_hours_only_below_one_day() {
        assert_eq!(Eta::from_hours(6.2).to_string(), "6h remaining");
        assert_eq!(Eta::from_hours(0.4).to_string(), "0h remaining");
        assert_eq!(Eta::from_hours(23.99).to_string(), "23h remaining");
    }

    #[test]
    fn eta_formats_days_and_hours_from_one_day() {
        assert_eq!(Eta::from_hours(24.0).to_string(), "1d 0h remaining");
        assert_eq!(Eta::from_hours(53.7).to_string(), "2d 5h remaining");
        assert_eq!(Eta::Delivered.to_string(), "Delivered");
    }

    #[test]
    fn overshoot_past_destination_clamps_to_one_hundred() {
        let route = RouteSnapshot::new(
            dallas(),
            amarillo(),
            GeoPoint::new(40.5, -106.0, "past Denver"),
            false,
        );
        let result = estimate(&route);
        assert_eq!(result.percent_complete, 100.0);
        assert_eq!(result.remaining_miles, 0.0);
        assert_eq!(result.eta_label(), "0h remaining");
    }

    #[test]
    fn planar_method_uses_degree_ratio_but_keeps_haversine_miles() {
        let route = RouteSnapshot::new(dallas(), denver(), amarillo(), false);
        let planar = compute_progress(
            &route,
            &EstimatorConfig {
                ratio_method: RatioMethod::Planar,
                ..EstimatorConfig::default()
            },
        );
        let haversine = estimate(&route);

        assert_eq!(planar.traveled_miles, haversine.traveled_miles);
        assert_eq!(planar.remaining_miles, haversine.remaining_miles);
        assert!((planar.percent_complete - 52.84).abs() < 0.1, "{planar:?}");
        assert_ne!(planar.percent_complete, haversine.percent_complete);
    }

    #[test]
    fn slower_speed_stretches_eta() {
        let route = RouteSnapshot::new(dallas(), denver(), amarillo(), false);
        let result = compute_progress(
            &route,
            &EstimatorConfig {
                average_speed_mph: 10.0,
                ..EstimatorConfig::default()
            },
        );
        // ~310.5 miles at 10 mph is ~31 hours.
        assert_eq!(result.eta, Eta::Remaining { days: 1, hours: 7 });
    }

    #[test]
    fn nan_current_point_propagates_instead_of_panicking() {
        let route = RouteSnapshot::new(
            dallas(),
            denver(),
            GeoPoint::new(f64::NAN, f64::NAN, "lost fix"),
            false,
        );
        let result = estimate(&route);
        assert!(result.percent_complete.is_nan());
        assert!(result.traveled_miles.is_nan());
        assert!(result.remaining_miles.is_nan());
    }

    #[test]
    fn rounded_accessors_round_to_nearest_mile() {
        let route = RouteSnapshot::new(dallas(), denver(), amarillo(), false);
        let result = estimate(&route);
        assert_eq!(result.traveled_miles_rounded(), 345.0);
        assert_eq!(result.remaining_miles_rounded(), 310.0);
        assert_eq!(result.percent_rounded(), 53.0);
    }

    #[test]
    fn marker_position_clamps_percent_to_route() {
        let route = RouteSnapshot::new(dallas(), denver(), amarillo(), false);
        let start = marker_position(&route, -5.0).expect("start marker");
        let end = marker_position(&route, 140.0).expect("end marker");
        assert_eq!(start.latitude(), dallas().latitude());
        assert_eq!(end.latitude(), denver().latitude());
        assert_eq!(end.label(), "marker");
    }
}
