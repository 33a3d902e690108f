use parceltrack_core::GeoPoint;
use parceltrack_geo::{haversine_distance_miles, EARTH_RADIUS_MILES};
use proptest::prelude::*;

fn point() -> impl Strategy<Value = GeoPoint> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon, "p"))
}

proptest! {
    #[test]
    fn haversine_is_symmetric(a in point(), b in point()) {
        let forward = haversine_distance_miles(&a, &b);
        let backward = haversine_distance_miles(&b, &a);
        let tolerance = 1e-9 * forward.abs().max(1.0);
        prop_assert!((forward - backward).abs() <= tolerance, "{forward} vs {backward}");
    }

    #[test]
    fn haversine_is_bounded_by_half_circumference(a in point(), b in point()) {
        let distance = haversine_distance_miles(&a, &b);
        prop_assert!(distance >= 0.0);
        prop_assert!(distance <= std::f64::consts::PI * EARTH_RADIUS_MILES + 1e-6);
    }

    #[test]
    fn haversine_never_panics_on_arbitrary_floats(
        lat1 in any::<f64>(),
        lon1 in any::<f64>(),
        lat2 in any::<f64>(),
        lon2 in any::<f64>(),
    ) {
        let a = GeoPoint::new(lat1, lon1, "a");
        let b = GeoPoint::new(lat2, lon2, "b");
        let _ = haversine_distance_miles(&a, &b);
    }
}
