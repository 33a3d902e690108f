use parceltrack::prelude::{
    estimate, has_capability, Capability, GeoPoint, PackageStatus, ParceltrackConfig, Role,
    Shipment, TimestampUtc, TrackingEvent, User,
};
use parceltrack::ParceltrackError;

#[test]
fn prelude_covers_shipment_to_progress_flow() {
    let mut shipment = Shipment::new(
        "PT-3001",
        PackageStatus::InTransit,
        GeoPoint::validated(32.9481, -96.7591, "Dallas").expect("origin should validate"),
        GeoPoint::validated(39.7392, -104.9903, "Denver").expect("destination should validate"),
    )
    .expect("shipment should construct");
    shipment.record(TrackingEvent::new(
        PackageStatus::InTransit,
        GeoPoint::new(36.1699, -101.3864, "Amarillo"),
        TimestampUtc::from_unix_millis(1_700_000_000_000),
    ));

    let result = estimate(&shipment.snapshot());
    assert_eq!(result.percent_rounded(), 53.0);
    assert_eq!(result.eta_label(), "6h remaining");
}

#[test]
fn unified_error_wraps_core_errors() {
    let core_error = GeoPoint::validated(200.0, 0.0, "bad").expect_err("latitude out of range");
    let facade_error: ParceltrackError = core_error.into();

    assert!(matches!(facade_error, ParceltrackError::Core(_)));
}

#[test]
fn unified_error_wraps_access_and_config_errors() {
    let access_error = "courier".parse::<Role>().expect_err("unknown role");
    assert!(matches!(
        ParceltrackError::from(access_error),
        ParceltrackError::Access(_)
    ));

    let config_error = ParceltrackConfig::from_yaml_str("estimator:\n  average_speed_mph: -5\n")
        .expect_err("negative speed should fail");
    assert!(matches!(
        ParceltrackError::from(config_error),
        ParceltrackError::Config(_)
    ));
}

#[test]
fn dashboard_capability_check_is_reachable_from_prelude() {
    let staff = User::new("staff-1", Role::Staff);
    assert!(has_capability(&staff, Capability::ViewDashboard));
    assert!(!has_capability(&staff, Capability::ManageUsers));
}
