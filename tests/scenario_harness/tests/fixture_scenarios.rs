use std::path::PathBuf;

use parceltrack::prelude::{EstimatorConfig, RatioMethod};
use scenario_harness_tests::{load_scenarios, mismatches, observe, FixturePoint, HarnessError};

fn fixture_path(file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(file_name)
}

#[test]
fn every_fixture_scenario_matches_its_expected_display() {
    let scenarios =
        load_scenarios(fixture_path("route_scenarios.json")).expect("fixture should load");
    assert_eq!(scenarios.len(), 6);

    let failed = mismatches(&scenarios, &EstimatorConfig::default()).expect("routes are valid");
    assert!(
        failed.is_empty(),
        "scenario outputs drifted from fixture; verify intended semantic change before updating: {failed:#?}"
    );
}

#[test]
fn fixture_results_do_not_depend_on_scenario_order() {
    let mut scenarios =
        load_scenarios(fixture_path("route_scenarios.json")).expect("fixture should load");
    let config = EstimatorConfig::default();
    let forward: Vec<_> = scenarios
        .iter()
        .map(|scenario| observe(scenario, &config).expect("valid route"))
        .collect();

    scenarios.reverse();
    let mut backward: Vec<_> = scenarios
        .iter()
        .map(|scenario| observe(scenario, &config).expect("valid route"))
        .collect();
    backward.reverse();

    assert_eq!(forward, backward);
}

#[test]
fn planar_ratio_changes_percent_but_not_distances() {
    let scenarios =
        load_scenarios(fixture_path("route_scenarios.json")).expect("fixture should load");
    let planar = EstimatorConfig {
        ratio_method: RatioMethod::Planar,
        ..EstimatorConfig::default()
    };

    for scenario in &scenarios {
        let observed = observe(scenario, &planar).expect("valid route");
        assert_eq!(observed.traveled_miles, scenario.expected.traveled_miles);
        assert_eq!(observed.remaining_miles, scenario.expected.remaining_miles);
        assert_eq!(observed.eta, scenario.expected.eta);
    }
}

#[test]
fn out_of_range_fixture_point_is_reported_by_name() {
    let mut scenarios =
        load_scenarios(fixture_path("route_scenarios.json")).expect("fixture should load");
    scenarios[0].current = FixturePoint {
        label: "Nowhere".to_owned(),
        latitude: 123.0,
        longitude: 0.0,
    };

    let error = observe(&scenarios[0], &EstimatorConfig::default())
        .expect_err("latitude 123 is out of range");
    assert!(matches!(
        error,
        HarnessError::Point { ref scenario, .. } if scenario == "dallas-denver-midway"
    ));
}
