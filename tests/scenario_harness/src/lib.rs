#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use parceltrack::prelude::{compute_progress, EstimatorConfig, GeoPoint, RouteSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixturePoint {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Rounded values a tracking page shows for one route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub percent: f64,
    pub traveled_miles: f64,
    pub remaining_miles: f64,
    pub eta: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteScenario {
    pub name: String,
    pub origin: FixturePoint,
    pub destination: FixturePoint,
    pub current: FixturePoint,
    pub delivered: bool,
    pub expected: Observation,
}

#[derive(Debug)]
pub enum HarnessError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Point { scenario: String, reason: String },
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "I/O error: {error}"),
            Self::Json(error) => write!(f, "JSON parse error: {error}"),
            Self::Point { scenario, reason } => {
                write!(f, "scenario `{scenario}` has an invalid point: {reason}")
            }
        }
    }
}

impl std::error::Error for HarnessError {}

impl From<std::io::Error> for HarnessError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

pub fn load_scenarios(path: impl AsRef<Path>) -> Result<Vec<RouteScenario>, HarnessError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice::<Vec<RouteScenario>>(&bytes)?)
}

impl RouteScenario {
    pub fn route(&self) -> Result<RouteSnapshot, HarnessError> {
        let point = |fixture: &FixturePoint| {
            GeoPoint::validated(fixture.latitude, fixture.longitude, fixture.label.as_str())
                .map_err(|error| HarnessError::Point {
                    scenario: self.name.clone(),
                    reason: error.to_string(),
                })
        };

        Ok(RouteSnapshot::new(
            point(&self.origin)?,
            point(&self.destination)?,
            point(&self.current)?,
            self.delivered,
        ))
    }
}

pub fn observe(
    scenario: &RouteScenario,
    config: &EstimatorConfig,
) -> Result<Observation, HarnessError> {
    let result = compute_progress(&scenario.route()?, config);
    Ok(Observation {
        percent: result.percent_rounded(),
        traveled_miles: result.traveled_miles_rounded(),
        remaining_miles: result.remaining_miles_rounded(),
        eta: result.eta_label(),
    })
}

/// Names and observations of every scenario whose output differs from its fixture.
pub fn mismatches(
    scenarios: &[RouteScenario],
    config: &EstimatorConfig,
) -> Result<Vec<(String, Observation)>, HarnessError> {
    let mut failed = Vec::new();
    for scenario in scenarios {
        let observed = observe(scenario, config)?;
        if observed != scenario.expected {
            failed.push((scenario.name.clone(), observed));
        }
    }
    Ok(failed)
}
