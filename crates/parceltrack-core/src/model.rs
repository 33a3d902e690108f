use thiserror::Error;

/// Labeled WGS84 coordinate.
///
/// `new` accepts any value; ranges are only checked by `validated`/`validate`,
/// which boundary code calls before handing points to the estimator.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
    label: String,
}

impl GeoPoint {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, label: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            label: label.into(),
        }
    }

    pub fn validated(
        latitude: f64,
        longitude: f64,
        label: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let point = Self::new(latitude, longitude, label);
        point.validate()?;
        Ok(point)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_bounded("latitude", self.latitude, -90.0, 90.0)?;
        validate_bounded("longitude", self.longitude, -180.0, 180.0)?;
        Ok(())
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// One point-in-time reading of a shipment's route.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSnapshot {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub current: GeoPoint,
    pub delivered: bool,
}

impl RouteSnapshot {
    #[must_use]
    pub fn new(origin: GeoPoint, destination: GeoPoint, current: GeoPoint, delivered: bool) -> Self {
        Self {
            origin,
            destination,
            current,
            delivered,
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.origin.validate()?;
        self.destination.validate()?;
        self.current.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("{field} must be finite, got {value}")]
    NonFiniteValue { field: &'static str, value: f64 },

    #[error("{field} must be in [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown package status `{value}`")]
    UnknownStatus { value: String },

    #[error("tracking number must not be empty")]
    EmptyTrackingNumber,
}

fn validate_finite(field: &'static str, value: f64) -> Result<f64, CoreError> {
    if !value.is_finite() {
        return Err(CoreError::NonFiniteValue { field, value });
    }

    Ok(value)
}

fn validate_bounded(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, CoreError> {
    let value = validate_finite(field, value)?;
    if value < min || value > max {
        return Err(CoreError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }

    Ok(value)
}
