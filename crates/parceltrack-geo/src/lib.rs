use parceltrack_core::GeoPoint;
use thiserror::Error;

/// Mean Earth radius used for every displayed mileage.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

const EPSILON: f64 = 1e-12;

#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    #[error("fraction must be in [0.0, 1.0], got {fraction}")]
    InvalidFraction { fraction: f64 },
}

/// Great-circle distance in miles.
///
/// Total over `f64`: NaN coordinates yield NaN rather than a panic.
#[must_use]
pub fn haversine_distance_miles(from: &GeoPoint, to: &GeoPoint) -> f64 {
    EARTH_RADIUS_MILES * central_angle_radians(from, to)
}

/// Flat Euclidean distance over raw degrees.
///
/// Only meaningful as a ratio between two legs of the same route.
#[must_use]
pub fn planar_distance_degrees(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let delta_lat = to.latitude() - from.latitude();
    let delta_lon = to.longitude() - from.longitude();
    (delta_lat.powi(2) + delta_lon.powi(2)).sqrt()
}

#[must_use]
pub fn initial_bearing_degrees(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let (from_sin, from_cos) = from.latitude().to_radians().sin_cos();
    let (to_sin, to_cos) = to.latitude().to_radians().sin_cos();
    let (delta_sin, delta_cos) = (to.longitude() - from.longitude()).to_radians().sin_cos();

    let east = delta_sin * to_cos;
    let north = from_cos * to_sin - from_sin * to_cos * delta_cos;
    east.atan2(north).to_degrees().rem_euclid(360.0)
}

/// Point at `fraction` of the way along the great circle from `from` to `to`.
///
/// Used to place the animated marker on a route. The returned point carries `label`.
pub fn interpolate_great_circle(
    from: &GeoPoint,
    to: &GeoPoint,
    fraction: f64,
    label: &str,
) -> Result<GeoPoint, GeoError> {
    if !(0.0..=1.0).contains(&fraction) {
        return Err(GeoError::InvalidFraction { fraction });
    }

    if fraction <= EPSILON {
        return Ok(from.clone().with_label(label));
    }

    if (1.0 - fraction).abs() <= EPSILON {
        return Ok(to.clone().with_label(label));
    }

    let start = UnitVector::from_point(from);
    let end = UnitVector::from_point(to);
    let central_angle = central_angle_radians(from, to);
    let sin_angle = central_angle.sin();
    if central_angle.abs() <= EPSILON || sin_angle.abs() <= EPSILON {
        return Ok(interpolate_linearly(from, to, fraction, label));
    }

    let start_weight = ((1.0 - fraction) * central_angle).sin() / sin_angle;
    let end_weight = (fraction * central_angle).sin() / sin_angle;
    let (latitude, longitude) = start
        .scaled(start_weight)
        .plus(end.scaled(end_weight))
        .to_degrees();

    Ok(GeoPoint::new(latitude, longitude, label))
}

/// Earth-centred unit vector for a lat/lon pair.
#[derive(Debug, Clone, Copy)]
struct UnitVector {
    x: f64,
    y: f64,
    z: f64,
}

impl UnitVector {
    fn from_point(point: &GeoPoint) -> Self {
        let (lat_sin, lat_cos) = point.latitude().to_radians().sin_cos();
        let (lon_sin, lon_cos) = point.longitude().to_radians().sin_cos();
        Self {
            x: lat_cos * lon_cos,
            y: lat_cos * lon_sin,
            z: lat_sin,
        }
    }

    fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    fn plus(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    /// Latitude and normalised longitude in degrees; the vector need not be unit length.
    fn to_degrees(self) -> (f64, f64) {
        let latitude = self.z.atan2(self.x.hypot(self.y)).to_degrees();
        let longitude = normalize_longitude_degrees(self.y.atan2(self.x).to_degrees());
        (latitude, longitude)
    }
}

fn interpolate_linearly(from: &GeoPoint, to: &GeoPoint, fraction: f64, label: &str) -> GeoPoint {
    let latitude = from.latitude() + (to.latitude() - from.latitude()) * fraction;
    let longitude = normalize_longitude_degrees(
        from.longitude() + shortest_longitude_delta(from.longitude(), to.longitude()) * fraction,
    );
    GeoPoint::new(latitude, longitude, label)
}

fn central_angle_radians(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let from_lat = from.latitude().to_radians();
    let to_lat = to.latitude().to_radians();
    let half_dlat = (to_lat - from_lat) / 2.0;
    let half_dlon = (to.longitude() - from.longitude()).to_radians() / 2.0;

    let h = half_dlat.sin().powi(2) + from_lat.cos() * to_lat.cos() * half_dlon.sin().powi(2);
    // Rounding near antipodes can push `h` just past 1.0.
    let h = h.clamp(0.0, 1.0);
    2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

fn shortest_longitude_delta(from: f64, to: f64) -> f64 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

fn normalize_longitude_degrees(value: f64) -> f64 {
    let normalized = (value + 180.0).rem_euclid(360.0) - 180.0;
    if (normalized + 180.0).abs() <= EPSILON {
        return 180.0;
    }
    normalized
}
