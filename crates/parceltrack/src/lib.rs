use thiserror::Error;

pub mod prelude {
    pub use parceltrack_access::{has_capability, AccessError, Capability, Role, User};
    pub use parceltrack_config::{ConfigError, LogFormat, LogLevel, ParceltrackConfig};
    pub use parceltrack_core::{
        CoreError, GeoPoint, PackageStatus, RouteSnapshot, Shipment, TimestampUtc, TrackingEvent,
    };
    pub use parceltrack_geo::{
        haversine_distance_miles, initial_bearing_degrees, GeoError, EARTH_RADIUS_MILES,
    };
    pub use parceltrack_progress::{
        compute_progress, estimate, AnimationStart, AnimationState, EstimatorConfig, Eta,
        ProgressAnimator, ProgressResult, RatioMethod,
    };
}

pub type Result<T> = std::result::Result<T, ParceltrackError>;

#[derive(Debug, Error)]
pub enum ParceltrackError {
    #[error(transparent)]
    Core(#[from] parceltrack_core::CoreError),
    #[error(transparent)]
    Geo(#[from] parceltrack_geo::GeoError),
    #[error(transparent)]
    Access(#[from] parceltrack_access::AccessError),
    #[error(transparent)]
    Config(#[from] parceltrack_config::ConfigError),
}
