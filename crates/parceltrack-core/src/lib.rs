pub mod model;
pub mod shipment;
pub mod status;
pub mod time;

pub use model::{CoreError, GeoPoint, RouteSnapshot};
pub use shipment::{Shipment, TrackingEvent};
pub use status::PackageStatus;
pub use time::TimestampUtc;
