//! Shipment progress estimation.
//!
//! `compute_progress` turns a [`RouteSnapshot`](parceltrack_core::RouteSnapshot)
//! into a completion percentage, traveled/remaining miles and an ETA label.
//! [`AnimationState::advance`] and [`ProgressAnimator`] produce per-frame
//! percentages so a view can animate its progress marker toward that value.
//!
//! Everything here is pure arithmetic over the inputs and never panics on
//! malformed coordinates.

pub mod animation;
pub mod estimate;

pub use animation::{AnimationStart, AnimationState, ProgressAnimator, DEFAULT_ANIMATION_DURATION_MS};
pub use estimate::{
    compute_progress, estimate, marker_position, EstimatorConfig, Eta, ProgressResult,
    RatioMethod, DEFAULT_AVERAGE_SPEED_MPH,
};
