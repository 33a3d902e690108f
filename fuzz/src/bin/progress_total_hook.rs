use std::io::{self, Read};

use parceltrack_core::{GeoPoint, RouteSnapshot};
use parceltrack_progress::{
    compute_progress, marker_position, AnimationStart, EstimatorConfig, ProgressAnimator,
    RatioMethod,
};

fn main() {
    let mut data = Vec::new();
    if io::stdin().read_to_end(&mut data).is_err() {
        return;
    }

    let origin = GeoPoint::new(as_f64(&data, 0), as_f64(&data, 8), "origin");
    let destination = GeoPoint::new(as_f64(&data, 16), as_f64(&data, 24), "destination");
    let current = GeoPoint::new(as_f64(&data, 32), as_f64(&data, 40), "current");
    let flags = data.get(48).copied().unwrap_or_default();

    let route = RouteSnapshot::new(origin, destination, current, flags & 1 == 1);
    let config = EstimatorConfig {
        average_speed_mph: as_f64(&data, 49),
        ratio_method: if flags & 2 == 2 {
            RatioMethod::Planar
        } else {
            RatioMethod::Haversine
        },
    };

    let result = compute_progress(&route, &config);
    let _ = result.eta_label();
    let _ = marker_position(&route, result.percent_complete);

    let start = if flags & 4 == 4 {
        AnimationStart::CarryForward
    } else {
        AnimationStart::Reset
    };
    let mut animator = ProgressAnimator::new(start, as_f64(&data, 57));
    animator.retarget(result.percent_complete, route.delivered);
    let _ = animator.tick(as_f64(&data, 65));
    animator.retarget(as_f64(&data, 73), false);
    let _ = animator.tick(as_f64(&data, 81));
}

// Missing bytes read as zero so short inputs still exercise every path.
fn as_f64(data: &[u8], offset: usize) -> f64 {
    let mut bytes = [0_u8; 8];
    for (index, slot) in bytes.iter_mut().enumerate() {
        *slot = data.get(offset + index).copied().unwrap_or_default();
    }
    f64::from_le_bytes(bytes)
}
