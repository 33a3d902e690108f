use std::io::{self, Read};

use parceltrack_config::ParceltrackConfig;

fn main() {
    let mut data = Vec::new();
    let _ = io::stdin().read_to_end(&mut data);

    let text = String::from_utf8_lossy(&data);
    if let Ok(config) = ParceltrackConfig::from_yaml_str(&text) {
        if let Ok(yaml) = config.to_yaml() {
            let _ = ParceltrackConfig::from_yaml_str(&yaml);
        }
        let mut animator = config.animator();
        animator.retarget(50.0, false);
        let _ = animator.tick(config.animation.duration_ms() / 2.0);
    }
}
