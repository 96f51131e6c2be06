use blink_core::BlinkConfig;

/// Load debouncer configuration from `BLINK_*` environment variables,
/// falling back to the library defaults (threshold 0.25, 2 frames).
pub fn from_env() -> BlinkConfig {
    let defaults = BlinkConfig::default();
    BlinkConfig {
        ear_threshold: env_f32("BLINK_EAR_THRESHOLD", defaults.ear_threshold),
        min_consecutive_frames: env_u32(
            "BLINK_MIN_CONSECUTIVE_FRAMES",
            defaults.min_consecutive_frames,
        ),
    }
}

fn env_f32(key: &str, default: f32) -> f32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
