//! Environment overrides layered on top of the `--config` file.
//!
//! Matches the deployment story of the core's host integration: operators
//! tune cadence and timing knobs per machine without editing the shared
//! config JSON. Unset, unparsable, or zero values keep the configured value.

use std::env;

use slither_gym_core::SessionConfig;

pub const ENV_SAMPLE_PERIOD: &str = "SLITHER_SAMPLE_PERIOD";
pub const ENV_MORTALITY_TICKS: &str = "SLITHER_MORTALITY_TICKS";
pub const ENV_RECONNECT_DELAY_MS: &str = "SLITHER_RECONNECT_DELAY_MS";
pub const ENV_STEER_COEFFICIENT: &str = "SLITHER_STEER_COEFFICIENT";

pub fn apply_env_overrides(cfg: &mut SessionConfig) {
    cfg.sample_period = read_env_u32(ENV_SAMPLE_PERIOD, cfg.sample_period);
    cfg.mortality_ticks = read_env_u32(ENV_MORTALITY_TICKS, cfg.mortality_ticks);
    cfg.reconnect_delay_ms = read_env_u64(ENV_RECONNECT_DELAY_MS, cfg.reconnect_delay_ms);
    cfg.steer_coefficient = read_env_f64(ENV_STEER_COEFFICIENT, cfg.steer_coefficient);
}

pub fn read_env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub fn read_env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub fn read_env_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(default)
}
