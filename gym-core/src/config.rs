//! Reference constants and session configuration.
//!
//! The defaults reproduce the reference cadence observed against the host
//! game; everything is overridable through a deserialized [`SessionConfig`].

use serde::{Deserialize, Serialize};

use crate::growth::GrowthTables;

/// Observation assembly runs every Nth render frame.
pub const SAMPLE_PERIOD_FRAMES: u32 = 10;

/// Rival summaries are reported within this head-to-head range.
pub const RIVAL_RANGE: f64 = 2000.0;
/// Per-rival body segments are reported within this range of the player head.
pub const SEGMENT_RANGE: f64 = 1000.0;
pub const FOOD_RANGE: f64 = 1000.0;
pub const PREY_RANGE: f64 = 1000.0;

/// Range and cap for the nearest-rival focus segment list.
pub const FOCUS_RANGE: f64 = 2000.0;
pub const FOCUS_SEGMENT_CAP: usize = 200;

/// Cap for the pooled cross-rival segment danger map.
pub const TOP_SEGMENT_CAP: usize = 200;

/// Sampling ticks a freshly dead rival stays suppressed from output.
pub const MORTALITY_TICKS: u32 = 60;

/// Delay before reconnecting after a reported death.
pub const RECONNECT_DELAY_MS: u64 = 5_000;
/// Retry delay for the integration layer while the host's per-frame
/// callback does not exist yet. The core itself never schedules this.
pub const INJECT_RETRY_MS: u64 = 1_000;

/// Steering targets are the control vector scaled by this coefficient.
pub const STEER_COEFFICIENT: f64 = 10_000.0;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Host progression tables; required, no sensible default exists.
    pub growth: GrowthTables,
    #[serde(default = "default_sample_period")]
    pub sample_period: u32,
    #[serde(default = "default_rival_range")]
    pub rival_range: f64,
    #[serde(default = "default_segment_range")]
    pub segment_range: f64,
    #[serde(default = "default_food_range")]
    pub food_range: f64,
    #[serde(default = "default_prey_range")]
    pub prey_range: f64,
    #[serde(default = "default_focus_range")]
    pub focus_range: f64,
    #[serde(default = "default_focus_segment_cap")]
    pub focus_segment_cap: usize,
    #[serde(default = "default_top_segment_cap")]
    pub top_segment_cap: usize,
    #[serde(default = "default_mortality_ticks")]
    pub mortality_ticks: u32,
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
    #[serde(default = "default_steer_coefficient")]
    pub steer_coefficient: f64,
}

impl SessionConfig {
    /// Reference cadence with the given progression tables.
    pub fn with_reference_cadence(growth: GrowthTables) -> Self {
        Self {
            growth,
            sample_period: SAMPLE_PERIOD_FRAMES,
            rival_range: RIVAL_RANGE,
            segment_range: SEGMENT_RANGE,
            food_range: FOOD_RANGE,
            prey_range: PREY_RANGE,
            focus_range: FOCUS_RANGE,
            focus_segment_cap: FOCUS_SEGMENT_CAP,
            top_segment_cap: TOP_SEGMENT_CAP,
            mortality_ticks: MORTALITY_TICKS,
            reconnect_delay_ms: RECONNECT_DELAY_MS,
            steer_coefficient: STEER_COEFFICIENT,
        }
    }
}

fn default_sample_period() -> u32 {
    SAMPLE_PERIOD_FRAMES
}

fn default_rival_range() -> f64 {
    RIVAL_RANGE
}

fn default_segment_range() -> f64 {
    SEGMENT_RANGE
}

fn default_food_range() -> f64 {
    FOOD_RANGE
}

fn default_prey_range() -> f64 {
    PREY_RANGE
}

fn default_focus_range() -> f64 {
    FOCUS_RANGE
}

fn default_focus_segment_cap() -> usize {
    FOCUS_SEGMENT_CAP
}

fn default_top_segment_cap() -> usize {
    TOP_SEGMENT_CAP
}

fn default_mortality_ticks() -> u32 {
    MORTALITY_TICKS
}

fn default_reconnect_delay_ms() -> u64 {
    RECONNECT_DELAY_MS
}

fn default_steer_coefficient() -> f64 {
    STEER_COEFFICIENT
}
