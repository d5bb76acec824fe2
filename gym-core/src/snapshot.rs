//! Typed view of the host's per-frame world state.
//!
//! The host exposes duck-typed entities; the boundary adapter converts them
//! into these records before the core sees them. A snapshot is read once per
//! frame and discarded, never mutated by the core.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// The host's two-part length/mass encoding. `tier` is the composite index
/// (`sct + rsc` in the host's representation, summed by the adapter);
/// `fraction` is the progress within that tier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Growth {
    pub tier: usize,
    pub fraction: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: u64,
    pub position: Point,
    pub heading: f64,
    pub growth: Growth,
    pub segments: Vec<Point>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RivalState {
    pub id: u64,
    pub position: Point,
    pub heading: f64,
    pub growth: Growth,
    pub segments: Vec<Point>,
    pub dead: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FoodItem {
    pub position: Point,
    pub value: f64,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PreyItem {
    pub position: Point,
}

/// Everything the core reads from the host in one frame. `player` is absent
/// until the organism has spawned; the session skips such frames entirely.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    #[serde(default)]
    pub player: Option<PlayerState>,
    #[serde(default)]
    pub rivals: Vec<RivalState>,
    #[serde(default)]
    pub foods: Vec<FoodItem>,
    #[serde(default)]
    pub preys: Vec<PreyItem>,
}
