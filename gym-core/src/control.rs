//! Inbound control vector and its per-frame application.

use serde::{Deserialize, Deserializer, Serialize};

/// The agent's latest desired heading offset and boost flag.
/// Last-write-wins: a new arrival replaces the stored vector in full, and
/// the applied value may be stale by up to one transport round-trip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlVector {
    pub xt: f64,
    pub yt: f64,
    #[serde(deserialize_with = "flag_or_level")]
    pub acceleration: bool,
}

/// The host's control surface. The integration layer wires these to the
/// game's own control-application entry points.
pub trait HostControls {
    /// Desired heading target in world units.
    fn steer(&mut self, xm: f64, ym: f64);
    fn set_acceleration(&mut self, on: bool);
}

/// Writes the latest control vector into the game, once per render frame.
/// The heading offset is scaled multiplicatively by the coefficient.
pub fn apply(control: &ControlVector, coefficient: f64, host: &mut dyn HostControls) {
    host.steer(control.xt * coefficient, control.yt * coefficient);
    host.set_acceleration(control.acceleration);
}

/// The agent side historically sends `acceleration` as a bool or as 0/1.
fn flag_or_level<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Accel {
        Flag(bool),
        Level(f64),
    }

    Ok(match Accel::deserialize(deserializer)? {
        Accel::Flag(flag) => flag,
        Accel::Level(level) => level != 0.0,
    })
}
