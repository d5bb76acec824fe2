//! Player lifecycle: death inference, terminal reporting, reconnect timing.
//!
//! The host exposes no explicit death event for the player, so a stalled
//! position (no frame-over-frame displacement on either axis) is used as a
//! one-frame death proxy. A legitimately motionless player would false
//! positive; that tradeoff is accepted to keep observable behavior
//! identical to the reference.

use crate::geometry::Point;
use crate::timer::OneShot;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    Alive,
    InferredDead,
    ReportedDead,
    Disconnected,
}

/// What the session should do with the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameVerdict {
    /// Normal frame: sample if due, apply controls.
    Live,
    /// Emit the terminal record now, then disconnect.
    ReportDeath,
    /// Death already reported; produce nothing until reconnected.
    Suspended,
}

#[derive(Debug)]
pub struct Lifecycle {
    state: LifecycleState,
    last_position: Option<Point>,
    reconnect: OneShot,
    reconnect_delay_ms: u64,
}

impl Lifecycle {
    pub fn new(reconnect_delay_ms: u64) -> Self {
        Self {
            state: LifecycleState::Alive,
            last_position: None,
            reconnect: OneShot::idle(),
            reconnect_delay_ms,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Advances the post-death states. Returns true when the reconnect
    /// deadline has elapsed this frame: the caller must reconnect the
    /// transport and reset its observation baselines.
    pub fn poll_reconnect(&mut self, now_ms: u64) -> bool {
        match self.state {
            LifecycleState::ReportedDead => {
                // Transport is logically closed from the report onward.
                self.state = LifecycleState::Disconnected;
                false
            }
            LifecycleState::Disconnected => {
                if self.reconnect.fire(now_ms) {
                    self.state = LifecycleState::Alive;
                    // Fresh baseline: stale coordinates must not re-trigger
                    // death on the first frame of the new episode.
                    self.last_position = None;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    /// One-frame stall check, run every render frame.
    pub fn observe_position(&mut self, position: Point) -> FrameVerdict {
        match self.state {
            LifecycleState::Alive => {
                let stalled = self.last_position == Some(position);
                self.last_position = Some(position);
                if stalled {
                    self.state = LifecycleState::InferredDead;
                    FrameVerdict::ReportDeath
                } else {
                    FrameVerdict::Live
                }
            }
            LifecycleState::InferredDead => {
                // Movement before the report went out clears the suspicion.
                // Unreachable with the one-frame trigger (the report is
                // emitted in the same frame) but load-bearing if the stall
                // check is ever relaxed to multiple frames.
                if self.last_position != Some(position) {
                    self.state = LifecycleState::Alive;
                    self.last_position = Some(position);
                    FrameVerdict::Live
                } else {
                    FrameVerdict::ReportDeath
                }
            }
            LifecycleState::ReportedDead | LifecycleState::Disconnected => {
                FrameVerdict::Suspended
            }
        }
    }

    /// The terminal record went out: mark reported and arm the reconnect.
    pub fn death_reported(&mut self, now_ms: u64) {
        self.state = LifecycleState::ReportedDead;
        self.reconnect.arm(now_ms, self.reconnect_delay_ms);
    }
}
