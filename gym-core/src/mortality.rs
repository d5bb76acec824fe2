//! Short-lived suppression markers for rivals observed dead.
//!
//! The raw snapshot may flicker a rival's death flag or drop the entity
//! abruptly. The tracker smooths that: the tick a rival is first seen dead
//! it is still reported (with its death flag set), then it is suppressed
//! from output for a fixed window of sampling ticks, mirroring its eventual
//! removal from the snapshot.

#[derive(Clone, Copy, Debug)]
struct Marker {
    rival_id: u64,
    ticks_remaining: u32,
}

#[derive(Debug)]
pub struct MortalityTracker {
    window: u32,
    markers: Vec<Marker>,
}

impl MortalityTracker {
    pub fn new(window: u32) -> Self {
        Self {
            window,
            markers: Vec::new(),
        }
    }

    /// Ages markers at the start of each sampling tick. A marker that hit
    /// zero last tick is purged now, so a marker created with window N
    /// suppresses its rival for exactly the N ticks after the death tick.
    pub fn begin_tick(&mut self) {
        self.markers.retain(|m| m.ticks_remaining > 0);
        for marker in &mut self.markers {
            marker.ticks_remaining -= 1;
        }
    }

    /// Whether this rival must be suppressed from the current tick's
    /// output. A fresh death (no active marker) creates a marker but does
    /// not suppress: the death tick itself is still reported.
    pub fn observe(&mut self, rival_id: u64, dead_this_tick: bool) -> bool {
        if self.markers.iter().any(|m| m.rival_id == rival_id) {
            return true;
        }
        if dead_this_tick {
            self.markers.push(Marker {
                rival_id,
                ticks_remaining: self.window,
            });
        }
        false
    }

    pub fn reset(&mut self) {
        self.markers.clear();
    }
}
