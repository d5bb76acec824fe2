//! Observation record and the per-tick assembler.
//!
//! Field names on the wire structs are the external contract: the learning
//! agent indexes the JSON payload by these exact keys, so Rust-side names
//! are mapped with serde renames instead of changing the wire.

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::error::GymError;
use crate::filters;
use crate::geometry::distance;
use crate::growth::GrowthTables;
use crate::mortality::MortalityTracker;
use crate::snapshot::{PlayerState, RivalState, WorldSnapshot};

/// A body segment annotated with its distance to the reference point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SegmentSighting {
    pub x: f64,
    pub y: f64,
    pub dist: f64,
}

/// Pooled cross-rival segment with its owner's size score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopSegment {
    pub x: f64,
    pub y: f64,
    pub dist: f64,
    pub size: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoodSighting {
    pub x: f64,
    pub y: f64,
    pub value: f64,
    pub dist: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreySighting {
    pub x: f64,
    pub y: f64,
    pub dist: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub dead: bool,
    pub x: f64,
    pub y: f64,
    pub parts: Vec<SegmentSighting>,
    pub ang: f64,
    pub size: f64,
    pub food_eaten: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RivalReport {
    pub x: f64,
    pub y: f64,
    pub ang: f64,
    pub parts: Vec<SegmentSighting>,
    pub size: f64,
    pub dist: f64,
    pub dead: bool,
}

/// The single closest rival, its segments re-ranked against the player's
/// head. The primary threat/target for the policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FocusReport {
    pub x: f64,
    pub y: f64,
    pub ang: f64,
    pub size: f64,
    pub parts: Vec<SegmentSighting>,
}

/// One immutable observation per sampling tick; the sole unit exchanged
/// with the transport. Every sub-list derives from the same snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    #[serde(rename = "slither")]
    pub player: PlayerReport,
    #[serde(rename = "target_slither")]
    pub nearest_rival_focus: Option<FocusReport>,
    pub foods: Vec<FoodSighting>,
    pub preys: Vec<PreySighting>,
    #[serde(rename = "others")]
    pub rivals: Vec<RivalReport>,
    #[serde(rename = "top_body_parts")]
    pub top_body_segments: Vec<TopSegment>,
}

/// Distills one snapshot per sampling tick. Owns the cross-tick state the
/// distillation needs: the previous-score baseline and the mortality
/// markers. Single execution context, no locking.
pub struct Assembler {
    tables: GrowthTables,
    rival_range: f64,
    segment_range: f64,
    food_range: f64,
    prey_range: f64,
    focus_range: f64,
    focus_segment_cap: usize,
    top_segment_cap: usize,
    tracker: MortalityTracker,
    last_score: Option<f64>,
}

impl Assembler {
    pub fn new(cfg: &SessionConfig) -> Self {
        Self {
            tables: cfg.growth.clone(),
            rival_range: cfg.rival_range,
            segment_range: cfg.segment_range,
            food_range: cfg.food_range,
            prey_range: cfg.prey_range,
            focus_range: cfg.focus_range,
            focus_segment_cap: cfg.focus_segment_cap,
            top_segment_cap: cfg.top_segment_cap,
            tracker: MortalityTracker::new(cfg.mortality_ticks),
            last_score: None,
        }
    }

    /// Drops the cross-tick baselines. Called on reconnect so the first
    /// tick of the new episode reports `food_eaten = 0` and starts with a
    /// clean mortality slate.
    pub fn reset_baseline(&mut self) {
        self.last_score = None;
        self.tracker.reset();
    }

    pub fn assemble(
        &mut self,
        player: &PlayerState,
        world: &WorldSnapshot,
    ) -> Result<ObservationRecord, GymError> {
        let head = player.position;

        // 1-2: own score and the per-tick delta. First tick of an episode
        // has no baseline and must report 0, not garbage.
        let score = self.tables.score(player.growth)?;
        let food_eaten = self.last_score.map_or(0.0, |previous| score - previous);
        self.last_score = Some(score);

        // 3: age mortality markers, then classify every rival, including
        // ones out of range, so a far-away death still gets its marker.
        self.tracker.begin_tick();
        let mut surviving: Vec<(&RivalState, f64)> = Vec::new();
        for rival in &world.rivals {
            if rival.id == player.id {
                continue;
            }
            if self.tracker.observe(rival.id, rival.dead) {
                continue;
            }
            surviving.push((rival, self.tables.score(rival.growth)?));
        }

        // 4: distance-bounded rival summaries with per-rival segments.
        let mut rivals = Vec::new();
        for (rival, size) in &surviving {
            let dist = distance(rival.position, head);
            if dist < self.rival_range {
                rivals.push(RivalReport {
                    x: rival.position.x,
                    y: rival.position.y,
                    ang: rival.heading,
                    parts: filters::nearby_segments(&rival.segments, head, self.segment_range),
                    size: *size,
                    dist,
                    dead: rival.dead,
                });
            }
        }
        filters::sort_ascending(&mut rivals, |report| report.dist);

        // 5: single nearest rival by head-to-head distance, segments
        // re-ranked against the player's head.
        let nearest_rival_focus = surviving
            .iter()
            .min_by(|(a, _), (b, _)| {
                let da = distance(a.position, head);
                let db = distance(b.position, head);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(rival, size)| {
                let mut parts =
                    filters::nearby_segments(&rival.segments, head, self.focus_range);
                parts.truncate(self.focus_segment_cap);
                FocusReport {
                    x: rival.position.x,
                    y: rival.position.y,
                    ang: rival.heading,
                    size: *size,
                    parts,
                }
            });

        // 6: pooled danger map across all surviving rivals, pre-cutoff.
        let top_body_segments =
            filters::pooled_rival_segments(&surviving, player.id, head, self.top_segment_cap);

        // 7: consumables.
        let foods = filters::filter_foods(&world.foods, head, self.food_range);
        let preys = filters::filter_preys(&world.preys, head, self.prey_range);

        // 8: own body, annotated with head distances but kept in
        // head-to-tail body order for positional consumers.
        let parts: Vec<SegmentSighting> = player
            .segments
            .iter()
            .map(|segment| SegmentSighting {
                x: segment.x,
                y: segment.y,
                dist: distance(*segment, head),
            })
            .collect();

        Ok(ObservationRecord {
            player: PlayerReport {
                dead: false,
                x: head.x,
                y: head.y,
                parts,
                ang: player.heading,
                size: score,
                food_eaten,
            },
            nearest_rival_focus,
            foods,
            preys,
            rivals,
            top_body_segments,
        })
    }
}

/// The terminal variant: the last live record with `dead` forced true,
/// other fields verbatim.
pub fn terminal_record(last: &ObservationRecord) -> ObservationRecord {
    let mut record = last.clone();
    record.player.dead = true;
    record
}
