//! Distance-bounded entity filters.
//!
//! Every filter annotates entities with their distance to a reference
//! point, keeps only those strictly inside the cutoff (entities exactly at
//! the boundary are excluded), and sorts ascending by distance. Inputs are
//! never mutated; ties keep input iteration order.

use std::cmp::Ordering;

use crate::geometry::{distance, Point};
use crate::observe::{FoodSighting, PreySighting, SegmentSighting, TopSegment};
use crate::snapshot::{FoodItem, PreyItem, RivalState};

pub(crate) fn sort_ascending<T>(items: &mut [T], dist: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| dist(a).partial_cmp(&dist(b)).unwrap_or(Ordering::Equal));
}

pub fn filter_foods(foods: &[FoodItem], reference: Point, max_distance: f64) -> Vec<FoodSighting> {
    let mut sightings: Vec<FoodSighting> = foods
        .iter()
        .filter_map(|food| {
            let dist = distance(food.position, reference);
            (dist < max_distance).then(|| FoodSighting {
                x: food.position.x,
                y: food.position.y,
                value: food.value,
                dist,
            })
        })
        .collect();
    sort_ascending(&mut sightings, |s| s.dist);
    sightings
}

pub fn filter_preys(preys: &[PreyItem], reference: Point, max_distance: f64) -> Vec<PreySighting> {
    let mut sightings: Vec<PreySighting> = preys
        .iter()
        .filter_map(|prey| {
            let dist = distance(prey.position, reference);
            (dist < max_distance).then(|| PreySighting {
                x: prey.position.x,
                y: prey.position.y,
                dist,
            })
        })
        .collect();
    sort_ascending(&mut sightings, |s| s.dist);
    sightings
}

/// Body segments within `max_distance` of the reference, nearest first.
pub fn nearby_segments(
    segments: &[Point],
    reference: Point,
    max_distance: f64,
) -> Vec<SegmentSighting> {
    let mut sightings: Vec<SegmentSighting> = segments
        .iter()
        .filter_map(|segment| {
            let dist = distance(*segment, reference);
            (dist < max_distance).then(|| SegmentSighting {
                x: segment.x,
                y: segment.y,
                dist,
            })
        })
        .collect();
    sort_ascending(&mut sightings, |s| s.dist);
    sightings
}

/// The `top_n` globally nearest segments pooled across all rivals, not
/// grouped by owner. Rivals carrying the player's own id are discarded.
/// No distance cutoff: this is the flattened danger map.
pub fn pooled_rival_segments(
    rivals: &[(&RivalState, f64)],
    player_id: u64,
    reference: Point,
    top_n: usize,
) -> Vec<TopSegment> {
    let mut pooled = Vec::new();
    for (rival, size) in rivals {
        if rival.id == player_id {
            continue;
        }
        for segment in &rival.segments {
            pooled.push(TopSegment {
                x: segment.x,
                y: segment.y,
                dist: distance(*segment, reference),
                size: *size,
            });
        }
    }
    sort_ascending(&mut pooled, |s| s.dist);
    pooled.truncate(top_n);
    pooled
}
