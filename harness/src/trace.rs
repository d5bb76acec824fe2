//! JSONL frame traces.
//!
//! One event per line: `frame` events carry a full world snapshot and the
//! frame timestamp, `control` events inject an inbound control vector that
//! the transport delivers before the next frame.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use slither_gym_core::control::ControlVector;
use slither_gym_core::snapshot::WorldSnapshot;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TraceEvent {
    Frame {
        now_ms: u64,
        world: WorldSnapshot,
    },
    Control {
        #[serde(flatten)]
        vector: ControlVector,
    },
}

pub fn load_trace(path: &Path) -> Result<Vec<TraceEvent>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading trace {}", path.display()))?;
    let mut events = Vec::new();
    for (index, line) in data.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let event: TraceEvent = serde_json::from_str(trimmed)
            .with_context(|| format!("{}:{}: invalid trace event", path.display(), index + 1))?;
        events.push(event);
    }
    Ok(events)
}
