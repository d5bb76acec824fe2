use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use slither_gym_core::control::{ControlVector, HostControls};
use slither_gym_core::observe::ObservationRecord;
use slither_gym_core::protocol::OutboundMessage;
use slither_gym_core::session::{GymSession, Transport};
use slither_gym_core::SessionConfig;

use crate::trace::TraceEvent;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunReport {
    pub frames: u64,
    pub control_updates: u64,
    pub observations: u64,
    pub deaths_reported: u64,
    pub handshakes: u64,
    pub reconnects: u64,
    pub dropped_messages: u64,
    pub final_steer: (f64, f64),
    pub final_acceleration: bool,
}

pub struct RunArtifact {
    pub report: RunReport,
    pub records: Vec<ObservationRecord>,
}

/// Transport double: collects outbound messages and delivers queued
/// control vectors one per poll, matching the one-round-trip staleness of
/// the live channel.
#[derive(Default)]
struct ReplayTransport {
    connected: bool,
    inbound: VecDeque<ControlVector>,
    records: Vec<ObservationRecord>,
    handshakes: u64,
    reconnects: u64,
    dropped: u64,
}

impl Transport for ReplayTransport {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn send(&mut self, message: &OutboundMessage) -> bool {
        if !self.connected {
            self.dropped += 1;
            return false;
        }
        match message {
            OutboundMessage::Init { .. } => self.handshakes += 1,
            OutboundMessage::Update { payload } => self.records.push(payload.clone()),
        }
        true
    }

    fn poll_control(&mut self) -> Option<ControlVector> {
        self.inbound.pop_front()
    }

    fn reconnect(&mut self) {
        self.connected = true;
        self.reconnects += 1;
    }
}

#[derive(Default)]
struct ReplayHost {
    steer: (f64, f64),
    acceleration: bool,
}

impl HostControls for ReplayHost {
    fn steer(&mut self, xm: f64, ym: f64) {
        self.steer = (xm, ym);
    }

    fn set_acceleration(&mut self, on: bool) {
        self.acceleration = on;
    }
}

/// Replays a trace through a fresh session.
pub fn run_trace(events: &[TraceEvent], cfg: SessionConfig) -> RunArtifact {
    let mut session = GymSession::new(cfg);
    let mut transport = ReplayTransport {
        connected: true,
        ..ReplayTransport::default()
    };
    let mut host = ReplayHost::default();
    let mut frames = 0u64;
    let mut control_updates = 0u64;

    for event in events {
        match event {
            TraceEvent::Control { vector } => {
                transport.inbound.push_back(*vector);
                control_updates += 1;
            }
            TraceEvent::Frame { now_ms, world } => {
                session.on_frame(world, &mut host, &mut transport, *now_ms);
                frames += 1;
            }
        }
    }

    let deaths_reported = transport
        .records
        .iter()
        .filter(|record| record.player.dead)
        .count() as u64;

    RunArtifact {
        report: RunReport {
            frames,
            control_updates,
            observations: transport.records.len() as u64,
            deaths_reported,
            handshakes: transport.handshakes,
            reconnects: transport.reconnects,
            dropped_messages: transport.dropped,
            final_steer: host.steer,
            final_acceleration: host.acceleration,
        },
        records: transport.records,
    }
}

/// Writes the emitted observation stream as JSONL.
pub fn write_observations(path: &Path, records: &[ObservationRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating {}", parent.display()))?;
    }
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record)?);
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("failed writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use slither_gym_core::geometry::Point;
    use slither_gym_core::growth::GrowthTables;
    use slither_gym_core::snapshot::{Growth, PlayerState, WorldSnapshot};

    fn frame(now_ms: u64, x: f64) -> TraceEvent {
        TraceEvent::Frame {
            now_ms,
            world: WorldSnapshot {
                player: Some(PlayerState {
                    id: 1,
                    position: Point::new(x, 0.0),
                    heading: 0.0,
                    growth: Growth {
                        tier: 1,
                        fraction: 0.5,
                    },
                    segments: Vec::new(),
                }),
                ..WorldSnapshot::default()
            },
        }
    }

    fn config() -> SessionConfig {
        SessionConfig::with_reference_cadence(GrowthTables::linear(8))
    }

    #[test]
    fn replay_counts_frames_and_observations() {
        let mut events = vec![TraceEvent::Control {
            vector: ControlVector {
                xt: 1.0,
                yt: 0.0,
                acceleration: false,
            },
        }];
        for i in 0..20 {
            events.push(frame(i * 16, i as f64));
        }

        let artifact = run_trace(&events, config());
        assert_eq!(artifact.report.frames, 20);
        assert_eq!(artifact.report.control_updates, 1);
        assert_eq!(artifact.report.observations, 2);
        assert_eq!(artifact.report.handshakes, 1);
        assert_eq!(artifact.report.deaths_reported, 0);
        assert_eq!(artifact.report.final_steer, (10_000.0, 0.0));
    }

    #[test]
    fn stalled_trace_reports_one_death() {
        let mut events = Vec::new();
        for i in 0..10 {
            events.push(frame(i * 16, i as f64));
        }
        // Stalled frames at the same position.
        for i in 10..15 {
            events.push(frame(i * 16, 9.0));
        }

        let artifact = run_trace(&events, config());
        assert_eq!(artifact.report.deaths_reported, 1);
        assert!(artifact.records.last().unwrap().player.dead);
    }

    #[test]
    fn observations_round_trip_through_jsonl() {
        let events: Vec<TraceEvent> = (0..10).map(|i| frame(i * 16, i as f64)).collect();
        let artifact = run_trace(&events, config());
        assert_eq!(artifact.records.len(), 1);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("observations.jsonl");
        write_observations(&path, &artifact.records).unwrap();

        let data = fs::read_to_string(&path).unwrap();
        let parsed: ObservationRecord = serde_json::from_str(data.lines().next().unwrap()).unwrap();
        assert_eq!(parsed, artifact.records[0]);
    }
}
