use std::collections::VecDeque;

use slither_gym_core::config::SessionConfig;
use slither_gym_core::control::{ControlVector, HostControls};
use slither_gym_core::geometry::Point;
use slither_gym_core::growth::GrowthTables;
use slither_gym_core::observe::Assembler;
use slither_gym_core::protocol::OutboundMessage;
use slither_gym_core::session::{GymSession, Transport};
use slither_gym_core::snapshot::{FoodItem, Growth, PlayerState, RivalState, WorldSnapshot};

#[derive(Default)]
struct FakeTransport {
    connected: bool,
    pending: VecDeque<ControlVector>,
    sent: Vec<OutboundMessage>,
    reconnects: u32,
}

impl FakeTransport {
    fn open() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    fn updates(&self) -> Vec<&slither_gym_core::ObservationRecord> {
        self.sent
            .iter()
            .filter_map(|message| match message {
                OutboundMessage::Update { payload } => Some(payload),
                OutboundMessage::Init { .. } => None,
            })
            .collect()
    }

    fn init_count(&self) -> usize {
        self.sent
            .iter()
            .filter(|message| matches!(message, OutboundMessage::Init { .. }))
            .count()
    }
}

impl Transport for FakeTransport {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn send(&mut self, message: &OutboundMessage) -> bool {
        if !self.connected {
            return false;
        }
        self.sent.push(message.clone());
        true
    }

    fn poll_control(&mut self) -> Option<ControlVector> {
        self.pending.pop_front()
    }

    fn reconnect(&mut self) {
        self.connected = true;
        self.reconnects += 1;
    }
}

#[derive(Default)]
struct FakeHost {
    steer: (f64, f64),
    acceleration: bool,
    applications: u32,
}

impl HostControls for FakeHost {
    fn steer(&mut self, xm: f64, ym: f64) {
        self.steer = (xm, ym);
        self.applications += 1;
    }

    fn set_acceleration(&mut self, on: bool) {
        self.acceleration = on;
    }
}

fn tables() -> GrowthTables {
    GrowthTables::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 1.0, 1.0, 1.0]).unwrap()
}

fn reference_config() -> SessionConfig {
    SessionConfig::with_reference_cadence(tables())
}

fn player_at(x: f64, y: f64) -> PlayerState {
    PlayerState {
        id: 1,
        position: Point::new(x, y),
        heading: 0.5,
        growth: Growth {
            tier: 2,
            fraction: 0.5,
        },
        segments: vec![Point::new(x - 10.0, y), Point::new(x - 20.0, y)],
    }
}

fn rival_at(id: u64, x: f64, y: f64, dead: bool) -> RivalState {
    RivalState {
        id,
        position: Point::new(x, y),
        heading: 1.0,
        growth: Growth {
            tier: 1,
            fraction: 0.0,
        },
        segments: vec![Point::new(x + 5.0, y), Point::new(x + 15.0, y)],
        dead,
    }
}

fn food_at(x: f64, y: f64, value: f64) -> FoodItem {
    FoodItem {
        position: Point::new(x, y),
        value,
    }
}

/// Runs `frames` render frames, nudging the player each frame so the stall
/// heuristic never triggers.
fn run_moving_frames(
    session: &mut GymSession,
    world: &mut WorldSnapshot,
    host: &mut FakeHost,
    transport: &mut FakeTransport,
    frames: u32,
    now_ms: &mut u64,
) {
    for _ in 0..frames {
        if let Some(player) = world.player.as_mut() {
            player.position.x += 1.0;
        }
        session.on_frame(world, host, transport, *now_ms);
        *now_ms += 16;
    }
}

#[test]
fn handshake_then_one_update_per_sampling_period() {
    let mut session = GymSession::new(reference_config());
    let mut world = WorldSnapshot {
        player: Some(player_at(100.0, 100.0)),
        rivals: vec![rival_at(2, 150.0, 100.0, false)],
        foods: vec![food_at(100.0, 1099.0, 2.5)],
        ..WorldSnapshot::default()
    };
    let mut host = FakeHost::default();
    let mut transport = FakeTransport::open();
    let mut now = 0;

    run_moving_frames(
        &mut session, &mut world, &mut host, &mut transport, 20, &mut now,
    );

    assert_eq!(transport.init_count(), 1);
    let updates = transport.updates();
    assert_eq!(updates.len(), 2);

    let record = updates[0];
    assert!(!record.player.dead);
    assert_eq!(record.player.size, 17.0);
    assert_eq!(record.rivals.len(), 1);
    assert!(!record.rivals[0].dead);
    assert_eq!(record.foods.len(), 1);
    assert_eq!(record.foods[0].value, 2.5);
}

#[test]
fn food_boundary_is_strict() {
    let mut session = GymSession::new(reference_config());
    let mut world = WorldSnapshot {
        player: Some(player_at(0.0, 0.0)),
        foods: vec![food_at(0.0, 999.0, 1.0), food_at(0.0, 1000.0, 1.0)],
        ..WorldSnapshot::default()
    };
    let mut host = FakeHost::default();
    let mut transport = FakeTransport::open();
    let mut now = 0;

    run_moving_frames(
        &mut session, &mut world, &mut host, &mut transport, 10, &mut now,
    );

    let updates = transport.updates();
    assert_eq!(updates.len(), 1);
    // The player drifted +10 on x; both foods sit on the y axis, so their
    // distances grew slightly above 999/1000 and the near one stays inside
    // the cutoff while the far one stays outside.
    assert_eq!(updates[0].foods.len(), 1);
    assert!(updates[0].foods[0].dist < 1000.0);
}

#[test]
fn rival_beyond_range_is_not_reported_but_segments_feed_danger_map() {
    let mut cfg = reference_config();
    cfg.sample_period = 1;
    let mut session = GymSession::new(cfg);
    let mut world = WorldSnapshot {
        player: Some(player_at(0.0, 0.0)),
        rivals: vec![rival_at(2, 2500.0, 0.0, false)],
        ..WorldSnapshot::default()
    };
    let mut host = FakeHost::default();
    let mut transport = FakeTransport::open();
    let mut now = 0;

    run_moving_frames(
        &mut session, &mut world, &mut host, &mut transport, 1, &mut now,
    );

    let updates = transport.updates();
    assert_eq!(updates.len(), 1);
    assert!(updates[0].rivals.is_empty());
    // Danger map has no distance cutoff.
    assert_eq!(updates[0].top_body_segments.len(), 2);
    // The focus target is the nearest rival regardless of summary range.
    let focus = updates[0].nearest_rival_focus.as_ref().unwrap();
    assert_eq!(focus.x, 2500.0);
    assert!(focus.parts.is_empty(), "segments beyond 2000 are dropped");
}

#[test]
fn dead_rival_reported_once_then_suppressed_for_sixty_ticks() {
    let mut cfg = reference_config();
    cfg.sample_period = 1;
    let mut session = GymSession::new(cfg);
    let mut world = WorldSnapshot {
        player: Some(player_at(100.0, 100.0)),
        rivals: vec![rival_at(2, 150.0, 100.0, true)],
        ..WorldSnapshot::default()
    };
    let mut host = FakeHost::default();
    let mut transport = FakeTransport::open();
    let mut now = 0;

    run_moving_frames(
        &mut session, &mut world, &mut host, &mut transport, 62, &mut now,
    );

    let updates = transport.updates();
    assert_eq!(updates.len(), 62);

    // Death tick: reported with the death flag set.
    assert_eq!(updates[0].rivals.len(), 1);
    assert!(updates[0].rivals[0].dead);

    // Exactly the next 60 ticks: absent entirely.
    for (tick, record) in updates.iter().enumerate().take(61).skip(1) {
        assert!(record.rivals.is_empty(), "tick {tick} must suppress");
        assert!(record.nearest_rival_focus.is_none());
        assert!(record.top_body_segments.is_empty());
    }

    // Tick 61: still in the snapshot, so it reappears.
    assert_eq!(updates[61].rivals.len(), 1);
}

#[test]
fn stall_emits_exactly_one_terminal_record_then_reconnects() {
    let mut session = GymSession::new(reference_config());
    let mut world = WorldSnapshot {
        player: Some(player_at(100.0, 100.0)),
        ..WorldSnapshot::default()
    };
    let mut host = FakeHost::default();
    let mut transport = FakeTransport::open();
    let mut now = 0;

    run_moving_frames(
        &mut session, &mut world, &mut host, &mut transport, 10, &mut now,
    );
    assert_eq!(transport.updates().len(), 1);
    let live_size = transport.updates()[0].player.size;

    // Stalled frames: one terminal record, then silence.
    for _ in 0..5 {
        session.on_frame(&world, &mut host, &mut transport, now);
        now += 16;
    }
    let updates = transport.updates();
    assert_eq!(updates.len(), 2);
    let terminal = updates[1];
    assert!(terminal.player.dead);
    assert_eq!(terminal.player.size, live_size);
    assert_eq!(transport.reconnects, 0);

    // Reconnect fires after the fixed delay.
    now += 5_000;
    session.on_frame(&world, &mut host, &mut transport, now);
    assert_eq!(transport.reconnects, 1);
    assert_eq!(transport.init_count(), 2);

    // First tick of the new episode reports a zero delta.
    run_moving_frames(
        &mut session, &mut world, &mut host, &mut transport, 10, &mut now,
    );
    let updates = transport.updates();
    assert_eq!(updates.len(), 3);
    assert_eq!(updates[2].player.food_eaten, 0.0);
    assert!(!updates[2].player.dead);
}

#[test]
fn control_vector_applied_every_live_frame() {
    let mut session = GymSession::new(reference_config());
    let mut world = WorldSnapshot {
        player: Some(player_at(0.0, 0.0)),
        ..WorldSnapshot::default()
    };
    let mut host = FakeHost::default();
    let mut transport = FakeTransport::open();
    transport.pending.push_back(ControlVector {
        xt: 0.5,
        yt: -1.0,
        acceleration: true,
    });
    let mut now = 0;

    run_moving_frames(
        &mut session, &mut world, &mut host, &mut transport, 3, &mut now,
    );

    assert_eq!(host.applications, 3);
    assert_eq!(host.steer, (5_000.0, -10_000.0));
    assert!(host.acceleration);
}

#[test]
fn absent_player_skips_frame_entirely() {
    let mut session = GymSession::new(reference_config());
    let world = WorldSnapshot::default();
    let mut host = FakeHost::default();
    let mut transport = FakeTransport::open();

    for frame in 0..20 {
        session.on_frame(&world, &mut host, &mut transport, frame * 16);
    }

    assert!(transport.sent.is_empty());
    assert_eq!(host.applications, 0);
}

#[test]
fn assembler_is_idempotent_apart_from_the_delta() {
    let cfg = reference_config();
    let mut assembler = Assembler::new(&cfg);
    let player = player_at(100.0, 100.0);
    let world = WorldSnapshot {
        player: Some(player.clone()),
        rivals: vec![rival_at(2, 150.0, 100.0, false)],
        foods: vec![food_at(120.0, 100.0, 1.0)],
        ..WorldSnapshot::default()
    };

    let first = assembler.assemble(&player, &world).unwrap();
    let second = assembler.assemble(&player, &world).unwrap();

    assert_eq!(first.player.food_eaten, 0.0);
    assert_eq!(second.player.food_eaten, 0.0);
    let mut first_rest = first.clone();
    first_rest.player.food_eaten = second.player.food_eaten;
    assert_eq!(first_rest, second);
}

#[test]
fn nearest_rival_focus_ranks_segments_against_the_head() {
    let mut cfg = reference_config();
    cfg.sample_period = 1;
    cfg.focus_segment_cap = 1;
    let mut session = GymSession::new(cfg);
    let near = RivalState {
        segments: vec![Point::new(400.0, 0.0), Point::new(60.0, 0.0)],
        ..rival_at(2, 300.0, 0.0, false)
    };
    let far = rival_at(3, 1500.0, 0.0, false);
    let mut world = WorldSnapshot {
        player: Some(player_at(0.0, 0.0)),
        rivals: vec![far, near],
        ..WorldSnapshot::default()
    };
    let mut host = FakeHost::default();
    let mut transport = FakeTransport::open();
    let mut now = 0;

    run_moving_frames(
        &mut session, &mut world, &mut host, &mut transport, 1, &mut now,
    );

    let updates = transport.updates();
    let focus = updates[0].nearest_rival_focus.as_ref().unwrap();
    assert_eq!(focus.x, 300.0);
    // Capped to one segment, and it is the nearest one.
    assert_eq!(focus.parts.len(), 1);
    assert_eq!(focus.parts[0].x, 60.0);
}

#[test]
fn zero_sample_period_falls_back_to_reference_cadence() {
    let cfg: SessionConfig = serde_json::from_str(
        r#"{
            "growth": {"level_size": [0.0, 1.0, 2.0, 3.0], "level_multiplier": [1.0, 1.0, 1.0, 1.0]},
            "sample_period": 0
        }"#,
    )
    .unwrap();
    let mut session = GymSession::new(cfg);
    let mut world = WorldSnapshot {
        player: Some(player_at(100.0, 100.0)),
        ..WorldSnapshot::default()
    };
    let mut host = FakeHost::default();
    let mut transport = FakeTransport::open();
    let mut now = 0;

    run_moving_frames(
        &mut session, &mut world, &mut host, &mut transport, 20, &mut now,
    );

    // Samples at the reference every-10th-frame cadence instead of dying
    // on the degenerate period.
    assert_eq!(transport.updates().len(), 2);
}

#[test]
fn own_body_parts_keep_body_order() {
    let cfg = reference_config();
    let mut assembler = Assembler::new(&cfg);
    let player = PlayerState {
        // Tail segment closer to the head than the neck segment.
        segments: vec![Point::new(50.0, 0.0), Point::new(10.0, 0.0)],
        ..player_at(0.0, 0.0)
    };
    let world = WorldSnapshot {
        player: Some(player.clone()),
        ..WorldSnapshot::default()
    };

    let record = assembler.assemble(&player, &world).unwrap();

    let parts = &record.player.parts;
    assert_eq!(parts.len(), 2);
    assert_eq!((parts[0].x, parts[0].dist), (50.0, 50.0));
    assert_eq!((parts[1].x, parts[1].dist), (10.0, 10.0));
}

#[test]
fn observation_record_keeps_the_wire_field_names() {
    let cfg = reference_config();
    let mut assembler = Assembler::new(&cfg);
    let player = player_at(100.0, 100.0);
    let world = WorldSnapshot {
        player: Some(player.clone()),
        rivals: vec![rival_at(2, 150.0, 100.0, false)],
        ..WorldSnapshot::default()
    };

    let record = assembler.assemble(&player, &world).unwrap();
    let value = serde_json::to_value(&record).unwrap();

    assert!(value.get("slither").is_some());
    assert!(value.get("target_slither").is_some());
    assert!(value.get("others").is_some());
    assert!(value.get("top_body_parts").is_some());
    assert!(value.get("foods").is_some());
    assert!(value.get("preys").is_some());
    assert!(value["slither"].get("food_eaten").is_some());
    assert!(value["slither"].get("ang").is_some());
    assert_eq!(value["others"][0]["dist"], 50.0);
}
