//! The per-frame entry point tying the pipeline together.
//!
//! Everything runs to completion inside one `on_frame` call on one logical
//! thread; the transport delivers inbound control vectors asynchronously
//! and the session reads the most recent one without waiting.

use crate::config::{self, SessionConfig};
use crate::control::{self, ControlVector, HostControls};
use crate::lifecycle::{FrameVerdict, Lifecycle};
use crate::observe::{self, Assembler, ObservationRecord};
use crate::protocol::OutboundMessage;
use crate::snapshot::WorldSnapshot;

/// Boundary to the message channel. Implementations must not block:
/// `send` hands the message off (returning false when the channel is not
/// open, in which case the message is simply dropped), `poll_control`
/// returns the most recently delivered control vector, if any arrived
/// since the last poll.
pub trait Transport {
    fn is_connected(&self) -> bool;
    fn send(&mut self, message: &OutboundMessage) -> bool;
    fn poll_control(&mut self) -> Option<ControlVector>;
    fn reconnect(&mut self);
}

/// Explicit session context: owns every piece of cross-frame state the
/// reference kept in page globals.
pub struct GymSession {
    cfg: SessionConfig,
    assembler: Assembler,
    lifecycle: Lifecycle,
    control: ControlVector,
    frame: u32,
    handshake_sent: bool,
    last_record: Option<ObservationRecord>,
}

impl GymSession {
    pub fn new(mut cfg: SessionConfig) -> Self {
        if cfg.sample_period == 0 {
            tracing::warn!(
                "sample_period must be >= 1; falling back to {}",
                config::SAMPLE_PERIOD_FRAMES
            );
            cfg.sample_period = config::SAMPLE_PERIOD_FRAMES;
        }
        Self {
            assembler: Assembler::new(&cfg),
            lifecycle: Lifecycle::new(cfg.reconnect_delay_ms),
            control: ControlVector::default(),
            frame: 0,
            handshake_sent: false,
            last_record: None,
            cfg,
        }
    }

    pub fn last_record(&self) -> Option<&ObservationRecord> {
        self.last_record.as_ref()
    }

    /// Runs one render frame: lifecycle check, observation sampling every
    /// `sample_period`th frame, control application. All failures are
    /// contained here; nothing propagates out to the render loop.
    pub fn on_frame(
        &mut self,
        world: &WorldSnapshot,
        host: &mut dyn HostControls,
        transport: &mut dyn Transport,
        now_ms: u64,
    ) {
        if self.lifecycle.poll_reconnect(now_ms) {
            tracing::info!("reconnect delay elapsed; starting a fresh episode");
            transport.reconnect();
            self.assembler.reset_baseline();
            self.handshake_sent = false;
            self.frame = 0;
        }

        // Not yet spawned, or channel closed: no transition, no output.
        if !transport.is_connected() {
            return;
        }
        let Some(player) = world.player.as_ref() else {
            return;
        };

        if !self.handshake_sent {
            self.send_or_drop(transport, &OutboundMessage::handshake());
            self.handshake_sent = true;
        }

        if let Some(vector) = transport.poll_control() {
            self.control = vector;
        }

        match self.lifecycle.observe_position(player.position) {
            FrameVerdict::Suspended => return,
            FrameVerdict::ReportDeath => {
                if let Some(last) = &self.last_record {
                    let terminal = observe::terminal_record(last);
                    self.send_or_drop(transport, &OutboundMessage::Update { payload: terminal });
                } else {
                    // Died before the first sampling tick; nothing to
                    // re-emit, but the episode still ends.
                    tracing::warn!("death inferred before any observation was emitted");
                }
                self.lifecycle.death_reported(now_ms);
                return;
            }
            FrameVerdict::Live => {}
        }

        self.frame += 1;
        if self.frame % self.cfg.sample_period == 0 {
            self.frame = 0;
            match self.assembler.assemble(player, world) {
                Ok(record) => {
                    self.send_or_drop(
                        transport,
                        &OutboundMessage::Update {
                            payload: record.clone(),
                        },
                    );
                    self.last_record = Some(record);
                }
                Err(err) => {
                    // Host data outside the configured tables; skip the
                    // tick rather than kill the render loop.
                    tracing::warn!(%err, "skipping observation tick");
                }
            }
        }

        control::apply(&self.control, self.cfg.steer_coefficient, host);
    }

    fn send_or_drop(&self, transport: &mut dyn Transport, message: &OutboundMessage) {
        if !transport.send(message) {
            tracing::warn!("transport not open; dropping outbound message");
        }
    }
}
