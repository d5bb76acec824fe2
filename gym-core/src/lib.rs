//! Observation distillation pipeline for a slither-style browser game.
//!
//! The host game exposes a read-only world snapshot once per render frame.
//! This crate boils each snapshot down to a bounded observation record for
//! an external learning agent, applies the agent's latest control vector
//! back into the game, and infers the player's death from stalled motion
//! when no explicit death event is available.
//!
//! The integration layer (page injection, websocket plumbing) is out of
//! scope: it calls [`session::GymSession::on_frame`] once per render frame
//! and implements the [`session::Transport`] and [`control::HostControls`]
//! traits at the boundary.

pub mod config;
pub mod control;
pub mod error;
pub mod filters;
pub mod geometry;
pub mod growth;
pub mod lifecycle;
pub mod mortality;
pub mod observe;
pub mod protocol;
pub mod session;
pub mod snapshot;
pub mod timer;

pub use config::SessionConfig;
pub use control::{ControlVector, HostControls};
pub use error::GymError;
pub use growth::GrowthTables;
pub use observe::ObservationRecord;
pub use protocol::{InboundMessage, OutboundMessage};
pub use session::{GymSession, Transport};
pub use snapshot::WorldSnapshot;
