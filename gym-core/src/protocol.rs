//! JSON wire contract with the learning agent.
//!
//! Message-oriented, bidirectional, asynchronous. Outbound: one `init`
//! handshake per connect, then one `update` per sampling tick (or at
//! death). Inbound: `update` messages carrying the latest control vector.

use serde::{Deserialize, Serialize};

use crate::control::ControlVector;
use crate::observe::ObservationRecord;

pub const HANDSHAKE_MESSAGE: &str = "Hello Server!";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutboundMessage {
    Init { message: String },
    Update { payload: ObservationRecord },
}

impl OutboundMessage {
    pub fn handshake() -> Self {
        Self::Init {
            message: HANDSHAKE_MESSAGE.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InboundMessage {
    Update { payload: ControlVector },
}

pub fn encode(message: &OutboundMessage) -> String {
    // Outbound types contain only plain data; encoding cannot fail.
    serde_json::to_string(message).expect("outbound message is always serializable")
}

/// Decodes one inbound message. A malformed message fails only itself: the
/// caller keeps the previously stored control vector.
pub fn decode_control(raw: &str) -> Option<ControlVector> {
    match serde_json::from_str::<InboundMessage>(raw) {
        Ok(InboundMessage::Update { payload }) => Some(payload),
        Err(err) => {
            tracing::warn!(%err, "ignoring malformed inbound message");
            None
        }
    }
}
