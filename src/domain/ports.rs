// Ports the session uses to talk to the outside world.

use crate::domain::peers::PeerUpdate;
use std::time::Instant;

/// One raw frame as it came off the wire, stamped when the receive side saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundFrame {
    pub payload: Vec<u8>,
    pub received_at: Instant,
}

impl InboundFrame {
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
            received_at: Instant::now(),
        }
    }
}

/// Transport seen from the simulation thread.
///
/// `publish` must not block; `drain_inbound` returns everything queued since the last
/// call, in arrival order.
pub trait PeerLink {
    fn publish(&self, frame: &[u8]);
    fn drain_inbound(&mut self) -> Vec<InboundFrame>;
}

/// Encodes and decodes position frames.
pub trait PositionCodec {
    type Error: std::fmt::Debug;

    fn encode(&self, update: &PeerUpdate) -> Vec<u8>;
    fn decode(&self, payload: &[u8]) -> Result<PeerUpdate, Self::Error>;
}
