use super::types::{PositionReport, TickInput, WorldSnapshot};
use super::world::SimulationWorld;
use crate::domain::{PeerLink, PeerTable, PeerUpdate, PositionCodec};
use rand::Rng;
use tracing::{debug, trace};

/// One participant's game loop: ingests remote positions, simulates the local world
/// and publishes telemetry over a `PeerLink`.
pub struct Session<L: PeerLink, C: PositionCodec, R: Rng> {
    local_id: u32,
    world: SimulationWorld<R>,
    peers: PeerTable,
    link: L,
    codec: C,
}

impl<L: PeerLink, C: PositionCodec, R: Rng> Session<L, C, R> {
    pub fn new(local_id: u32, world: SimulationWorld<R>, link: L, codec: C) -> Self {
        Self {
            local_id,
            world,
            peers: PeerTable::new(local_id),
            link,
            codec,
        }
    }

    /// Drains every frame queued since the last tick, then advances the world one step.
    pub fn tick(&mut self, input: &TickInput) -> Option<PositionReport> {
        self.ingest();

        let report = self.world.tick(input)?;
        let frame = self.codec.encode(&PeerUpdate {
            peer_id: self.local_id,
            position: report.position,
        });
        self.link.publish(&frame);
        Some(report)
    }

    fn ingest(&mut self) {
        for frame in self.link.drain_inbound() {
            match self.codec.decode(&frame.payload) {
                Ok(update) => {
                    if !self.peers.apply(update, frame.received_at) {
                        trace!(peer_id = update.peer_id, "ignored own position");
                    }
                }
                Err(err) => {
                    debug!(error = ?err, len = frame.payload.len(), "dropped malformed frame");
                }
            }
        }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.world.snapshot(self.peers.iter())
    }

    pub fn local_id(&self) -> u32 {
        self.local_id
    }

    pub fn peers(&self) -> &PeerTable {
        &self.peers
    }

    pub fn world(&self) -> &SimulationWorld<R> {
        &self.world
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }
}
