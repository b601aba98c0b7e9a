use glam::Vec2;
use std::collections::HashMap;
use std::time::Instant;

/// A decoded position report from some participant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerUpdate {
    pub peer_id: u32,
    pub position: Vec2,
}

/// Last known position of a remote participant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerPosition {
    pub peer_id: u32,
    pub position: Vec2,
    pub updated_at: Instant,
}

/// Remote positions keyed by peer id. Owned by the simulation thread.
///
/// Entries are created on first sight and overwritten by later frames. They are never
/// evicted, so a peer that leaves stays at its last reported position.
#[derive(Debug)]
pub struct PeerTable {
    local_id: u32,
    peers: HashMap<u32, PeerPosition>,
}

impl PeerTable {
    pub fn new(local_id: u32) -> Self {
        Self {
            local_id,
            peers: HashMap::new(),
        }
    }

    pub fn local_id(&self) -> u32 {
        self.local_id
    }

    /// Records `update`. Returns false when it carries our own id and was ignored.
    pub fn apply(&mut self, update: PeerUpdate, received_at: Instant) -> bool {
        if update.peer_id == self.local_id {
            return false;
        }
        self.peers.insert(
            update.peer_id,
            PeerPosition {
                peer_id: update.peer_id,
                position: update.position,
                updated_at: received_at,
            },
        );
        true
    }

    pub fn get(&self, peer_id: u32) -> Option<&PeerPosition> {
        self.peers.get(&peer_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PeerPosition> {
        self.peers.values()
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(peer_id: u32, x: f32, y: f32) -> PeerUpdate {
        PeerUpdate {
            peer_id,
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn when_update_carries_own_id_then_table_is_unchanged() {
        let mut table = PeerTable::new(7);

        assert!(!table.apply(update(7, 1.0, 2.0), Instant::now()));
        assert!(table.is_empty());
    }

    #[test]
    fn when_same_peer_reports_twice_then_last_write_wins() {
        let mut table = PeerTable::new(1);
        let first = Instant::now();

        table.apply(update(2, 1.0, 1.0), first);
        table.apply(update(2, 5.0, -3.0), first);

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(2).map(|p| p.position), Some(Vec2::new(5.0, -3.0)));
    }

    #[test]
    fn when_several_peers_report_then_each_gets_an_entry() {
        let mut table = PeerTable::new(1);

        for id in 2..6 {
            table.apply(update(id, id as f32, 0.0), Instant::now());
        }

        assert_eq!(table.len(), 4);
        let mut ids: Vec<u32> = table.iter().map(|p| p.peer_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![2, 3, 4, 5]);
    }
}
