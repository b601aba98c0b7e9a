use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONN_ID: AtomicU64 = AtomicU64::new(1);

/// Id for a relay connection, unique within this process. Used to skip the sender when
/// fanning out and to tag the peer's log span.
pub fn next_conn_id() -> u64 {
    NEXT_CONN_ID.fetch_add(1, Ordering::Relaxed)
}

/// Random session id a client stamps on its `POS` frames.
///
/// Ids are not coordinated between clients; two sessions picking the same id would
/// suppress each other's frames.
pub fn random_peer_id() -> u32 {
    rand::rng().random()
}
