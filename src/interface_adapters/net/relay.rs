// Relay side of the link: every data frame a peer sends is forwarded verbatim to all
// other connected peers. The relay never parses payloads.

use crate::interface_adapters::http::ErrorResponse;
use crate::interface_adapters::state::RelayState;
use crate::interface_adapters::utils::rng::next_conn_id;

use axum::{
    Json, Router,
    extract::{
        ConnectInfo, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, PoisonError, RwLock},
};
use tokio::sync::{mpsc, watch};
use tracing::{Instrument, debug, info, info_span, warn};

/// Outbound queues of every connected peer, keyed by connection id.
#[derive(Debug)]
pub struct PeerRegistry {
    max_peers: usize,
    peers: RwLock<HashMap<u64, mpsc::UnboundedSender<Message>>>,
}

impl PeerRegistry {
    pub fn new(max_peers: usize) -> Self {
        Self {
            max_peers,
            peers: RwLock::new(HashMap::new()),
        }
    }

    /// Claims a slot, or `None` when the relay is full.
    pub fn register(self: &Arc<Self>) -> Option<PeerSlot> {
        let mut peers = self.peers.write().unwrap_or_else(PoisonError::into_inner);
        if peers.len() >= self.max_peers {
            return None;
        }
        let conn_id = next_conn_id();
        let (tx, rx) = mpsc::unbounded_channel();
        peers.insert(conn_id, tx);
        Some(PeerSlot {
            conn_id,
            registry: Arc::clone(self),
            outbound_rx: rx,
        })
    }

    fn unregister(&self, conn_id: u64) {
        self.peers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&conn_id);
    }

    /// Queues `msg` for every peer except `from`. Returns how many peers it went to.
    pub fn relay(&self, from: u64, msg: &Message) -> usize {
        let peers = self.peers.read().unwrap_or_else(PoisonError::into_inner);
        let mut delivered = 0;
        for (id, tx) in peers.iter() {
            if *id != from && tx.send(msg.clone()).is_ok() {
                delivered += 1;
            }
        }
        delivered
    }

    pub fn len(&self) -> usize {
        self.peers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_peers(&self) -> usize {
        self.max_peers
    }
}

/// A registered peer. Dropping it frees the slot, including when an upgrade never
/// completes.
#[derive(Debug)]
pub struct PeerSlot {
    conn_id: u64,
    registry: Arc<PeerRegistry>,
    outbound_rx: mpsc::UnboundedReceiver<Message>,
}

impl PeerSlot {
    pub fn conn_id(&self) -> u64 {
        self.conn_id
    }
}

impl Drop for PeerSlot {
    fn drop(&mut self) {
        self.registry.unregister(self.conn_id);
    }
}

pub fn relay_router(state: Arc<RelayState>) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(state)
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<Arc<RelayState>>,
) -> impl IntoResponse {
    let Some(slot) = state.registry.register() else {
        warn!(%addr, max_peers = state.registry.max_peers(), "relay full; rejecting peer");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "relay is full".to_string(),
            }),
        )
            .into_response();
    };

    let span = info_span!("peer", conn_id = slot.conn_id(), %addr);
    let shutdown_rx = state.shutdown_rx.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, slot, shutdown_rx).instrument(span))
}

async fn handle_socket(
    mut socket: WebSocket,
    mut slot: PeerSlot,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    info!(peers = slot.registry.len(), "peer connected");

    let mut frames_in: u64 = 0;
    // A stop requested before the upgrade finished still applies.
    let mut stopping = *shutdown_rx.borrow_and_update();

    while !stopping {
        tokio::select! {
            changed = shutdown_rx.changed() => {
                stopping = changed.is_err() || *shutdown_rx.borrow_and_update();
            }
            Some(msg) = slot.outbound_rx.recv() => {
                if let Err(e) = socket.send(msg).await {
                    debug!(error = %e, "send failed");
                    break;
                }
            }
            incoming = socket.recv() => match incoming {
                Some(Ok(msg @ (Message::Binary(_) | Message::Text(_)))) => {
                    frames_in += 1;
                    let len = payload_len(&msg);
                    let delivered = slot.registry.relay(slot.conn_id, &msg);
                    debug!(len, delivered, "relayed frame");
                }
                Some(Ok(Message::Close(_))) | None => break,
                // axum answers pings itself.
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(error = %e, "receive failed");
                    break;
                }
            },
        }
    }

    if stopping {
        let _ = socket
            .send(Message::Close(Some(CloseFrame {
                code: close_code::AWAY,
                reason: "relay shutting down".into(),
            })))
            .await;
    }

    let conn_id = slot.conn_id;
    drop(slot);
    info!(conn_id, frames_in, "peer disconnected");
}

fn payload_len(msg: &Message) -> usize {
    match msg {
        Message::Binary(bytes) => bytes.len(),
        Message::Text(text) => text.len(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_registry_is_full_then_register_refuses() {
        let registry = Arc::new(PeerRegistry::new(2));

        let a = registry.register();
        let b = registry.register();
        assert!(a.is_some() && b.is_some());
        assert!(registry.register().is_none());

        drop(a);
        assert_eq!(registry.len(), 1);
        assert!(registry.register().is_some());
    }

    #[test]
    fn when_frame_is_relayed_then_sender_does_not_get_it_back() {
        let registry = Arc::new(PeerRegistry::new(8));
        let mut a = registry.register().expect("slot a");
        let mut b = registry.register().expect("slot b");
        let mut c = registry.register().expect("slot c");

        let msg = Message::Binary(b"POS 1 2.00 3.00".to_vec().into());
        let delivered = registry.relay(a.conn_id(), &msg);

        assert_eq!(delivered, 2);
        assert!(a.outbound_rx.try_recv().is_err());
        assert_eq!(b.outbound_rx.try_recv().ok(), Some(msg.clone()));
        assert_eq!(c.outbound_rx.try_recv().ok(), Some(msg));
    }

    #[test]
    fn when_all_slots_drop_then_registry_is_empty() {
        let registry = Arc::new(PeerRegistry::new(4));
        let slots: Vec<_> = (0..4).filter_map(|_| registry.register()).collect();
        assert_eq!(registry.len(), 4);

        drop(slots);

        assert!(registry.is_empty());
    }
}
