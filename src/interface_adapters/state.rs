use crate::interface_adapters::net::PeerRegistry;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone)]
pub struct RelayState {
    // Connected peers and their outbound queues.
    pub registry: Arc<PeerRegistry>,
    // Flips to true when the relay is stopping; peer tasks close their sockets.
    pub shutdown_rx: watch::Receiver<bool>,
}
