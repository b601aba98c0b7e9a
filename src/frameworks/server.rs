// Relay server lifecycle: one service thread with its own runtime serving `/ws`.

use crate::frameworks::config;
use crate::interface_adapters::net::{NetError, PeerRegistry, relay_router};
use crate::interface_adapters::state::RelayState;

use axum::Router;
use std::net::SocketAddr;
use std::{io, sync::Arc, thread::JoinHandle, time::Duration};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::time::{Instant, sleep};
use tracing::{error, info, warn};

pub struct RelayServer {
    max_peers: usize,
    close_grace: Duration,
    registry: Option<Arc<PeerRegistry>>,
    shutdown_tx: Option<watch::Sender<bool>>,
    worker: Option<JoinHandle<()>>,
    local_addr: Option<SocketAddr>,
}

impl RelayServer {
    pub fn new() -> Self {
        Self {
            max_peers: config::MAX_PEERS,
            close_grace: config::DISCONNECT_GRACE,
            registry: None,
            shutdown_tx: None,
            worker: None,
            local_addr: None,
        }
    }

    pub fn with_max_peers(mut self, max_peers: usize) -> Self {
        self.max_peers = max_peers;
        self
    }

    /// Binds `0.0.0.0:port` (0 picks an ephemeral port) and starts relaying.
    pub fn start(&mut self, port: u16) -> bool {
        if self.worker.is_some() {
            return true;
        }
        match self.spawn(port) {
            Ok(addr) => {
                info!(%addr, max_peers = self.max_peers, "relay listening");
                true
            }
            Err(e) => {
                error!(port, error = %e, "relay failed to start");
                false
            }
        }
    }

    fn spawn(&mut self, port: u16) -> Result<SocketAddr, NetError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(NetError::Runtime)?;

        let listener = runtime
            .block_on(TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))))
            .map_err(NetError::Bind)?;
        let addr = listener.local_addr().map_err(NetError::Bind)?;

        let registry = Arc::new(PeerRegistry::new(self.max_peers));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let app = relay_router(Arc::new(RelayState {
            registry: registry.clone(),
            shutdown_rx: shutdown_rx.clone(),
        }));

        let worker = std::thread::Builder::new()
            .name("relay-service".into())
            .spawn({
                let registry = registry.clone();
                let close_grace = self.close_grace;
                move || {
                    runtime.block_on(serve(listener, app, shutdown_rx, registry, close_grace))
                }
            })
            .map_err(NetError::Thread)?;

        self.registry = Some(registry);
        self.shutdown_tx = Some(shutdown_tx);
        self.worker = Some(worker);
        self.local_addr = Some(addr);
        Ok(addr)
    }

    /// Asks every peer to close, then joins the service thread. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(true);
        }
        let Some(worker) = self.worker.take() else {
            return;
        };
        if worker.join().is_err() {
            error!("relay service thread panicked");
        }
        self.registry = None;
        self.local_addr = None;
        info!("relay stopped");
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    pub fn peer_count(&self) -> usize {
        self.registry.as_ref().map_or(0, |r| r.len())
    }
}

impl Default for RelayServer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RelayServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn serve(
    listener: TcpListener,
    app: Router,
    mut shutdown_rx: watch::Receiver<bool>,
    registry: Arc<PeerRegistry>,
    close_grace: Duration,
) {
    let signal = async move {
        let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
    };

    if let Err(e) = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(signal)
    .await
    {
        error!(error = %e, "relay server error");
    }

    // Upgraded sockets outlive `serve`; give them time to send their close frames
    // before the runtime is torn down.
    let deadline = Instant::now() + close_grace;
    while !registry.is_empty() {
        if Instant::now() >= deadline {
            warn!(peers = registry.len(), "peers still connected at shutdown");
            break;
        }
        sleep(Duration::from_millis(10)).await;
    }
}

/// Runs a relay on `port` until Ctrl-C.
pub fn run_relay(port: u16) -> io::Result<()> {
    let mut server = RelayServer::new();
    if !server.start(port) {
        return Err(io::Error::other(format!("relay failed to start on port {port}")));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(tokio::signal::ctrl_c())?;

    info!("shutdown requested");
    server.stop();
    Ok(())
}
