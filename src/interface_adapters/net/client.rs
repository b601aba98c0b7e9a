use super::NetError;
use crate::domain::{InboundFrame, PeerLink};

use futures_util::{SinkExt, StreamExt};
use std::{
    sync::{
        Arc,
        atomic::{AtomicU8, Ordering},
    },
    thread::JoinHandle,
    time::Duration,
};
use tokio::net::TcpStream;
use tokio::sync::{Notify, mpsc};
use tokio::time::timeout;
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, Message},
};
use tracing::{debug, error, info, warn};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChannelState {
    Disconnected = 0,
    Connecting = 1,
    Connected = 2,
}

impl ChannelState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ChannelState::Connecting,
            2 => ChannelState::Connected,
            _ => ChannelState::Disconnected,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClientSettings {
    pub connect_timeout: Duration,
    pub close_grace: Duration,
    pub inbound_capacity: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            close_grace: Duration::from_secs(3),
            inbound_capacity: 1024,
        }
    }
}

/// Client end of the relay link.
///
/// All socket I/O happens on one background thread that owns its own tokio runtime.
/// The simulation thread only queues outbound frames and drains inbound ones.
pub struct NetworkClient {
    settings: ClientSettings,
    state: Arc<AtomicU8>,
    outbound_tx: Option<mpsc::UnboundedSender<Message>>,
    inbound_rx: Option<mpsc::Receiver<InboundFrame>>,
    shutdown: Arc<Notify>,
    worker: Option<JoinHandle<()>>,
}

impl NetworkClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            settings,
            state: Arc::new(AtomicU8::new(ChannelState::Disconnected as u8)),
            outbound_tx: None,
            inbound_rx: None,
            shutdown: Arc::new(Notify::new()),
            worker: None,
        }
    }

    pub fn state(&self) -> ChannelState {
        ChannelState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ChannelState::Connected
    }

    fn set_state(&self, state: ChannelState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Single connection attempt, blocking for at most the connect timeout.
    pub fn connect(&mut self, host: &str, port: u16) -> bool {
        if self.is_connected() {
            return true;
        }
        // Reap a service thread left over from a dropped connection.
        self.disconnect();

        self.set_state(ChannelState::Connecting);
        match self.open(host, port) {
            Ok(()) => {
                info!(%host, port, "connected to relay");
                true
            }
            Err(e) => {
                warn!(%host, port, error = %e, "failed to connect to relay");
                self.set_state(ChannelState::Disconnected);
                false
            }
        }
    }

    fn open(&mut self, host: &str, port: u16) -> Result<(), NetError> {
        let url = format!("ws://{host}:{port}/ws");
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(NetError::Runtime)?;

        // The timer has to be created inside the runtime.
        let connect_timeout = self.settings.connect_timeout;
        let (stream, _response) = runtime
            .block_on(async { timeout(connect_timeout, connect_async(url.as_str())).await })
            .map_err(|_| NetError::ConnectTimeout)?
            .map_err(NetError::Handshake)?;

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::channel(self.settings.inbound_capacity);
        let shutdown = Arc::new(Notify::new());

        // Connected before the thread starts so an immediate drop is observed by `state()`.
        self.set_state(ChannelState::Connected);

        let service = ServiceLoop {
            stream,
            outbound_rx,
            inbound_tx,
            shutdown: shutdown.clone(),
            state: self.state.clone(),
            close_grace: self.settings.close_grace,
        };
        let worker = std::thread::Builder::new()
            .name("net-client".into())
            .spawn(move || runtime.block_on(service.run()))
            .map_err(NetError::Thread)?;

        self.outbound_tx = Some(outbound_tx);
        self.inbound_rx = Some(inbound_rx);
        self.shutdown = shutdown;
        self.worker = Some(worker);
        Ok(())
    }

    /// Queues `bytes` as one binary frame. Dropped silently when not connected.
    pub fn send(&self, bytes: &[u8]) {
        if !self.is_connected() {
            return;
        }
        if let Some(tx) = &self.outbound_tx {
            let _ = tx.send(Message::binary(bytes.to_vec()));
        }
    }

    /// Everything received since the last call, oldest first.
    pub fn drain_frames(&mut self) -> Vec<InboundFrame> {
        let mut frames = Vec::new();
        if let Some(rx) = self.inbound_rx.as_mut() {
            while let Ok(frame) = rx.try_recv() {
                frames.push(frame);
            }
        }
        frames
    }

    /// Closes the link and joins the service thread. Safe to call repeatedly.
    pub fn disconnect(&mut self) {
        if let Some(worker) = self.worker.take() {
            self.shutdown.notify_one();
            if worker.join().is_err() {
                error!("network client thread panicked");
            }
            info!("disconnected from relay");
        }
        self.outbound_tx = None;
        self.inbound_rx = None;
        self.set_state(ChannelState::Disconnected);
    }
}

impl Default for NetworkClient {
    fn default() -> Self {
        Self::new(ClientSettings::default())
    }
}

impl Drop for NetworkClient {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl PeerLink for NetworkClient {
    fn publish(&self, frame: &[u8]) {
        self.send(frame);
    }

    fn drain_inbound(&mut self) -> Vec<InboundFrame> {
        self.drain_frames()
    }
}

struct ServiceLoop {
    stream: WsStream,
    outbound_rx: mpsc::UnboundedReceiver<Message>,
    inbound_tx: mpsc::Sender<InboundFrame>,
    shutdown: Arc<Notify>,
    state: Arc<AtomicU8>,
    close_grace: Duration,
}

impl ServiceLoop {
    async fn run(mut self) {
        loop {
            tokio::select! {
                _ = self.shutdown.notified() => {
                    self.close().await;
                    break;
                }
                Some(msg) = self.outbound_rx.recv() => {
                    if let Err(e) = self.stream.send(msg).await {
                        warn!(error = %e, "send failed; dropping connection");
                        break;
                    }
                }
                incoming = self.stream.next() => {
                    let payload = match incoming {
                        Some(Ok(Message::Binary(bytes))) => bytes.to_vec(),
                        Some(Ok(Message::Text(text))) => text.as_bytes().to_vec(),
                        Some(Ok(Message::Close(frame))) => {
                            info!(?frame, "relay closed the connection");
                            break;
                        }
                        // Ping/pong are answered by tungstenite.
                        Some(Ok(_)) => continue,
                        Some(Err(e)) => {
                            warn!(error = %e, "receive failed; dropping connection");
                            break;
                        }
                        None => {
                            info!("relay connection ended");
                            break;
                        }
                    };

                    // Wait for queue space, but stay responsive to disconnect.
                    tokio::select! {
                        sent = self.inbound_tx.send(InboundFrame::new(payload)) => {
                            if sent.is_err() {
                                break;
                            }
                        }
                        _ = self.shutdown.notified() => {
                            self.close().await;
                            break;
                        }
                    }
                }
            }
        }

        self.state
            .store(ChannelState::Disconnected as u8, Ordering::Release);
    }

    async fn close(&mut self) {
        let stream = &mut self.stream;
        let handshake = async {
            stream.close(None).await?;
            while let Some(msg) = stream.next().await {
                if let Message::Close(_) = msg? {
                    break;
                }
            }
            Ok::<(), tungstenite::Error>(())
        };

        match timeout(self.close_grace, handshake).await {
            Ok(Ok(())) => debug!("close handshake completed"),
            Ok(Err(e)) => debug!(error = %e, "close handshake failed"),
            Err(_) => warn!(
                grace_ms = self.close_grace.as_millis() as u64,
                "close handshake timed out"
            ),
        }
    }
}
