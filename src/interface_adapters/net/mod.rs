// Network adapters: the WebSocket client link and the relay's socket handling.

pub mod client;
pub mod relay;

pub use client::{ChannelState, ClientSettings, NetworkClient};
pub use relay::{PeerRegistry, relay_router};

use std::{fmt, io};
use tokio_tungstenite::tungstenite;

#[derive(Debug)]
pub enum NetError {
    // Categorizes start/connect failures; callers only see a bool.
    Runtime(io::Error),
    Bind(io::Error),
    Thread(io::Error),
    ConnectTimeout,
    Handshake(tungstenite::Error),
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::Runtime(err) => write!(f, "failed to build runtime: {err}"),
            NetError::Bind(err) => write!(f, "failed to bind: {err}"),
            NetError::Thread(err) => write!(f, "failed to spawn service thread: {err}"),
            NetError::ConnectTimeout => write!(f, "connect timed out"),
            NetError::Handshake(err) => write!(f, "websocket handshake failed: {err}"),
        }
    }
}

impl std::error::Error for NetError {}
