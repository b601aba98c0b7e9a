// Shared helpers for bringing up a relay and clients in integration tests.
#![allow(dead_code)]

use skirmish_net::domain::InboundFrame;
use skirmish_net::{ClientSettings, NetworkClient, RelayServer};
use std::time::{Duration, Instant};

pub const HOST: &str = "127.0.0.1";
pub const WAIT: Duration = Duration::from_secs(5);

// Start a relay on an ephemeral port and return it with the port it bound.
pub fn start_relay(max_peers: usize) -> (RelayServer, u16) {
    let mut relay = RelayServer::new().with_max_peers(max_peers);
    assert!(relay.start(0), "relay should start on an ephemeral port");
    let port = relay
        .local_addr()
        .expect("running relay has an address")
        .port();
    (relay, port)
}

pub fn client() -> NetworkClient {
    NetworkClient::new(ClientSettings {
        connect_timeout: Duration::from_secs(2),
        close_grace: Duration::from_millis(500),
        ..ClientSettings::default()
    })
}

// Connect a client and wait until the relay has registered it.
pub fn connect(relay: &RelayServer, port: u16) -> NetworkClient {
    let expected = relay.peer_count() + 1;
    let mut c = client();
    assert!(c.connect(HOST, port), "client should connect");
    wait_until(|| relay.peer_count() >= expected, "relay to register the client");
    c
}

// Poll `cond` until it holds or the shared timeout runs out.
pub fn wait_until(mut cond: impl FnMut() -> bool, what: &str) {
    let deadline = Instant::now() + WAIT;
    while !cond() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        std::thread::sleep(Duration::from_millis(10));
    }
}

// Collect frames until `count` have arrived.
pub fn wait_for_frames(client: &mut NetworkClient, count: usize) -> Vec<InboundFrame> {
    let mut frames = Vec::new();
    wait_until(
        || {
            frames.extend(client.drain_frames());
            frames.len() >= count
        },
        "frames to arrive",
    );
    frames
}
