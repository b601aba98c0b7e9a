// Headless participant: ticks the default world at a fixed cadence with idle input and
// broadcasts telemetry until the relay goes away.

use crate::frameworks::config;
use crate::interface_adapters::net::{ClientSettings, NetworkClient};
use crate::interface_adapters::protocol::TextCodec;
use crate::interface_adapters::utils::rng::random_peer_id;
use crate::use_cases::{Session, SimulationWorld, TickInput, WorldSettings};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io;
use std::time::Instant;
use tracing::{info, warn};

pub fn client_settings() -> ClientSettings {
    ClientSettings {
        connect_timeout: config::CONNECT_TIMEOUT,
        close_grace: config::DISCONNECT_GRACE,
        inbound_capacity: config::INBOUND_QUEUE_CAPACITY,
    }
}

pub fn run_client(host: &str, port: u16) -> io::Result<()> {
    let tuning = config::load_tuning().map_err(io::Error::other)?;
    let settings = WorldSettings {
        tuning,
        telemetry_interval: config::TELEMETRY_INTERVAL,
        ..WorldSettings::default()
    };

    let mut link = NetworkClient::new(client_settings());
    if !link.connect(host, port) {
        return Err(io::Error::other(format!("could not reach relay at {host}:{port}")));
    }

    let local_id = random_peer_id();
    let world = SimulationWorld::new(settings, ChaCha8Rng::seed_from_u64(u64::from(local_id)));
    let mut session = Session::new(local_id, world, link, TextCodec);
    info!(local_id, "session started");

    let dt = config::TICK_INTERVAL.as_secs_f32();
    let mut next_tick = Instant::now();
    let mut last_peer_count = 0;

    while session.link().is_connected() {
        session.tick(&TickInput {
            dt,
            input: Default::default(),
        });

        let peers = session.peers().len();
        if peers != last_peer_count {
            info!(peers, "peer table changed");
            last_peer_count = peers;
        }

        next_tick += config::TICK_INTERVAL;
        let now = Instant::now();
        if next_tick > now {
            std::thread::sleep(next_tick - now);
        } else {
            // Fell behind; restart the cadence instead of bursting.
            next_tick = now;
        }
    }

    warn!(
        ticks = session.world().tick_count(),
        "relay connection lost; session ended"
    );
    Ok(())
}
