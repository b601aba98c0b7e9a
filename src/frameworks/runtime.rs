// Process bootstrap: environment, tracing and mode dispatch.

use crate::frameworks::config::{self, NetMode};
use crate::frameworks::{client, server};
use std::io::Result;
use tracing_subscriber::EnvFilter;

/// Loads `.env`, installs the tracing subscriber and a panic hook that logs.
///
/// `RUST_LOG` overrides the default `info` filter and `LOG_FORMAT=json` switches to JSON
/// lines. Thread names are kept because socket work runs on the `net-client` and
/// `relay-service` threads.
pub fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true);

    // A subscriber may already be set when the crate is embedded; keep that one.
    let installed = match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().with_current_span(true).try_init(),
        _ => builder.compact().try_init(),
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }

    std::panic::set_hook(Box::new(|info| {
        let thread = std::thread::current();
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, thread = thread.name().unwrap_or("unnamed"), ?backtrace, "panic");
    }));
}

/// Runs the relay or a headless client depending on `NET_MODE`.
pub fn run_with_config() -> Result<()> {
    init_runtime();

    let mode = config::net_mode();
    tracing::info!(?mode, "starting");
    match mode {
        NetMode::Server => server::run_relay(config::relay_port()),
        NetMode::Client => client::run_client(&config::relay_host(), config::relay_port()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_runtime_is_initialised_twice_then_the_second_call_keeps_the_first_subscriber() {
        init_runtime();
        init_runtime();

        tracing::info!("still logging");
    }
}
