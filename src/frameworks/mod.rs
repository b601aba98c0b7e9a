// Frameworks: process bootstrap, runtime configuration and the long-running loops.

pub mod client;
pub mod config;
pub mod runtime;
pub mod server;
