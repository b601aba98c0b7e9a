pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::runtime::{init_runtime, run_with_config};
pub use frameworks::server::RelayServer;
pub use interface_adapters::net::{ChannelState, ClientSettings, NetworkClient};
