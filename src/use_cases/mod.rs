// Use cases layer: the per-participant simulation loop and its network glue.

pub mod session;
pub mod types;
pub mod world;

pub use session::Session;
pub use types::{PositionReport, TickInput, WorldSnapshot};
pub use world::{SimulationWorld, WorldSettings};
