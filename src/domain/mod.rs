// Domain layer: core simulation types and rules.

pub mod peers;
pub mod ports;
pub mod scene;
pub mod state;
pub mod systems;
pub mod tuning;

pub use peers::{PeerPosition, PeerTable, PeerUpdate};
pub use ports::{InboundFrame, PeerLink, PositionCodec};
pub use state::{
    Color, KinematicBody, Particle, ParticleSnapshot, PlayerInput, PlayerSnapshot, Projectile,
    ProjectileSnapshot, Rect, StaticCollider,
};
pub use tuning::{GameTuning, InvalidTuning};
