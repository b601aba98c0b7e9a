// Use-case level inputs/outputs for the simulation loop.

use crate::domain::systems::aim::AimReticle;
use crate::domain::{ParticleSnapshot, PeerPosition, PlayerInput, PlayerSnapshot, ProjectileSnapshot};
use glam::Vec2;

/// Everything the input collaborator supplies for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub dt: f32,
    pub input: PlayerInput,
}

/// Emitted when the telemetry timer elapses; the session turns it into a `POS` frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionReport {
    pub position: Vec2,
}

/// Read-only view handed to the presentation collaborator after each tick.
#[derive(Debug, Clone)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub player: PlayerSnapshot,
    pub weapon_rotation: f32,
    pub weapon_cooling_down: bool,
    pub reticle: AimReticle,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub particles: Vec<ParticleSnapshot>,
    pub peers: Vec<PeerPosition>,
}
