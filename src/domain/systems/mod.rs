// Per-tick simulation rules. Everything here is total: no errors, no I/O.

pub mod aim;
pub mod collision;
pub mod movement;
pub mod particles;
pub mod projectiles;
pub mod weapon;

pub use collision::{BodyConfig, ContactSide, Resolution, resolve};
pub use movement::{MovementConfig, tick_player};
pub use particles::tick_particles;
pub use projectiles::{ProjectileStep, sample_in_disk, tick_projectiles};
pub use weapon::{AimInput, Weapon};
