use serde::Deserialize;

/// Gameplay tuning for the local player body.
///
/// Keep this separate from runtime/network configuration (tick rates, timeouts, etc.).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Horizontal run speed in units per second.
    pub horizontal_speed: f32,

    /// Upward speed applied on jump, in units per second.
    pub jump_speed: f32,

    /// Downward acceleration in units per second squared.
    pub gravity: f32,

    /// Half of the collision box width.
    pub half_width: f32,

    /// Collision box height, measured up from the feet.
    pub height: f32,

    /// Height above the feet where the weapon is held.
    pub weapon_anchor_height: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            horizontal_speed: 400.0,
            jump_speed: 500.0,
            gravity: 600.0,
            half_width: 10.0,
            height: 60.0,
            weapon_anchor_height: 40.0,
        }
    }
}
