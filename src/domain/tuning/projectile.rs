use serde::Deserialize;

/// Gameplay tuning for projectiles and the particles they emit.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Muzzle speed in units per second.
    pub speed: f32,

    /// World-space collision radius.
    pub radius: f32,

    /// Projectiles are dropped once either coordinate exceeds this magnitude.
    pub world_bound: f32,

    /// Distance between trail particles along the travelled segment.
    pub trail_spacing: f32,
    pub trail_life: f32,
    pub trail_radius: f32,
    /// Fraction of the bullet velocity given (reversed) to trail particles.
    pub trail_drag: f32,

    /// Number of particles emitted when a projectile hits geometry.
    pub burst_count: usize,
    pub burst_speed_min: f32,
    pub burst_speed_max: f32,
    pub burst_life_min: f32,
    pub burst_life_max: f32,
    pub burst_radius_min: f32,
    pub burst_radius_max: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: 1200.0,
            radius: 4.0,
            world_bound: 5000.0,
            trail_spacing: 6.0,
            trail_life: 0.12,
            trail_radius: 1.5,
            trail_drag: 0.02,
            burst_count: 10,
            burst_speed_min: 40.0,
            burst_speed_max: 240.0,
            burst_life_min: 0.3,
            burst_life_max: 0.9,
            burst_radius_min: 1.0,
            burst_radius_max: 3.0,
        }
    }
}
