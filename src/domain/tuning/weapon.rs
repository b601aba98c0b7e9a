use serde::Deserialize;

/// Gameplay tuning for the held weapon and its aim reticle.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    /// Barrel length; projectiles spawn this far from the anchor.
    pub length: f32,

    /// Seconds between shots.
    pub cooldown: f32,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            length: 80.0,
            cooldown: 0.1,
        }
    }
}

/// Maps aim distance onto reticle size, which doubles as the spread radius.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct AimTuning {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Inner ring size relative to the outer radius.
    pub inner_ratio: f32,
}

impl Default for AimTuning {
    fn default() -> Self {
        Self {
            min_distance: 20.0,
            max_distance: 700.0,
            min_radius: 8.0,
            max_radius: 60.0,
            inner_ratio: 0.55,
        }
    }
}
