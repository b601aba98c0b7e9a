use serde::Deserialize;

/// Gameplay tuning for particle motion.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ParticleTuning {
    /// Multiplicative velocity damping applied every tick.
    pub damping: f32,

    /// Downward acceleration in units per second squared.
    pub gravity: f32,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            damping: 0.98,
            gravity: 80.0,
        }
    }
}
