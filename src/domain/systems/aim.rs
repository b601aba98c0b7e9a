use crate::domain::tuning::AimTuning;
use glam::Vec2;

/// Crosshair size for the current aim distance. The outer radius is also the
/// weapon's spread radius, so aiming further away is less accurate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimReticle {
    pub radius: f32,
    pub inner_radius: f32,
}

/// Linear remap of `value` from `[in_min, in_max]` onto `[out_min, out_max]`, clamped.
/// An empty input range maps everything to `out_min`.
pub fn remap_clamped(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    if in_max <= in_min {
        return out_min;
    }
    let t = ((value - in_min) / (in_max - in_min)).clamp(0.0, 1.0);
    out_min + t * (out_max - out_min)
}

pub fn reticle(anchor: Vec2, target: Vec2, cfg: &AimTuning) -> AimReticle {
    let radius = remap_clamped(
        anchor.distance(target),
        cfg.min_distance,
        cfg.max_distance,
        cfg.min_radius,
        cfg.max_radius,
    );
    AimReticle {
        radius,
        inner_radius: radius * cfg.inner_ratio,
    }
}
