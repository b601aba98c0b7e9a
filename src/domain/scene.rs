use crate::domain::state::{Rect, StaticCollider};
use glam::Vec2;

/// Where the local player starts in the default scene.
pub const DEFAULT_SPAWN: Vec2 = Vec2::new(100.0, 480.0);

const DEFAULT_RECTS: [Rect; 7] = [
    // bounds: ceiling, left wall, right wall, floor
    Rect::new(0.0, 0.0, 2000.0, 10.0),
    Rect::new(0.0, 0.0, 10.0, 500.0),
    Rect::new(1990.0, 0.0, 10.0, 500.0),
    Rect::new(0.0, 490.0, 2000.0, 10.0),
    // platforms
    Rect::new(300.0, 200.0, 400.0, 10.0),
    Rect::new(250.0, 300.0, 100.0, 10.0),
    Rect::new(650.0, 300.0, 100.0, 10.0),
];

/// Bounding walls plus three platforms, all blocking.
pub fn default_scene() -> Vec<StaticCollider> {
    DEFAULT_RECTS.iter().copied().map(StaticCollider::blocking).collect()
}
