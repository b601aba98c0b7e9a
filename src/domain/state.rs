// Domain-level simulation entities and input/snapshot types.

use glam::Vec2;

/// Axis-aligned rectangle in world units, `y` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap test; rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Circle test against the closest point of the rectangle (touching counts as a hit).
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = Vec2::new(
            center.x.clamp(self.left(), self.right()),
            center.y.clamp(self.top(), self.bottom()),
        );
        center.distance_squared(closest) <= radius * radius
    }
}

/// RGBA color carried by particles for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const DARK_GRAY: Color = Color::rgba(80, 80, 80, 255);
    pub const TRAIL_GRAY: Color = Color::rgba(130, 130, 130, 90);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Immutable piece of level geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticCollider {
    pub rect: Rect,
    pub blocking: bool,
}

impl StaticCollider {
    pub const fn blocking(rect: Rect) -> Self {
        Self {
            rect,
            blocking: true,
        }
    }
}

/// The local player's physical state. `position` is the bottom-centre of its box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicBody {
    pub position: Vec2,
    pub vertical_speed: f32,
    pub grounded: bool,
}

impl KinematicBody {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            vertical_speed: 0.0,
            grounded: false,
        }
    }
}

/// Per-tick signals supplied by the input collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    pub move_left: bool,
    pub move_right: bool,
    // Edge-triggered: true only on the tick the key went down.
    pub jump_pressed: bool,
    pub fire_held: bool,
    // Aim point in world coordinates.
    pub aim: Vec2,
}

/// A fired bullet.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) radius: f32,
    pub(crate) active: bool,
}

/// Short-lived visual-physics effect.
#[derive(Debug, Clone)]
pub struct Particle {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) life: f32,
    pub(crate) radius: f32,
    pub(crate) color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Vec2,
    pub vertical_speed: f32,
    pub grounded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSnapshot {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    pub alpha: f32,
}

impl From<&KinematicBody> for PlayerSnapshot {
    fn from(body: &KinematicBody) -> Self {
        Self {
            position: body.position,
            vertical_speed: body.vertical_speed,
            grounded: body.grounded,
        }
    }
}

impl From<&Projectile> for ProjectileSnapshot {
    fn from(p: &Projectile) -> Self {
        Self {
            position: p.position,
            velocity: p.velocity,
            radius: p.radius,
        }
    }
}

impl From<&Particle> for ParticleSnapshot {
    fn from(p: &Particle) -> Self {
        Self {
            position: p.position,
            radius: p.radius,
            color: p.color,
            alpha: p.alpha(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_rects_share_only_an_edge_then_they_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);

        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Rect::new(9.5, 9.5, 1.0, 1.0)));
    }

    #[test]
    fn when_circle_touches_rect_corner_then_it_intersects() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);

        // Distance to the corner (10, 10) is exactly 5.
        assert!(rect.intersects_circle(Vec2::new(13.0, 14.0), 5.0));
        assert!(!rect.intersects_circle(Vec2::new(13.0, 14.0), 4.9));
    }

    #[test]
    fn when_circle_center_is_inside_rect_then_it_intersects() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);

        assert!(rect.intersects_circle(Vec2::new(5.0, 5.0), 0.1));
    }
}
