use crate::domain::state::{Rect, StaticCollider};
use glam::Vec2;

/// Box extents and gravity for a kinematic body.
#[derive(Debug, Clone, Copy)]
pub struct BodyConfig {
    pub half_width: f32,
    pub height: f32,
    pub gravity: f32,
}

impl BodyConfig {
    /// Collision box for a body whose feet are at `position`.
    pub fn rect_at(&self, position: Vec2) -> Rect {
        Rect::new(
            position.x - self.half_width,
            position.y - self.height,
            self.half_width * 2.0,
            self.height,
        )
    }
}

/// Which face of a collider the body was pushed out through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSide {
    Top,
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub position: Vec2,
    pub vertical_speed: f32,
    pub grounded: bool,
}

/// Picks the contact face with the smallest overlap.
///
/// Equal overlaps resolve in the order top, bottom, left, right. This is a first-match
/// rule rather than a penetration-depth solver and callers rely on it being stable.
pub fn contact_side(body: &Rect, collider: &Rect) -> ContactSide {
    let left = body.right() - collider.left();
    let right = collider.right() - body.left();
    let top = body.bottom() - collider.top();
    let bottom = collider.bottom() - body.top();

    let min = left.min(right).min(top.min(bottom));

    if min == top {
        ContactSide::Top
    } else if min == bottom {
        ContactSide::Bottom
    } else if min == left {
        ContactSide::Left
    } else {
        ContactSide::Right
    }
}

/// Integrates one tick of motion and pushes the body out of blocking colliders.
///
/// Colliders are visited once each, in slice order, against the box as already
/// corrected by earlier colliders. Overlapping colliders can therefore produce an
/// order-dependent result; there is no iteration to a fixed point.
pub fn resolve(
    position: Vec2,
    vertical_speed: f32,
    horizontal_displacement: f32,
    dt: f32,
    colliders: &[StaticCollider],
    cfg: BodyConfig,
) -> Resolution {
    let mut speed = vertical_speed + cfg.gravity * dt;
    let mut pos = Vec2::new(position.x + horizontal_displacement, position.y + speed * dt);
    let mut grounded = false;

    for collider in colliders.iter().filter(|c| c.blocking) {
        let body = cfg.rect_at(pos);
        let rect = &collider.rect;
        if !body.overlaps(rect) {
            continue;
        }

        match contact_side(&body, rect) {
            ContactSide::Top => {
                pos.y = rect.top();
                speed = 0.0;
                grounded = true;
            }
            ContactSide::Bottom => {
                pos.y = rect.bottom() + cfg.height;
                speed = 0.0;
            }
            ContactSide::Left => {
                pos.x = rect.left() - cfg.half_width;
            }
            ContactSide::Right => {
                pos.x = rect.right() + cfg.half_width;
            }
        }
    }

    Resolution {
        position: pos,
        vertical_speed: speed,
        grounded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: BodyConfig = BodyConfig {
        half_width: 10.0,
        height: 60.0,
        gravity: 0.0,
    };

    fn wall(x: f32, y: f32, w: f32, h: f32) -> StaticCollider {
        StaticCollider::blocking(Rect::new(x, y, w, h))
    }

    #[test]
    fn when_top_and_left_overlaps_are_equal_then_top_wins() {
        // Body box spans x 90..110, y 140..200.
        let body = BODY.rect_at(Vec2::new(100.0, 200.0));
        // Collider top-left corner sits 4 units inside the body's bottom-right corner.
        let collider = Rect::new(106.0, 196.0, 100.0, 100.0);

        assert_eq!(contact_side(&body, &collider), ContactSide::Top);

        let colliders = [StaticCollider::blocking(collider)];
        let res = resolve(Vec2::new(100.0, 200.0), 0.0, 0.0, 0.0, &colliders, BODY);
        assert_eq!(res.position, Vec2::new(100.0, 196.0));
        assert!(res.grounded);
    }

    #[test]
    fn when_bottom_and_right_overlaps_are_equal_then_bottom_wins() {
        let body = BODY.rect_at(Vec2::new(100.0, 200.0));
        // Collider bottom-right corner sits 4 units inside the body's top-left corner.
        let collider = Rect::new(-6.0, 44.0, 100.0, 100.0);

        assert_eq!(contact_side(&body, &collider), ContactSide::Bottom);
    }

    #[test]
    fn when_left_and_right_overlaps_are_equal_then_left_wins() {
        // Thin pillar centred inside a wide body, tall enough that vertical overlaps are large.
        let body = Rect::new(0.0, 0.0, 20.0, 60.0);
        let collider = Rect::new(8.0, -100.0, 4.0, 300.0);

        assert_eq!(contact_side(&body, &collider), ContactSide::Left);
    }

    #[test]
    fn when_two_colliders_tie_top_and_left_then_each_resolves_through_top() {
        // One collider under each bottom corner, each overlapping by 4 on both axes.
        let colliders = [
            wall(106.0, 196.0, 100.0, 100.0),
            wall(-6.0, 196.0, 100.0, 100.0),
        ];

        for collider in colliders {
            let res = resolve(Vec2::new(100.0, 200.0), 50.0, 0.0, 0.0, &[collider], BODY);

            assert_eq!(res.position, Vec2::new(100.0, 196.0));
            assert_eq!(res.vertical_speed, 0.0);
            assert!(res.grounded);
        }

        // Together: the first snaps the body up, which clears the second.
        let res = resolve(Vec2::new(100.0, 200.0), 50.0, 0.0, 0.0, &colliders, BODY);
        assert_eq!(res.position, Vec2::new(100.0, 196.0));
        assert!(res.grounded);
    }

    #[test]
    fn when_falling_onto_floor_then_body_lands_grounded_with_zero_speed() {
        let floor = [wall(0.0, 490.0, 2000.0, 10.0)];
        let cfg = BodyConfig {
            gravity: 600.0,
            ..BODY
        };

        let res = resolve(Vec2::new(100.0, 488.0), 300.0, 0.0, 1.0 / 60.0, &floor, cfg);

        assert_eq!(res.position.y, 490.0);
        assert_eq!(res.vertical_speed, 0.0);
        assert!(res.grounded);
        assert!(!cfg.rect_at(res.position).overlaps(&floor[0].rect));
    }

    #[test]
    fn when_head_hits_ceiling_then_speed_clears_without_grounding() {
        let ceiling = [wall(0.0, 0.0, 2000.0, 10.0)];

        // Moving up 12 units puts the box top at -2, inside the ceiling.
        let res = resolve(Vec2::new(100.0, 70.0), -120.0, 0.0, 0.1, &ceiling, BODY);

        assert_eq!(res.position.y, 70.0);
        assert_eq!(res.vertical_speed, 0.0);
        assert!(!res.grounded);
    }

    #[test]
    fn when_walking_into_wall_then_only_position_is_corrected() {
        let walls = [wall(200.0, 0.0, 10.0, 500.0)];

        let res = resolve(Vec2::new(188.0, 300.0), 42.0, 5.0, 0.0, &walls, BODY);

        assert_eq!(res.position.x, 190.0);
        assert_eq!(res.vertical_speed, 42.0);
        assert!(!res.grounded);
    }

    #[test]
    fn when_walking_into_wall_from_the_right_then_body_is_pushed_right() {
        let walls = [wall(0.0, 0.0, 10.0, 500.0)];

        let res = resolve(Vec2::new(21.0, 300.0), 0.0, -3.0, 0.0, &walls, BODY);

        assert_eq!(res.position.x, 20.0);
    }

    #[test]
    fn when_collider_is_not_blocking_then_it_is_ignored() {
        let decor = [StaticCollider {
            rect: Rect::new(0.0, 190.0, 400.0, 20.0),
            blocking: false,
        }];

        let res = resolve(Vec2::new(100.0, 200.0), 0.0, 0.0, 0.0, &decor, BODY);

        assert_eq!(res.position, Vec2::new(100.0, 200.0));
        assert!(!res.grounded);
    }

    #[test]
    fn when_resolving_against_each_contact_then_box_leaves_that_collider() {
        // Sweep a grid of start positions around a block and check the contact collider
        // never overlaps the resolved box.
        let block = wall(100.0, 100.0, 80.0, 40.0);
        for ix in 0..20 {
            for iy in 0..20 {
                let start = Vec2::new(80.0 + ix as f32 * 6.0, 95.0 + iy as f32 * 6.0);
                if !BODY.rect_at(start).overlaps(&block.rect) {
                    continue;
                }
                let res = resolve(start, 0.0, 0.0, 0.0, &[block], BODY);
                let resolved = BODY.rect_at(res.position);
                assert!(
                    !resolved.overlaps(&block.rect),
                    "start {start:?} resolved to {resolved:?}"
                );
            }
        }
    }
}
