use crate::domain::state::{KinematicBody, PlayerInput, StaticCollider};
use crate::domain::systems::collision::{self, BodyConfig};
use crate::domain::tuning::PlayerTuning;

#[derive(Debug, Clone, Copy)]
pub struct MovementConfig {
    pub horizontal_speed: f32, // units/s
    pub jump_speed: f32,       // units/s, applied upwards
    pub body: BodyConfig,
}

impl From<&PlayerTuning> for MovementConfig {
    fn from(t: &PlayerTuning) -> Self {
        Self {
            horizontal_speed: t.horizontal_speed,
            jump_speed: t.jump_speed,
            body: BodyConfig {
                half_width: t.half_width,
                height: t.height,
                gravity: t.gravity,
            },
        }
    }
}

pub fn tick_player(
    body: &mut KinematicBody,
    input: &PlayerInput,
    dt: f32,
    colliders: &[StaticCollider],
    cfg: MovementConfig,
) {
    // horizontal
    let mut dx = 0.0;
    if input.move_left {
        dx -= cfg.horizontal_speed * dt;
    }
    if input.move_right {
        dx += cfg.horizontal_speed * dt;
    }

    // jump (y grows downwards)
    if input.jump_pressed && body.grounded {
        body.vertical_speed = -cfg.jump_speed;
        body.grounded = false;
    }

    let res = collision::resolve(
        body.position,
        body.vertical_speed,
        dx,
        dt,
        colliders,
        cfg.body,
    );
    body.position = res.position;
    body.vertical_speed = res.vertical_speed;
    body.grounded = res.grounded;
}
