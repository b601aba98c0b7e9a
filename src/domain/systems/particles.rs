use crate::domain::state::{Color, Particle};
use crate::domain::tuning::ParticleTuning;
use glam::Vec2;

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, life: f32, radius: f32, color: Color) -> Self {
        Self {
            position,
            velocity,
            life,
            radius,
            color,
        }
    }

    /// Advances the particle one tick. Returns whether it is still alive.
    pub fn update(&mut self, dt: f32, cfg: &ParticleTuning) -> bool {
        if self.life <= 0.0 {
            return false;
        }

        self.life -= dt;

        self.velocity *= cfg.damping;
        self.velocity.y += cfg.gravity * dt;
        self.position += self.velocity * dt;

        self.life > 0.0
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// Opacity the renderer should use.
    pub fn alpha(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

/// Updates every particle and drops the ones whose life ran out this tick.
pub fn tick_particles(particles: &mut Vec<Particle>, dt: f32, cfg: &ParticleTuning) {
    particles.retain_mut(|p| p.update(dt, cfg));
}
