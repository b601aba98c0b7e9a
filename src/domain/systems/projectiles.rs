use crate::domain::state::{Color, Particle, Projectile, StaticCollider};
use crate::domain::tuning::ProjectileTuning;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;
use tracing::trace;

// Below this, spread and aim vectors are treated as zero.
const EPSILON: f32 = 1e-4;

/// Whether the owning collection should keep a projectile after this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileStep {
    Keep,
    Remove,
}

/// Samples a point uniformly over the area of a disk.
///
/// The radius is `sqrt`-scaled; sampling it linearly would bunch points at the centre.
pub fn sample_in_disk<R: Rng>(center: Vec2, radius: f32, rng: &mut R) -> Vec2 {
    let theta = rng.random_range(0.0..TAU);
    let u: f32 = rng.random();
    let r = radius * u.sqrt();
    center + Vec2::new(theta.cos(), theta.sin()) * r
}

impl Projectile {
    /// Fires from `origin` toward `aim_target`, optionally jittered inside `spread_radius`.
    pub fn spawn<R: Rng>(
        origin: Vec2,
        aim_target: Vec2,
        speed: f32,
        spread_radius: f32,
        cfg: &ProjectileTuning,
        rng: &mut R,
    ) -> Self {
        let target = if spread_radius > EPSILON {
            sample_in_disk(aim_target, spread_radius, rng)
        } else {
            aim_target
        };

        let dir = target - origin;
        let len = dir.length();
        let velocity = if len > EPSILON {
            dir / len * speed
        } else {
            // Target on top of the muzzle: fire along +X.
            Vec2::new(speed, 0.0)
        };

        Self {
            position: origin,
            velocity,
            radius: cfg.radius,
            active: true,
        }
    }

    /// Moves the projectile, emits its trail, and tests it against blocking geometry.
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        colliders: &[StaticCollider],
        particles: &mut Vec<Particle>,
        cfg: &ProjectileTuning,
        rng: &mut R,
    ) -> ProjectileStep {
        if !self.active {
            return ProjectileStep::Remove;
        }

        let prev = self.position;
        self.position += self.velocity * dt;

        self.emit_trail(prev, particles, cfg);

        if colliders
            .iter()
            .filter(|c| c.blocking)
            .any(|c| c.rect.intersects_circle(self.position, self.radius))
        {
            self.active = false;
            emit_burst(self.position, particles, cfg, rng);
            trace!(x = self.position.x, y = self.position.y, "projectile hit geometry");
            return ProjectileStep::Remove;
        }

        let bound = cfg.world_bound;
        if self.position.x.abs() > bound || self.position.y.abs() > bound {
            self.active = false;
            return ProjectileStep::Remove;
        }

        ProjectileStep::Keep
    }

    // One faint particle per `trail_spacing` along the segment just travelled, so fast
    // projectiles leave a continuous streak.
    fn emit_trail(&self, prev: Vec2, particles: &mut Vec<Particle>, cfg: &ProjectileTuning) {
        let segment = self.position - prev;
        let len = segment.length();
        if len <= 0.0 || cfg.trail_spacing <= 0.0 {
            return;
        }

        let steps = (len / cfg.trail_spacing).ceil() as usize;
        let velocity = -cfg.trail_drag * self.velocity;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            particles.push(Particle::new(
                prev + segment * t,
                velocity,
                cfg.trail_life,
                cfg.trail_radius,
                Color::TRAIL_GRAY,
            ));
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

fn emit_burst<R: Rng>(
    at: Vec2,
    particles: &mut Vec<Particle>,
    cfg: &ProjectileTuning,
    rng: &mut R,
) {
    for _ in 0..cfg.burst_count {
        let angle = rng.random_range(0.0..TAU);
        let speed = sample_between(cfg.burst_speed_min, cfg.burst_speed_max, rng);
        let life = sample_between(cfg.burst_life_min, cfg.burst_life_max, rng);
        let radius = sample_between(cfg.burst_radius_min, cfg.burst_radius_max, rng);

        particles.push(Particle::new(
            at,
            Vec2::new(angle.cos(), angle.sin()) * speed,
            life,
            radius,
            Color::DARK_GRAY,
        ));
    }
}

// Uniform between the two bounds, given in either order. Equal bounds return that value.
fn sample_between<R: Rng>(a: f32, b: f32, rng: &mut R) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo < hi {
        rng.random_range(lo..=hi)
    } else {
        lo
    }
}

/// Updates every projectile and drops the ones that hit geometry or left the world.
pub fn tick_projectiles<R: Rng>(
    projectiles: &mut Vec<Projectile>,
    dt: f32,
    colliders: &[StaticCollider],
    particles: &mut Vec<Particle>,
    cfg: &ProjectileTuning,
    rng: &mut R,
) {
    projectiles.retain_mut(|p| p.update(dt, colliders, particles, cfg, rng) == ProjectileStep::Keep);
}
