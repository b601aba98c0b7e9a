use super::types::{PositionReport, TickInput, WorldSnapshot};
use crate::domain::scene::{DEFAULT_SPAWN, default_scene};
use crate::domain::systems::aim::{self, AimReticle};
use crate::domain::systems::{AimInput, MovementConfig, Weapon, tick_particles, tick_player};
use crate::domain::{GameTuning, KinematicBody, Particle, PeerPosition, StaticCollider};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

/// Everything needed to build a world, supplied by the framework layer.
#[derive(Debug, Clone)]
pub struct WorldSettings {
    pub tuning: GameTuning,
    pub colliders: Vec<StaticCollider>,
    pub spawn: Vec2,
    pub telemetry_interval: Duration,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            tuning: GameTuning::default(),
            colliders: default_scene(),
            spawn: DEFAULT_SPAWN,
            telemetry_interval: Duration::from_millis(100),
        }
    }
}

/// The local simulation: one player body, fixed level geometry, the weapon and every
/// live particle.
pub struct SimulationWorld<R: Rng = ChaCha8Rng> {
    tick: u64,
    tuning: GameTuning,
    movement: MovementConfig,
    colliders: Vec<StaticCollider>,
    body: KinematicBody,
    weapon: Weapon,
    particles: Vec<Particle>,
    reticle: AimReticle,
    telemetry_interval: f32,
    telemetry_elapsed: f32,
    rng: R,
}

impl SimulationWorld<ChaCha8Rng> {
    pub fn seeded(settings: WorldSettings, seed: u64) -> Self {
        Self::new(settings, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulationWorld<R> {
    pub fn new(settings: WorldSettings, rng: R) -> Self {
        let tuning = settings.tuning;
        Self {
            tick: 0,
            movement: MovementConfig::from(&tuning.player),
            colliders: settings.colliders,
            body: KinematicBody::at(settings.spawn),
            weapon: Weapon::new(tuning.weapon, tuning.projectile),
            particles: Vec::new(),
            reticle: AimReticle {
                radius: tuning.aim.min_radius,
                inner_radius: tuning.aim.min_radius * tuning.aim.inner_ratio,
            },
            telemetry_interval: settings.telemetry_interval.as_secs_f32(),
            telemetry_elapsed: 0.0,
            tuning,
            rng,
        }
    }

    /// Runs one fixed step: player, weapon and projectiles, particles, then telemetry.
    pub fn tick(&mut self, input: &TickInput) -> Option<PositionReport> {
        let dt = input.dt;
        let controls = &input.input;

        tick_player(&mut self.body, controls, dt, &self.colliders, self.movement);

        let anchor = self.weapon_anchor();
        self.reticle = aim::reticle(anchor, controls.aim, &self.tuning.aim);
        self.weapon.update(
            dt,
            AimInput {
                anchor,
                target: controls.aim,
                spread_radius: self.reticle.radius,
            },
            controls.fire_held,
            &self.colliders,
            &mut self.particles,
            &mut self.rng,
        );

        tick_particles(&mut self.particles, dt, &self.tuning.particle);

        self.tick += 1;
        self.telemetry_elapsed += dt;
        if self.telemetry_elapsed >= self.telemetry_interval {
            // Carry the remainder so the cadence does not drift.
            self.telemetry_elapsed %= self.telemetry_interval;
            return Some(PositionReport {
                position: self.body.position,
            });
        }
        None
    }

    /// Point the weapon is held at, above the player's feet.
    pub fn weapon_anchor(&self) -> Vec2 {
        self.body.position - Vec2::new(0.0, self.tuning.player.weapon_anchor_height)
    }

    pub fn snapshot<'a>(&self, peers: impl IntoIterator<Item = &'a PeerPosition>) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            player: (&self.body).into(),
            weapon_rotation: self.weapon.rotation(),
            weapon_cooling_down: self.weapon.is_cooling_down(),
            reticle: self.reticle,
            projectiles: self.weapon.projectiles().iter().map(Into::into).collect(),
            particles: self.particles.iter().map(Into::into).collect(),
            peers: peers.into_iter().copied().collect(),
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn colliders(&self) -> &[StaticCollider] {
        &self.colliders
    }
}
