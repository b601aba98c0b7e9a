use crate::domain::state::{Particle, Projectile, StaticCollider};
use crate::domain::systems::projectiles::tick_projectiles;
use crate::domain::tuning::{ProjectileTuning, WeaponTuning};
use glam::Vec2;
use rand::Rng;
use tracing::debug;

/// Where the weapon is held and what it points at this tick.
#[derive(Debug, Clone, Copy)]
pub struct AimInput {
    pub anchor: Vec2,
    pub target: Vec2,
    pub spread_radius: f32,
}

/// Fire-rate gate that owns every projectile it has fired.
#[derive(Debug, Clone)]
pub struct Weapon {
    cfg: WeaponTuning,
    projectile_cfg: ProjectileTuning,
    cooldown: f32,     // seconds until next allowed shot
    rotation: f32,     // radians, anchor -> target
    anchor: Vec2,
    projectiles: Vec<Projectile>,
}

impl Weapon {
    pub fn new(cfg: WeaponTuning, projectile_cfg: ProjectileTuning) -> Self {
        Self {
            cfg,
            projectile_cfg,
            cooldown: 0.0,
            rotation: 0.0,
            anchor: Vec2::ZERO,
            projectiles: Vec::new(),
        }
    }

    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        aim: AimInput,
        fire_requested: bool,
        colliders: &[StaticCollider],
        particles: &mut Vec<Particle>,
        rng: &mut R,
    ) {
        // Aim follows the target every tick, firing or not.
        self.anchor = aim.anchor;
        let to_target = aim.target - aim.anchor;
        self.rotation = to_target.y.atan2(to_target.x);

        self.cooldown = (self.cooldown - dt).max(0.0);
        if fire_requested && self.cooldown <= 0.0 {
            let muzzle = self.muzzle();
            self.projectiles.push(Projectile::spawn(
                muzzle,
                aim.target,
                self.projectile_cfg.speed,
                aim.spread_radius,
                &self.projectile_cfg,
                rng,
            ));
            self.cooldown = self.cfg.cooldown;
            debug!(
                muzzle_x = muzzle.x,
                muzzle_y = muzzle.y,
                spread = aim.spread_radius,
                in_flight = self.projectiles.len(),
                "weapon fired"
            );
        }

        tick_projectiles(
            &mut self.projectiles,
            dt,
            colliders,
            particles,
            &self.projectile_cfg,
            rng,
        );
    }

    /// Barrel tip: the anchor pushed out along the aim direction by the weapon length.
    pub fn muzzle(&self) -> Vec2 {
        self.anchor + Vec2::from_angle(self.rotation) * self.cfg.length
    }

    /// True while the next shot is still gated. Presentation feedback only.
    pub fn is_cooling_down(&self) -> bool {
        self.cooldown > 0.0
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::Rect;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DT: f32 = 1.0 / 60.0;

    fn weapon() -> Weapon {
        Weapon::new(WeaponTuning::default(), ProjectileTuning::default())
    }

    fn aim_right() -> AimInput {
        AimInput {
            anchor: Vec2::new(0.0, 0.0),
            target: Vec2::new(1000.0, 0.0),
            spread_radius: 0.0,
        }
    }

    #[test]
    fn when_fire_is_held_then_shots_are_spaced_by_the_cooldown() {
        let mut w = weapon();
        let mut particles = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut fired = 0;
        let mut previous = 0;

        // 0.5s of held trigger with a 0.1s cooldown.
        for _ in 0..30 {
            w.update(DT, aim_right(), true, &[], &mut particles, &mut rng);
            if w.projectiles().len() > previous {
                fired += 1;
            }
            previous = w.projectiles().len();
        }

        assert!((5..=6).contains(&fired), "fired {fired} shots");
        assert!(w.is_cooling_down());
    }

    #[test]
    fn when_fire_is_not_requested_then_aim_still_tracks_the_target() {
        let mut w = weapon();
        let mut particles = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let aim = AimInput {
            anchor: Vec2::new(10.0, 10.0),
            target: Vec2::new(10.0, 110.0),
            spread_radius: 0.0,
        };

        w.update(DT, aim, false, &[], &mut particles, &mut rng);

        assert!((w.rotation() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert!(w.projectiles().is_empty());
        assert!(!w.is_cooling_down());
        assert!((w.muzzle() - Vec2::new(10.0, 90.0)).length() < 1e-3);
    }

    #[test]
    fn when_weapon_fires_then_projectile_starts_at_the_muzzle() {
        let mut w = weapon();
        let mut particles = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        // dt of zero keeps the new projectile where it spawned.
        w.update(0.0, aim_right(), true, &[], &mut particles, &mut rng);

        assert_eq!(w.projectiles().len(), 1);
        let p = &w.projectiles()[0];
        assert!((p.position() - Vec2::new(80.0, 0.0)).length() < 1e-3);
        assert!(p.velocity().x > 0.0);
        assert!(w.is_cooling_down());
    }

    #[test]
    fn when_projectile_hits_geometry_then_weapon_drops_it() {
        let mut w = weapon();
        let mut particles = Vec::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let walls = [StaticCollider::blocking(Rect::new(120.0, -50.0, 10.0, 100.0))];

        w.update(0.0, aim_right(), true, &walls, &mut particles, &mut rng);
        assert_eq!(w.projectiles().len(), 1);

        for _ in 0..10 {
            w.update(DT, aim_right(), false, &walls, &mut particles, &mut rng);
        }

        assert!(w.projectiles().is_empty());
        assert!(particles.len() >= 10);
    }
}
