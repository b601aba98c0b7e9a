// Gameplay tuning, loadable from TOML. Every field falls back to its default.

pub mod particle;
pub mod player;
pub mod projectile;
pub mod weapon;

pub use particle::ParticleTuning;
pub use player::PlayerTuning;
pub use projectile::ProjectileTuning;
pub use weapon::{AimTuning, WeaponTuning};

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    pub player: PlayerTuning,
    pub projectile: ProjectileTuning,
    pub particle: ParticleTuning,
    pub weapon: WeaponTuning,
    pub aim: AimTuning,
}

// Trail emission is one particle per `trail_spacing` units, so it needs a floor.
pub const MIN_TRAIL_SPACING: f32 = 0.5;

/// A tuning value the simulation cannot run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTuning {
    pub field: &'static str,
    pub reason: &'static str,
}

fn positive(field: &'static str, value: f32) -> Result<(), InvalidTuning> {
    // Written so NaN fails too.
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(InvalidTuning {
            field,
            reason: "must be a finite value above zero",
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), InvalidTuning> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(InvalidTuning {
            field,
            reason: "must be a finite value of zero or more",
        })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), InvalidTuning> {
    if min <= max {
        Ok(())
    } else {
        Err(InvalidTuning {
            field,
            reason: "minimum is above maximum",
        })
    }
}

impl GameTuning {
    /// Checks the values that the simulation systems assume hold.
    pub fn validate(&self) -> Result<(), InvalidTuning> {
        let player = &self.player;
        positive("player.half_width", player.half_width)?;
        positive("player.height", player.height)?;
        non_negative("player.horizontal_speed", player.horizontal_speed)?;
        non_negative("player.jump_speed", player.jump_speed)?;
        non_negative("player.gravity", player.gravity)?;

        let p = &self.projectile;
        positive("projectile.radius", p.radius)?;
        non_negative("projectile.speed", p.speed)?;
        positive("projectile.world_bound", p.world_bound)?;
        if !(p.trail_spacing >= MIN_TRAIL_SPACING && p.trail_spacing.is_finite()) {
            return Err(InvalidTuning {
                field: "projectile.trail_spacing",
                reason: "must be at least 0.5",
            });
        }
        non_negative("projectile.trail_life", p.trail_life)?;
        non_negative("projectile.burst_speed_min", p.burst_speed_min)?;
        non_negative("projectile.burst_life_min", p.burst_life_min)?;
        non_negative("projectile.burst_radius_min", p.burst_radius_min)?;
        non_negative("projectile.burst_speed_max", p.burst_speed_max)?;
        non_negative("projectile.burst_life_max", p.burst_life_max)?;
        non_negative("projectile.burst_radius_max", p.burst_radius_max)?;
        ordered("projectile.burst_speed", p.burst_speed_min, p.burst_speed_max)?;
        ordered("projectile.burst_life", p.burst_life_min, p.burst_life_max)?;
        ordered("projectile.burst_radius", p.burst_radius_min, p.burst_radius_max)?;

        non_negative("particle.damping", self.particle.damping)?;

        non_negative("weapon.cooldown", self.weapon.cooldown)?;
        non_negative("weapon.length", self.weapon.length)?;

        ordered("aim.distance", self.aim.min_distance, self.aim.max_distance)?;
        ordered("aim.radius", self.aim.min_radius, self.aim.max_radius)?;
        non_negative("aim.min_radius", self.aim.min_radius)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_toml_overrides_one_field_then_the_rest_keep_defaults() {
        let tuning: GameTuning = toml::from_str(
            r#"
            [weapon]
            cooldown = 0.25

            [player]
            gravity = 900.0
            "#,
        )
        .expect("tuning should parse");

        assert_eq!(tuning.weapon.cooldown, 0.25);
        assert_eq!(tuning.weapon.length, 80.0);
        assert_eq!(tuning.player.gravity, 900.0);
        assert_eq!(tuning.player.jump_speed, 500.0);
        assert_eq!(tuning.projectile.burst_count, 10);
    }

    #[test]
    fn when_tuning_is_default_then_it_validates() {
        assert_eq!(GameTuning::default().validate(), Ok(()));
    }

    fn rejected_field(toml_text: &str) -> &'static str {
        let tuning: GameTuning = toml::from_str(toml_text).expect("tuning should parse");
        tuning.validate().expect_err("tuning should be rejected").field
    }

    #[test]
    fn when_projectile_radius_is_zero_then_validation_fails() {
        assert_eq!(rejected_field("[projectile]\nradius = 0.0"), "projectile.radius");
    }

    #[test]
    fn when_burst_ranges_are_inverted_then_validation_fails() {
        assert_eq!(
            rejected_field("[projectile]\nburst_speed_min = 300.0\nburst_speed_max = 100.0"),
            "projectile.burst_speed"
        );
        assert_eq!(
            rejected_field("[projectile]\nburst_life_min = 2.0\nburst_life_max = 1.0"),
            "projectile.burst_life"
        );
        assert_eq!(
            rejected_field("[projectile]\nburst_radius_min = 5.0"),
            "projectile.burst_radius"
        );
    }

    #[test]
    fn when_trail_spacing_is_tiny_then_validation_fails() {
        assert_eq!(
            rejected_field("[projectile]\ntrail_spacing = 0.00001"),
            "projectile.trail_spacing"
        );
    }

    #[test]
    fn when_cooldown_is_negative_then_validation_fails() {
        assert_eq!(rejected_field("[weapon]\ncooldown = -0.1"), "weapon.cooldown");
    }

    #[test]
    fn when_value_is_nan_then_validation_fails() {
        let mut tuning = GameTuning::default();
        tuning.player.height = f32::NAN;

        assert_eq!(
            tuning.validate().map_err(|e| e.field),
            Err("player.height")
        );
    }

    #[test]
    fn when_toml_is_empty_then_defaults_are_used() {
        let tuning: GameTuning = toml::from_str("").expect("empty tuning should parse");

        assert_eq!(tuning.particle.damping, 0.98);
        assert_eq!(tuning.aim.max_radius, 60.0);
    }
}
