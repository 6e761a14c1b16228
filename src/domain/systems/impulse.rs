use crate::domain::state::{PlayerSnapshot, Team};
use crate::domain::tuning::boost::{BoostParameters, FULL_HORIZONTAL_DISTANCE, MIN_SEPARATION};
use glam::{Vec2, Vec3};

/// Result of applying one blast to one player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boost {
    /// Falloff factor that produced the impulse.
    pub strength: f32,
    /// Velocity added by the blast, before clamping.
    pub impulse: Vec3,
    /// Velocity to write back to the player.
    pub velocity: Vec3,
}

/// Linear falloff, `boost_multiplier` at the epicenter and 0.0 at the radius.
/// Returns `None` at or beyond the blast radius.
pub fn boost_strength(distance: f32, params: &BoostParameters) -> Option<f32> {
    if distance >= params.blast_radius {
        return None;
    }
    Some((1.0 - distance / params.blast_radius) * params.boost_multiplier)
}

/// Computes the velocity a player ends up with after a blast at `origin`.
///
/// The caller filters out dead or invalid players and must evaluate each
/// (blast, player) pair exactly once: the impulse is added to the current
/// velocity, so a second call stacks.
///
/// Only the horizontal part of the blast direction is used. The vertical
/// component is always upward and independent of whether the player is
/// above or below the origin.
pub fn compute_boost(
    origin: Vec3,
    player: &PlayerSnapshot,
    thrower_team: Option<Team>,
    params: &BoostParameters,
) -> Option<Boost> {
    if params.ignore_team_grenades && thrower_team == Some(player.team) {
        return None;
    }
    if params.only_boost_in_air && player.on_ground {
        return None;
    }

    let separation = player.position - origin;
    let distance = separation.length();
    let strength = boost_strength(distance, params)?;

    if distance <= MIN_SEPARATION {
        return None;
    }
    let dir = separation / distance;

    let horizontal_distance = Vec2::new(separation.x, separation.y).length();
    let horizontal_ratio = (horizontal_distance / FULL_HORIZONTAL_DISTANCE).min(1.0);

    let horizontal = params.horizontal_boost * strength * horizontal_ratio;
    let vertical = params.vertical_boost * strength;

    let impulse = Vec3::new(dir.x * horizontal, dir.y * horizontal, vertical);
    let velocity = (player.velocity + impulse).clamp_length_max(params.max_boost_velocity);

    Some(Boost {
        strength,
        impulse,
        velocity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn player_at(position: Vec3) -> PlayerSnapshot {
        PlayerSnapshot {
            id: 2,
            team: Team::Terrorist,
            position,
            velocity: Vec3::ZERO,
            alive: true,
            on_ground: true,
        }
    }

    #[test]
    fn side_blast_matches_reference_numbers() {
        let params = BoostParameters::default();
        let player = player_at(Vec3::new(100.0, 0.0, 0.0));

        let boost = compute_boost(Vec3::ZERO, &player, Some(Team::Terrorist), &params)
            .expect("inside radius");

        assert!((boost.strength - 0.857_142_9).abs() < EPS);
        assert!((boost.velocity.x - 685.714_3).abs() < 0.01);
        assert!(boost.velocity.y.abs() < EPS);
        assert!((boost.velocity.z - 342.857_15).abs() < 0.01);
    }

    #[test]
    fn just_outside_radius_is_untouched() {
        let params = BoostParameters::default();
        let player = player_at(Vec3::new(0.0, 0.0, 350.0001));
        assert_eq!(compute_boost(Vec3::ZERO, &player, None, &params), None);
    }

    #[test]
    fn exactly_on_radius_is_untouched() {
        let params = BoostParameters::default();
        let player = player_at(Vec3::new(350.0, 0.0, 0.0));
        assert_eq!(compute_boost(Vec3::ZERO, &player, None, &params), None);
    }

    #[test]
    fn strength_decreases_with_distance_and_stays_in_range() {
        let params = BoostParameters::default();
        let mut previous = f32::INFINITY;
        let mut d = 0.0;
        while d < params.blast_radius {
            let s = boost_strength(d, &params).expect("inside radius");
            assert!(s > 0.0 && s <= params.boost_multiplier);
            assert!(s < previous);
            previous = s;
            d += 7.0;
        }
        assert_eq!(boost_strength(params.blast_radius, &params), None);
        assert_eq!(boost_strength(1000.0, &params), None);
    }

    #[test]
    fn co_located_player_is_skipped() {
        let params = BoostParameters::default();
        let player = player_at(Vec3::new(0.005, 0.0, 0.0));
        assert_eq!(compute_boost(Vec3::ZERO, &player, None, &params), None);
    }

    #[test]
    fn player_above_blast_gets_mostly_vertical_push() {
        let params = BoostParameters::default();
        let player = player_at(Vec3::new(10.0, 0.0, 50.0));

        let boost = compute_boost(Vec3::ZERO, &player, None, &params).expect("inside radius");

        // Horizontal ratio is 10/100, so the push is a tenth of the full horizontal boost.
        let dir_x = 10.0 / Vec3::new(10.0, 0.0, 50.0).length();
        let expected_x = dir_x * params.horizontal_boost * boost.strength * 0.1;
        assert!((boost.impulse.x - expected_x).abs() < EPS);
        assert!((boost.impulse.z - params.vertical_boost * boost.strength).abs() < EPS);
    }

    #[test]
    fn player_below_blast_is_still_pushed_up() {
        let params = BoostParameters::default();
        let player = player_at(Vec3::new(0.0, 50.0, -100.0));

        let boost = compute_boost(Vec3::ZERO, &player, None, &params).expect("inside radius");

        assert!(boost.impulse.z > 0.0);
        assert!(boost.velocity.z > 0.0);
    }

    #[test]
    fn resulting_speed_is_clamped_without_changing_direction() {
        let params = BoostParameters {
            max_boost_velocity: 500.0,
            ..BoostParameters::default()
        };
        let mut player = player_at(Vec3::new(20.0, 20.0, 0.0));
        player.velocity = Vec3::new(300.0, -100.0, 250.0);

        let boost = compute_boost(Vec3::ZERO, &player, None, &params).expect("inside radius");
        let unclamped = player.velocity + boost.impulse;

        assert!(unclamped.length() > params.max_boost_velocity);
        assert!(boost.velocity.length() <= params.max_boost_velocity + EPS);
        let drift = (boost.velocity.normalize() - unclamped.normalize()).length();
        assert!(drift < 1e-5);
    }

    #[test]
    fn unclamped_result_adds_impulse_to_current_velocity() {
        let params = BoostParameters::default();
        let mut player = player_at(Vec3::new(-150.0, 0.0, 0.0));
        player.velocity = Vec3::new(10.0, 20.0, 30.0);

        let boost = compute_boost(Vec3::ZERO, &player, None, &params).expect("inside radius");

        assert_eq!(boost.velocity, player.velocity + boost.impulse);
        assert!(boost.impulse.x < 0.0);
    }

    #[test]
    fn same_team_ignored_when_filter_enabled() {
        let params = BoostParameters {
            ignore_team_grenades: true,
            ..BoostParameters::default()
        };
        for x in [1.0, 50.0, 200.0, 349.0] {
            let player = player_at(Vec3::new(x, 0.0, 0.0));
            assert_eq!(
                compute_boost(Vec3::ZERO, &player, Some(Team::Terrorist), &params),
                None
            );
        }

        let enemy = player_at(Vec3::new(50.0, 0.0, 0.0));
        assert!(compute_boost(Vec3::ZERO, &enemy, Some(Team::CounterTerrorist), &params).is_some());
    }

    #[test]
    fn grounded_player_ignored_when_air_only() {
        let params = BoostParameters {
            only_boost_in_air: true,
            ..BoostParameters::default()
        };
        let mut player = player_at(Vec3::new(50.0, 0.0, 0.0));
        assert_eq!(compute_boost(Vec3::ZERO, &player, None, &params), None);

        player.on_ground = false;
        assert!(compute_boost(Vec3::ZERO, &player, None, &params).is_some());
    }
}
