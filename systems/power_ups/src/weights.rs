//! Situational weighting of naturally spawned power-up kinds.

use heavy_machine_gun_core::{GameSnapshot, PowerUpKind};
use rand::Rng;

/// Kinds eligible for natural spawns, in selection order.
pub const NATURAL_KINDS: [PowerUpKind; 4] = [
    PowerUpKind::MultiShot,
    PowerUpKind::Shield,
    PowerUpKind::ExtraPoints,
    PowerUpKind::ExtraLife,
];

/// Relative likelihood of each natural kind given the current game state.
///
/// Multipliers compound in a fixed order: remaining lives, level tiers,
/// active shield, active multi-shot and finally on-screen crowding.
#[must_use]
pub fn power_up_weights(game: &GameSnapshot) -> [(PowerUpKind, f64); 4] {
    let mut multi_shot = 4.0;
    let mut shield = 3.0;
    let mut extra_points = 2.0;
    let mut extra_life = 2.0;

    if game.lives <= 1 {
        extra_life *= 5.0;
        shield *= 4.0;
    } else if game.lives <= 2 {
        extra_life *= 3.0;
        shield *= 2.0;
    }

    if game.level >= 3 {
        shield *= 1.8;
        multi_shot *= 1.5;
        extra_life *= 1.4;
    }
    if game.level >= 5 {
        extra_life *= 2.0;
        shield *= 1.5;
        extra_points *= 0.7;
    }
    if game.level >= 8 {
        extra_life *= 1.5;
        multi_shot *= 1.3;
        extra_points *= 0.5;
    }

    if game.shield_active {
        shield *= 0.3;
        multi_shot *= 2.5;
        extra_life *= 1.8;
    }
    if game.multi_shot_active {
        multi_shot *= 0.2;
        shield *= 2.2;
        extra_life *= 1.5;
    }

    if game.power_ups_on_screen >= 2 {
        extra_life *= 1.5;
        shield *= 1.3;
        extra_points *= 0.5;
    }

    [
        (PowerUpKind::MultiShot, multi_shot),
        (PowerUpKind::Shield, shield),
        (PowerUpKind::ExtraPoints, extra_points),
        (PowerUpKind::ExtraLife, extra_life),
    ]
}

/// Roulette-wheel selection over `entries`.
///
/// Draws uniformly in `[0, total)` and subtracts weights in order until the
/// remainder is no longer positive. Falls back to the first entry when the
/// total is not positive or rounding leaves no winner; returns `None` only
/// for an empty slice.
pub fn weighted_select<T, R>(entries: &[(T, f64)], rng: &mut R) -> Option<T>
where
    T: Copy,
    R: Rng + ?Sized,
{
    let (first, _) = entries.first()?;
    let total: f64 = entries.iter().map(|(_, weight)| weight.max(0.0)).sum();
    if !(total.is_finite() && total > 0.0) {
        return Some(*first);
    }

    let mut remainder = rng.gen_range(0.0..total);
    for (candidate, weight) in entries {
        remainder -= weight.max(0.0);
        if remainder <= 0.0 {
            return Some(*candidate);
        }
    }
    Some(*first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heavy_machine_gun_core::GamePhase;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn game(lives: u32, level: u32) -> GameSnapshot {
        GameSnapshot {
            phase: GamePhase::Playing,
            score: 0,
            level,
            lives,
            enemies_killed: 0,
            shield_active: false,
            multi_shot_active: false,
            power_ups_on_screen: 0,
            enemies_on_screen: 0,
        }
    }

    fn weight_of(weights: &[(PowerUpKind, f64)], kind: PowerUpKind) -> f64 {
        weights
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, weight)| *weight)
            .unwrap_or_default()
    }

    #[test]
    fn base_weights_apply_at_first_level() {
        let weights = power_up_weights(&game(3, 1));
        assert_eq!(
            weights,
            [
                (PowerUpKind::MultiShot, 4.0),
                (PowerUpKind::Shield, 3.0),
                (PowerUpKind::ExtraPoints, 2.0),
                (PowerUpKind::ExtraLife, 2.0),
            ]
        );
    }

    #[test]
    fn last_life_favours_relief() {
        let weights = power_up_weights(&game(1, 1));
        assert!((weight_of(&weights, PowerUpKind::ExtraLife) - 10.0).abs() < 1e-9);
        assert!((weight_of(&weights, PowerUpKind::Shield) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn multipliers_compound_across_tiers() {
        let mut snapshot = game(2, 8);
        snapshot.shield_active = true;
        snapshot.power_ups_on_screen = 2;
        let weights = power_up_weights(&snapshot);
        let expected_life = 2.0 * 3.0 * 1.4 * 2.0 * 1.5 * 1.8 * 1.5;
        let expected_shield = 3.0 * 2.0 * 1.8 * 1.5 * 0.3 * 1.3;
        let expected_points = 2.0 * 0.7 * 0.5 * 0.5;
        let expected_multi = 4.0 * 1.5 * 1.3 * 2.5;
        assert!((weight_of(&weights, PowerUpKind::ExtraLife) - expected_life).abs() < 1e-9);
        assert!((weight_of(&weights, PowerUpKind::Shield) - expected_shield).abs() < 1e-9);
        assert!((weight_of(&weights, PowerUpKind::ExtraPoints) - expected_points).abs() < 1e-9);
        assert!((weight_of(&weights, PowerUpKind::MultiShot) - expected_multi).abs() < 1e-9);
    }

    #[test]
    fn degenerate_weights_fall_back_to_first_entry() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let zeroed = [(PowerUpKind::Shield, 0.0), (PowerUpKind::Bomb, 0.0)];
        assert_eq!(weighted_select(&zeroed, &mut rng), Some(PowerUpKind::Shield));
        let empty: [(PowerUpKind, f64); 0] = [];
        assert_eq!(weighted_select(&empty, &mut rng), None);
    }

    #[test]
    fn weights_are_never_negative() {
        for lives in 0..=5 {
            for level in 1..=30 {
                let mut snapshot = game(lives, level);
                snapshot.shield_active = level % 2 == 0;
                snapshot.multi_shot_active = level % 3 == 0;
                snapshot.power_ups_on_screen = level % 4;
                for (_, weight) in power_up_weights(&snapshot) {
                    assert!(weight > 0.0);
                }
            }
        }
    }
}
