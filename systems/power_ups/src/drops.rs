//! Power-up drops rolled when a bullet destroys an enemy.

use heavy_machine_gun_core::{EnemyKind, GameSnapshot, PowerUpKind};
use rand::Rng;

use crate::weights::{power_up_weights, weighted_select};

const MAX_DROP_CHANCE: f64 = 0.6;
const LEVEL_DROP_BONUS: f64 = 0.01;
const MAX_LEVEL_DROP_BONUS: f64 = 0.15;

const FAST_STAT_DROP_CHANCE: f64 = 0.3;
static FAST_STAT_DROPS: [PowerUpKind; 2] = [PowerUpKind::Speed, PowerUpKind::FireRate];
const STRONG_STAT_DROP_CHANCE: f64 = 0.4;
static STRONG_STAT_DROPS: [PowerUpKind; 4] = [
    PowerUpKind::Speed,
    PowerUpKind::FireRate,
    PowerUpKind::PermanentSpeed,
    PowerUpKind::PermanentFireRate,
];
const BOSS_SPECIAL_DROP_CHANCE: f64 = 0.5;
static BOSS_SPECIAL_DROPS: [PowerUpKind; 4] = [
    PowerUpKind::Bomb,
    PowerUpKind::Bomb,
    PowerUpKind::PermanentSpeed,
    PowerUpKind::PermanentFireRate,
];

/// Probability that destroying an enemy of `kind` at `level` drops a power-up.
#[must_use]
pub fn drop_chance(kind: EnemyKind, level: u32) -> f64 {
    let base = match kind {
        EnemyKind::Basic => 0.02,
        EnemyKind::Fast => 0.05,
        EnemyKind::Strong => 0.15,
        EnemyKind::Boss => 0.35,
    };
    let level_bonus =
        (LEVEL_DROP_BONUS * f64::from(level.saturating_sub(1))).min(MAX_LEVEL_DROP_BONUS);
    (base + level_bonus).min(MAX_DROP_CHANCE)
}

/// Chooses the kind dropped by an enemy of `kind`.
///
/// Tougher enemies may drop stat boosts or bombs; otherwise the drop follows
/// the natural weighting for the current game state.
pub fn drop_kind<R>(kind: EnemyKind, game: &GameSnapshot, rng: &mut R) -> PowerUpKind
where
    R: Rng + ?Sized,
{
    let special: Option<(f64, &[PowerUpKind])> = match kind {
        EnemyKind::Basic => None,
        EnemyKind::Fast => Some((FAST_STAT_DROP_CHANCE, &FAST_STAT_DROPS[..])),
        EnemyKind::Strong => Some((STRONG_STAT_DROP_CHANCE, &STRONG_STAT_DROPS[..])),
        EnemyKind::Boss => Some((BOSS_SPECIAL_DROP_CHANCE, &BOSS_SPECIAL_DROPS[..])),
    };

    if let Some((chance, table)) = special {
        if rng.gen_bool(chance) {
            return table[rng.gen_range(0..table.len())];
        }
    }

    weighted_select(&power_up_weights(game), rng).unwrap_or(PowerUpKind::MultiShot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_chance_includes_capped_level_bonus() {
        assert!((drop_chance(EnemyKind::Basic, 1) - 0.02).abs() < 1e-9);
        assert!((drop_chance(EnemyKind::Fast, 6) - 0.10).abs() < 1e-9);
        assert!((drop_chance(EnemyKind::Strong, 100) - 0.30).abs() < 1e-9);
        assert!((drop_chance(EnemyKind::Boss, 100) - 0.50).abs() < 1e-9);
    }

    #[test]
    fn drop_chance_never_exceeds_cap() {
        for kind in EnemyKind::ALL {
            for level in 1..500 {
                assert!(drop_chance(kind, level) <= MAX_DROP_CHANCE);
            }
        }
    }
}
