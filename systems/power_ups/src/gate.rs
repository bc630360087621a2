//! Probability gates controlling natural, bonus and emergency spawns.

use std::time::Duration;

use heavy_machine_gun_core::{BonusTier, GameSnapshot};

/// Interval between natural spawn attempts.
pub const NATURAL_SPAWN_INTERVAL: Duration = Duration::from_millis(4_000);
/// Upper bound on any spawn gate.
pub const MAX_CHANCE: f64 = 0.95;
/// Probability that a bonus tier schedules its delayed attempt.
pub const BONUS_TRIGGER_CHANCE: f64 = 0.2;
/// Delay before the emergency extra life appears.
pub const EMERGENCY_DELAY: Duration = Duration::from_millis(500);
/// Probability that an attempt schedules the emergency extra life.
pub const EMERGENCY_TRIGGER_CHANCE: f64 = 0.3;
/// Lowest level at which emergency relief is considered.
pub const EMERGENCY_MIN_LEVEL: u32 = 10;
/// Highest life count that still qualifies for emergency relief.
pub const EMERGENCY_MAX_LIVES: u32 = 2;

/// Timing and gating of a delayed bonus attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BonusSchedule {
    /// Delay between the natural attempt and the bonus attempt.
    pub delay: Duration,
    /// Factor applied to the final chance when the bonus attempt fires.
    pub gate_factor: f64,
    /// Lowest level at which the tier is rolled.
    pub min_level: u32,
}

/// Bonus tiers in the order they are rolled.
pub const BONUS_TIERS: [BonusTier; 2] = [BonusTier::First, BonusTier::Second];

/// Resolves the timing and gating of a bonus tier.
#[must_use]
pub const fn bonus_schedule(tier: BonusTier) -> BonusSchedule {
    match tier {
        BonusTier::First => BonusSchedule {
            delay: Duration::from_millis(800),
            gate_factor: 0.6,
            min_level: 4,
        },
        BonusTier::Second => BonusSchedule {
            delay: Duration::from_millis(1_600),
            gate_factor: 0.4,
            min_level: 7,
        },
    }
}

/// Level-driven part of the spawn gate: `min(0.45, 0.25 + 0.02 * (level - 1))`.
#[must_use]
pub fn base_chance(level: u32) -> f64 {
    (0.25 + 0.02 * f64::from(level.saturating_sub(1))).min(0.45)
}

/// Bonus for an empty or sparse playfield.
#[must_use]
pub fn active_power_up_bonus(on_screen: u32) -> f64 {
    match on_screen {
        0 => 0.2,
        1 => 0.1,
        _ => 0.0,
    }
}

/// Bonus for a player close to losing the game.
///
/// The unshielded increment only applies while lives are low.
#[must_use]
pub fn emergency_bonus(lives: u32, shield_active: bool) -> f64 {
    let lives_bonus = if lives <= 1 {
        0.25
    } else if lives <= 2 {
        0.15
    } else {
        return 0.0;
    };
    if shield_active {
        lives_bonus
    } else {
        lives_bonus + 0.1
    }
}

/// Probability that a natural spawn attempt succeeds.
#[must_use]
pub fn final_chance(game: &GameSnapshot) -> f64 {
    let chance = base_chance(game.level)
        + active_power_up_bonus(game.power_ups_on_screen)
        + emergency_bonus(game.lives, game.shield_active);
    chance.min(MAX_CHANCE)
}

/// Reports whether emergency relief may be scheduled for the game state.
#[must_use]
pub fn emergency_eligible(game: &GameSnapshot) -> bool {
    game.level >= EMERGENCY_MIN_LEVEL && game.lives <= EMERGENCY_MAX_LIVES
}
