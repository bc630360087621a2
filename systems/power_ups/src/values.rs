//! Level-scaled magnitudes carried by power-ups.

use heavy_machine_gun_core::PowerUpKind;

const DURATION_BONUS_PER_LEVEL_MS: u32 = 250;
const MAX_DURATION_BONUS_MS: u32 = 5_000;
const MULTI_SHOT_BASE_MS: u32 = 5_000;
const SHIELD_BASE_MS: u32 = 8_000;
const EXTRA_POINTS_BASE: u32 = 50;
const EXTRA_POINTS_PER_LEVEL: u32 = 10;

/// Movement speed added by a speed pickup.
pub const SPEED_BOOST: u32 = 50;
/// Fire interval reduction in milliseconds granted by a fire-rate pickup.
pub const FIRE_RATE_BOOST_MS: u32 = 30;
/// Movement speed added by a permanent speed pickup.
pub const PERMANENT_SPEED_BOOST: u32 = 30;
/// Fire interval reduction in milliseconds granted by a permanent fire-rate pickup.
pub const PERMANENT_FIRE_RATE_BOOST_MS: u32 = 20;

/// Duration scaling shared by timed pickups: `min(5000, (level - 1) * 250)` ms.
#[must_use]
pub fn duration_bonus_ms(level: u32) -> u32 {
    level
        .saturating_sub(1)
        .saturating_mul(DURATION_BONUS_PER_LEVEL_MS)
        .min(MAX_DURATION_BONUS_MS)
}

/// Resolves the magnitude a power-up of `kind` carries at `level`.
///
/// Timed kinds yield milliseconds, stat kinds yield deltas, and
/// extra life and bomb carry the unit sentinel.
#[must_use]
pub fn value_for(kind: PowerUpKind, level: u32) -> u32 {
    match kind {
        PowerUpKind::MultiShot => MULTI_SHOT_BASE_MS + duration_bonus_ms(level),
        PowerUpKind::Shield => SHIELD_BASE_MS + duration_bonus_ms(level),
        PowerUpKind::ExtraPoints => EXTRA_POINTS_BASE.saturating_add(
            level
                .saturating_sub(1)
                .saturating_mul(EXTRA_POINTS_PER_LEVEL),
        ),
        PowerUpKind::ExtraLife | PowerUpKind::Bomb => 1,
        PowerUpKind::Speed => SPEED_BOOST,
        PowerUpKind::FireRate => FIRE_RATE_BOOST_MS,
        PowerUpKind::PermanentSpeed => PERMANENT_SPEED_BOOST,
        PowerUpKind::PermanentFireRate => PERMANENT_FIRE_RATE_BOOST_MS,
    }
}
