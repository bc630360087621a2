#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stateless difficulty curve mapping the player level to enemy pressure.
//!
//! Every function here is pure: callers pass the level they read from the
//! latest [`heavy_machine_gun_core::GameSnapshot`] and receive the tuning in
//! effect for that level. Nothing is cached, so a level-up is observed on the
//! very next decision without any notification.

use std::time::Duration;

use heavy_machine_gun_core::{EnemyKind, MovementPattern};

const BASE_SPAWN_DELAY_MS: u64 = 2_000;
const SPAWN_DELAY_STEP_MS: u64 = 50;
const MAX_SPAWN_DELAY_REDUCTION_MS: u64 = 1_200;
/// Lower bound on the interval between enemy spawn ticks.
pub const MIN_SPAWN_DELAY: Duration = Duration::from_millis(400);

/// Largest number of enemies produced by a single spawn batch.
pub const MAX_ENEMY_COUNT: u32 = 15;

/// `(first level, enemies per batch)` pairs in ascending level order.
const ENEMY_COUNT_BREAKPOINTS: [(u32, u32); 15] = [
    (1, 1),
    (2, 2),
    (4, 3),
    (6, 4),
    (8, 5),
    (10, 6),
    (12, 7),
    (14, 8),
    (15, 9),
    (16, 10),
    (18, 11),
    (19, 12),
    (20, 13),
    (21, 14),
    (22, MAX_ENEMY_COUNT),
];

const WAVE_UNLOCK_LEVEL: u32 = 4;
const WAVE_BASE_PERCENT: f64 = 8.0;
const WAVE_PERCENT_PER_LEVEL: f64 = 1.5;
const WAVE_MAX_PERCENT: f64 = 35.0;
const MAX_WAVES: u32 = 4;

const LEVEL_BONUS_START: u32 = 5;
const LEVEL_BONUS_STEP: u32 = 3;
const MAX_LEVEL_BONUS: u32 = 8;

const SIDE_ENTRY_LEVEL: u32 = 6;
const SIDE_ENTRY_CHANCE: f64 = 0.15;

/// Interval between enemy spawn ticks at the provided level.
///
/// `max(400, 2000 - min(level * 50, 1200))` milliseconds.
#[must_use]
pub fn spawn_delay(level: u32) -> Duration {
    let reduction = (u64::from(level) * SPAWN_DELAY_STEP_MS).min(MAX_SPAWN_DELAY_REDUCTION_MS);
    let delay = Duration::from_millis(BASE_SPAWN_DELAY_MS.saturating_sub(reduction));
    delay.max(MIN_SPAWN_DELAY)
}

/// Number of enemies produced by one spawn batch at the provided level.
#[must_use]
pub fn enemy_count(level: u32) -> u32 {
    ENEMY_COUNT_BREAKPOINTS
        .iter()
        .take_while(|(threshold, _)| level >= *threshold)
        .last()
        .map_or(1, |(_, count)| *count)
}

/// Enemy kinds eligible at the provided level.
///
/// Kinds may appear more than once; a uniform draw from the returned roster
/// therefore favours the duplicated kinds. The roster is never empty.
#[must_use]
pub fn roster(level: u32) -> Vec<EnemyKind> {
    let mut roster = vec![EnemyKind::Basic];
    if level >= 3 {
        roster.push(EnemyKind::Fast);
    }
    if level >= 5 {
        roster.push(EnemyKind::Strong);
    }
    if level >= 8 {
        roster.push(EnemyKind::Boss);
    }
    if level >= 10 {
        roster.extend([EnemyKind::Fast, EnemyKind::Strong]);
    }
    if level >= 12 {
        roster.extend([EnemyKind::Strong, EnemyKind::Boss]);
    }
    if level >= 15 {
        roster.retain(|kind| *kind != EnemyKind::Basic);
        roster.push(EnemyKind::Boss);
    }
    if level >= 20 {
        roster.extend([EnemyKind::Basic, EnemyKind::Boss]);
    }
    roster
}

/// Distinct enemy kinds unlocked at the provided level, in ascending toughness.
#[must_use]
pub fn unlocked_kinds(level: u32) -> Vec<EnemyKind> {
    let roster = roster(level);
    EnemyKind::ALL
        .into_iter()
        .filter(|kind| roster.contains(kind))
        .collect()
}

/// Probability in `[0, 1]` that a spawn tick produces a multi-batch wave.
#[must_use]
pub fn wave_chance(level: u32) -> f64 {
    if level < WAVE_UNLOCK_LEVEL {
        return 0.0;
    }
    let percent = WAVE_BASE_PERCENT + WAVE_PERCENT_PER_LEVEL * f64::from(level - WAVE_UNLOCK_LEVEL);
    percent.min(WAVE_MAX_PERCENT) / 100.0
}

/// Largest number of batches a wave may contain at the provided level.
#[must_use]
pub fn max_waves(level: u32) -> u32 {
    if level < WAVE_UNLOCK_LEVEL {
        return 1;
    }
    (2 + (level - WAVE_UNLOCK_LEVEL) / 5).min(MAX_WAVES)
}

/// Shared escalation term used for hit point, speed and score scaling.
///
/// `min(floor((level - 5) / 3), 8)`, never negative.
#[must_use]
pub fn level_bonus(level: u32) -> u32 {
    (level.saturating_sub(LEVEL_BONUS_START) / LEVEL_BONUS_STEP).min(MAX_LEVEL_BONUS)
}

/// Combat statistics of an enemy at a given level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Hit points the enemy starts with.
    pub max_hp: u32,
    /// Descent speed in playfield units per second.
    pub speed: f32,
    /// Score awarded on destruction.
    pub score_value: u32,
}

/// Resolves the statistics of an enemy kind at the provided level.
///
/// Hit point growth is capped per kind so that no enemy becomes unkillable.
#[must_use]
pub fn enemy_stats(kind: EnemyKind, level: u32) -> EnemyStats {
    let bonus = level_bonus(level);
    let (base_hp, base_speed, base_score) = base_stats(kind);
    let hp_bonus = match kind {
        EnemyKind::Basic => bonus / 2,
        EnemyKind::Fast => bonus.min(3),
        EnemyKind::Strong => bonus.min(5),
        EnemyKind::Boss => bonus.min(7),
    };

    EnemyStats {
        max_hp: base_hp + hp_bonus,
        speed: base_speed * (1.0 + 0.04 * bonus as f32),
        score_value: base_score + 2 * bonus,
    }
}

fn base_stats(kind: EnemyKind) -> (u32, f32, u32) {
    match kind {
        EnemyKind::Basic => (1, 100.0, 10),
        EnemyKind::Fast => (1, 170.0, 20),
        EnemyKind::Strong => (3, 80.0, 30),
        EnemyKind::Boss => (8, 55.0, 100),
    }
}

/// Movement patterns an enemy kind may be assigned. Never empty.
#[must_use]
pub fn movement_patterns(kind: EnemyKind) -> &'static [MovementPattern] {
    match kind {
        EnemyKind::Basic => &[MovementPattern::Straight],
        EnemyKind::Fast => &[MovementPattern::Zigzag],
        EnemyKind::Strong => &[MovementPattern::Straight, MovementPattern::Zigzag],
        EnemyKind::Boss => &[MovementPattern::Circle],
    }
}

/// Probability that an enemy enters from a side edge at the provided level.
#[must_use]
pub fn side_entry_chance(level: u32) -> f64 {
    if level >= SIDE_ENTRY_LEVEL {
        SIDE_ENTRY_CHANCE
    } else {
        0.0
    }
}
