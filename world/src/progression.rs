//! Kill-driven level progression.

/// Kills required to leave the first level.
pub const FIRST_LEVEL_KILLS: u32 = 10;
/// Additional kills required by every subsequent level.
pub const KILLS_STEP_PER_LEVEL: u32 = 5;

/// Kills needed while at `level` before the next level is reached.
#[must_use]
pub fn kills_to_complete(level: u32) -> u32 {
    FIRST_LEVEL_KILLS.saturating_add(KILLS_STEP_PER_LEVEL.saturating_mul(level.saturating_sub(1)))
}

/// Cumulative kills at which the player leaves `level`.
#[must_use]
pub fn kill_threshold(level: u32) -> u64 {
    let level = u64::from(level.max(1));
    u64::from(FIRST_LEVEL_KILLS) * level
        + u64::from(KILLS_STEP_PER_LEVEL) * level * (level - 1) / 2
}

/// Level reached after `kills` enemies were destroyed.
#[must_use]
pub fn level_for_kills(kills: u32) -> u32 {
    let kills = u64::from(kills);
    let mut level = 1;
    while kills >= kill_threshold(level) {
        level += 1;
    }
    level
}
