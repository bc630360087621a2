//! Player effect state: bounded stats and stacking duration buffs.

use std::time::Duration;

use heavy_machine_gun_core::Buff;

/// Movement speed the player starts every life with.
pub const INITIAL_SPEED: u32 = 300;
/// Upper bound on movement speed.
pub const MAX_SPEED: u32 = 600;
/// Fire interval in milliseconds the player starts every life with.
pub const INITIAL_FIRE_RATE_MS: u32 = 200;
/// Lower bound on the fire interval in milliseconds.
pub const MIN_FIRE_RATE_MS: u32 = 50;

const MULTI_SHOT_DURATION: Duration = Duration::from_millis(15_000);
const MULTI_SHOT_EXTENSION: Duration = Duration::from_millis(8_000);
const SHIELD_DURATION: Duration = Duration::from_millis(12_000);
const SHIELD_EXTENSION: Duration = Duration::from_millis(6_000);

/// Result of activating a stacking buff.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuffChange {
    /// The buff was inactive and switched on with its first-activation duration.
    Activated(Duration),
    /// The buff was already active; carries the total duration after extension.
    Extended(Duration),
}

#[derive(Clone, Copy, Debug, Default)]
struct TimedBuff {
    active: bool,
    started_at: Duration,
    duration: Duration,
}

impl TimedBuff {
    fn activate(&mut self, now: Duration, first: Duration, extension: Duration) -> BuffChange {
        if self.active {
            self.duration = self.duration.saturating_add(extension);
            BuffChange::Extended(self.duration)
        } else {
            *self = Self {
                active: true,
                started_at: now,
                duration: first,
            };
            BuffChange::Activated(first)
        }
    }

    fn has_expired(&self, now: Duration) -> bool {
        self.active && now.saturating_sub(self.started_at) > self.duration
    }

    fn remaining(&self, now: Duration) -> Duration {
        if !self.active {
            return Duration::ZERO;
        }
        (self.started_at + self.duration).saturating_sub(now)
    }
}

/// Bounded stats and time-boxed buffs held by the player ship.
///
/// Everything here resets on life loss, permanent boosts included.
#[derive(Clone, Debug)]
pub struct PlayerEffects {
    speed: u32,
    fire_rate_ms: u32,
    multi_shot: TimedBuff,
    shield: TimedBuff,
}

impl PlayerEffects {
    /// Creates effects holding the initial stats and no buffs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            speed: INITIAL_SPEED,
            fire_rate_ms: INITIAL_FIRE_RATE_MS,
            multi_shot: TimedBuff::default(),
            shield: TimedBuff::default(),
        }
    }

    /// Current movement speed.
    #[must_use]
    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Current fire interval in milliseconds.
    #[must_use]
    pub fn fire_rate_ms(&self) -> u32 {
        self.fire_rate_ms
    }

    /// Raises movement speed by up to `amount`, returning the increase actually applied.
    pub fn boost_speed(&mut self, amount: u32) -> u32 {
        let boosted = self.speed.saturating_add(amount).min(MAX_SPEED);
        let increase = boosted.saturating_sub(self.speed);
        self.speed = boosted;
        increase
    }

    /// Shortens the fire interval by up to `amount`, returning the reduction actually applied.
    pub fn reduce_fire_rate(&mut self, amount: u32) -> u32 {
        let reduced = self.fire_rate_ms.saturating_sub(amount).max(MIN_FIRE_RATE_MS);
        let reduction = self.fire_rate_ms.saturating_sub(reduced);
        self.fire_rate_ms = reduced;
        reduction
    }

    /// Switches a buff on, or extends it when it is already active.
    pub fn activate(&mut self, buff: Buff, now: Duration) -> BuffChange {
        match buff {
            Buff::MultiShot => {
                self.multi_shot
                    .activate(now, MULTI_SHOT_DURATION, MULTI_SHOT_EXTENSION)
            }
            Buff::Shield => self.shield.activate(now, SHIELD_DURATION, SHIELD_EXTENSION),
        }
    }

    /// Reports whether the buff is active.
    #[must_use]
    pub fn is_active(&self, buff: Buff) -> bool {
        self.buff(buff).active
    }

    /// Total duration granted to the buff, zero when inactive.
    #[must_use]
    pub fn duration(&self, buff: Buff) -> Duration {
        let state = self.buff(buff);
        if state.active {
            state.duration
        } else {
            Duration::ZERO
        }
    }

    /// Time left on the buff at `now`.
    #[must_use]
    pub fn remaining(&self, buff: Buff, now: Duration) -> Duration {
        self.buff(buff).remaining(now)
    }

    /// Deactivates every buff whose duration elapsed, returning them in declaration order.
    pub fn expire(&mut self, now: Duration) -> Vec<Buff> {
        let mut expired = Vec::new();
        if self.multi_shot.has_expired(now) {
            self.multi_shot = TimedBuff::default();
            expired.push(Buff::MultiShot);
        }
        if self.shield.has_expired(now) {
            self.shield = TimedBuff::default();
            expired.push(Buff::Shield);
        }
        expired
    }

    /// Restores the initial stats and clears every buff.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn buff(&self, buff: Buff) -> &TimedBuff {
        match buff {
            Buff::MultiShot => &self.multi_shot,
            Buff::Shield => &self.shield,
        }
    }
}

impl Default for PlayerEffects {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn multi_shot_extension_adds_fixed_increment() {
        let mut effects = PlayerEffects::new();
        assert_eq!(
            effects.activate(Buff::MultiShot, ms(1_000)),
            BuffChange::Activated(ms(15_000))
        );
        let before = effects.duration(Buff::MultiShot);
        assert_eq!(
            effects.activate(Buff::MultiShot, ms(4_000)),
            BuffChange::Extended(ms(23_000))
        );
        assert_eq!(effects.duration(Buff::MultiShot) - before, ms(8_000));
    }

    #[test]
    fn shield_extension_keeps_original_start() {
        let mut effects = PlayerEffects::new();
        let _ = effects.activate(Buff::Shield, ms(0));
        let _ = effects.activate(Buff::Shield, ms(10_000));
        assert_eq!(effects.remaining(Buff::Shield, ms(10_000)), ms(8_000));
    }

    #[test]
    fn buffs_expire_only_after_duration_is_exceeded() {
        let mut effects = PlayerEffects::new();
        let _ = effects.activate(Buff::Shield, ms(0));
        assert!(effects.expire(ms(12_000)).is_empty());
        assert_eq!(effects.expire(ms(12_001)), vec![Buff::Shield]);
        assert!(!effects.is_active(Buff::Shield));
        assert_eq!(effects.remaining(Buff::Shield, ms(12_001)), Duration::ZERO);
    }

    #[test]
    fn capped_fire_rate_reports_zero_reduction() {
        let mut effects = PlayerEffects::new();
        assert_eq!(effects.reduce_fire_rate(1_000), 150);
        assert_eq!(effects.fire_rate_ms(), MIN_FIRE_RATE_MS);
        assert_eq!(effects.reduce_fire_rate(20), 0);
        assert_eq!(effects.fire_rate_ms(), MIN_FIRE_RATE_MS);
    }

    #[test]
    fn speed_boost_is_clamped_to_ceiling() {
        let mut effects = PlayerEffects::new();
        assert_eq!(effects.boost_speed(280), 280);
        assert_eq!(effects.boost_speed(50), 20);
        assert_eq!(effects.boost_speed(50), 0);
        assert_eq!(effects.speed(), MAX_SPEED);
    }

    #[test]
    fn reset_strips_permanent_and_temporary_effects() {
        let mut effects = PlayerEffects::new();
        let _ = effects.boost_speed(100);
        let _ = effects.reduce_fire_rate(100);
        let _ = effects.activate(Buff::MultiShot, ms(0));
        let _ = effects.activate(Buff::Shield, ms(0));
        effects.reset();
        assert_eq!(effects.speed(), INITIAL_SPEED);
        assert_eq!(effects.fire_rate_ms(), INITIAL_FIRE_RATE_MS);
        assert!(!effects.is_active(Buff::MultiShot));
        assert!(!effects.is_active(Buff::Shield));
    }
}
