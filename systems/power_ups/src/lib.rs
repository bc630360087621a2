#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Power-up spawn engine: natural spawns, delayed bonus attempts, emergency
//! relief and enemy drops.

pub mod drops;
pub mod gate;
pub mod values;
pub mod weights;

use std::time::Duration;

use heavy_machine_gun_core::{
    BonusTier, Command, EnemyKind, Event, GameSnapshot, KillCause, Playfield, Position,
    PowerUpKind, ScheduledAction,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use gate::{
    bonus_schedule, emergency_eligible, final_chance, BONUS_TIERS, BONUS_TRIGGER_CHANCE,
    EMERGENCY_DELAY, EMERGENCY_TRIGGER_CHANCE, NATURAL_SPAWN_INTERVAL,
};

/// Vertical coordinate at which naturally spawned power-ups appear.
pub const ENTRY_Y: f32 = -20.0;

/// Configuration parameters required to construct the power-up spawn engine.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Pure system that emits power-up spawn and scheduling commands.
#[derive(Debug)]
pub struct PowerUpSpawning {
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl PowerUpSpawning {
    /// Creates a new power-up spawn engine using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            accumulator: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and the latest game snapshot to emit power-up commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        game: &GameSnapshot,
        playfield: &Playfield,
        out: &mut Vec<Command>,
    ) {
        if game.is_game_over() || !game.is_playing() {
            self.accumulator = Duration::ZERO;
            return;
        }

        for event in events {
            match event {
                Event::GameStarted | Event::GameRestarted => {
                    self.accumulator = Duration::ZERO;
                }
                Event::TimeAdvanced { dt } => {
                    self.accumulator = self.accumulator.saturating_add(*dt);
                }
                Event::ScheduledActionFired { action, .. } => {
                    self.resolve_scheduled(*action, game, playfield, out);
                }
                Event::EnemyKilled {
                    kind,
                    position,
                    cause: KillCause::Bullet,
                    ..
                } => self.roll_drop(*kind, *position, game, out),
                _ => {}
            }
        }

        while self.accumulator >= NATURAL_SPAWN_INTERVAL {
            self.accumulator -= NATURAL_SPAWN_INTERVAL;
            self.attempt_natural_spawn(game, playfield, out);
        }
    }

    fn attempt_natural_spawn(
        &mut self,
        game: &GameSnapshot,
        playfield: &Playfield,
        out: &mut Vec<Command>,
    ) {
        let chance = final_chance(game);
        if self.rng.gen_bool(chance) {
            self.spawn_natural(game, playfield, out);
        }

        for tier in BONUS_TIERS {
            let schedule = bonus_schedule(tier);
            if game.level >= schedule.min_level && self.rng.gen_bool(BONUS_TRIGGER_CHANCE) {
                tracing::debug!(?tier, level = game.level, "bonus power-up scheduled");
                out.push(Command::Schedule {
                    delay: schedule.delay,
                    action: ScheduledAction::BonusPowerUp { tier },
                });
            }
        }

        if emergency_eligible(game) && self.rng.gen_bool(EMERGENCY_TRIGGER_CHANCE) {
            tracing::debug!(lives = game.lives, "emergency extra life scheduled");
            out.push(Command::Schedule {
                delay: EMERGENCY_DELAY,
                action: ScheduledAction::EmergencyExtraLife,
            });
        }
    }

    fn resolve_scheduled(
        &mut self,
        action: ScheduledAction,
        game: &GameSnapshot,
        playfield: &Playfield,
        out: &mut Vec<Command>,
    ) {
        match action {
            ScheduledAction::SpawnEnemy => {}
            ScheduledAction::BonusPowerUp { tier } => self.attempt_bonus(tier, game, playfield, out),
            ScheduledAction::EmergencyExtraLife => {
                if emergency_eligible(game) {
                    let position = self.entry_position(playfield);
                    self.spawn(PowerUpKind::ExtraLife, position, game.level, out);
                }
            }
        }
    }

    fn attempt_bonus(
        &mut self,
        tier: BonusTier,
        game: &GameSnapshot,
        playfield: &Playfield,
        out: &mut Vec<Command>,
    ) {
        let gate = final_chance(game) * bonus_schedule(tier).gate_factor;
        if self.rng.gen_bool(gate) {
            self.spawn_natural(game, playfield, out);
        }
    }

    fn roll_drop(
        &mut self,
        enemy: EnemyKind,
        position: Position,
        game: &GameSnapshot,
        out: &mut Vec<Command>,
    ) {
        if !self.rng.gen_bool(drops::drop_chance(enemy, game.level)) {
            return;
        }
        let kind = drops::drop_kind(enemy, game, &mut self.rng);
        self.spawn(kind, position, game.level, out);
    }

    fn spawn_natural(&mut self, game: &GameSnapshot, playfield: &Playfield, out: &mut Vec<Command>) {
        let kind = weights::weighted_select(&weights::power_up_weights(game), &mut self.rng)
            .unwrap_or(PowerUpKind::MultiShot);
        let position = self.entry_position(playfield);
        self.spawn(kind, position, game.level, out);
    }

    fn spawn(&mut self, kind: PowerUpKind, position: Position, level: u32, out: &mut Vec<Command>) {
        let value = values::value_for(kind, level);
        tracing::debug!(?kind, value, level, "power-up spawn");
        out.push(Command::SpawnPowerUp {
            kind,
            position,
            value,
        });
    }

    fn entry_position(&mut self, playfield: &Playfield) -> Position {
        let (min_x, max_x) = playfield.spawn_x_range();
        let x = if max_x > min_x {
            self.rng.gen_range(min_x..max_x)
        } else {
            min_x
        };
        Position::new(x, ENTRY_Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heavy_machine_gun_core::GamePhase;

    fn game(phase: GamePhase, level: u32, lives: u32) -> GameSnapshot {
        GameSnapshot {
            phase,
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

    #[test]
    fn no_attempt_before_interval() {
        let mut spawning = PowerUpSpawning::new(Config::new(1));
        let mut out = Vec::new();
        spawning.handle(
            &[Event::TimeAdvanced {
                dt: NATURAL_SPAWN_INTERVAL - Duration::from_millis(1),
            }],
            &game(GamePhase::Playing, 1, 3),
            &Playfield::default(),
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn game_over_discards_accumulated_time() {
        let mut spawning = PowerUpSpawning::new(Config::new(1));
        let mut out = Vec::new();
        spawning.handle(
            &[Event::TimeAdvanced {
                dt: Duration::from_millis(3_000),
            }],
            &game(GamePhase::Playing, 1, 3),
            &Playfield::default(),
            &mut out,
        );
        spawning.handle(
            &[],
            &game(GamePhase::GameOver, 1, 0),
            &Playfield::default(),
            &mut out,
        );
        assert_eq!(spawning.accumulator, Duration::ZERO);
        assert!(out.is_empty());
    }
}
