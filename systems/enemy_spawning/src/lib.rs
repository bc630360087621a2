#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy spawn engine emitting single spawns and multi-batch waves.
//!
//! The engine runs a periodic timer whose interval is re-read from the
//! difficulty curve on every tick. Each tick either spawns one batch, with
//! the first enemy created immediately and the rest staggered through the
//! world scheduler, or rolls a wave of several batches. Scheduled spawns
//! carry no parameters: the enemy is resolved against the level in effect
//! when the action fires.

use std::time::Duration;

use heavy_machine_gun_core::{
    Command, EnemySpawn, Event, GameSnapshot, Playfield, Position, ScheduledAction,
};
use heavy_machine_gun_system_difficulty::{
    enemy_count, enemy_stats, max_waves, movement_patterns, roster, side_entry_chance,
    spawn_delay, wave_chance,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Vertical coordinate at which enemies enter from the top edge.
pub const ENTRY_Y: f32 = -30.0;
/// Delay between consecutive enemies of one batch.
pub const INTER_ENEMY_DELAY: Duration = Duration::from_millis(120);
/// Pause separating consecutive batches of a wave.
pub const INTER_BATCH_DELAY: Duration = Duration::from_millis(400);

const SIDE_ENTRY_TOP: f32 = 20.0;
const SIDE_ENTRY_BAND: f32 = 0.3;

/// Configuration parameters required to construct the enemy spawn engine.
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

/// Lifecycle of the spawn timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnerState {
    /// No game has started yet.
    Idle,
    /// The spawn timer is running.
    Spawning,
    /// The game ended; every timer is halted until a restart.
    Stopped,
}

/// Pure system that emits enemy spawn commands for the running game.
#[derive(Debug)]
pub struct EnemySpawning {
    state: SpawnerState,
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl EnemySpawning {
    /// Creates a new enemy spawn engine using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            state: SpawnerState::Idle,
            accumulator: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Reports the current lifecycle state of the spawn timer.
    #[must_use]
    pub fn state(&self) -> SpawnerState {
        self.state
    }

    /// Consumes events and the latest game snapshot to emit spawn commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        game: &GameSnapshot,
        playfield: &Playfield,
        out: &mut Vec<Command>,
    ) {
        if game.is_game_over() {
            if self.state != SpawnerState::Stopped {
                tracing::debug!("enemy spawning stopped");
            }
            self.state = SpawnerState::Stopped;
            self.accumulator = Duration::ZERO;
            return;
        }

        if !game.is_playing() {
            return;
        }

        if events
            .iter()
            .any(|event| matches!(event, Event::GameStarted | Event::GameRestarted))
            || self.state != SpawnerState::Spawning
        {
            self.state = SpawnerState::Spawning;
            self.accumulator = Duration::ZERO;
        }

        for event in events {
            match event {
                Event::TimeAdvanced { dt } => {
                    self.accumulator = self.accumulator.saturating_add(*dt);
                }
                Event::ScheduledActionFired {
                    action: ScheduledAction::SpawnEnemy,
                    ..
                } => {
                    let spawn = self.resolve_spawn(game.level, playfield);
                    out.push(Command::SpawnEnemy { spawn });
                }
                _ => {}
            }
        }

        let interval = spawn_delay(game.level);
        while self.accumulator >= interval {
            self.accumulator -= interval;
            self.spawn_tick(game.level, playfield, out);
        }
    }

    fn spawn_tick(&mut self, level: u32, playfield: &Playfield, out: &mut Vec<Command>) {
        let count = enemy_count(level);
        let waves = if self.rng.gen_bool(wave_chance(level)) {
            let waves = self.rng.gen_range(1..=max_waves(level));
            tracing::debug!(level, waves, count, "enemy wave triggered");
            waves
        } else {
            1
        };

        for (index, delay) in spawn_offsets(waves, count).into_iter().enumerate() {
            if index == 0 {
                let spawn = self.resolve_spawn(level, playfield);
                out.push(Command::SpawnEnemy { spawn });
            } else {
                out.push(Command::Schedule {
                    delay,
                    action: ScheduledAction::SpawnEnemy,
                });
            }
        }
    }

    fn resolve_spawn(&mut self, level: u32, playfield: &Playfield) -> EnemySpawn {
        let roster = roster(level);
        let kind = roster[self.rng.gen_range(0..roster.len())];
        let stats = enemy_stats(kind, level);
        let patterns = movement_patterns(kind);
        let pattern = patterns[self.rng.gen_range(0..patterns.len())];
        let from_side = self.rng.gen_bool(side_entry_chance(level));

        let position = if from_side {
            let x = if self.rng.gen_bool(0.5) {
                0.0
            } else {
                playfield.width()
            };
            let bottom = (playfield.height() * SIDE_ENTRY_BAND).max(SIDE_ENTRY_TOP);
            Position::new(x, self.rng.gen_range(SIDE_ENTRY_TOP..=bottom))
        } else {
            let (min_x, max_x) = playfield.spawn_x_range();
            let x = if max_x > min_x {
                self.rng.gen_range(min_x..max_x)
            } else {
                min_x
            };
            Position::new(x, ENTRY_Y)
        };

        tracing::trace!(?kind, ?pattern, from_side, level, "enemy resolved");
        EnemySpawn {
            kind,
            position,
            speed: stats.speed,
            max_hp: stats.max_hp,
            score_value: stats.score_value,
            pattern,
            from_side,
        }
    }
}

/// Offsets, relative to the spawn tick, at which the enemies of `waves`
/// batches of `count` enemies each are created.
///
/// Batch `b` starts at `b * (count * 120ms + 400ms)`; enemy `i` of a batch
/// follows `i * 120ms` later.
#[must_use]
pub fn spawn_offsets(waves: u32, count: u32) -> Vec<Duration> {
    let batch_span = INTER_ENEMY_DELAY * count + INTER_BATCH_DELAY;
    (0..waves)
        .flat_map(|batch| (0..count).map(move |index| batch_span * batch + INTER_ENEMY_DELAY * index))
        .collect()
}
