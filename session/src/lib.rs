#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Game loop that owns the world and every system of a Heavy Machine Gun run.
//!
//! Each frame the session applies a [`Command::Tick`], lets the event-driven
//! systems answer the resulting events with commands, and feeds the events
//! those commands produce back into the systems until nothing new happens.
//! The per-frame systems (weapons and collision) then run against fresh
//! snapshots and their commands are pumped the same way.

use std::time::Duration;

use heavy_machine_gun_core::{Command, Event, GameSnapshot, PlayerSnapshot, Playfield};
use heavy_machine_gun_rendering::{
    Color, FrameInput, Hud, PickupAcknowledgement, Presentation, Scene,
};
use heavy_machine_gun_system_collision::Collision;
use heavy_machine_gun_system_enemy_spawning::{self as enemy_spawning, EnemySpawning};
use heavy_machine_gun_system_high_score::{HighScore, KeyValueStore};
use heavy_machine_gun_system_power_ups::{self as power_ups, PowerUpSpawning};
use heavy_machine_gun_system_weapons::Weapons;
use heavy_machine_gun_world::{self as world, query, World};
use sha2::{Digest, Sha256};

/// Seed used when no seed is configured.
pub const DEFAULT_SEED: u64 = 0x4d47_0001;

const ENEMY_SPAWNING_STREAM: &str = "enemy-spawning";
const POWER_UP_STREAM: &str = "power-ups";
const CLEAR_COLOR: Color = Color::new(0.05, 0.05, 0.1, 1.0);

/// Parameters required to construct a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionConfig {
    /// Seed from which every system's random stream is derived.
    pub seed: u64,
    /// Playfield dimensions.
    pub playfield: Playfield,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            playfield: Playfield::default(),
        }
    }
}

/// A running game together with the systems that drive it.
#[derive(Debug)]
pub struct Session<S> {
    world: World,
    enemy_spawning: EnemySpawning,
    power_ups: PowerUpSpawning,
    weapons: Weapons,
    collision: Collision,
    high_score: HighScore<S>,
    acknowledgements: Vec<PickupAcknowledgement>,
    games_finished: u32,
}

impl<S: KeyValueStore> Session<S> {
    /// Creates a session waiting for its first game to start.
    pub fn new(config: SessionConfig, store: S) -> Self {
        let enemy_seed = derive_labeled_seed(config.seed, ENEMY_SPAWNING_STREAM);
        let power_up_seed = derive_labeled_seed(config.seed, POWER_UP_STREAM);

        Self {
            world: World::with_playfield(config.playfield),
            enemy_spawning: EnemySpawning::new(enemy_spawning::Config::new(enemy_seed)),
            power_ups: PowerUpSpawning::new(power_ups::Config::new(power_up_seed)),
            weapons: Weapons::new(),
            collision: Collision::new(),
            high_score: HighScore::load(store),
            acknowledgements: Vec::new(),
            games_finished: 0,
        }
    }

    /// Starts the first game. Has no effect once a game has been started.
    pub fn start(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        self.submit(vec![Command::StartGame], &mut events);
        events
    }

    /// Discards the current game and starts a fresh one.
    pub fn restart(&mut self) -> Vec<Event> {
        self.acknowledgements.clear();
        let mut events = Vec::new();
        self.submit(vec![Command::RestartGame], &mut events);
        events
    }

    /// Advances the game by `dt` and returns every event emitted on the way.
    pub fn advance(&mut self, dt: Duration, input: FrameInput) -> Vec<Event> {
        self.acknowledgements.retain_mut(|label| label.advance(dt));

        let mut events = Vec::new();
        if input.restart && self.game().is_game_over() {
            events.extend(self.restart());
        }

        self.submit(
            vec![
                Command::SetPlayerTarget { x: input.target_x },
                Command::Tick { dt },
            ],
            &mut events,
        );

        let (game, player) = (self.game(), self.player());
        let mut commands = Vec::new();
        self.weapons.handle(&game, &player, &mut commands);
        self.submit(commands, &mut events);

        let (game, player) = (self.game(), self.player());
        let enemies = query::enemy_view(&self.world);
        let bullets = query::bullet_view(&self.world);
        let power_ups = query::power_up_view(&self.world);
        let mut commands = Vec::new();
        self.collision
            .handle(&game, &player, &enemies, &bullets, &power_ups, &mut commands);
        self.submit(commands, &mut events);

        tracing::trace!(events = events.len(), clock = ?query::clock(&self.world), "frame");
        events
    }

    fn submit(&mut self, commands: Vec<Command>, log: &mut Vec<Event>) {
        let mut pending = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut pending);
        }

        while !pending.is_empty() {
            self.observe(&pending);

            let game = self.game();
            let playfield = query::playfield(&self.world);
            let mut commands = Vec::new();
            self.enemy_spawning
                .handle(&pending, &game, &playfield, &mut commands);
            self.power_ups
                .handle(&pending, &game, &playfield, &mut commands);

            let mut notices = Vec::new();
            if let Err(error) = self.high_score.handle(&pending, &mut notices) {
                tracing::warn!(%error, "high score could not be saved");
            }

            log.append(&mut pending);
            log.append(&mut notices);

            for command in commands {
                world::apply(&mut self.world, command, &mut pending);
            }
        }
    }

    fn observe(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::PowerUpCollected {
                    kind,
                    position,
                    outcome,
                    ..
                } => self
                    .acknowledgements
                    .push(PickupAcknowledgement::new(*kind, *outcome, *position)),
                Event::GameOver { final_score } => {
                    self.games_finished += 1;
                    tracing::info!(
                        final_score,
                        games = self.games_finished,
                        "session game finished"
                    );
                }
                _ => {}
            }
        }
    }

    /// Snapshot of the game-level state.
    #[must_use]
    pub fn game(&self) -> GameSnapshot {
        query::game_snapshot(&self.world)
    }

    /// Snapshot of the player.
    #[must_use]
    pub fn player(&self) -> PlayerSnapshot {
        query::player_snapshot(&self.world)
    }

    /// Read-only access to the world for adapters and tests.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Best score known to the session.
    #[must_use]
    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    /// Store that persists the high score.
    #[must_use]
    pub fn store(&self) -> &S {
        self.high_score.store()
    }

    /// Number of games that ended since the session was created.
    #[must_use]
    pub fn games_finished(&self) -> u32 {
        self.games_finished
    }

    /// Heads-up display values for the current frame.
    #[must_use]
    pub fn hud(&self) -> Hud {
        Hud::new(&self.game(), &self.player(), self.high_score())
    }

    /// Scene description for the current frame.
    #[must_use]
    pub fn scene(&self) -> Scene {
        Scene::new(
            query::playfield(&self.world),
            &self.player(),
            &query::enemy_view(&self.world),
            &query::bullet_view(&self.world),
            &query::power_up_view(&self.world),
            self.acknowledgements.clone(),
        )
    }

    /// Full presentation descriptor for the current frame.
    #[must_use]
    pub fn presentation(&self) -> Presentation {
        Presentation::new(
            query::welcome_banner(&self.world),
            CLEAR_COLOR,
            self.scene(),
            self.hud(),
        )
    }

    /// Refreshes an existing presentation with the current frame.
    pub fn refresh(&self, presentation: &mut Presentation) {
        presentation.scene = self.scene();
        presentation.hud = self.hud();
    }
}

fn derive_labeled_seed(base: u64, label: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(label.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0_u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heavy_machine_gun_core::GamePhase;
    use heavy_machine_gun_system_high_score::MemoryStore;

    #[test]
    fn labelled_seeds_are_stable_and_distinct() {
        let enemy = derive_labeled_seed(7, ENEMY_SPAWNING_STREAM);
        assert_eq!(enemy, derive_labeled_seed(7, ENEMY_SPAWNING_STREAM));
        assert_ne!(enemy, derive_labeled_seed(7, POWER_UP_STREAM));
        assert_ne!(enemy, derive_labeled_seed(8, ENEMY_SPAWNING_STREAM));
    }

    #[test]
    fn session_waits_until_started() {
        let mut session = Session::new(SessionConfig::default(), MemoryStore::new());
        let events = session.advance(Duration::from_secs(5), FrameInput::default());

        assert_eq!(
            events,
            vec![Event::TimeAdvanced {
                dt: Duration::from_secs(5)
            }]
        );
        assert_eq!(session.game().phase, GamePhase::Ready);

        let started = session.start();
        assert!(started.contains(&Event::GameStarted));
        assert!(session.game().is_playing());
        assert!(session.start().is_empty());
    }

    #[test]
    fn presentation_uses_the_configured_playfield() {
        let config = SessionConfig {
            seed: 1,
            playfield: Playfield::new(640.0, 480.0),
        };
        let session = Session::new(config, MemoryStore::new());
        let presentation = session.presentation();

        assert_eq!(presentation.window_title, "Heavy Machine Gun");
        assert_eq!(presentation.scene.width, 640.0);
        assert_eq!(presentation.scene.height, 480.0);
        assert_eq!(presentation.hud.lives, 3);
    }
}
