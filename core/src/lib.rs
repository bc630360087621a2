#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Heavy Machine Gun engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The session submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, read immutable
//! snapshots such as [`GameSnapshot`], and respond exclusively with new command
//! batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Heavy Machine Gun";

/// Number of lives granted at the start of every game.
pub const INITIAL_LIVES: u32 = 3;

/// Largest number of lives a player may hold at once.
pub const MAX_LIVES: u32 = 5;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Leaves the ready screen and begins the first game of the session.
    StartGame,
    /// Resets game state for a fresh game without repeating one-time setup.
    RestartGame,
    /// Updates the horizontal position the player ship steers toward.
    SetPlayerTarget {
        /// Target X coordinate in playfield units, or `None` to hold position.
        x: Option<f32>,
    },
    /// Requests that the player ship fires a volley from its current position.
    FireVolley,
    /// Requests that a new enemy enters the playfield.
    SpawnEnemy {
        /// Fully resolved description of the enemy to create.
        spawn: EnemySpawn,
    },
    /// Requests that a power-up enters the playfield.
    SpawnPowerUp {
        /// Type of the power-up to create.
        kind: PowerUpKind,
        /// Location where the power-up appears.
        position: Position,
        /// Resolved magnitude: a duration in milliseconds or a stat delta.
        value: u32,
    },
    /// Stores a delayed action that fires after the provided delay.
    Schedule {
        /// Simulated time that must elapse before the action fires.
        delay: Duration,
        /// Payload delivered when the action fires.
        action: ScheduledAction,
    },
    /// Cancels a pending scheduled action.
    CancelScheduled {
        /// Identifier returned when the action was scheduled.
        id: ScheduleId,
    },
    /// Resolves contact between a player bullet and an enemy.
    ResolveBulletHit {
        /// Bullet that struck the enemy.
        bullet: BulletId,
        /// Enemy struck by the bullet.
        enemy: EnemyId,
    },
    /// Resolves contact between the player ship and an enemy.
    ResolvePlayerContact {
        /// Enemy that touched the player.
        enemy: EnemyId,
    },
    /// Resolves the player collecting a power-up.
    CollectPowerUp {
        /// Power-up that the player touched.
        power_up: PowerUpId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the first game of the session began.
    GameStarted,
    /// Announces that a fresh game replaced a finished or abandoned one.
    GameRestarted,
    /// Confirms that a delayed action was stored.
    ActionScheduled {
        /// Identifier assigned to the pending action.
        id: ScheduleId,
        /// Payload that will be delivered.
        action: ScheduledAction,
    },
    /// Delivers a delayed action whose deadline elapsed.
    ScheduledActionFired {
        /// Identifier assigned when the action was scheduled.
        id: ScheduleId,
        /// Payload recorded when the action was scheduled.
        action: ScheduledAction,
    },
    /// Confirms that an enemy entered the playfield.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Type of the enemy.
        kind: EnemyKind,
        /// Location where the enemy appeared.
        position: Position,
    },
    /// Reports that an enemy absorbed damage and survived.
    EnemyDamaged {
        /// Enemy that was struck.
        enemy: EnemyId,
        /// Hit points left after the damage was applied.
        remaining_hp: u32,
    },
    /// Reports that an enemy was destroyed and its score awarded.
    EnemyKilled {
        /// Enemy that was destroyed.
        enemy: EnemyId,
        /// Type of the destroyed enemy.
        kind: EnemyKind,
        /// Last position of the enemy.
        position: Position,
        /// Score awarded for the kill.
        score_value: u32,
        /// What destroyed the enemy.
        cause: KillCause,
    },
    /// Reports that an enemy left through the bottom edge of the playfield.
    EnemyEscaped {
        /// Enemy that escaped.
        enemy: EnemyId,
    },
    /// Confirms that the player fired.
    VolleyFired {
        /// Number of bullets created by the volley.
        bullets: u32,
    },
    /// Confirms that a power-up entered the playfield.
    PowerUpSpawned {
        /// Identifier assigned to the power-up.
        power_up: PowerUpId,
        /// Type of the power-up.
        kind: PowerUpKind,
        /// Location where the power-up appeared.
        position: Position,
        /// Resolved magnitude carried by the power-up.
        value: u32,
    },
    /// Reports that the player collected a power-up.
    PowerUpCollected {
        /// Power-up that was collected.
        power_up: PowerUpId,
        /// Type of the collected power-up.
        kind: PowerUpKind,
        /// Position of the power-up when it was collected.
        position: Position,
        /// Effect applied as a result of the pickup.
        outcome: PickupOutcome,
    },
    /// Reports that a power-up fell out of the playfield uncollected.
    PowerUpMissed {
        /// Power-up that left the playfield.
        power_up: PowerUpId,
    },
    /// Reports that a time-boxed buff ran out.
    BuffExpired {
        /// Buff that expired.
        buff: Buff,
    },
    /// Reports that the player lost a life.
    LifeLost {
        /// Lives left after the loss.
        remaining: u32,
    },
    /// Reports that the player finished respawning.
    RespawnCompleted,
    /// Announces that the player advanced to a new level.
    LevelUp {
        /// Level reached.
        level: u32,
    },
    /// Announces that the player ran out of lives.
    GameOver {
        /// Score at the moment the game ended.
        final_score: u64,
    },
    /// Reports that a new high score was persisted.
    HighScoreUpdated {
        /// High score stored before this game.
        previous: u64,
        /// Newly stored high score.
        score: u64,
    },
}

/// Enemy archetypes in ascending order of toughness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Slow single-hit enemy available from the first level.
    Basic,
    /// Quick zigzagging enemy.
    Fast,
    /// Armoured enemy that takes several hits.
    Strong,
    /// Large enemy with the highest durability and reward.
    Boss,
}

impl EnemyKind {
    /// Every enemy kind in declaration order.
    pub const ALL: [EnemyKind; 4] = [Self::Basic, Self::Fast, Self::Strong, Self::Boss];
}

/// Movement patterns an enemy may follow while descending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPattern {
    /// Straight descent.
    Straight,
    /// Side-to-side oscillation while descending.
    Zigzag,
    /// Orbit around a descending anchor.
    Circle,
}

/// Power-up types that may appear on the playfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    /// Raises the player's movement speed.
    Speed,
    /// Shortens the player's fire interval.
    FireRate,
    /// Temporarily fires three bullets per volley.
    MultiShot,
    /// Temporarily absorbs enemy contact.
    Shield,
    /// Awards a flat score bonus.
    ExtraPoints,
    /// Grants an additional life.
    ExtraLife,
    /// Destroys every enemy on screen.
    Bomb,
    /// Small lasting reduction of the fire interval.
    PermanentFireRate,
    /// Small lasting increase of movement speed.
    PermanentSpeed,
}

impl PowerUpKind {
    /// Every power-up kind in declaration order.
    pub const ALL: [PowerUpKind; 9] = [
        Self::Speed,
        Self::FireRate,
        Self::MultiShot,
        Self::Shield,
        Self::ExtraPoints,
        Self::ExtraLife,
        Self::Bomb,
        Self::PermanentFireRate,
        Self::PermanentSpeed,
    ];
}

/// Time-boxed buffs tracked on the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Buff {
    /// Three bullets per volley.
    MultiShot,
    /// Enemy contact destroys the enemy instead of costing a life.
    Shield,
}

/// Bounded player stats that pickups can improve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    /// Horizontal movement speed.
    Speed,
    /// Interval between volleys.
    FireRate,
}

/// Effect applied when the player collects a power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupOutcome {
    /// A bounded stat improved by the reported amount.
    StatBoosted {
        /// Stat that improved.
        stat: Stat,
        /// Improvement actually applied after clamping.
        amount: u32,
    },
    /// The stat was already at its bound, so the pickup became score.
    ConvertedToScore {
        /// Points awarded in place of the stat boost.
        points: u32,
    },
    /// An inactive buff switched on.
    BuffActivated {
        /// Buff that switched on.
        buff: Buff,
        /// Duration granted by the activation.
        duration: Duration,
    },
    /// An active buff had its duration extended.
    BuffExtended {
        /// Buff that was extended.
        buff: Buff,
        /// Total duration after the extension.
        duration: Duration,
    },
    /// Flat points were awarded.
    PointsAwarded {
        /// Points awarded.
        points: u32,
    },
    /// A life was added.
    LifeGained {
        /// Lives held after the pickup.
        lives: u32,
    },
    /// Every enemy on screen was destroyed.
    EnemiesCleared {
        /// Number of enemies destroyed.
        count: u32,
        /// Sum of their score values.
        points: u64,
    },
}

/// Reasons an enemy may be destroyed while the player earns its score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KillCause {
    /// Enemy ran out of hit points after bullet damage.
    Bullet,
    /// Enemy struck the shielded player.
    Shield,
    /// Enemy was caught by a bomb pickup.
    Bomb,
    /// Enemy struck the unshielded player and took a life with it.
    Collision,
}

/// Tiers of delayed bonus power-up spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BonusTier {
    /// Follow-up spawn unlocked at moderate levels.
    First,
    /// Second follow-up spawn unlocked at higher levels.
    Second,
}

/// Payloads delivered by the world's delayed-action scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScheduledAction {
    /// Create one enemy using the difficulty in effect when the action fires.
    SpawnEnemy,
    /// Attempt a bonus power-up spawn.
    BonusPowerUp {
        /// Tier that determines the spawn gate.
        tier: BonusTier,
    },
    /// Emergency relief attempt that spawns an extra life.
    EmergencyExtraLife,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a player bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId(u32);

impl BulletId {
    /// Creates a new bullet identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PowerUpId(u32);

impl PowerUpId {
    /// Creates a new power-up identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a pending scheduled action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScheduleId(u64);

impl ScheduleId {
    /// Creates a new schedule identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Point on the playfield. The origin is the top-left corner and Y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance between two positions.
    #[must_use]
    pub fn distance(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Dimensions of the rectangular play area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    width: f32,
    height: f32,
}

impl Playfield {
    /// Horizontal margin kept free when placing new entities.
    pub const SPAWN_MARGIN: f32 = 50.0;

    /// Creates a playfield with the provided dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the playfield.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the playfield.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Horizontal range in which new entities may appear.
    ///
    /// Narrow playfields collapse the range onto the centre line instead of
    /// producing an inverted interval.
    #[must_use]
    pub fn spawn_x_range(&self) -> (f32, f32) {
        let min = Self::SPAWN_MARGIN;
        let max = self.width - Self::SPAWN_MARGIN;
        if max <= min {
            let centre = self.width / 2.0;
            (centre, centre)
        } else {
            (min, max)
        }
    }

    /// Clamps a horizontal coordinate to the playfield.
    #[must_use]
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(0.0, self.width.max(0.0))
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Fully resolved description of an enemy about to be created.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySpawn {
    /// Type of enemy.
    pub kind: EnemyKind,
    /// Entry position.
    pub position: Position,
    /// Descent speed in playfield units per second.
    pub speed: f32,
    /// Hit points the enemy starts with.
    pub max_hp: u32,
    /// Score awarded when the enemy is destroyed.
    pub score_value: u32,
    /// Path followed while descending.
    pub pattern: MovementPattern,
    /// Whether the enemy enters from a side edge rather than the top.
    pub from_side: bool,
}

/// Lifecycle phase of the current game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// The session was created but the first game has not started.
    Ready,
    /// A game is in progress.
    Playing,
    /// The player ran out of lives.
    GameOver,
}

/// Read-only snapshot of the game state consumed by every system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Lifecycle phase of the game.
    pub phase: GamePhase,
    /// Accumulated score.
    pub score: u64,
    /// Current level, starting at one.
    pub level: u32,
    /// Lives remaining.
    pub lives: u32,
    /// Enemies destroyed during this game.
    pub enemies_killed: u32,
    /// Whether the player's shield is active.
    pub shield_active: bool,
    /// Whether the player's multi-shot is active.
    pub multi_shot_active: bool,
    /// Number of power-ups currently on the playfield.
    pub power_ups_on_screen: u32,
    /// Number of enemies currently on the playfield.
    pub enemies_on_screen: u32,
}

impl GameSnapshot {
    /// Reports whether the game has ended.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver)
    }

    /// Reports whether a game is in progress.
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.phase, GamePhase::Playing)
    }
}

/// Read-only snapshot of the player ship.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Ship position.
    pub position: Position,
    /// Horizontal speed in playfield units per second.
    pub speed: u32,
    /// Interval between volleys in milliseconds.
    pub fire_rate_ms: u32,
    /// Time left until the next volley may be fired.
    pub fire_ready_in: Duration,
    /// Whether multi-shot is active.
    pub multi_shot_active: bool,
    /// Time left on the multi-shot buff.
    pub multi_shot_remaining: Duration,
    /// Whether the shield is active.
    pub shield_active: bool,
    /// Time left on the shield buff.
    pub shield_remaining: Duration,
    /// Whether the ship is respawning after losing a life.
    pub respawning: bool,
    /// Whether the ship is temporarily immune to contact.
    pub invincible: bool,
}

impl PlayerSnapshot {
    /// Reports whether contact with enemies is currently checked.
    #[must_use]
    pub const fn is_vulnerable(&self) -> bool {
        !self.respawning && !self.invincible
    }
}

/// Immutable representation of a single enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier.
    pub id: EnemyId,
    /// Enemy type.
    pub kind: EnemyKind,
    /// Current position.
    pub position: Position,
    /// Hit points left.
    pub current_hp: u32,
    /// Hit points at creation.
    pub max_hp: u32,
    /// Score awarded on destruction.
    pub score_value: u32,
    /// Path followed while descending.
    pub pattern: MovementPattern,
    /// Whether the enemy entered from a side edge.
    pub from_side: bool,
    /// Time left on the hit flash.
    pub flash_remaining: Duration,
}

/// Immutable representation of a single player bullet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSnapshot {
    /// Unique identifier.
    pub id: BulletId,
    /// Current position.
    pub position: Position,
    /// Damage dealt on contact.
    pub damage: u32,
}

/// Immutable representation of a single power-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerUpSnapshot {
    /// Unique identifier.
    pub id: PowerUpId,
    /// Power-up type.
    pub kind: PowerUpKind,
    /// Current position.
    pub position: Position,
    /// Resolved magnitude.
    pub value: u32,
}

/// Read-only snapshot describing all enemies on the playfield.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured enemies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing all player bullets in flight.
#[derive(Clone, Debug, Default)]
pub struct BulletView {
    snapshots: Vec<BulletSnapshot>,
}

impl BulletView {
    /// Creates a new bullet view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<BulletSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &BulletSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured bullets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Read-only snapshot describing all power-ups on the playfield.
#[derive(Clone, Debug, Default)]
pub struct PowerUpView {
    snapshots: Vec<PowerUpSnapshot>,
}

impl PowerUpView {
    /// Creates a new power-up view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PowerUpSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &PowerUpSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured power-ups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
