#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Heavy Machine Gun.
//!
//! The world owns the game state, every entity arena, the player's effect
//! state and the delayed-action scheduler. It is mutated exclusively through
//! [`apply`] and observed through the [`query`] module.

pub mod effects;
pub mod progression;

mod entities;
mod scheduler;

use std::time::Duration;

use heavy_machine_gun_core::{
    Buff, BulletId, Command, EnemyId, Event, GamePhase, KillCause, PickupOutcome, Playfield,
    Position, PowerUpId, PowerUpKind, Stat, INITIAL_LIVES, MAX_LIVES, WELCOME_BANNER,
};

use effects::{BuffChange, PlayerEffects};
use entities::{Bullet, Enemy, PowerUp};
use scheduler::Scheduler;

const PLAYER_BOTTOM_OFFSET: f32 = 60.0;
const BULLET_DAMAGE: u32 = 1;
const BULLET_MUZZLE_OFFSET: f32 = 20.0;
const BULLET_CULL_Y: f32 = -20.0;
const MULTI_SHOT_OFFSETS: [f32; 3] = [-18.0, 0.0, 18.0];
const POWER_UP_CULL_MARGIN: f32 = 20.0;
const ENEMY_ESCAPE_MARGIN: f32 = 30.0;

const HIT_FLASH: Duration = Duration::from_millis(100);
const RESPAWN_DURATION: Duration = Duration::from_millis(1_000);
const INVINCIBILITY_DURATION: Duration = Duration::from_millis(500);

const SPEED_FALLBACK_POINTS: u32 = 100;
const FIRE_RATE_FALLBACK_POINTS: u32 = 120;
const PERMANENT_SPEED_FALLBACK_POINTS: u32 = 150;
const PERMANENT_FIRE_RATE_FALLBACK_POINTS: u32 = 200;
const EXTRA_LIFE_FALLBACK_POINTS: u32 = 250;

#[derive(Clone, Copy, Debug)]
struct GameState {
    phase: GamePhase,
    score: u64,
    level: u32,
    lives: u32,
    enemies_killed: u32,
}

impl GameState {
    fn new(phase: GamePhase) -> Self {
        Self {
            phase,
            score: 0,
            level: 1,
            lives: INITIAL_LIVES,
            enemies_killed: 0,
        }
    }

    fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[derive(Clone, Debug)]
struct Player {
    position: Position,
    target_x: Option<f32>,
    effects: PlayerEffects,
    fire_cooldown: Duration,
    respawn_remaining: Duration,
    invincible_remaining: Duration,
}

impl Player {
    fn new(playfield: &Playfield) -> Self {
        Self {
            position: spawn_point(playfield),
            target_x: None,
            effects: PlayerEffects::new(),
            fire_cooldown: Duration::ZERO,
            respawn_remaining: Duration::ZERO,
            invincible_remaining: Duration::ZERO,
        }
    }

    fn is_respawning(&self) -> bool {
        !self.respawn_remaining.is_zero()
    }

    fn is_invincible(&self) -> bool {
        !self.invincible_remaining.is_zero()
    }
}

/// Represents the authoritative Heavy Machine Gun world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    playfield: Playfield,
    state: GameState,
    player: Player,
    enemies: Vec<Enemy>,
    bullets: Vec<Bullet>,
    power_ups: Vec<PowerUp>,
    next_enemy_id: u32,
    next_bullet_id: u32,
    next_power_up_id: u32,
    scheduler: Scheduler,
    clock: Duration,
}

impl World {
    /// Creates a world on the default playfield, waiting for the first game to start.
    #[must_use]
    pub fn new() -> Self {
        Self::with_playfield(Playfield::default())
    }

    /// Creates a world on the provided playfield, waiting for the first game to start.
    #[must_use]
    pub fn with_playfield(playfield: Playfield) -> Self {
        Self {
            banner: WELCOME_BANNER,
            playfield,
            state: GameState::new(GamePhase::Ready),
            player: Player::new(&playfield),
            enemies: Vec::new(),
            bullets: Vec::new(),
            power_ups: Vec::new(),
            next_enemy_id: 0,
            next_bullet_id: 0,
            next_power_up_id: 0,
            scheduler: Scheduler::new(),
            clock: Duration::ZERO,
        }
    }

    fn reset_game(&mut self) {
        self.state = GameState::new(GamePhase::Playing);
        self.player = Player::new(&self.playfield);
        self.enemies.clear();
        self.bullets.clear();
        self.power_ups.clear();
        self.scheduler.clear();
    }

    fn enemy_index(&self, enemy: EnemyId) -> Option<usize> {
        self.enemies.iter().position(|candidate| candidate.id == enemy)
    }

    fn bullet_index(&self, bullet: BulletId) -> Option<usize> {
        self.bullets.iter().position(|candidate| candidate.id == bullet)
    }

    fn power_up_index(&self, power_up: PowerUpId) -> Option<usize> {
        self.power_ups
            .iter()
            .position(|candidate| candidate.id == power_up)
    }

    fn award(&mut self, points: u64) {
        self.state.score = self.state.score.saturating_add(points);
    }

    fn record_kill(&mut self, enemy: &Enemy, cause: KillCause, out_events: &mut Vec<Event>) {
        self.award(u64::from(enemy.score_value));
        self.state.enemies_killed = self.state.enemies_killed.saturating_add(1);
        out_events.push(Event::EnemyKilled {
            enemy: enemy.id,
            kind: enemy.kind,
            position: enemy.position,
            score_value: enemy.score_value,
            cause,
        });
    }

    fn check_level_up(&mut self, out_events: &mut Vec<Event>) {
        let reached = progression::level_for_kills(self.state.enemies_killed);
        while self.state.level < reached {
            self.state.level += 1;
            tracing::info!(level = self.state.level, "level up");
            out_events.push(Event::LevelUp {
                level: self.state.level,
            });
        }
    }

    fn lose_life(&mut self, out_events: &mut Vec<Event>) {
        if !self.state.is_playing() {
            return;
        }

        self.state.lives = self.state.lives.saturating_sub(1);
        self.player.effects.reset();
        tracing::debug!(remaining = self.state.lives, "life lost");
        out_events.push(Event::LifeLost {
            remaining: self.state.lives,
        });

        if self.state.lives == 0 {
            self.end_game(out_events);
            return;
        }

        self.player.position = spawn_point(&self.playfield);
        self.player.fire_cooldown = Duration::ZERO;
        self.player.respawn_remaining = RESPAWN_DURATION;
        self.player.invincible_remaining = Duration::ZERO;
    }

    fn end_game(&mut self, out_events: &mut Vec<Event>) {
        self.state.phase = GamePhase::GameOver;
        self.enemies.clear();
        self.bullets.clear();
        self.power_ups.clear();
        self.scheduler.clear();
        self.player.target_x = None;
        tracing::info!(
            score = self.state.score,
            level = self.state.level,
            kills = self.state.enemies_killed,
            "game over"
        );
        out_events.push(Event::GameOver {
            final_score: self.state.score,
        });
    }

    fn advance_player(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let player = &mut self.player;
        if player.is_respawning() {
            player.respawn_remaining = player.respawn_remaining.saturating_sub(dt);
            if !player.is_respawning() {
                player.invincible_remaining = INVINCIBILITY_DURATION;
                out_events.push(Event::RespawnCompleted);
            }
        } else {
            player.invincible_remaining = player.invincible_remaining.saturating_sub(dt);
        }

        for buff in player.effects.expire(self.clock) {
            out_events.push(Event::BuffExpired { buff });
        }

        player.fire_cooldown = player.fire_cooldown.saturating_sub(dt);

        if let Some(target_x) = player.target_x {
            if !player.is_respawning() {
                let step = player.effects.speed() as f32 * dt.as_secs_f32();
                let delta = (target_x - player.position.x).clamp(-step, step);
                player.position.x = self.playfield.clamp_x(player.position.x + delta);
            }
        }
    }

    fn advance_projectiles(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        for bullet in &mut self.bullets {
            bullet.advance(dt);
        }
        self.bullets.retain(|bullet| bullet.position.y >= BULLET_CULL_Y);

        let floor = self.playfield.height() + POWER_UP_CULL_MARGIN;
        for power_up in &mut self.power_ups {
            power_up.advance(dt);
        }
        let (missed, kept): (Vec<_>, Vec<_>) = self
            .power_ups
            .drain(..)
            .partition(|power_up| power_up.position.y > floor);
        self.power_ups = kept;
        for power_up in missed {
            out_events.push(Event::PowerUpMissed {
                power_up: power_up.id,
            });
        }
    }

    fn advance_enemies(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let playfield = self.playfield;
        for enemy in &mut self.enemies {
            enemy.advance(dt, &playfield);
        }

        let floor = playfield.height() + ENEMY_ESCAPE_MARGIN;
        let (escaped, kept): (Vec<_>, Vec<_>) = self
            .enemies
            .drain(..)
            .partition(|enemy| enemy.position.y > floor);
        self.enemies = kept;

        for enemy in escaped {
            if !self.state.is_playing() {
                break;
            }
            out_events.push(Event::EnemyEscaped { enemy: enemy.id });
            self.lose_life(out_events);
        }
    }

    fn release_due_actions(&mut self, out_events: &mut Vec<Event>) {
        for entry in self.scheduler.drain_due(self.clock) {
            out_events.push(Event::ScheduledActionFired {
                id: entry.id,
                action: entry.action,
            });
        }
    }

    fn fire_volley(&mut self, out_events: &mut Vec<Event>) {
        let player = &self.player;
        if player.is_respawning() || !player.fire_cooldown.is_zero() {
            return;
        }

        let offsets: &[f32] = if player.effects.is_active(Buff::MultiShot) {
            &MULTI_SHOT_OFFSETS
        } else {
            &[0.0]
        };
        let origin = Position::new(
            player.position.x,
            player.position.y - BULLET_MUZZLE_OFFSET,
        );
        self.player.fire_cooldown =
            Duration::from_millis(u64::from(self.player.effects.fire_rate_ms()));

        for offset in offsets {
            let id = BulletId::new(self.next_bullet_id);
            self.next_bullet_id = self.next_bullet_id.wrapping_add(1);
            self.bullets.push(Bullet {
                id,
                position: Position::new(origin.x + offset, origin.y),
                damage: BULLET_DAMAGE,
            });
        }
        out_events.push(Event::VolleyFired {
            bullets: offsets.len() as u32,
        });
    }

    fn resolve_bullet_hit(
        &mut self,
        bullet: BulletId,
        enemy: EnemyId,
        out_events: &mut Vec<Event>,
    ) {
        let (Some(bullet_index), Some(enemy_index)) =
            (self.bullet_index(bullet), self.enemy_index(enemy))
        else {
            return;
        };

        let bullet = self.bullets.remove(bullet_index);
        let target = &mut self.enemies[enemy_index];
        target.current_hp = target.current_hp.saturating_sub(bullet.damage);
        target.flash_remaining = HIT_FLASH;

        if target.current_hp > 0 {
            out_events.push(Event::EnemyDamaged {
                enemy,
                remaining_hp: target.current_hp,
            });
            return;
        }

        let destroyed = self.enemies.remove(enemy_index);
        self.record_kill(&destroyed, KillCause::Bullet, out_events);
        self.check_level_up(out_events);
    }

    fn resolve_player_contact(&mut self, enemy: EnemyId, out_events: &mut Vec<Event>) {
        if self.player.is_respawning() || self.player.is_invincible() {
            return;
        }
        let Some(index) = self.enemy_index(enemy) else {
            return;
        };

        let destroyed = self.enemies.remove(index);
        if self.player.effects.is_active(Buff::Shield) {
            self.record_kill(&destroyed, KillCause::Shield, out_events);
            self.check_level_up(out_events);
            return;
        }

        out_events.push(Event::EnemyKilled {
            enemy: destroyed.id,
            kind: destroyed.kind,
            position: destroyed.position,
            score_value: 0,
            cause: KillCause::Collision,
        });
        self.lose_life(out_events);
    }

    fn collect_power_up(&mut self, power_up: PowerUpId, out_events: &mut Vec<Event>) {
        let Some(index) = self.power_up_index(power_up) else {
            return;
        };
        let power_up = self.power_ups.remove(index);

        let outcome = match power_up.kind {
            PowerUpKind::Speed => {
                let increase = self.player.effects.boost_speed(power_up.value);
                self.stat_outcome(Stat::Speed, increase, SPEED_FALLBACK_POINTS)
            }
            PowerUpKind::PermanentSpeed => {
                let increase = self.player.effects.boost_speed(power_up.value);
                self.stat_outcome(Stat::Speed, increase, PERMANENT_SPEED_FALLBACK_POINTS)
            }
            PowerUpKind::FireRate => {
                let reduction = self.player.effects.reduce_fire_rate(power_up.value);
                self.stat_outcome(Stat::FireRate, reduction, FIRE_RATE_FALLBACK_POINTS)
            }
            PowerUpKind::PermanentFireRate => {
                let reduction = self.player.effects.reduce_fire_rate(power_up.value);
                self.stat_outcome(
                    Stat::FireRate,
                    reduction,
                    PERMANENT_FIRE_RATE_FALLBACK_POINTS,
                )
            }
            PowerUpKind::MultiShot => self.buff_outcome(Buff::MultiShot),
            PowerUpKind::Shield => self.buff_outcome(Buff::Shield),
            PowerUpKind::ExtraPoints => {
                self.award(u64::from(power_up.value));
                PickupOutcome::PointsAwarded {
                    points: power_up.value,
                }
            }
            PowerUpKind::ExtraLife => {
                if self.state.lives >= MAX_LIVES {
                    self.award(u64::from(EXTRA_LIFE_FALLBACK_POINTS));
                    PickupOutcome::ConvertedToScore {
                        points: EXTRA_LIFE_FALLBACK_POINTS,
                    }
                } else {
                    self.state.lives = self
                        .state
                        .lives
                        .saturating_add(power_up.value.max(1))
                        .min(MAX_LIVES);
                    PickupOutcome::LifeGained {
                        lives: self.state.lives,
                    }
                }
            }
            PowerUpKind::Bomb => {
                let cleared: Vec<Enemy> = self.enemies.drain(..).collect();
                let mut points = 0_u64;
                for enemy in &cleared {
                    points = points.saturating_add(u64::from(enemy.score_value));
                    self.record_kill(enemy, KillCause::Bomb, out_events);
                }
                PickupOutcome::EnemiesCleared {
                    count: cleared.len() as u32,
                    points,
                }
            }
        };

        tracing::debug!(kind = ?power_up.kind, ?outcome, "power-up collected");
        out_events.push(Event::PowerUpCollected {
            power_up: power_up.id,
            kind: power_up.kind,
            position: power_up.position,
            outcome,
        });
        self.check_level_up(out_events);
    }

    fn stat_outcome(&mut self, stat: Stat, amount: u32, fallback_points: u32) -> PickupOutcome {
        if amount > 0 {
            return PickupOutcome::StatBoosted { stat, amount };
        }
        self.award(u64::from(fallback_points));
        PickupOutcome::ConvertedToScore {
            points: fallback_points,
        }
    }

    fn buff_outcome(&mut self, buff: Buff) -> PickupOutcome {
        match self.player.effects.activate(buff, self.clock) {
            BuffChange::Activated(duration) => PickupOutcome::BuffActivated { buff, duration },
            BuffChange::Extended(duration) => PickupOutcome::BuffExtended { buff, duration },
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_point(playfield: &Playfield) -> Position {
    Position::new(
        playfield.width() / 2.0,
        playfield.height() - PLAYER_BOTTOM_OFFSET,
    )
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that arrive outside a running game, or that reference entities
/// destroyed earlier in the frame, are ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            if !world.state.is_playing() {
                return;
            }
            world.clock = world.clock.saturating_add(dt);
            world.advance_player(dt, out_events);
            world.advance_projectiles(dt, out_events);
            world.advance_enemies(dt, out_events);
            world.release_due_actions(out_events);
        }
        Command::StartGame => {
            if world.state.phase != GamePhase::Ready {
                return;
            }
            world.reset_game();
            tracing::info!("game started");
            out_events.push(Event::GameStarted);
        }
        Command::RestartGame => {
            world.reset_game();
            tracing::info!("game restarted");
            out_events.push(Event::GameRestarted);
        }
        Command::SetPlayerTarget { x } => {
            world.player.target_x = x.map(|x| world.playfield.clamp_x(x));
        }
        Command::FireVolley => {
            if world.state.is_playing() {
                world.fire_volley(out_events);
            }
        }
        Command::SpawnEnemy { spawn } => {
            if !world.state.is_playing() {
                return;
            }
            let id = EnemyId::new(world.next_enemy_id);
            world.next_enemy_id = world.next_enemy_id.wrapping_add(1);
            let enemy = Enemy::from_spawn(id, spawn, &world.playfield);
            out_events.push(Event::EnemySpawned {
                enemy: id,
                kind: enemy.kind,
                position: enemy.position,
            });
            world.enemies.push(enemy);
        }
        Command::SpawnPowerUp {
            kind,
            position,
            value,
        } => {
            if !world.state.is_playing() {
                return;
            }
            let id = PowerUpId::new(world.next_power_up_id);
            world.next_power_up_id = world.next_power_up_id.wrapping_add(1);
            world.power_ups.push(PowerUp {
                id,
                kind,
                position,
                value,
            });
            out_events.push(Event::PowerUpSpawned {
                power_up: id,
                kind,
                position,
                value,
            });
        }
        Command::Schedule { delay, action } => {
            if !world.state.is_playing() {
                return;
            }
            let fire_at = world.clock.saturating_add(delay);
            let id = world.scheduler.schedule(fire_at, action);
            out_events.push(Event::ActionScheduled { id, action });
        }
        Command::CancelScheduled { id } => {
            let _ = world.scheduler.cancel(id);
        }
        Command::ResolveBulletHit { bullet, enemy } => {
            if world.state.is_playing() {
                world.resolve_bullet_hit(bullet, enemy, out_events);
            }
        }
        Command::ResolvePlayerContact { enemy } => {
            if world.state.is_playing() {
                world.resolve_player_contact(enemy, out_events);
            }
        }
        Command::CollectPowerUp { power_up } => {
            if world.state.is_playing() {
                world.collect_power_up(power_up, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use heavy_machine_gun_core::{
        Buff, BulletView, EnemyView, GameSnapshot, Playfield, PlayerSnapshot, PowerUpView,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Dimensions of the play area.
    #[must_use]
    pub fn playfield(world: &World) -> Playfield {
        world.playfield
    }

    /// Simulated time elapsed while games were running.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Captures the game state read by every system.
    #[must_use]
    pub fn game_snapshot(world: &World) -> GameSnapshot {
        let effects = &world.player.effects;
        GameSnapshot {
            phase: world.state.phase,
            score: world.state.score,
            level: world.state.level,
            lives: world.state.lives,
            enemies_killed: world.state.enemies_killed,
            shield_active: effects.is_active(Buff::Shield),
            multi_shot_active: effects.is_active(Buff::MultiShot),
            power_ups_on_screen: world.power_ups.len() as u32,
            enemies_on_screen: world.enemies.len() as u32,
        }
    }

    /// Captures the player ship and its effect state.
    #[must_use]
    pub fn player_snapshot(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        let effects = &player.effects;
        PlayerSnapshot {
            position: player.position,
            speed: effects.speed(),
            fire_rate_ms: effects.fire_rate_ms(),
            fire_ready_in: player.fire_cooldown,
            multi_shot_active: effects.is_active(Buff::MultiShot),
            multi_shot_remaining: effects.remaining(Buff::MultiShot, world.clock),
            shield_active: effects.is_active(Buff::Shield),
            shield_remaining: effects.remaining(Buff::Shield, world.clock),
            respawning: player.is_respawning(),
            invincible: player.is_invincible(),
        }
    }

    /// Total duration currently granted to a buff, zero when inactive.
    #[must_use]
    pub fn buff_duration(world: &World, buff: Buff) -> Duration {
        world.player.effects.duration(buff)
    }

    /// Captures every live enemy ordered by identifier.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Captures every bullet in flight ordered by identifier.
    #[must_use]
    pub fn bullet_view(world: &World) -> BulletView {
        BulletView::from_snapshots(world.bullets.iter().map(|bullet| bullet.snapshot()).collect())
    }

    /// Captures every power-up on the playfield ordered by identifier.
    #[must_use]
    pub fn power_up_view(world: &World) -> PowerUpView {
        PowerUpView::from_snapshots(
            world
                .power_ups
                .iter()
                .map(|power_up| power_up.snapshot())
                .collect(),
        )
    }

    /// Number of scheduled actions still waiting for their deadline.
    #[must_use]
    pub fn pending_actions(world: &World) -> usize {
        world.scheduler.len()
    }
}
