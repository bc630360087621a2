#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Heavy Machine Gun adapters.
//!
//! Everything in this crate is derived from read-only world snapshots. A UI
//! layer polls a [`Presentation`] once per frame and never writes back.

use anyhow::Result as AnyResult;
use glam::Vec2;
use heavy_machine_gun_core::{
    Buff, BulletView, EnemyId, EnemyKind, EnemySnapshot, EnemyView, GameSnapshot, PickupOutcome,
    PlayerSnapshot, Playfield, Position, PowerUpKind, PowerUpView, Stat,
};
use std::time::Duration;

/// Time a pickup acknowledgement stays on screen.
pub const ACKNOWLEDGEMENT_LIFETIME: Duration = Duration::from_millis(1_200);

/// Upward drift of acknowledgement labels in pixels per second.
const ACKNOWLEDGEMENT_RISE_SPEED: f32 = 40.0;

const HEALTHY_RATIO: f32 = 0.6;
const WOUNDED_RATIO: f32 = 0.3;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white, used for hit flashes.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with the alpha channel replaced.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

fn to_vec(position: Position) -> Vec2 {
    Vec2::new(position.x, position.y)
}

/// Input snapshot gathered by adapters before updating the presentation.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Horizontal coordinate the player should steer towards, if any.
    pub target_x: Option<f32>,
    /// Whether a restart was requested on this frame.
    pub restart: bool,
}

/// Visual state of the player ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerTint {
    /// Ordinary vulnerable ship.
    Normal,
    /// Shield buff is active.
    Shielded,
    /// Brief invulnerability after a respawn.
    Invincible,
    /// Ship is waiting to respawn.
    Respawning,
}

impl PlayerTint {
    /// Chooses the tint for the provided player state.
    #[must_use]
    pub fn for_player(player: &PlayerSnapshot) -> Self {
        if player.respawning {
            Self::Respawning
        } else if player.invincible {
            Self::Invincible
        } else if player.shield_active {
            Self::Shielded
        } else {
            Self::Normal
        }
    }

    /// Fill color associated with the tint.
    #[must_use]
    pub fn color(self) -> Color {
        let base = Color::from_rgb_u8(70, 200, 90);
        match self {
            Self::Normal => base,
            Self::Shielded => Color::from_rgb_u8(80, 160, 255),
            Self::Invincible => base.lighten(0.6),
            Self::Respawning => base.with_alpha(0.3),
        }
    }
}

/// Player ship descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Ship centre in playfield coordinates.
    pub position: Vec2,
    /// Visual state of the ship.
    pub tint: PlayerTint,
    /// Whether volleys currently spread to three bullets.
    pub multi_shot: bool,
}

impl PlayerPresentation {
    /// Builds the descriptor from a player snapshot.
    #[must_use]
    pub fn from_snapshot(player: &PlayerSnapshot) -> Self {
        Self {
            position: to_vec(player.position),
            tint: PlayerTint::for_player(player),
            multi_shot: player.multi_shot_active,
        }
    }
}

/// Health bar drawn beneath enemies that take more than one hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthBar {
    /// Remaining health as a fraction in the range 0.0..=1.0.
    pub fill: f32,
    /// Fill color chosen from the remaining fraction.
    pub color: Color,
}

impl HealthBar {
    /// Returns a health bar for enemies with more than one hit point.
    #[must_use]
    pub fn for_health(current: u32, maximum: u32) -> Option<Self> {
        if maximum <= 1 {
            return None;
        }

        let fill = (current as f32 / maximum as f32).clamp(0.0, 1.0);
        let color = if fill > HEALTHY_RATIO {
            Color::from_rgb_u8(0, 200, 0)
        } else if fill > WOUNDED_RATIO {
            Color::from_rgb_u8(230, 200, 0)
        } else {
            Color::from_rgb_u8(200, 0, 0)
        };
        Some(Self { fill, color })
    }
}

/// Enemy descriptor positioned in playfield coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Identifier of the enemy.
    pub id: EnemyId,
    /// Archetype of the enemy.
    pub kind: EnemyKind,
    /// Enemy centre.
    pub position: Vec2,
    /// Body color, white while a hit flash is showing.
    pub color: Color,
    /// Optional health bar.
    pub health_bar: Option<HealthBar>,
}

impl EnemyPresentation {
    /// Builds the descriptor from an enemy snapshot.
    #[must_use]
    pub fn from_snapshot(enemy: &EnemySnapshot) -> Self {
        let color = if enemy.flash_remaining > Duration::ZERO {
            Color::WHITE
        } else {
            enemy_color(enemy.kind)
        };

        Self {
            id: enemy.id,
            kind: enemy.kind,
            position: to_vec(enemy.position),
            color,
            health_bar: HealthBar::for_health(enemy.current_hp, enemy.max_hp),
        }
    }
}

/// Base body color of an enemy archetype.
#[must_use]
pub fn enemy_color(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Basic => Color::from_rgb_u8(220, 60, 60),
        EnemyKind::Fast => Color::from_rgb_u8(240, 150, 40),
        EnemyKind::Strong => Color::from_rgb_u8(150, 60, 200),
        EnemyKind::Boss => Color::from_rgb_u8(120, 20, 20),
    }
}

/// Falling power-up descriptor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerUpPresentation {
    /// Power-up type.
    pub kind: PowerUpKind,
    /// Power-up centre.
    pub position: Vec2,
    /// Fill color.
    pub color: Color,
    /// Short glyph printed on the pickup.
    pub glyph: &'static str,
}

impl PowerUpPresentation {
    /// Creates a descriptor for the provided power-up.
    #[must_use]
    pub fn new(kind: PowerUpKind, position: Position) -> Self {
        let (color, glyph) = match kind {
            PowerUpKind::Speed => (Color::from_rgb_u8(0, 200, 255), "S"),
            PowerUpKind::FireRate => (Color::from_rgb_u8(255, 120, 0), "F"),
            PowerUpKind::MultiShot => (Color::from_rgb_u8(255, 220, 0), "M"),
            PowerUpKind::Shield => (Color::from_rgb_u8(80, 160, 255), "D"),
            PowerUpKind::ExtraPoints => (Color::from_rgb_u8(255, 215, 0), "$"),
            PowerUpKind::ExtraLife => (Color::from_rgb_u8(255, 80, 160), "+"),
            PowerUpKind::Bomb => (Color::from_rgb_u8(90, 90, 90), "B"),
            PowerUpKind::PermanentFireRate => (Color::from_rgb_u8(255, 120, 0).lighten(0.4), "f"),
            PowerUpKind::PermanentSpeed => (Color::from_rgb_u8(0, 200, 255).lighten(0.4), "s"),
        };

        Self {
            kind,
            position: to_vec(position),
            color,
            glyph,
        }
    }
}

/// Floating label confirming what a collected power-up did.
#[derive(Clone, Debug, PartialEq)]
pub struct PickupAcknowledgement {
    /// Text shown to the player.
    pub label: String,
    /// Current label position.
    pub position: Vec2,
    /// Time left before the label disappears.
    pub remaining: Duration,
}

impl PickupAcknowledgement {
    /// Creates a label at the pickup position.
    #[must_use]
    pub fn new(kind: PowerUpKind, outcome: PickupOutcome, position: Position) -> Self {
        Self {
            label: acknowledgement_label(kind, outcome),
            position: to_vec(position),
            remaining: ACKNOWLEDGEMENT_LIFETIME,
        }
    }

    /// Ages the label and lets it drift upwards. Returns `false` once expired.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let elapsed = dt.min(self.remaining);
        self.remaining -= elapsed;
        self.position.y -= ACKNOWLEDGEMENT_RISE_SPEED * elapsed.as_secs_f32();
        !self.remaining.is_zero()
    }

    /// Opacity fading linearly over the label lifetime.
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.remaining.as_secs_f32() / ACKNOWLEDGEMENT_LIFETIME.as_secs_f32()
    }
}

/// Text describing the effect of a pickup.
#[must_use]
pub fn acknowledgement_label(kind: PowerUpKind, outcome: PickupOutcome) -> String {
    let permanent = matches!(
        kind,
        PowerUpKind::PermanentFireRate | PowerUpKind::PermanentSpeed
    );
    match outcome {
        PickupOutcome::StatBoosted { stat, amount } => {
            let text = match stat {
                Stat::Speed => format!("+{amount} SPEED"),
                Stat::FireRate => format!("-{amount}ms FIRE RATE"),
            };
            if permanent {
                format!("{text} (PERMANENT)")
            } else {
                text
            }
        }
        PickupOutcome::ConvertedToScore { points } => format!("MAXED! +{points}"),
        PickupOutcome::BuffActivated { buff, duration } => {
            format!("{} {}s", buff_name(buff), duration.as_secs())
        }
        PickupOutcome::BuffExtended { buff, duration } => {
            format!("{} EXTENDED {}s", buff_name(buff), duration.as_secs())
        }
        PickupOutcome::PointsAwarded { points } => format!("+{points}"),
        PickupOutcome::LifeGained { .. } => "EXTRA LIFE".to_owned(),
        PickupOutcome::EnemiesCleared { count, points } => format!("BOMB! {count} DOWN +{points}"),
    }
}

fn buff_name(buff: Buff) -> &'static str {
    match buff {
        Buff::MultiShot => "MULTI-SHOT",
        Buff::Shield => "SHIELD",
    }
}

/// Heads-up display values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Current score.
    pub score: u64,
    /// Best score known to the session.
    pub high_score: u64,
    /// Remaining lives.
    pub lives: u32,
    /// Current level.
    pub level: u32,
    /// Enemies destroyed this game.
    pub enemies_killed: u32,
    /// Player movement speed.
    pub speed: u32,
    /// Player fire interval in milliseconds.
    pub fire_rate_ms: u32,
    /// Remaining multi-shot time while the buff is active.
    pub multi_shot_remaining: Option<Duration>,
    /// Remaining shield time while the buff is active.
    pub shield_remaining: Option<Duration>,
    /// Whether the game has ended.
    pub game_over: bool,
}

impl Hud {
    /// Assembles the HUD from game and player snapshots.
    #[must_use]
    pub fn new(game: &GameSnapshot, player: &PlayerSnapshot, high_score: u64) -> Self {
        Self {
            score: game.score,
            high_score: high_score.max(game.score),
            lives: game.lives,
            level: game.level,
            enemies_killed: game.enemies_killed,
            speed: player.speed,
            fire_rate_ms: player.fire_rate_ms,
            multi_shot_remaining: player
                .multi_shot_active
                .then_some(player.multi_shot_remaining),
            shield_remaining: player.shield_active.then_some(player.shield_remaining),
            game_over: game.is_game_over(),
        }
    }

    /// Single-line summary suitable for text backends.
    #[must_use]
    pub fn status_line(&self) -> String {
        let mut line = format!(
            "score {} (best {}) | level {} | lives {} | kills {} | speed {} | fire {}ms",
            self.score,
            self.high_score,
            self.level,
            self.lives,
            self.enemies_killed,
            self.speed,
            self.fire_rate_ms
        );
        if let Some(remaining) = self.multi_shot_remaining {
            line.push_str(&format!(" | multi-shot {:.1}s", remaining.as_secs_f32()));
        }
        if let Some(remaining) = self.shield_remaining {
            line.push_str(&format!(" | shield {:.1}s", remaining.as_secs_f32()));
        }
        if self.game_over {
            line.push_str(" | GAME OVER");
        }
        line
    }
}

/// Scene description of everything visible on the playfield.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Playfield width in pixels.
    pub width: f32,
    /// Playfield height in pixels.
    pub height: f32,
    /// Player ship.
    pub player: PlayerPresentation,
    /// Live enemies ordered by identifier.
    pub enemies: Vec<EnemyPresentation>,
    /// Bullet centres ordered by identifier.
    pub bullets: Vec<Vec2>,
    /// Falling power-ups ordered by identifier.
    pub power_ups: Vec<PowerUpPresentation>,
    /// Floating pickup labels.
    pub acknowledgements: Vec<PickupAcknowledgement>,
}

impl Scene {
    /// Creates a new scene descriptor from world snapshots.
    #[must_use]
    pub fn new(
        playfield: Playfield,
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        bullets: &BulletView,
        power_ups: &PowerUpView,
        acknowledgements: Vec<PickupAcknowledgement>,
    ) -> Self {
        Self {
            width: playfield.width(),
            height: playfield.height(),
            player: PlayerPresentation::from_snapshot(player),
            enemies: enemies.iter().map(EnemyPresentation::from_snapshot).collect(),
            bullets: bullets.iter().map(|bullet| to_vec(bullet.position)).collect(),
            power_ups: power_ups
                .iter()
                .map(|power_up| PowerUpPresentation::new(power_up.kind, power_up.position))
                .collect(),
            acknowledgements,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
    /// Heads-up display values.
    pub hud: Hud,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene, hud: Hud) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
            hud,
        }
    }
}

/// Rendering backend capable of presenting Heavy Machine Gun frames.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update` closure receives the simulated frame delta and
    /// per-frame input captured by the adapter, and refreshes the presentation
    /// before it is rendered.
    fn run<F>(self, presentation: Presentation, update: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Presentation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use heavy_machine_gun_core::{EnemySnapshot, GamePhase, MovementPattern};

    fn player() -> PlayerSnapshot {
        PlayerSnapshot {
            position: Position::new(400.0, 540.0),
            speed: 300,
            fire_rate_ms: 200,
            fire_ready_in: Duration::ZERO,
            multi_shot_active: false,
            multi_shot_remaining: Duration::ZERO,
            shield_active: false,
            shield_remaining: Duration::ZERO,
            respawning: false,
            invincible: false,
        }
    }

    fn enemy(current_hp: u32, max_hp: u32, flash_remaining: Duration) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(3),
            kind: EnemyKind::Strong,
            position: Position::new(100.0, 50.0),
            current_hp,
            max_hp,
            score_value: 30,
            pattern: MovementPattern::Straight,
            from_side: false,
            flash_remaining,
        }
    }

    #[test]
    fn health_bar_colour_tracks_remaining_fraction() {
        let green = Color::from_rgb_u8(0, 200, 0);
        let yellow = Color::from_rgb_u8(230, 200, 0);
        let red = Color::from_rgb_u8(200, 0, 0);

        assert_eq!(HealthBar::for_health(5, 5).map(|bar| bar.color), Some(green));
        assert_eq!(HealthBar::for_health(3, 5).map(|bar| bar.color), Some(yellow));
        assert_eq!(HealthBar::for_health(2, 5).map(|bar| bar.color), Some(yellow));
        assert_eq!(HealthBar::for_health(1, 5).map(|bar| bar.color), Some(red));
        assert_eq!(HealthBar::for_health(1, 5).map(|bar| bar.fill), Some(0.2));
    }

    #[test]
    fn single_hit_enemies_have_no_health_bar() {
        assert!(HealthBar::for_health(1, 1).is_none());
        assert!(EnemyPresentation::from_snapshot(&enemy(1, 1, Duration::ZERO))
            .health_bar
            .is_none());
    }

    #[test]
    fn hit_flash_paints_enemy_white() {
        let flashing = EnemyPresentation::from_snapshot(&enemy(2, 3, Duration::from_millis(40)));
        let idle = EnemyPresentation::from_snapshot(&enemy(2, 3, Duration::ZERO));

        assert_eq!(flashing.color, Color::WHITE);
        assert_eq!(idle.color, enemy_color(EnemyKind::Strong));
    }

    #[test]
    fn respawning_tint_takes_priority() {
        let mut snapshot = player();
        assert_eq!(PlayerTint::for_player(&snapshot), PlayerTint::Normal);
        snapshot.shield_active = true;
        assert_eq!(PlayerTint::for_player(&snapshot), PlayerTint::Shielded);
        snapshot.invincible = true;
        assert_eq!(PlayerTint::for_player(&snapshot), PlayerTint::Invincible);
        snapshot.respawning = true;
        assert_eq!(PlayerTint::for_player(&snapshot), PlayerTint::Respawning);
    }

    #[test]
    fn labels_describe_pickup_outcomes() {
        assert_eq!(
            acknowledgement_label(
                PowerUpKind::Speed,
                PickupOutcome::StatBoosted {
                    stat: Stat::Speed,
                    amount: 50
                }
            ),
            "+50 SPEED"
        );
        assert_eq!(
            acknowledgement_label(
                PowerUpKind::PermanentFireRate,
                PickupOutcome::StatBoosted {
                    stat: Stat::FireRate,
                    amount: 20
                }
            ),
            "-20ms FIRE RATE (PERMANENT)"
        );
        assert_eq!(
            acknowledgement_label(
                PowerUpKind::MultiShot,
                PickupOutcome::BuffExtended {
                    buff: Buff::MultiShot,
                    duration: Duration::from_millis(23_000)
                }
            ),
            "MULTI-SHOT EXTENDED 23s"
        );
        assert_eq!(
            acknowledgement_label(
                PowerUpKind::FireRate,
                PickupOutcome::ConvertedToScore { points: 200 }
            ),
            "MAXED! +200"
        );
    }

    #[test]
    fn acknowledgements_fade_and_expire() {
        let mut label = PickupAcknowledgement::new(
            PowerUpKind::ExtraPoints,
            PickupOutcome::PointsAwarded { points: 100 },
            Position::new(10.0, 100.0),
        );
        assert!(label.advance(Duration::from_millis(600)));
        assert!((label.alpha() - 0.5).abs() < 1e-5);
        assert!(label.position.y < 100.0);
        assert!(!label.advance(Duration::from_millis(900)));
        assert_eq!(label.remaining, Duration::ZERO);
    }

    #[test]
    fn hud_reports_active_buffs_only() {
        let game = GameSnapshot {
            phase: GamePhase::Playing,
            score: 1_500,
            level: 4,
            lives: 2,
            enemies_killed: 40,
            shield_active: true,
            multi_shot_active: false,
            power_ups_on_screen: 0,
            enemies_on_screen: 0,
        };
        let mut snapshot = player();
        snapshot.shield_active = true;
        snapshot.shield_remaining = Duration::from_millis(4_500);
        snapshot.multi_shot_remaining = Duration::from_millis(9_000);

        let hud = Hud::new(&game, &snapshot, 1_000);
        assert_eq!(hud.high_score, 1_500);
        assert_eq!(hud.multi_shot_remaining, None);
        assert_eq!(hud.shield_remaining, Some(Duration::from_millis(4_500)));
        assert!(hud.status_line().contains("shield 4.5s"));
        assert!(!hud.status_line().contains("GAME OVER"));
    }

    #[test]
    fn scene_lists_entities_in_playfield_coordinates() {
        let enemies = EnemyView::from_snapshots(vec![enemy(3, 3, Duration::ZERO)]);
        let scene = Scene::new(
            Playfield::default(),
            &player(),
            &enemies,
            &BulletView::default(),
            &PowerUpView::default(),
            Vec::new(),
        );

        assert_eq!(scene.width, 800.0);
        assert_eq!(scene.player.position, Vec2::new(400.0, 540.0));
        assert_eq!(scene.enemies.len(), 1);
        assert_eq!(scene.enemies[0].position, Vec2::new(100.0, 50.0));
        assert!(scene.bullets.is_empty());
    }
}
