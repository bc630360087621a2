//! Entity records stored in the world arenas and their kinematics.

use std::time::Duration;

use heavy_machine_gun_core::{
    BulletId, BulletSnapshot, EnemyId, EnemyKind, EnemySnapshot, EnemySpawn, MovementPattern,
    Playfield, Position, PowerUpId, PowerUpKind, PowerUpSnapshot,
};

const ZIGZAG_AMPLITUDE: f32 = 60.0;
const ZIGZAG_FREQUENCY: f32 = 3.0;
const CIRCLE_RADIUS: f32 = 40.0;
const CIRCLE_FREQUENCY: f32 = 2.0;
const SIDE_DRIFT_FACTOR: f32 = 0.6;

pub(crate) const BULLET_SPEED: f32 = 600.0;
pub(crate) const POWER_UP_FALL_SPEED: f32 = 120.0;

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) position: Position,
    anchor: Position,
    elapsed: f32,
    speed: f32,
    drift: f32,
    pub(crate) max_hp: u32,
    pub(crate) current_hp: u32,
    pub(crate) score_value: u32,
    pattern: MovementPattern,
    from_side: bool,
    pub(crate) flash_remaining: Duration,
}

impl Enemy {
    pub(crate) fn from_spawn(id: EnemyId, spawn: EnemySpawn, playfield: &Playfield) -> Self {
        let drift = if spawn.from_side {
            let toward_centre = (playfield.width() / 2.0 - spawn.position.x).signum();
            toward_centre * spawn.speed * SIDE_DRIFT_FACTOR
        } else {
            0.0
        };
        let max_hp = spawn.max_hp.max(1);
        Self {
            id,
            kind: spawn.kind,
            position: spawn.position,
            anchor: spawn.position,
            elapsed: 0.0,
            speed: spawn.speed,
            drift,
            max_hp,
            current_hp: max_hp,
            score_value: spawn.score_value,
            pattern: spawn.pattern,
            from_side: spawn.from_side,
            flash_remaining: Duration::ZERO,
        }
    }

    pub(crate) fn advance(&mut self, dt: Duration, playfield: &Playfield) {
        let seconds = dt.as_secs_f32();
        self.elapsed += seconds;
        self.anchor.y += self.speed * seconds;

        if self.drift != 0.0 {
            self.anchor.x += self.drift * seconds;
            let (min_x, max_x) = playfield.spawn_x_range();
            if (min_x..=max_x).contains(&self.anchor.x) {
                self.drift = 0.0;
            }
        }

        let (offset_x, offset_y) = match self.pattern {
            MovementPattern::Straight => (0.0, 0.0),
            MovementPattern::Zigzag => (
                ZIGZAG_AMPLITUDE * (ZIGZAG_FREQUENCY * self.elapsed).sin(),
                0.0,
            ),
            MovementPattern::Circle => {
                let phase = CIRCLE_FREQUENCY * self.elapsed;
                (
                    CIRCLE_RADIUS * (phase.cos() - 1.0),
                    CIRCLE_RADIUS * phase.sin(),
                )
            }
        };

        self.position = Position::new(
            playfield.clamp_x(self.anchor.x + offset_x),
            self.anchor.y + offset_y,
        );
        self.flash_remaining = self.flash_remaining.saturating_sub(dt);
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            current_hp: self.current_hp,
            max_hp: self.max_hp,
            score_value: self.score_value,
            pattern: self.pattern,
            from_side: self.from_side,
            flash_remaining: self.flash_remaining,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Bullet {
    pub(crate) id: BulletId,
    pub(crate) position: Position,
    pub(crate) damage: u32,
}

impl Bullet {
    pub(crate) fn advance(&mut self, dt: Duration) {
        self.position.y -= BULLET_SPEED * dt.as_secs_f32();
    }

    pub(crate) fn snapshot(&self) -> BulletSnapshot {
        BulletSnapshot {
            id: self.id,
            position: self.position,
            damage: self.damage,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct PowerUp {
    pub(crate) id: PowerUpId,
    pub(crate) kind: PowerUpKind,
    pub(crate) position: Position,
    pub(crate) value: u32,
}

impl PowerUp {
    pub(crate) fn advance(&mut self, dt: Duration) {
        self.position.y += POWER_UP_FALL_SPEED * dt.as_secs_f32();
    }

    pub(crate) fn snapshot(&self) -> PowerUpSnapshot {
        PowerUpSnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            value: self.value,
        }
    }
}
