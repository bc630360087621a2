#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pairwise distance checks that turn overlaps into resolution commands.
//!
//! Passes run in a fixed order: bullets against enemies, then the player
//! against enemies, then the player against power-ups. Every pass works on
//! the snapshots captured at the start of the frame and tracks locally which
//! entities it already consumed, so no entity is resolved twice and a later
//! pass never touches an enemy an earlier pass destroyed.

use glam::Vec2;
use heavy_machine_gun_core::{
    BulletView, Command, EnemyId, EnemyView, GameSnapshot, PlayerSnapshot, Position, PowerUpView,
};

/// Distance below which a bullet strikes an enemy.
pub const BULLET_HIT_RADIUS: f32 = 30.0;
/// Distance below which the player touches an enemy.
pub const PLAYER_CONTACT_RADIUS: f32 = 35.0;
/// Distance below which the player collects a power-up.
pub const PICKUP_RADIUS: f32 = 35.0;

#[derive(Clone, Copy, Debug)]
struct EnemyState {
    id: EnemyId,
    position: Vec2,
    hp: u32,
}

/// Collision system that emits hit, contact and pickup commands.
#[derive(Debug, Default)]
pub struct Collision {
    enemies: Vec<EnemyState>,
}

impl Collision {
    /// Creates a new collision system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits resolution commands for every overlap found in the snapshots.
    pub fn handle(
        &mut self,
        game: &GameSnapshot,
        player: &PlayerSnapshot,
        enemies: &EnemyView,
        bullets: &BulletView,
        power_ups: &PowerUpView,
        out: &mut Vec<Command>,
    ) {
        if !game.is_playing() {
            return;
        }

        self.enemies.clear();
        self.enemies.extend(enemies.iter().map(|enemy| EnemyState {
            id: enemy.id,
            position: to_vec(enemy.position),
            hp: enemy.current_hp,
        }));

        for bullet in bullets.iter() {
            let origin = to_vec(bullet.position);
            let Some(target) = self
                .enemies
                .iter_mut()
                .find(|enemy| enemy.hp > 0 && enemy.position.distance(origin) < BULLET_HIT_RADIUS)
            else {
                continue;
            };
            target.hp = target.hp.saturating_sub(bullet.damage);
            out.push(Command::ResolveBulletHit {
                bullet: bullet.id,
                enemy: target.id,
            });
        }

        let ship = to_vec(player.position);
        if player.is_vulnerable() {
            for enemy in self.enemies.iter_mut() {
                if enemy.hp == 0 || enemy.position.distance(ship) >= PLAYER_CONTACT_RADIUS {
                    continue;
                }
                enemy.hp = 0;
                out.push(Command::ResolvePlayerContact { enemy: enemy.id });
                if !player.shield_active {
                    break;
                }
            }
        }

        for power_up in power_ups.iter() {
            if to_vec(power_up.position).distance(ship) < PICKUP_RADIUS {
                out.push(Command::CollectPowerUp {
                    power_up: power_up.id,
                });
            }
        }
    }
}

fn to_vec(position: Position) -> Vec2 {
    Vec2::new(position.x, position.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heavy_machine_gun_core::{
        BulletId, BulletSnapshot, EnemyKind, EnemySnapshot, GamePhase, MovementPattern,
        PowerUpId, PowerUpKind, PowerUpSnapshot,
    };
    use std::time::Duration;

    fn game() -> GameSnapshot {
        GameSnapshot {
            phase: GamePhase::Playing,
            score: 0,
            level: 1,
            lives: 3,
            enemies_killed: 0,
            shield_active: false,
            multi_shot_active: false,
            power_ups_on_screen: 0,
            enemies_on_screen: 0,
        }
    }

    fn player(shield_active: bool, respawning: bool) -> PlayerSnapshot {
        PlayerSnapshot {
            position: Position::new(400.0, 540.0),
            speed: 300,
            fire_rate_ms: 200,
            fire_ready_in: Duration::ZERO,
            multi_shot_active: false,
            multi_shot_remaining: Duration::ZERO,
            shield_active,
            shield_remaining: Duration::ZERO,
            respawning,
            invincible: false,
        }
    }

    fn enemy(id: u32, x: f32, y: f32, hp: u32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyKind::Basic,
            position: Position::new(x, y),
            current_hp: hp,
            max_hp: hp,
            score_value: 10,
            pattern: MovementPattern::Straight,
            from_side: false,
            flash_remaining: Duration::ZERO,
        }
    }

    fn bullet(id: u32, x: f32, y: f32) -> BulletSnapshot {
        BulletSnapshot {
            id: BulletId::new(id),
            position: Position::new(x, y),
            damage: 1,
        }
    }

    #[test]
    fn spent_enemy_absorbs_no_further_bullets() {
        let mut collision = Collision::new();
        let enemies = EnemyView::from_snapshots(vec![enemy(0, 100.0, 100.0, 1)]);
        let bullets =
            BulletView::from_snapshots(vec![bullet(0, 100.0, 110.0), bullet(1, 105.0, 100.0)]);
        let mut out = Vec::new();
        collision.handle(
            &game(),
            &player(false, false),
            &enemies,
            &bullets,
            &PowerUpView::default(),
            &mut out,
        );
        assert_eq!(
            out,
            vec![Command::ResolveBulletHit {
                bullet: BulletId::new(0),
                enemy: EnemyId::new(0),
            }]
        );
    }

    #[test]
    fn surplus_bullet_moves_on_to_the_next_enemy() {
        let mut collision = Collision::new();
        let enemies = EnemyView::from_snapshots(vec![
            enemy(0, 100.0, 100.0, 1),
            enemy(1, 120.0, 100.0, 2),
        ]);
        let bullets =
            BulletView::from_snapshots(vec![bullet(0, 110.0, 100.0), bullet(1, 110.0, 100.0)]);
        let mut out = Vec::new();
        collision.handle(
            &game(),
            &player(false, false),
            &enemies,
            &bullets,
            &PowerUpView::default(),
            &mut out,
        );
        assert_eq!(
            out,
            vec![
                Command::ResolveBulletHit {
                    bullet: BulletId::new(0),
                    enemy: EnemyId::new(0),
                },
                Command::ResolveBulletHit {
                    bullet: BulletId::new(1),
                    enemy: EnemyId::new(1),
                },
            ]
        );
    }

    #[test]
    fn enemy_shot_down_this_frame_cannot_touch_the_player() {
        let mut collision = Collision::new();
        let enemies = EnemyView::from_snapshots(vec![enemy(0, 400.0, 530.0, 1)]);
        let bullets = BulletView::from_snapshots(vec![bullet(0, 400.0, 520.0)]);
        let mut out = Vec::new();
        collision.handle(
            &game(),
            &player(false, false),
            &enemies,
            &bullets,
            &PowerUpView::default(),
            &mut out,
        );
        assert_eq!(out.len(), 1);
        assert!(matches!(out[0], Command::ResolveBulletHit { .. }));
    }

    #[test]
    fn unshielded_player_resolves_a_single_contact() {
        let mut collision = Collision::new();
        let enemies = EnemyView::from_snapshots(vec![
            enemy(0, 400.0, 530.0, 1),
            enemy(1, 410.0, 540.0, 1),
        ]);
        let mut out = Vec::new();
        collision.handle(
            &game(),
            &player(false, false),
            &enemies,
            &BulletView::default(),
            &PowerUpView::default(),
            &mut out,
        );
        assert_eq!(
            out,
            vec![Command::ResolvePlayerContact {
                enemy: EnemyId::new(0)
            }]
        );

        out.clear();
        collision.handle(
            &game(),
            &player(true, false),
            &enemies,
            &BulletView::default(),
            &PowerUpView::default(),
            &mut out,
        );
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn respawning_player_skips_enemy_contact_but_still_collects() {
        let mut collision = Collision::new();
        let enemies = EnemyView::from_snapshots(vec![enemy(0, 400.0, 540.0, 1)]);
        let power_ups = PowerUpView::from_snapshots(vec![PowerUpSnapshot {
            id: PowerUpId::new(3),
            kind: PowerUpKind::Shield,
            position: Position::new(420.0, 530.0),
            value: 8_000,
        }]);
        let mut out = Vec::new();
        collision.handle(
            &game(),
            &player(false, true),
            &enemies,
            &BulletView::default(),
            &power_ups,
            &mut out,
        );
        assert_eq!(
            out,
            vec![Command::CollectPowerUp {
                power_up: PowerUpId::new(3)
            }]
        );
    }
}
