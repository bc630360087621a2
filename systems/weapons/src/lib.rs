#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that keeps the player's machine gun firing.

use heavy_machine_gun_core::{Command, GameSnapshot, PlayerSnapshot};

/// Auto-fire system that queues a volley whenever the gun is ready.
#[derive(Debug)]
pub struct Weapons {
    trigger_held: bool,
}

impl Weapons {
    /// Creates a new weapons system with the trigger held down.
    #[must_use]
    pub fn new() -> Self {
        Self { trigger_held: true }
    }

    /// Holds or releases the trigger.
    pub fn set_trigger(&mut self, held: bool) {
        self.trigger_held = held;
    }

    /// Emits `Command::FireVolley` when a running game has a ready gun.
    pub fn handle(&mut self, game: &GameSnapshot, player: &PlayerSnapshot, out: &mut Vec<Command>) {
        if !game.is_playing() || !self.trigger_held {
            return;
        }

        if player.respawning || !player.fire_ready_in.is_zero() {
            return;
        }

        out.push(Command::FireVolley);
    }
}

impl Default for Weapons {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heavy_machine_gun_core::{GamePhase, Position};
    use std::time::Duration;

    fn game(phase: GamePhase) -> GameSnapshot {
        GameSnapshot {
            phase,
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

    fn player(fire_ready_in: Duration, respawning: bool) -> PlayerSnapshot {
        PlayerSnapshot {
            position: Position::new(400.0, 540.0),
            speed: 300,
            fire_rate_ms: 200,
            fire_ready_in,
            multi_shot_active: false,
            multi_shot_remaining: Duration::ZERO,
            shield_active: false,
            shield_remaining: Duration::ZERO,
            respawning,
            invincible: false,
        }
    }

    #[test]
    fn ready_gun_fires() {
        let mut weapons = Weapons::new();
        let mut out = Vec::new();
        weapons.handle(
            &game(GamePhase::Playing),
            &player(Duration::ZERO, false),
            &mut out,
        );
        assert_eq!(out, vec![Command::FireVolley]);
    }

    #[test]
    fn cooling_respawning_or_finished_games_are_silent() {
        let mut weapons = Weapons::new();
        let mut out = Vec::new();
        weapons.handle(
            &game(GamePhase::Playing),
            &player(Duration::from_millis(40), false),
            &mut out,
        );
        weapons.handle(
            &game(GamePhase::Playing),
            &player(Duration::ZERO, true),
            &mut out,
        );
        weapons.handle(
            &game(GamePhase::GameOver),
            &player(Duration::ZERO, false),
            &mut out,
        );
        weapons.handle(
            &game(GamePhase::Ready),
            &player(Duration::ZERO, false),
            &mut out,
        );
        assert!(out.is_empty());
    }

    #[test]
    fn released_trigger_holds_fire() {
        let mut weapons = Weapons::new();
        weapons.set_trigger(false);
        let mut out = Vec::new();
        weapons.handle(
            &game(GamePhase::Playing),
            &player(Duration::ZERO, false),
            &mut out,
        );
        assert!(out.is_empty());
    }
}
