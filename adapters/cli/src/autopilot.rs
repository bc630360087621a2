use glam::Vec2;
use heavy_machine_gun_rendering::{FrameInput, Presentation};

/// Picks the steering target for the next frame.
///
/// Falling power-ups closest to the ship come first. Without any, the ship
/// lines up beneath the lowest enemy. A finished game is restarted.
pub(crate) fn steer(presentation: &Presentation) -> FrameInput {
    if presentation.hud.game_over {
        return FrameInput {
            target_x: None,
            restart: true,
        };
    }

    let scene = &presentation.scene;
    let ship = scene.player.position;
    let target = nearest(ship, scene.power_ups.iter().map(|power_up| power_up.position))
        .or_else(|| {
            scene
                .enemies
                .iter()
                .map(|enemy| enemy.position)
                .filter(|position| position.y >= 0.0)
                .max_by(|a, b| a.y.total_cmp(&b.y))
        });

    FrameInput {
        target_x: target.map(|position| position.x),
        restart: false,
    }
}

fn nearest(origin: Vec2, candidates: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    candidates.min_by(|a, b| a.distance(origin).total_cmp(&b.distance(origin)))
}
