//! Player ship system
//!
//! Consumes the tick's input frame: thrust along the facing angle,
//! fixed-step turning, cooldown-gated firing. Also owns the death and
//! respawn bookkeeping and the collision check against the live
//! asteroid field.

use crate::game::constants::player::{
    DEATH_RESPAWN_TICKS, ROTATION_STEP, SHOT_COOLDOWN, THRUST,
};
use crate::game::entity::bounce;
use crate::game::input::InputFrame;
use crate::game::state::{GameSession, Shot};
use crate::util::vec2::Vec2;

/// Player events for the state machine and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The ship hit an asteroid and lost a life
    Died { lives_left: u32 },
    /// The death timer elapsed and the ship respawned at centre
    Respawned,
    /// A shot left the barrel
    Fired,
    /// Lives hit zero; the session is finished
    GameOver,
}

/// One tick of the player controller
pub fn update(session: &mut GameSession, frame: &InputFrame) -> Vec<PlayerEvent> {
    let bounds = session.bounds();
    let mut events = Vec::new();

    let GameSession {
        player,
        asteroids,
        shots,
        ..
    } = session;

    // Out of lives is terminal for the session
    if player.lives == 0 {
        if !player.game_over {
            player.game_over = true;
            events.push(PlayerEvent::GameOver);
        }
        return events;
    }

    // Dead: run the respawn timer instead of the controller
    if !player.alive {
        player.death_ticks += 1;
        if player.death_ticks >= DEATH_RESPAWN_TICKS {
            player.reset(bounds);
            events.push(PlayerEvent::Respawned);
        }
        return events;
    }

    if player.cooldown > 0 {
        player.cooldown -= 1;
    }

    // Collision against the field. Only the first overlap counts: one
    // death costs one life no matter how many asteroids share the tick.
    if let Some(hit) = asteroids
        .iter()
        .position(|a| player.body.colliding(&a.body))
    {
        bounce(&mut player.body, &mut asteroids[hit].body);
        player.alive = false;
        player.lives -= 1;
        events.push(PlayerEvent::Died {
            lives_left: player.lives,
        });
    }

    if frame.thrust {
        player.body.set_heading(player.body.facing());
        let heading = player.body.heading();
        player
            .body
            .apply_force(Vec2::from_angle(heading) * THRUST);
    }

    if frame.turn_right {
        player.body.set_facing(player.body.facing() + ROTATION_STEP);
    } else if frame.turn_left {
        player.body.set_facing(player.body.facing() - ROTATION_STEP);
    }

    player.body.integrate(bounds);

    if frame.fire && player.cooldown == 0 {
        shots.push(Shot::new(
            player.body.position(),
            player.body.facing(),
            bounds,
        ));
        player.cooldown = SHOT_COOLDOWN;
        events.push(PlayerEvent::Fired);
    }

    events
}
