//! Shot lifecycle system
//!
//! Shots fly in a straight line along their fire angle at constant
//! speed, with no drag, until their time-to-live runs out. Collision
//! handling forces the same counter to zero, so both removal paths
//! converge here.

use crate::game::constants::shot::SPEED;
use crate::game::state::GameSession;
use crate::util::vec2::Vec2;

/// Advance every live shot and drop the expired ones
pub fn update(session: &mut GameSession) {
    let bounds = session.bounds();

    for shot in &mut session.shots {
        if shot.live_ticks > 0 {
            shot.live_ticks -= 1;
            let step = Vec2::from_angle(shot.body.heading()) * SPEED;
            shot.body.set_position(shot.body.position() + step, bounds);
        }
    }

    // Remove expired shots (sequential - modifies collection)
    session.shots.retain(|s| !s.expired());
}
