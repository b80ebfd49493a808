//! Asteroid field system
//!
//! Owns the live asteroid set: spawns the level field, detects shot
//! hits, splits large asteroids and awards score. All removals and
//! spawns are deferred until the pairwise scan has finished, so
//! mid-iteration mutation of either live set cannot skip or
//! double-process an entry.

use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;

use crate::game::constants::asteroid::{
    SAFE_SPAWN_RADIUS, SPLIT_CHILDREN, SPLIT_HEADING_MAX, TOP_SPEED,
};
use crate::game::constants::field_size;
use crate::game::state::{Asteroid, AsteroidSize, GameSession};
use crate::util::vec2::Vec2;

/// Field events for logging and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldEvent {
    /// An asteroid was shot down; score has already been awarded
    Destroyed { size: AsteroidSize, position: Vec2 },
}

/// Clear the field and spawn the large asteroids for the session's
/// current level: `2 + floor(level * 1.3)` of them, each kept at least
/// [`SAFE_SPAWN_RADIUS`] away from the player's spawn at screen centre.
pub fn spawn_field(session: &mut GameSession) {
    session.asteroids.clear();

    let bounds = session.bounds();
    let center = session.screen_center();
    let count = field_size(session.level);

    for _ in 0..count {
        // Resample until the position clears the spawn-safe circle
        let position = loop {
            let candidate = Vec2::new(
                session.rng.gen_range(0.0..bounds.x),
                session.rng.gen_range(0.0..bounds.y),
            );
            if candidate.distance_to(center) >= SAFE_SPAWN_RADIUS {
                break candidate;
            }
        };
        let velocity = Vec2::new(
            session.rng.gen_range(-TOP_SPEED..TOP_SPEED),
            session.rng.gen_range(-TOP_SPEED..TOP_SPEED),
        );
        let heading = session.rng.gen_range(0.0..TAU);

        let rock = Asteroid::new(
            AsteroidSize::Large,
            position,
            velocity,
            heading,
            bounds,
            &mut session.rng,
        );
        session.asteroids.push(rock);
    }

    tracing::debug!(level = session.level, count, "asteroid field spawned");
}

/// One tick of the field: resolve shot hits, then drift every survivor.
pub fn update(session: &mut GameSession) -> Vec<FieldEvent> {
    let bounds = session.bounds();

    // Pairwise scan. Each shot consumes at most one asteroid and each
    // asteroid dies at most once; indices are only collected here and
    // applied after the scan completes.
    let mut destroyed: SmallVec<[usize; 8]> = SmallVec::new();
    let mut consumed: SmallVec<[usize; 8]> = SmallVec::new();

    for (ai, rock) in session.asteroids.iter().enumerate() {
        for (si, shot) in session.shots.iter().enumerate() {
            if consumed.contains(&si) {
                continue;
            }
            if rock.body.colliding(&shot.body) {
                destroyed.push(ai);
                consumed.push(si);
                break;
            }
        }
    }

    let mut events = Vec::new();
    let mut children = Vec::new();

    for &ai in &destroyed {
        let (size, position) = {
            let rock = &session.asteroids[ai];
            (rock.size, rock.body.position())
        };

        session.score += size.score();
        events.push(FieldEvent::Destroyed { size, position });

        // A large asteroid breaks into two small ones at its last
        // position; small asteroids just disappear.
        if size == AsteroidSize::Large {
            for _ in 0..SPLIT_CHILDREN {
                let velocity = Vec2::new(
                    session.rng.gen_range(-TOP_SPEED..TOP_SPEED),
                    session.rng.gen_range(-TOP_SPEED..TOP_SPEED),
                );
                let heading = session.rng.gen_range(0.0..SPLIT_HEADING_MAX);
                let child = Asteroid::new(
                    AsteroidSize::Small,
                    position,
                    velocity,
                    heading,
                    bounds,
                    &mut session.rng,
                );
                children.push(child);
            }
        }
    }

    // Apply the deferred removals, then add the split products
    let mut index = 0;
    session.asteroids.retain(|_| {
        let keep = !destroyed.contains(&index);
        index += 1;
        keep
    });

    let mut index = 0;
    session.shots.retain_mut(|shot| {
        let hit = consumed.contains(&index);
        index += 1;
        if hit {
            // Zero the TTL so any observer of the shot sees it expired
            shot.live_ticks = 0;
        }
        !hit
    });

    session.asteroids.append(&mut children);

    // Drift: heading-modulated force, then the standard integration
    for rock in &mut session.asteroids {
        let v = rock.body.velocity();
        let heading = rock.body.heading();
        let drift = Vec2::new(v.x * heading.cos(), v.y * heading.sin());
        rock.body.apply_force(drift);
        rock.body.integrate(bounds);
    }

    events
}
