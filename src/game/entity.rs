//! Movable-entity core shared by the ship, asteroids and shots.
//!
//! A [`Body`] owns the wrap-around position semantics: every position
//! write re-enters the playfield on the opposite edge. Velocity writes
//! are capped per-axis where the variant has a top speed, and both
//! angles are stored wrapped to (-pi, pi].

use crate::game::constants::wrap_angle;
use crate::util::vec2::Vec2;

/// Axis-aligned bounding box, anchored at the entity position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Physics state for one entity
#[derive(Debug, Clone)]
pub struct Body {
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    facing: f32,
    heading: f32,
    /// Per-axis velocity cap; None leaves the velocity unclamped (shots)
    top_speed: Option<f32>,
    pub mass: f32,
    /// Unscaled sprite footprint backing the bounding box
    pub sprite_size: Vec2,
    pub scale: f32,
}

impl Body {
    pub fn new(sprite_size: Vec2, scale: f32, mass: f32, top_speed: Option<f32>) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            facing: 0.0,
            heading: 0.0,
            top_speed,
            mass,
            sprite_size,
            scale,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Assign a position, wrapping around the playfield edges.
    ///
    /// A coordinate below zero re-enters at the far edge and a coordinate
    /// past the far edge re-enters at zero, so the position always lands
    /// inside [0, bounds.x] x [0, bounds.y].
    pub fn set_position(&mut self, value: Vec2, bounds: Vec2) {
        let mut p = value;
        if p.x < 0.0 {
            p.x = bounds.x;
        }
        if p.y < 0.0 {
            p.y = bounds.y;
        }
        if p.x > bounds.x {
            p.x = 0.0;
        }
        if p.y > bounds.y {
            p.y = 0.0;
        }
        self.position = p;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, value: Vec2) {
        self.velocity = match self.top_speed {
            Some(top) => value.clamp_axes(top),
            None => value,
        };
    }

    /// Rendered rotation
    pub fn facing(&self) -> f32 {
        self.facing
    }

    pub fn set_facing(&mut self, angle: f32) {
        self.facing = wrap_angle(angle);
    }

    /// Heading used for thrust/velocity decomposition; decoupled from
    /// facing so the ship can drift while rotating
    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn set_heading(&mut self, angle: f32) {
        self.heading = wrap_angle(angle);
    }

    /// Accumulate a force into the acceleration using F = m * a
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force * (1.0 / self.mass);
    }

    /// One fixed-step integration: velocity absorbs the accumulated
    /// acceleration, the position advances (wrapping), and the
    /// accumulator is cleared for the next tick.
    pub fn integrate(&mut self, bounds: Vec2) {
        self.set_velocity(self.velocity + self.acceleration);
        self.set_position(self.position + self.velocity, bounds);
        self.acceleration = Vec2::ZERO;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            x: self.position.x,
            y: self.position.y,
            w: self.sprite_size.x * self.scale,
            h: self.sprite_size.y * self.scale,
        }
    }

    /// Sprite centre in world space. Uses the unscaled footprint, matching
    /// the offset the renderer rotates around.
    pub fn center(&self) -> Vec2 {
        self.position + self.sprite_size * 0.5
    }

    pub fn colliding(&self, other: &Body) -> bool {
        self.bounds().intersects(&other.bounds())
    }
}

/// Mass-weighted elastic bounce between two bodies.
///
/// Both velocities are reflected about the centre-to-centre normal in the
/// frame of the combined centre of velocity `(mA*vA + mB*vB)/(mA+mB)`.
/// The response is approximate arcade behaviour, not exact physics; the
/// arithmetic is kept as-is because gameplay is tuned around it.
pub fn bounce(a: &mut Body, b: &mut Body) {
    let c = (a.velocity * a.mass + b.velocity * b.mass) * (1.0 / (a.mass + b.mass));

    let normal_a = (b.center() - a.center()).normalize();
    let normal_b = (a.center() - b.center()).normalize();

    a.set_velocity((a.velocity - c).reflect(normal_a) + c);
    b.set_velocity((b.velocity - c).reflect(normal_b) + c);
}
