/*
 * Physics Module
 *
 * Per-particle rules applied by the particle field every frame:
 * 1. Repulsion: push particles near the cursor hit point straight away from it
 * 2. Gravity: explicit Euler step on the vertical axis, suspended on the floor
 * 3. Recycle: move particles that reached the floor back up to the ceiling
 *
 * Each rule only reads the particle it changes plus shared inputs, so the
 * field is free to run them over its buffer in any order or in parallel.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::params::{Floor, SimulationParams};

// Push a particle directly away from the hit point when it lies inside the radius.
// Returns whether the particle moved.
pub fn repel(position: &mut Vec3, hit: Vec3, radius: f32, force: f32) -> bool {
    let offset = *position - hit;
    let distance = offset.length();

    // Zero distance has no direction to push along
    if distance == 0.0 || distance >= radius {
        return false;
    }

    // Constant magnitude, not inverse-square
    *position += offset / distance * force;
    true
}

// Add gravity to the vertical component unless the particle rests on the floor
pub fn fall(position: &mut Vec3, gravity: f32, floor: Option<Floor>) {
    if gravity == 0.0 {
        return;
    }

    if let Some(floor) = floor {
        if position.y <= floor.y {
            return;
        }
    }

    position.y += gravity;
}

/// Respawn a particle at the ceiling if it reached a recycling floor.
///
/// The new x is drawn uniformly from `[-span_x / 2, span_x / 2]`; z is kept.
pub fn recycle<R: Rng + ?Sized>(
    position: &mut Vec3,
    floor: Floor,
    ceiling_y: f32,
    span_x: f32,
    rng: &mut R,
) -> bool {
    if !floor.recycle || position.y > floor.y {
        return false;
    }

    let half_span = span_x.max(0.0) / 2.0;
    position.x = rng.gen_range(-half_span..=half_span);
    position.y = ceiling_y;
    true
}

// Repulsion followed by gravity, the part of a step that needs no randomness
pub fn integrate(position: &mut Vec3, hit: Option<Vec3>, params: &SimulationParams) -> bool {
    let repelled = match hit {
        Some(hit) => repel(position, hit, params.mouse_radius(), params.mouse_force()),
        None => false,
    };

    fall(position, params.gravity(), params.floor());

    repelled
}
