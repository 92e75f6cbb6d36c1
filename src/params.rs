/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct holding every value the
 * control panel can change while the simulation runs. Values that influence
 * the physics sit behind setters which clamp to the slider ranges below, so
 * the field never sees a value the panel could not have produced.
 */

use std::ops::RangeInclusive;

/// Smallest distance kept between the floor and the ceiling.
pub const MIN_HEIGHT_GAP: f32 = 0.1;

/// A horizontal lower bound for falling particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Floor {
    /// Height at or below which vertical motion stops.
    pub y: f32,
    /// Respawn particles at the ceiling instead of letting them rest.
    pub recycle: bool,
}

// Parameters for the simulation that can be adjusted via UI
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    gravity: f32,
    mouse_force: f32,
    mouse_radius: f32,
    point_size: f32,
    floor: Option<Floor>,
    ceiling_y: f32,
    spawn_span_x: f32,
    pick_threshold: f32,
    pub show_debug: bool,
    pub pause_simulation: bool,
    // Performance settings
    pub enable_parallel: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            gravity: -0.0098,
            mouse_force: 0.05,
            mouse_radius: 2.0,
            point_size: 0.1,
            floor: None,
            ceiling_y: 3.8,
            spawn_span_x: 10.0,
            pick_threshold: 1.0,
            show_debug: false,
            pause_simulation: false,
            enable_parallel: true,
        }
    }
}

// Clamp a parameter into its range, keeping the old value for NaN or infinities
fn sanitize(name: &str, value: f32, range: RangeInclusive<f32>, current: f32) -> f32 {
    let value = if value.is_finite() {
        value
    } else {
        log::warn!("ignoring non-finite value {} for {}", value, name);
        current
    };
    value.clamp(*range.start(), *range.end())
}

impl SimulationParams {
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn mouse_force(&self) -> f32 {
        self.mouse_force
    }

    pub fn mouse_radius(&self) -> f32 {
        self.mouse_radius
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn floor(&self) -> Option<Floor> {
        self.floor
    }

    pub fn ceiling_y(&self) -> f32 {
        self.ceiling_y
    }

    pub fn spawn_span_x(&self) -> f32 {
        self.spawn_span_x
    }

    pub fn pick_threshold(&self) -> f32 {
        self.pick_threshold
    }

    pub fn set_gravity(&mut self, value: f32) -> &mut Self {
        self.gravity = sanitize("gravity", value, Self::get_gravity_range(), self.gravity);
        self
    }

    pub fn set_mouse_force(&mut self, value: f32) -> &mut Self {
        self.mouse_force = sanitize("mouse force", value, Self::get_force_range(), self.mouse_force);
        self
    }

    pub fn set_mouse_radius(&mut self, value: f32) -> &mut Self {
        self.mouse_radius = sanitize("mouse radius", value, Self::get_radius_range(), self.mouse_radius);
        self
    }

    pub fn set_point_size(&mut self, value: f32) -> &mut Self {
        self.point_size = sanitize("point size", value, Self::get_point_size_range(), self.point_size);
        self
    }

    /// Install, move or remove the floor. The floor height is clamped like
    /// every other height and always stays at least `MIN_HEIGHT_GAP` below
    /// the ceiling.
    pub fn set_floor(&mut self, floor: Option<Floor>) -> &mut Self {
        self.floor = floor.map(|floor| {
            let current = self.floor.map_or(-3.8, |f| f.y);
            let heights = Self::get_height_range();
            let highest = (self.ceiling_y - MIN_HEIGHT_GAP).max(*heights.start());
            let range = *heights.start()..=highest;
            Floor {
                y: sanitize("floor height", floor.y, range, current),
                recycle: floor.recycle,
            }
        });
        self
    }

    /// Move the respawn height. It never drops to within `MIN_HEIGHT_GAP` of
    /// the floor, nor of the bottom of the height range.
    pub fn set_ceiling_y(&mut self, value: f32) -> &mut Self {
        let heights = Self::get_height_range();
        let lowest = (self.floor.map_or(*heights.start(), |f| f.y) + MIN_HEIGHT_GAP).min(*heights.end());
        self.ceiling_y = sanitize("ceiling height", value, lowest..=*heights.end(), self.ceiling_y);
        self
    }

    /// Set floor and ceiling together, e.g. when restoring a preset. Both are
    /// validated against each other once the pair is in place.
    pub fn set_heights(&mut self, floor: Option<Floor>, ceiling_y: f32) -> &mut Self {
        self.floor = None;
        self.set_ceiling_y(ceiling_y).set_floor(floor)
    }

    pub fn set_spawn_span_x(&mut self, value: f32) -> &mut Self {
        self.spawn_span_x = sanitize("spawn span", value, Self::get_spawn_span_range(), self.spawn_span_x);
        self
    }

    pub fn set_pick_threshold(&mut self, value: f32) -> &mut Self {
        self.pick_threshold = sanitize("pick threshold", value, Self::get_pick_threshold_range(), self.pick_threshold);
        self
    }

    // Get parameter ranges for UI sliders
    pub fn get_num_particles_range() -> RangeInclusive<usize> {
        1..=100_000
    }

    pub fn get_gravity_range() -> RangeInclusive<f32> {
        -0.05..=0.0
    }

    pub fn get_force_range() -> RangeInclusive<f32> {
        0.0..=0.5
    }

    pub fn get_radius_range() -> RangeInclusive<f32> {
        0.0..=5.0
    }

    pub fn get_point_size_range() -> RangeInclusive<f32> {
        0.01..=1.0
    }

    pub fn get_spawn_span_range() -> RangeInclusive<f32> {
        0.0..=20.0
    }

    pub fn get_height_range() -> RangeInclusive<f32> {
        -10.0..=10.0
    }

    pub fn get_pick_threshold_range() -> RangeInclusive<f32> {
        0.01..=2.0
    }
}
