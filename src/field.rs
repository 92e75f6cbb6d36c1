/*
 * Particle Field Module
 *
 * The ParticleField owns the authoritative position and color buffers for
 * every particle in the scene. Its length is fixed when it is built; a
 * different particle count means building a new field. Every render layer
 * reads the same buffers; only the field itself writes to them.
 *
 * A step runs the rules from the physics module in order:
 * repulsion from the cursor hit, gravity, then recycling at the floor.
 * Repulsion and gravity can be spread across rayon's pool; recycling draws
 * from the field's own random source and always runs sequentially so a
 * seeded field replays identically with parallelism on or off.
 *
 * The flat-buffer helpers and dirty flags are for callers that upload the
 * field to their own vertex buffers; the nannou renderer reads the slices
 * directly every frame.
 */

use nannou::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::error::FieldError;
use crate::params::SimulationParams;
use crate::physics;
use crate::picking::{self, PickHit, PickRay};

/// Extent of the box initial positions are drawn from, centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnVolume {
    pub span_x: f32,
    pub span_y: f32,
    pub span_z: f32,
}

impl Default for SpawnVolume {
    // A flat 10 x 10 sheet facing the camera
    fn default() -> Self {
        Self {
            span_x: 10.0,
            span_y: 10.0,
            span_z: 0.0,
        }
    }
}

impl SpawnVolume {
    // Every span must be finite; zero or negative spans collapse to the origin
    fn validate(&self) -> Result<(), FieldError> {
        for (axis, span) in [('x', self.span_x), ('y', self.span_y), ('z', self.span_z)] {
            if !span.is_finite() {
                return Err(FieldError::InvalidVolume { axis, span });
            }
        }
        Ok(())
    }
}

/// What happened during one step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepStats {
    pub hit: Option<PickHit>,
    pub repelled: usize,
    pub recycled: usize,
}

pub struct ParticleField {
    positions: Vec<Vec3>,
    colors: Vec<Rgb<f32>>,
    rng: SmallRng,
    positions_dirty: bool,
    colors_dirty: bool,
}

// Uniform offset in [-span/2, span/2), or zero for an empty span
fn spread<R: Rng + ?Sized>(rng: &mut R, span: f32) -> f32 {
    if span > 0.0 {
        let half = span / 2.0;
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}

impl ParticleField {
    /// Build a field with randomized positions, seeded from the OS.
    pub fn new(count: usize, volume: SpawnVolume, color: Rgb<f32>) -> Result<Self, FieldError> {
        Self::with_rng(count, volume, color, SmallRng::from_entropy())
    }

    /// Build a reproducible field: the same seed gives the same layout and
    /// the same respawn sequence.
    pub fn with_seed(
        count: usize,
        volume: SpawnVolume,
        color: Rgb<f32>,
        seed: u64,
    ) -> Result<Self, FieldError> {
        Self::with_rng(count, volume, color, SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(
        count: usize,
        volume: SpawnVolume,
        color: Rgb<f32>,
        mut rng: SmallRng,
    ) -> Result<Self, FieldError> {
        if count == 0 {
            return Err(FieldError::Empty);
        }
        volume.validate()?;

        let positions = (0..count)
            .map(|_| {
                let x = spread(&mut rng, volume.span_x);
                let y = spread(&mut rng, volume.span_y);
                let z = spread(&mut rng, volume.span_z);
                vec3(x, y, z)
            })
            .collect();

        Ok(Self {
            positions,
            colors: vec![color; count],
            rng,
            positions_dirty: true,
            colors_dirty: true,
        })
    }

    /// Build a field from explicit attributes. Both arrays must have the same,
    /// non-zero length.
    pub fn from_parts(
        positions: Vec<Vec3>,
        colors: Vec<Rgb<f32>>,
        rng: SmallRng,
    ) -> Result<Self, FieldError> {
        if positions.is_empty() {
            return Err(FieldError::Empty);
        }
        if colors.len() != positions.len() {
            return Err(FieldError::LengthMismatch {
                expected: positions.len(),
                actual: colors.len(),
            });
        }

        Ok(Self {
            positions,
            colors,
            rng,
            positions_dirty: true,
            colors_dirty: true,
        })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Rgb<f32>] {
        &self.colors
    }

    pub fn pick(&self, ray: &PickRay, threshold: f32) -> Option<PickHit> {
        picking::pick_nearest(ray, &self.positions, threshold)
    }

    /// Pick against the current positions, then advance one frame using the
    /// hit point, if any.
    pub fn step(&mut self, ray: Option<&PickRay>, params: &SimulationParams) -> StepStats {
        let hit = ray.and_then(|ray| self.pick(ray, params.pick_threshold()));
        let stats = self.advance(hit.map(|hit| hit.point), params);

        StepStats { hit, ..stats }
    }

    /// Run repulsion (when `hit` is present), gravity and recycling over every
    /// particle.
    pub fn advance(&mut self, hit: Option<Vec3>, params: &SimulationParams) -> StepStats {
        let repelled = if params.enable_parallel {
            // Same chunking as one task per worker thread
            let chunk_size = std::cmp::max(self.positions.len() / rayon::current_num_threads(), 1);

            self.positions
                .par_chunks_mut(chunk_size)
                .map(|chunk| {
                    chunk
                        .iter_mut()
                        .map(|position| physics::integrate(position, hit, params) as usize)
                        .sum::<usize>()
                })
                .sum()
        } else {
            self.positions
                .iter_mut()
                .map(|position| physics::integrate(position, hit, params) as usize)
                .sum()
        };

        let mut recycled = 0;
        if let Some(floor) = params.floor() {
            for position in &mut self.positions {
                if physics::recycle(
                    position,
                    floor,
                    params.ceiling_y(),
                    params.spawn_span_x(),
                    &mut self.rng,
                ) {
                    recycled += 1;
                }
            }
        }

        self.positions_dirty = true;

        StepStats {
            hit: None,
            repelled,
            recycled,
        }
    }

    /// Overwrite every particle's color. Positions are untouched.
    pub fn set_color(&mut self, color: Rgb<f32>) {
        for slot in &mut self.colors {
            *slot = color;
        }
        self.colors_dirty = true;
    }

    /// Copy positions into a flat `xyz` buffer of exactly `3 * len` floats.
    pub fn write_positions(&self, out: &mut [f32]) -> Result<(), FieldError> {
        self.check_flat_len(out.len())?;

        for (dst, position) in out.chunks_exact_mut(3).zip(&self.positions) {
            dst.copy_from_slice(&[position.x, position.y, position.z]);
        }
        Ok(())
    }

    /// Copy colors into a flat `rgb` buffer of exactly `3 * len` floats.
    pub fn write_colors(&self, out: &mut [f32]) -> Result<(), FieldError> {
        self.check_flat_len(out.len())?;

        for (dst, color) in out.chunks_exact_mut(3).zip(&self.colors) {
            dst.copy_from_slice(&[color.red, color.green, color.blue]);
        }
        Ok(())
    }

    /// Replace every position from a flat `xyz` buffer of exactly `3 * len`
    /// floats.
    pub fn load_positions(&mut self, flat: &[f32]) -> Result<(), FieldError> {
        self.check_flat_len(flat.len())?;

        for (position, src) in self.positions.iter_mut().zip(flat.chunks_exact(3)) {
            *position = vec3(src[0], src[1], src[2]);
        }
        self.positions_dirty = true;
        Ok(())
    }

    /// Whether positions changed since the last call.
    pub fn take_positions_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.positions_dirty, false)
    }

    /// Whether colors changed since the last call.
    pub fn take_colors_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.colors_dirty, false)
    }

    fn check_flat_len(&self, actual: usize) -> Result<(), FieldError> {
        let expected = self.positions.len() * 3;
        if actual != expected {
            return Err(FieldError::LengthMismatch { expected, actual });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Floor;

    fn yellow() -> Rgb<f32> {
        rgb(1.0, 1.0, 0.0)
    }

    fn still_params() -> SimulationParams {
        let mut params = SimulationParams::default();
        params.set_gravity(0.0);
        params
    }

    fn single(position: Vec3) -> ParticleField {
        ParticleField::from_parts(vec![position], vec![yellow()], SmallRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn new_field_has_requested_length_and_color() {
        let field = ParticleField::with_seed(500, SpawnVolume::default(), yellow(), 3).unwrap();

        assert_eq!(field.len(), 500);
        assert_eq!(field.colors().len(), 500);
        assert!(field.colors().iter().all(|&c| c == yellow()));
        assert!(field
            .positions()
            .iter()
            .all(|p| p.x >= -5.0 && p.x < 5.0 && p.y >= -5.0 && p.y < 5.0 && p.z == 0.0));
    }

    #[test]
    fn empty_field_is_rejected() {
        let result = ParticleField::with_seed(0, SpawnVolume::default(), yellow(), 3);
        assert!(matches!(result, Err(FieldError::Empty)));
    }

    #[test]
    fn non_finite_volume_is_rejected() {
        let volume = SpawnVolume {
            span_x: f32::INFINITY,
            ..SpawnVolume::default()
        };
        let result = ParticleField::with_seed(4, volume, yellow(), 3);
        assert!(matches!(
            result,
            Err(FieldError::InvalidVolume { axis: 'x', .. })
        ));

        let volume = SpawnVolume {
            span_z: f32::NAN,
            ..SpawnVolume::default()
        };
        assert!(matches!(
            ParticleField::with_seed(4, volume, yellow(), 3),
            Err(FieldError::InvalidVolume { axis: 'z', .. })
        ));
    }

    #[test]
    fn huge_finite_volume_is_accepted() {
        let volume = SpawnVolume {
            span_x: f32::MAX,
            ..SpawnVolume::default()
        };
        let field = ParticleField::with_seed(4, volume, yellow(), 3).unwrap();
        assert!(field.positions().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn mismatched_parts_are_rejected() {
        let result = ParticleField::from_parts(
            vec![Vec3::ZERO, Vec3::ONE],
            vec![yellow()],
            SmallRng::seed_from_u64(0),
        );
        assert_eq!(
            result.err(),
            Some(FieldError::LengthMismatch { expected: 2, actual: 1 })
        );
    }

    #[test]
    fn advance_pushes_particle_away_from_hit() {
        let mut field = single(Vec3::ZERO);
        let mut params = still_params();
        params.set_mouse_radius(2.0).set_mouse_force(0.05);

        let stats = field.advance(Some(vec3(0.1, 0.0, 0.0)), &params);

        let p = field.positions()[0];
        assert!((p.x + 0.05).abs() < 1e-6);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.z, 0.0);
        assert_eq!(stats.repelled, 1);
    }

    #[test]
    fn advance_recycles_particle_below_floor() {
        let mut field = single(vec3(0.0, -3.81, 0.0));
        let mut params = SimulationParams::default();
        params
            .set_floor(Some(Floor { y: -3.8, recycle: true }))
            .set_ceiling_y(3.8)
            .set_spawn_span_x(10.0);

        let stats = field.advance(None, &params);

        let p = field.positions()[0];
        assert_eq!(p.y, 3.8);
        assert!(p.x >= -5.0 && p.x <= 5.0);
        assert_eq!(stats.recycled, 1);
    }

    #[test]
    fn particle_crossing_the_floor_is_recycled_in_the_same_step() {
        let mut field = single(vec3(0.0, -3.795, 0.0));
        let mut params = SimulationParams::default();
        params.set_floor(Some(Floor { y: -3.8, recycle: true }));

        field.advance(None, &params);
        assert_eq!(field.positions()[0].y, params.ceiling_y());
    }

    #[test]
    fn resting_floor_keeps_particles_in_place() {
        let mut field = single(vec3(1.0, -3.9, 0.0));
        let mut params = SimulationParams::default();
        params.set_floor(Some(Floor { y: -3.8, recycle: false }));

        for _ in 0..10 {
            field.advance(None, &params);
        }
        assert_eq!(field.positions()[0], vec3(1.0, -3.9, 0.0));
    }

    #[test]
    fn step_uses_the_picked_hit_point() {
        let mut field = ParticleField::from_parts(
            vec![vec3(0.5, 0.0, 0.0), vec3(0.0, 4.0, 0.0)],
            vec![yellow(); 2],
            SmallRng::seed_from_u64(0),
        )
        .unwrap();
        let params = still_params();
        let ray = PickRay::new(vec3(0.0, 0.0, 5.0), vec3(0.0, 0.0, -1.0)).unwrap();

        let stats = field.step(Some(&ray), &params);

        let hit = stats.hit.unwrap();
        assert_eq!(hit.index, 0);
        assert_eq!(hit.point, Vec3::ZERO);
        assert_eq!(stats.repelled, 1);
        assert!((field.positions()[0].x - 0.55).abs() < 1e-6);
        assert_eq!(field.positions()[1], vec3(0.0, 4.0, 0.0));
    }

    #[test]
    fn set_color_leaves_positions_alone() {
        let mut field = ParticleField::with_seed(3, SpawnVolume::default(), yellow(), 9).unwrap();
        let before = field.positions().to_vec();
        field.take_colors_dirty();

        field.set_color(rgb(1.0, 0.0, 0.0));

        assert!(field.colors().iter().all(|&c| c == rgb(1.0, 0.0, 0.0)));
        assert_eq!(field.positions(), &before[..]);
        assert!(field.take_colors_dirty());
        assert!(!field.take_colors_dirty());
    }

    #[test]
    fn flat_buffers_require_exact_length() {
        let mut field = ParticleField::with_seed(4, SpawnVolume::default(), yellow(), 1).unwrap();

        let mut short = vec![0.0; 11];
        assert_eq!(
            field.write_positions(&mut short),
            Err(FieldError::LengthMismatch { expected: 12, actual: 11 })
        );
        assert!(field.load_positions(&[0.0; 13]).is_err());

        let mut exact = vec![0.0; 12];
        field.write_colors(&mut exact).unwrap();
        assert_eq!(&exact[..3], &[1.0, 1.0, 0.0]);
    }

    #[test]
    fn load_then_write_positions() {
        let mut field = ParticleField::with_seed(2, SpawnVolume::default(), yellow(), 1).unwrap();
        let flat = [1.0, 2.0, 3.0, -1.0, -2.0, -3.0];

        field.load_positions(&flat).unwrap();
        assert_eq!(field.positions()[1], vec3(-1.0, -2.0, -3.0));

        let mut out = [0.0; 6];
        field.write_positions(&mut out).unwrap();
        assert_eq!(out, flat);
    }
}
