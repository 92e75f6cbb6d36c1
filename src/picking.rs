/*
 * Picking Module
 *
 * Rays cast from the camera through the cursor, and nearest-intersection
 * picking against the point cloud. A particle counts as intersected when the
 * ray passes within the pick threshold of it; the reported hit point is the
 * point on the ray closest to that particle.
 */

use nannou::prelude::*;

/// A ray in world space with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// The nearest particle along a pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Slot of the intersected particle.
    pub index: usize,
    /// Point on the ray closest to the particle.
    pub point: Vec3,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
}

impl PickRay {
    /// Build a ray, normalizing `direction`. Returns `None` for a zero or
    /// non-finite direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let length = direction.length();
        if !length.is_finite() || length == 0.0 || !origin.is_finite() {
            return None;
        }

        Some(Self {
            origin,
            direction: direction / length,
        })
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    // Closest point on the ray, clamped to the origin for points behind it
    pub fn closest_point_to_point(&self, point: Vec3) -> Vec3 {
        let t = (point - self.origin).dot(self.direction);
        if t < 0.0 {
            self.origin
        } else {
            self.at(t)
        }
    }

    pub fn distance_sq_to_point(&self, point: Vec3) -> f32 {
        self.closest_point_to_point(point).distance_squared(point)
    }
}

/// Find the particle nearest to the ray origin among those the ray passes
/// within `threshold` of. Equal distances resolve to the lower index.
pub fn pick_nearest(ray: &PickRay, positions: &[Vec3], threshold: f32) -> Option<PickHit> {
    let threshold_sq = threshold * threshold;
    let mut nearest: Option<PickHit> = None;

    for (index, &position) in positions.iter().enumerate() {
        if ray.distance_sq_to_point(position) >= threshold_sq {
            continue;
        }

        let point = ray.closest_point_to_point(position);
        let distance = ray.origin.distance(point);

        let closer = match nearest {
            Some(best) => distance < best.distance,
            None => true,
        };
        if closer {
            nearest = Some(PickHit { index, point, distance });
        }
    }

    nearest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forward_ray() -> PickRay {
        PickRay::new(vec3(0.0, 0.0, 5.0), vec3(0.0, 0.0, -1.0)).unwrap()
    }

    #[test]
    fn new_normalizes_direction() {
        let ray = PickRay::new(Vec3::ZERO, vec3(0.0, 0.0, -4.0)).unwrap();
        assert_eq!(ray.direction, vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn new_rejects_degenerate_direction() {
        assert!(PickRay::new(Vec3::ZERO, Vec3::ZERO).is_none());
        assert!(PickRay::new(Vec3::ZERO, vec3(f32::NAN, 0.0, 1.0)).is_none());
    }

    #[test]
    fn closest_point_is_clamped_behind_origin() {
        let ray = forward_ray();
        assert_eq!(ray.closest_point_to_point(vec3(0.0, 0.0, 10.0)), ray.origin);
        assert_eq!(ray.closest_point_to_point(vec3(0.5, 0.0, 0.0)), Vec3::ZERO);
    }

    #[test]
    fn picks_particle_nearest_the_camera() {
        let positions = [
            vec3(0.2, 0.0, -1.0),
            vec3(0.1, 0.0, 1.0),
            vec3(4.0, 0.0, 2.0),
        ];
        let hit = pick_nearest(&forward_ray(), &positions, 1.0).unwrap();

        assert_eq!(hit.index, 1);
        assert_eq!(hit.point, vec3(0.0, 0.0, 1.0));
        assert!((hit.distance - 4.0).abs() < 1e-6);
    }

    #[test]
    fn misses_when_nothing_is_within_threshold() {
        let positions = [vec3(2.0, 0.0, 0.0), vec3(0.0, -3.0, 0.0)];
        assert!(pick_nearest(&forward_ray(), &positions, 1.0).is_none());
        assert!(pick_nearest(&forward_ray(), &[], 1.0).is_none());
    }

    #[test]
    fn ties_resolve_to_lower_index() {
        let positions = [vec3(0.5, 0.0, 0.0), vec3(-0.5, 0.0, 0.0)];
        let hit = pick_nearest(&forward_ray(), &positions, 1.0).unwrap();
        assert_eq!(hit.index, 0);
    }
}
