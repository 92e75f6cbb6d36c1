/*
 * Camera Module
 *
 * This module defines the perspective Camera looking at the particle field.
 * It converts between window points, normalized device coordinates and world
 * space: window points to pick rays for the cursor, and world positions back
 * to window points for drawing.
 */

use nannou::glam::Mat4;
use nannou::prelude::*;

use crate::picking::PickRay;

pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: vec3(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            fov_y: 75.0,
            aspect,
            near: 0.1,
            far: 1000.0,
            min_distance: 1.0,
            max_distance: 50.0,
        }
    }

    // Keep the projection in step with the window shape
    pub fn set_viewport(&mut self, size: Vec2) {
        if size.x > 0.0 && size.y > 0.0 {
            self.aspect = size.x / size.y;
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        let projection = Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far);
        let view = Mat4::look_at_rh(self.position, self.target, Vec3::Y);
        projection * view
    }

    // Convert a window point (nannou coordinates, origin at the centre, y up) to NDC
    pub fn screen_to_ndc(point: Vec2, window_rect: Rect) -> Vec2 {
        let centered = point - window_rect.xy();
        vec2(centered.x / (window_rect.w() / 2.0), centered.y / (window_rect.h() / 2.0))
    }

    /// Ray from the camera position through the given NDC position, so hit
    /// distances are measured from the eye.
    pub fn ndc_ray(&self, ndc: Vec2) -> Option<PickRay> {
        let inverse = self.view_projection().inverse();
        // Mid-range depth keeps the unprojection well conditioned
        let beyond = inverse.project_point3(vec3(ndc.x, ndc.y, 0.5));
        PickRay::new(self.position, beyond - self.position)
    }

    /// Project a world point into the window. Returns the window point and the
    /// view depth, or `None` when the point is outside the depth range.
    pub fn world_to_screen(&self, point: Vec3, window_rect: Rect) -> Option<(Vec2, f32)> {
        self.project(&self.view_projection(), point, window_rect)
    }

    // Same as world_to_screen with the matrix computed once per frame by the caller
    pub fn project(&self, view_projection: &Mat4, point: Vec3, window_rect: Rect) -> Option<(Vec2, f32)> {
        let clip = *view_projection * point.extend(1.0);
        if clip.w <= self.near {
            return None;
        }

        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }

        let screen = vec2(ndc.x * window_rect.w() / 2.0, ndc.y * window_rect.h() / 2.0);
        Some((screen + window_rect.xy(), clip.w))
    }

    // Window pixels covered by one world unit at the given view depth
    pub fn pixels_per_unit(&self, depth: f32, window_rect: Rect) -> f32 {
        let half_height = (self.fov_y.to_radians() / 2.0).tan() * depth;
        (window_rect.h() / 2.0) / half_height
    }

    // Handle mouse wheel events by moving along the view axis
    pub fn zoom(&mut self, scroll_delta: Vec2) {
        let offset = self.position - self.target;
        let distance = offset.length();
        if distance == 0.0 {
            return;
        }

        // Calculate zoom factor based on scroll amount
        let zoom_factor = 1.0 - scroll_delta.y * 0.1;
        let new_distance = (distance * zoom_factor).clamp(self.min_distance, self.max_distance);

        self.position = self.target + offset / distance * new_distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Rect {
        Rect::from_w_h(800.0, 600.0)
    }

    #[test]
    fn centre_ray_points_down_negative_z() {
        let camera = Camera::new(800.0 / 600.0);
        let ray = camera.ndc_ray(Vec2::ZERO).unwrap();

        assert!(ray.direction.distance(vec3(0.0, 0.0, -1.0)) < 1e-4);
        assert_eq!(ray.origin, camera.position);
    }

    #[test]
    fn hit_distance_is_measured_from_the_camera() {
        let camera = Camera::new(800.0 / 600.0);
        let ray = camera.ndc_ray(Vec2::ZERO).unwrap();

        let hit = crate::picking::pick_nearest(&ray, &[Vec3::ZERO], 1.0).unwrap();
        assert!((hit.distance - 5.0).abs() < 1e-3);
    }

    #[test]
    fn origin_projects_to_window_centre() {
        let camera = Camera::new(800.0 / 600.0);
        let (screen, depth) = camera.world_to_screen(Vec3::ZERO, window()).unwrap();

        assert!(screen.length() < 1e-3);
        assert!((depth - 5.0).abs() < 1e-3);
    }

    #[test]
    fn points_behind_camera_are_not_projected() {
        let camera = Camera::new(1.0);
        assert!(camera.world_to_screen(vec3(0.0, 0.0, 10.0), window()).is_none());
    }

    #[test]
    fn ray_through_projected_point_passes_near_it() {
        let camera = Camera::new(800.0 / 600.0);
        let point = vec3(1.5, -2.0, 0.0);
        let (screen, _) = camera.world_to_screen(point, window()).unwrap();

        let ndc = Camera::screen_to_ndc(screen, window());
        let ray = camera.ndc_ray(ndc).unwrap();
        assert!(ray.distance_sq_to_point(point) < 1e-3);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera::new(1.0);
        for _ in 0..100 {
            camera.zoom(vec2(0.0, 5.0));
        }
        assert!((camera.position.z - camera.min_distance).abs() < 1e-4);

        for _ in 0..100 {
            camera.zoom(vec2(0.0, -5.0));
        }
        assert!((camera.position.z - camera.max_distance).abs() < 1e-3);
    }
}
