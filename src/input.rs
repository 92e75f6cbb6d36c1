/*
 * Input Module
 *
 * This module handles window events for the particle field.
 *
 * Features:
 * - Cursor tracking in normalized device coordinates for picking
 * - Clearing the cursor when it leaves the window
 * - Camera dolly with the mouse wheel
 * - Keeping the camera aspect in step with window resizes
 * - Forwarding raw events to egui
 */

use nannou::prelude::*;
use nannou::winit::event::{MouseScrollDelta, TouchPhase};

use crate::app::Model;
use crate::camera::Camera;

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    model.cursor_ndc = Some(Camera::screen_to_ndc(pos, app.window_rect()));
}

// Nothing to pick once the cursor has left the window
pub fn mouse_exited(_app: &App, model: &mut Model) {
    model.cursor_ndc = None;
}

// Mouse wheel event handler for zooming
pub fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    // Ignore scrolling meant for the control panel
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    match delta {
        MouseScrollDelta::LineDelta(x, y) => {
            model.camera.zoom(vec2(x, y));
        }
        MouseScrollDelta::PixelDelta(pos) => {
            model.camera.zoom(vec2(pos.x as f32, pos.y as f32) * 0.01);
        }
    }
}

pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.camera.set_viewport(size);
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
