/*
 * UI Module
 *
 * This module builds the control panel with nannou_egui and draws the debug
 * overlay. Slider edits go through the SimulationParams setters, so the panel
 * can never hand the simulation a value outside its range.
 */

use std::ops::RangeInclusive;

use nannou::prelude::*;
use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{Floor, SimulationParams};
use crate::variant::{CEILING_Y, FLOOR_Y};

/// Which panel actions need the caller to touch the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiResponse {
    pub reset: bool,
    pub num_particles_changed: bool,
    pub color_changed: bool,
}

// Slider over a copy of the value; returns the new value only when it changed
fn slider(ui: &mut egui::Ui, value: f32, range: RangeInclusive<f32>, text: &str) -> Option<f32> {
    let mut value = value;
    let changed = ui.add(egui::Slider::new(&mut value, range).text(text)).changed();
    if changed {
        Some(value)
    } else {
        None
    }
}

// Update the UI and report which field-level changes were requested
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    num_particles: &mut usize,
    color: &mut Rgb<f32>,
    debug_info: &DebugInfo,
) -> UiResponse {
    let mut response = UiResponse::default();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Particles", |ui| {
                response.num_particles_changed = ui
                    .add(
                        egui::Slider::new(&mut *num_particles, SimulationParams::get_num_particles_range())
                            .logarithmic(true)
                            .text("Number of Particles"),
                    )
                    .changed();

                if ui.button("Reset Particles").clicked() {
                    response.reset = true;
                }

                if let Some(size) = slider(ui, params.point_size(), SimulationParams::get_point_size_range(), "Size") {
                    params.set_point_size(size);
                }

                ui.horizontal(|ui| {
                    ui.label("Color");
                    let mut channels = [color.red, color.green, color.blue];
                    if ui.color_edit_button_rgb(&mut channels).changed() {
                        *color = rgb(channels[0], channels[1], channels[2]);
                        response.color_changed = true;
                    }
                });
            });

            ui.collapsing("Forces", |ui| {
                if let Some(gravity) = slider(ui, params.gravity(), SimulationParams::get_gravity_range(), "Gravity") {
                    params.set_gravity(gravity);
                }
                if let Some(force) = slider(ui, params.mouse_force(), SimulationParams::get_force_range(), "Force") {
                    params.set_mouse_force(force);
                }
                if let Some(radius) = slider(ui, params.mouse_radius(), SimulationParams::get_radius_range(), "Mouse Radius") {
                    params.set_mouse_radius(radius);
                }
                if let Some(threshold) = slider(
                    ui,
                    params.pick_threshold(),
                    SimulationParams::get_pick_threshold_range(),
                    "Pick Threshold",
                ) {
                    params.set_pick_threshold(threshold);
                }
            });

            ui.collapsing("Floor", |ui| {
                let mut enabled = params.floor().is_some();
                if ui.checkbox(&mut enabled, "Enable Floor").changed() {
                    let floor = enabled.then(|| Floor { y: FLOOR_Y, recycle: true });
                    params.set_floor(floor);
                }

                if let Some(floor) = params.floor() {
                    let mut recycle = floor.recycle;
                    if ui.checkbox(&mut recycle, "Recycle to Ceiling").changed() {
                        params.set_floor(Some(Floor { recycle, ..floor }));
                    }
                    if let Some(y) = slider(ui, floor.y, SimulationParams::get_height_range(), "Floor Height") {
                        params.set_floor(Some(Floor { y, ..floor }));
                    }
                    if let Some(y) = slider(ui, params.ceiling_y(), SimulationParams::get_height_range(), "Ceiling Height") {
                        params.set_ceiling_y(y);
                    }
                    if let Some(span) = slider(ui, params.spawn_span_x(), SimulationParams::get_spawn_span_range(), "Spawn Span") {
                        params.set_spawn_span_x(span);
                    }
                    if ui.button("Default Heights").clicked() {
                        params.set_heights(Some(Floor { y: FLOOR_Y, ..floor }), CEILING_Y);
                    }
                }
            });

            ui.collapsing("Performance", |ui| {
                ui.checkbox(&mut params.enable_parallel, "Enable Parallel Processing");
                ui.separator();
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Total Particles: {}", debug_info.num_particles));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    response
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &Draw, debug_info: &DebugInfo, window_rect: Rect) {
    let lines = debug_info.lines();

    // Create a background panel in the bottom-left corner
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 260.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.bottom() + panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(rgba(0.0, 0.0, 0.0, 0.7));

    let text_y = window_rect.bottom() + panel_height - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(panel_x, y)
            .w(panel_width - margin)
            .left_justify()
            .color(WHITE)
            .font_size(14);
    }
}
