/*
 * Renderer Module
 *
 * This module draws the particle field. Every particle is projected once per
 * frame from the field's position buffer; the optional smoke halo and the
 * primary points are two passes over that same projection, so neither layer
 * keeps positions of its own.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::ui;

// Opacity of the smoke halo pass
const SMOKE_ALPHA: f32 = 0.08;
// Halo diameter relative to the point size
const SMOKE_SCALE: f32 = 4.0;

struct ProjectedPoint {
    screen: Vec2,
    size: f32,
    color: Rgb<f32>,
}

fn project_field(model: &Model, window_rect: Rect) -> Vec<ProjectedPoint> {
    let view_projection = model.camera.view_projection();
    let point_size = model.params.point_size();

    model
        .field
        .positions()
        .iter()
        .zip(model.field.colors())
        .filter_map(|(&position, &color)| {
            let (screen, depth) = model.camera.project(&view_projection, position, window_rect)?;
            let size = point_size * model.camera.pixels_per_unit(depth, window_rect);
            Some(ProjectedPoint { screen, size, color })
        })
        .collect()
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let points = project_field(model, window_rect);

    if model.smoke {
        for point in &points {
            let c = point.color;
            draw.ellipse()
                .xy(point.screen)
                .w_h(point.size * SMOKE_SCALE, point.size * SMOKE_SCALE)
                .color(rgba(c.red, c.green, c.blue, SMOKE_ALPHA));
        }
    }

    match &model.sprite {
        Some(texture) => {
            for point in &points {
                draw.texture(texture).xy(point.screen).w_h(point.size, point.size);
            }
        }
        None => {
            for point in &points {
                draw.rect()
                    .xy(point.screen)
                    .w_h(point.size, point.size)
                    .color(point.color);
            }
        }
    }

    if model.params.show_debug {
        // Mark the hit point and the repulsion radius around it
        if let Some(hit) = model.debug_info.last_step.hit {
            if let Some((screen, depth)) = model.camera.world_to_screen(hit.point, window_rect) {
                let radius = model.params.mouse_radius() * model.camera.pixels_per_unit(depth, window_rect);
                draw.ellipse()
                    .xy(screen)
                    .radius(radius)
                    .no_fill()
                    .stroke_weight(1.0)
                    .stroke(rgba(1.0, 0.0, 0.0, 0.5));
                draw.ellipse().xy(screen).radius(3.0).color(RED);
            }
        }

        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        log::error!("failed to draw frame: {:?}", err);
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::error!("failed to draw control panel: {:?}", err);
    }
}
