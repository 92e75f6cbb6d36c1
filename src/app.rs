/*
 * Application Module
 *
 * This module defines the main application model for the particle field.
 * It builds the window, the control panel and the field once at startup, then
 * runs one simulation step per frame from nannou's update callback. Panel
 * edits are applied in the same callback, just before the step, so every step
 * sees the latest parameter values.
 */

use nannou::prelude::*;
use nannou::wgpu;
use nannou_egui::Egui;
use std::path::PathBuf;

use crate::camera::Camera;
use crate::config::LaunchConfig;
use crate::debug::DebugInfo;
use crate::error::FieldError;
use crate::field::{ParticleField, SpawnVolume};
use crate::input::{mouse_exited, mouse_moved, mouse_wheel, raw_window_event, resized};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::ui;

const DEFAULT_SPRITE: &str = "assets/disc.png";

// Main model for the application
pub struct Model {
    pub field: ParticleField,
    pub params: SimulationParams,
    pub color: Rgb<f32>,
    pub num_particles: usize,
    pub volume: SpawnVolume,
    pub seed: Option<u64>,
    pub smoke: bool,
    pub sprite: Option<wgpu::Texture>,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub cursor_ndc: Option<Vec2>,
}

// Log a startup failure and leave; nannou's model callback cannot return errors
fn abort_startup(context: &str, err: impl std::fmt::Display) -> ! {
    log::error!("{}: {}", context, err);
    std::process::exit(1);
}

fn build_field(
    num_particles: usize,
    volume: SpawnVolume,
    color: Rgb<f32>,
    seed: Option<u64>,
) -> Result<ParticleField, FieldError> {
    match seed {
        Some(seed) => ParticleField::with_seed(num_particles, volume, color, seed),
        None => ParticleField::new(num_particles, volume, color),
    }
}

fn load_sprite(app: &App, config: &LaunchConfig) -> Option<wgpu::Texture> {
    // Explicit path first, then the app's assets folder
    let path = match &config.sprite {
        Some(path) => path.clone(),
        None => app
            .assets_path()
            .map(|assets| assets.join("disc.png"))
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SPRITE)),
    };

    match wgpu::Texture::from_path(app, &path) {
        Ok(texture) => {
            log::info!("loaded sprite {}", path.display());
            Some(texture)
        }
        Err(err) => {
            log::warn!("could not load sprite {}: {}; drawing plain points", path.display(), err);
            None
        }
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = match LaunchConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}; falling back to the classic variant", err);
            LaunchConfig::default()
        }
    };
    let settings = config.settings();
    log::info!(
        "running the {} variant with {} particles",
        config.variant,
        settings.num_particles
    );

    let window_id = match app
        .new_window()
        .title(format!("Particle Field ({})", config.variant))
        .size(1280, 800)
        .view(view)
        .mouse_moved(mouse_moved)
        .mouse_exited(mouse_exited)
        .mouse_wheel(mouse_wheel)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
    {
        Ok(id) => id,
        Err(err) => abort_startup("failed to build window", err),
    };

    let window = match app.window(window_id) {
        Some(window) => window,
        None => abort_startup("window vanished after creation", format!("{:?}", window_id)),
    };

    // Create the UI once; it is never rebuilt per frame
    let egui = Egui::from_window(&window);

    let (width, height) = window.inner_size_points();
    let camera = Camera::new(width / height);

    let sprite = if settings.wants_sprite {
        load_sprite(app, &config)
    } else {
        None
    };

    let field = match build_field(settings.num_particles, settings.volume, settings.color, config.seed) {
        Ok(field) => field,
        Err(err) => abort_startup("failed to build particle field", err),
    };

    Model {
        field,
        params: settings.params,
        color: settings.color,
        num_particles: settings.num_particles,
        volume: settings.volume,
        seed: config.seed,
        smoke: settings.smoke,
        sprite,
        egui,
        debug_info: DebugInfo {
            num_particles: settings.num_particles,
            ..Default::default()
        },
        camera,
        cursor_ndc: None,
    }
}

// Replace the field after a count change or a reset request
pub fn rebuild_field(model: &mut Model) {
    match build_field(model.num_particles, model.volume, model.color, model.seed) {
        Ok(field) => {
            log::info!("rebuilt field with {} particles", field.len());
            model.debug_info.num_particles = field.len();
            model.field = field;
        }
        Err(err) => log::error!("keeping the current field: {}", err),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let response = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &mut model.num_particles,
        &mut model.color,
        &model.debug_info,
    );

    if response.color_changed {
        model.field.set_color(model.color);
    }

    if response.reset || response.num_particles_changed {
        rebuild_field(model);
    }

    if model.params.pause_simulation {
        return;
    }

    // No picking while the cursor is outside the window or over the panel
    let over_panel = model.egui.ctx().is_pointer_over_area();
    let ray = match model.cursor_ndc {
        Some(ndc) if !over_panel => model.camera.ndc_ray(ndc),
        _ => None,
    };

    let stats = model.field.step(ray.as_ref(), &model.params);
    model.debug_info.record_step(stats);
}
