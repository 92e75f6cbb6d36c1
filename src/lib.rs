/*
 * Particle Field - Module Definitions
 *
 * This file defines the module structure for the particle field application.
 * The simulation core (field, physics, picking, params) has no window
 * dependencies beyond nannou's math types; the rest is the interactive shell.
 */

// Re-export key components for easier access
pub use camera::Camera;
pub use config::LaunchConfig;
pub use debug::DebugInfo;
pub use error::{ConfigError, FieldError};
pub use field::{ParticleField, SpawnVolume, StepStats};
pub use params::{Floor, SimulationParams};
pub use picking::{PickHit, PickRay};
pub use variant::{Variant, VariantSettings};
pub use app::Model;

// Define modules
pub mod app;
pub mod camera;
pub mod config;
pub mod debug;
pub mod error;
pub mod field;
pub mod input;
pub mod params;
pub mod physics;
pub mod picking;
pub mod renderer;
pub mod ui;
pub mod variant;
