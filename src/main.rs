/*
 * Particle Field
 *
 * A cloud of point particles that scatter away from the cursor and fall under
 * gravity. Run with `--variant rain` (or classic, pile, snow, sprite) to pick
 * one of the presets; set RUST_LOG to change log verbosity.
 */

use particle_field::app::{model, update};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("starting particle field");

    nannou::app(model).update(update).run();
}
