/*
 * Variant Module
 *
 * Named presets for the family of particle demos. They share the same
 * simulation and differ only in color, particle count, floor behavior,
 * sprite overlay and whether the smoke halo layer is drawn.
 */

use std::fmt;
use std::str::FromStr;

use nannou::prelude::*;

use crate::error::ConfigError;
use crate::field::SpawnVolume;
use crate::params::{Floor, SimulationParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Yellow sheet of points falling forever.
    #[default]
    Classic,
    /// Points recycled to the top when they reach the floor.
    Rain,
    /// Points coming to rest on the floor.
    Pile,
    /// Slow white points with a smoke halo, recycled at the floor.
    Snow,
    /// The classic demo drawn with a sprite texture.
    Sprite,
}

/// Everything a variant decides about a run.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSettings {
    pub num_particles: usize,
    pub color: Rgb<f32>,
    pub volume: SpawnVolume,
    pub params: SimulationParams,
    pub smoke: bool,
    pub wants_sprite: bool,
}

pub const FLOOR_Y: f32 = -3.8;
pub const CEILING_Y: f32 = 3.8;

impl Variant {
    pub const ALL: [Variant; 5] = [
        Variant::Classic,
        Variant::Rain,
        Variant::Pile,
        Variant::Snow,
        Variant::Sprite,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Classic => "classic",
            Variant::Rain => "rain",
            Variant::Pile => "pile",
            Variant::Snow => "snow",
            Variant::Sprite => "sprite",
        }
    }

    pub fn settings(self) -> VariantSettings {
        let mut params = SimulationParams::default();
        let mut num_particles = 10_000;
        let mut volume = SpawnVolume::default();
        let mut smoke = false;

        let color = match self {
            Variant::Classic => rgb(1.0, 1.0, 0.0),
            Variant::Rain => {
                params.set_heights(Some(Floor { y: FLOOR_Y, recycle: true }), CEILING_Y);
                rgb(0.55, 0.75, 1.0)
            }
            Variant::Pile => {
                num_particles = 5_000;
                params.set_floor(Some(Floor { y: FLOOR_Y, recycle: false }));
                rgb(1.0, 0.6, 0.2)
            }
            Variant::Snow => {
                smoke = true;
                volume.span_z = 2.0;
                params
                    .set_gravity(-0.003)
                    .set_point_size(0.06)
                    .set_heights(Some(Floor { y: FLOOR_Y, recycle: true }), CEILING_Y);
                rgb(1.0, 1.0, 1.0)
            }
            Variant::Sprite => {
                params.set_point_size(0.2);
                rgb(1.0, 1.0, 1.0)
            }
        };

        VariantSettings {
            num_particles,
            color,
            volume,
            params,
            smoke,
            wants_sprite: self == Variant::Sprite,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .iter()
            .copied()
            .find(|variant| variant.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownVariant(s.to_string()))
    }
}
