/*
 * Error Module
 *
 * Error types for the particle field and for launch configuration.
 */

use thiserror::Error;

/// Precondition violations reported by [`crate::ParticleField`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// A field must hold at least one particle.
    #[error("a particle field needs at least one particle")]
    Empty,

    /// A flat buffer or attribute array did not match the field length.
    #[error("buffer length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A spawn volume extent was NaN or infinite.
    #[error("spawn volume {axis} span must be finite, got {span}")]
    InvalidVolume { axis: char, span: f32 },
}

/// Problems found while reading command line configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown variant `{0}` (expected one of: classic, rain, pile, snow, sprite)")]
    UnknownVariant(String),

    #[error("flag `{0}` needs a value")]
    MissingValue(String),

    #[error("invalid value `{value}` for `{flag}`")]
    InvalidValue { flag: String, value: String },

    #[error("unknown flag `{0}`")]
    UnknownFlag(String),
}
