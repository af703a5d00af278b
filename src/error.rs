//! Error types
//!
//! Invalid setup fails fast at construction; nothing is clamped into range.

use thiserror::Error;

/// Invalid configuration detected while building bodies, sets or terrain
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    #[error("body radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("radius range [{min}, {max}] must be positive and ordered")]
    InvalidRadiusRange { min: f32, max: f32 },

    #[error("position bounds {width} x {height} are empty or too large to sample")]
    EmptyBounds { width: f32, height: f32 },

    #[error("velocity range [{min}, {max}] must be finite and ordered")]
    InvalidVelocityRange { min: f32, max: f32 },

    #[error("requested {requested} bodies, at most {max} are allowed")]
    TooManyBodies { requested: usize, max: usize },

    #[error("tilt limits [{min}, {max}] must be finite and ordered")]
    InvalidTiltLimits { min: f32, max: f32 },

    #[error("invalid terrain: {0}")]
    InvalidTerrain(String),
}

/// Failure while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(#[from] ConstructionError),
}
