//! Bounce Walk - simulation cores for two small demo scenes
//!
//! Core modules:
//! - `sim`: Elastic collisions between circular sprites in a 2D overlay
//! - `camera`: Terrain-following walkabout camera driven by keys and pointer
//! - `settings`: Data-driven demo configuration
//! - `error`: Construction and configuration errors
//!
//! Neither core renders anything. A host loop owns the state, calls the
//! update functions once per frame and reads positions back for drawing.

pub mod camera;
pub mod error;
pub mod settings;
pub mod sim;

pub use error::{ConstructionError, SettingsError};
pub use settings::{CollisionSettings, Settings, WalkaboutSettings};

use glam::Vec2;

/// Demo configuration constants
pub mod consts {
    /// Upper bound on the body population
    pub const MAX_BODIES: usize = 256;

    /// Collision demo defaults
    pub const DEFAULT_BODY_COUNT: usize = 15;
    pub const MIN_BODY_RADIUS: f32 = 5.0;
    pub const MAX_BODY_RADIUS: f32 = 100.0;
    /// Velocity components are sampled from [-MAX_BODY_SPEED, MAX_BODY_SPEED]
    pub const MAX_BODY_SPEED: f32 = 10.0;
    /// Overlay size used when no display reports its own
    pub const DISPLAY_WIDTH: f32 = 800.0;
    pub const DISPLAY_HEIGHT: f32 = 600.0;

    /// Walkabout defaults (angles in degrees)
    pub const EYE_OFFSET: f32 = 2.0;
    pub const INITIAL_TILT: f32 = -10.0;
    pub const STEP_LENGTH: f32 = 1.0;
    pub const YAW_SENSITIVITY: f32 = 0.2;
    pub const TILT_SENSITIVITY: f32 = 0.1;
    /// Degrees turned per tilt/yaw key press
    pub const KEY_TURN_STEP: f32 = 2.0;

    /// Elevation map defaults
    pub const MAP_WIDTH: f32 = 1000.0;
    pub const MAP_DEPTH: f32 = 1000.0;
    pub const MAP_HEIGHT: f32 = 60.0;
    pub const MAP_DIVISIONS: usize = 128;
}

/// Unit direction for a heading in degrees, as `(sin, cos)`
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    let (s, c) = degrees.to_radians().sin_cos();
    Vec2::new(s, c)
}
