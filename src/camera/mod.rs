//! Walkabout camera over a heightmap
//!
//! - `terrain`: the injected ground-height oracle and a sampled elevation map
//! - `input`: discrete commands and key bindings
//! - `controller`: avatar/camera state and its update rules

pub mod controller;
pub mod input;
pub mod terrain;

pub use controller::{CameraConfig, CameraState, CameraView, TiltLimits, zoom_factor};
pub use input::{Command, CommandOutcome, KeyMap, StepDirection, keys};
pub use terrain::{HeightGrid, TerrainHeight};
