//! Demo settings
//!
//! Loaded from a JSON file when the host provides one; every field falls back
//! to the stock demo value when missing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::{CameraConfig, HeightGrid, KeyMap};
use crate::consts::*;
use crate::error::{ConstructionError, SettingsError};
use crate::sim::{Bounds, SpawnConfig};

/// Collision demo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionSettings {
    pub body_count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Velocity components are drawn from [-max_speed, max_speed]
    pub max_speed: f32,
    /// Overlay size in pixels
    pub width: f32,
    pub height: f32,
    /// Seed for body placement
    pub seed: u64,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self {
            body_count: DEFAULT_BODY_COUNT,
            min_radius: MIN_BODY_RADIUS,
            max_radius: MAX_BODY_RADIUS,
            max_speed: MAX_BODY_SPEED,
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            seed: 0,
        }
    }
}

impl CollisionSettings {
    pub fn spawn_config(&self) -> SpawnConfig {
        SpawnConfig {
            count: self.body_count,
            radius_range: self.min_radius..=self.max_radius,
            bounds: Bounds::from_size(self.width, self.height),
            velocity_range: -self.max_speed..=self.max_speed,
        }
    }
}

/// Elevation map dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub divisions: usize,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            depth: MAP_DEPTH,
            height: MAP_HEIGHT,
            divisions: MAP_DIVISIONS,
        }
    }
}

impl TerrainSettings {
    /// Build a rolling-hills elevation map of the configured size
    pub fn rolling_hills(&self) -> Result<HeightGrid, ConstructionError> {
        use std::f32::consts::TAU;
        HeightGrid::from_fn(self.width, self.depth, self.height, self.divisions, |u, v| {
            let ridges = (u * TAU * 3.0).sin() * (v * TAU * 2.0).cos();
            let swell = ((u - 0.5).powi(2) + (v - 0.5).powi(2)).sqrt();
            (0.5 + 0.35 * ridges + 0.3 * swell).clamp(0.0, 1.0)
        })
    }
}

/// Walkabout demo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkaboutSettings {
    /// Height of the avatar's eye above the ground
    pub eye_offset: f32,
    pub camera: CameraConfig,
    pub keys: KeyMap,
    pub terrain: TerrainSettings,
}

impl Default for WalkaboutSettings {
    fn default() -> Self {
        Self {
            eye_offset: EYE_OFFSET,
            camera: CameraConfig::default(),
            keys: KeyMap::default(),
            terrain: TerrainSettings::default(),
        }
    }
}

/// All demo settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub collision: CollisionSettings,
    pub walkabout: WalkaboutSettings,
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check everything that would otherwise fail later at construction
    pub fn validate(&self) -> Result<(), ConstructionError> {
        self.collision.spawn_config().validate()?;

        let terrain = &self.walkabout.terrain;
        if terrain.divisions == 0 {
            return Err(ConstructionError::InvalidTerrain(
                "divisions must be at least 1".to_string(),
            ));
        }
        if !(terrain.width > 0.0 && terrain.depth > 0.0 && terrain.height.is_finite()) {
            return Err(ConstructionError::InvalidTerrain(format!(
                "map {} x {} x {} is not usable",
                terrain.width, terrain.depth, terrain.height
            )));
        }

        if let Some(limits) = self.walkabout.camera.tilt_limits {
            if !(limits.min.is_finite() && limits.max.is_finite() && limits.min <= limits.max) {
                return Err(ConstructionError::InvalidTiltLimits {
                    min: limits.min,
                    max: limits.max,
                });
            }
        }

        Ok(())
    }
}
