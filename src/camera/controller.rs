//! Terrain-following avatar and chase camera
//!
//! The avatar walks over the terrain in the x/z plane and always stands
//! `eye_offset` above the ground beneath it. The camera trails behind and
//! above the avatar; how far depends on the tilt, so looking further down
//! pulls the view back and up.
//!
//! All angles are stored in degrees. Yaw is unbounded and wraps through the
//! trig functions; tilt is only bounded when `TiltLimits` are configured.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::input::{Command, CommandOutcome, StepDirection};
use super::terrain::TerrainHeight;
use crate::consts::*;
use crate::heading;

/// Tilt at or above this uses the fixed close-up zoom
pub const ZOOM_TILT_THRESHOLD: f32 = -1.0;
/// Zoom factor near level tilt
pub const CLOSE_ZOOM: f32 = 2.5;
/// Minimum camera height above the avatar
pub const BASE_EYE_LIFT: f32 = 3.25;

/// Inclusive tilt range in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiltLimits {
    pub min: f32,
    pub max: f32,
}

impl TiltLimits {
    #[inline]
    pub fn clamp(&self, tilt: f32) -> f32 {
        tilt.clamp(self.min, self.max)
    }
}

/// Tunables for how input moves the avatar and camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial_tilt: f32,
    /// Distance covered by one Forward/Backward command
    pub step_length: f32,
    /// Degrees of yaw per unit of horizontal pointer motion
    pub yaw_sensitivity: f32,
    /// Degrees of tilt per unit of vertical pointer motion
    pub tilt_sensitivity: f32,
    /// Degrees per tilt/yaw key press
    pub key_turn_step: f32,
    /// Unclamped when `None`, which lets the camera flip over
    pub tilt_limits: Option<TiltLimits>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_tilt: INITIAL_TILT,
            step_length: STEP_LENGTH,
            yaw_sensitivity: YAW_SENSITIVITY,
            tilt_sensitivity: TILT_SENSITIVITY,
            key_turn_step: KEY_TURN_STEP,
            tilt_limits: None,
        }
    }
}

/// Everything a host needs to place its virtual camera and avatar model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub eye: Vec3,
    pub avatar: Vec3,
    pub tilt: f32,
    pub yaw: f32,
    /// Model rotation about the vertical axis, degrees
    pub avatar_facing: f32,
}

/// Avatar position and camera orientation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    /// Horizontal position as (x, z)
    pub avatar: Vec2,
    /// Ground height under the avatar plus `eye_offset`
    avatar_height: f32,
    eye_offset: f32,
    pub yaw: f32,
    tilt: f32,
    tilt_limits: Option<TiltLimits>,
    /// Last absolute pointer position seen, if any
    pointer_prev: Option<Vec2>,
}

/// Camera pull-back factor for a tilt in degrees
///
/// `tilt < -1` zooms out as `15 - 12.5/|tilt|`; anything from -1 upward
/// (including exactly -1) uses the fixed close-up factor.
#[inline]
pub fn zoom_factor(tilt: f32) -> f32 {
    if tilt < ZOOM_TILT_THRESHOLD {
        15.0 - 12.5 / tilt.abs()
    } else {
        CLOSE_ZOOM
    }
}

impl CameraState {
    /// Stand the avatar at `origin` with default orientation
    pub fn init(terrain: &impl TerrainHeight, origin: Vec2, eye_offset: f32) -> Self {
        Self::with_config(terrain, origin, eye_offset, &CameraConfig::default())
    }

    pub fn with_config(
        terrain: &impl TerrainHeight,
        origin: Vec2,
        eye_offset: f32,
        config: &CameraConfig,
    ) -> Self {
        let mut state = Self {
            avatar: origin,
            avatar_height: 0.0,
            eye_offset,
            yaw: 0.0,
            tilt: 0.0,
            tilt_limits: config.tilt_limits,
            pointer_prev: None,
        };
        state.set_tilt(config.initial_tilt);
        state.resample(terrain);
        log::info!(
            "Camera at ({}, {}) height {} tilt {}",
            origin.x,
            origin.y,
            state.avatar_height,
            state.tilt
        );
        state
    }

    #[inline]
    pub fn avatar_height(&self) -> f32 {
        self.avatar_height
    }

    #[inline]
    pub fn eye_offset(&self) -> f32 {
        self.eye_offset
    }

    #[inline]
    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    pub fn tilt_limits(&self) -> Option<TiltLimits> {
        self.tilt_limits
    }

    /// Change the tilt bounds; the current tilt is clamped into them
    pub fn set_tilt_limits(&mut self, limits: Option<TiltLimits>) {
        self.tilt_limits = limits;
        self.set_tilt(self.tilt);
    }

    /// Set the tilt, honoring any configured limits
    pub fn set_tilt(&mut self, tilt: f32) {
        self.tilt = match self.tilt_limits {
            Some(limits) => limits.clamp(tilt),
            None => tilt,
        };
    }

    /// Re-read the ground height under the avatar
    pub fn resample(&mut self, terrain: &impl TerrainHeight) {
        self.avatar_height = terrain.height_at(self.avatar.x, self.avatar.y) + self.eye_offset;
    }

    /// Unit walking direction for the current yaw, as (x, z)
    pub fn facing(&self) -> Vec2 {
        let h = heading(self.yaw);
        Vec2::new(-h.x, h.y)
    }

    /// Move `distance` along the facing direction and follow the ground
    pub fn walk(&mut self, terrain: &impl TerrainHeight, direction: StepDirection, distance: f32) {
        self.avatar += self.facing() * (direction.sign() * distance);
        self.resample(terrain);
    }

    /// Take one unit step forward or backward
    pub fn apply_step_command(&mut self, terrain: &impl TerrainHeight, direction: StepDirection) {
        self.walk(terrain, direction, 1.0);
    }

    /// Turn by a relative pointer motion
    pub fn apply_pointer_delta(
        &mut self,
        dx: f32,
        dy: f32,
        yaw_sensitivity: f32,
        tilt_sensitivity: f32,
    ) {
        self.yaw -= dx * yaw_sensitivity;
        self.set_tilt(self.tilt + dy * tilt_sensitivity);
    }

    /// Turn by the motion since the previous absolute pointer sample
    ///
    /// The first sample only records the position.
    pub fn apply_pointer_position(&mut self, pos: Vec2, config: &CameraConfig) {
        if let Some(prev) = self.pointer_prev {
            let delta = pos - prev;
            self.apply_pointer_delta(
                delta.x,
                delta.y,
                config.yaw_sensitivity,
                config.tilt_sensitivity,
            );
        }
        self.pointer_prev = Some(pos);
    }

    /// Apply a discrete command; I/O and shutdown are left to the host
    pub fn apply_command(
        &mut self,
        terrain: &impl TerrainHeight,
        command: Command,
        config: &CameraConfig,
    ) -> CommandOutcome {
        log::debug!("Command {:?}", command);
        match command {
            Command::Forward => self.walk(terrain, StepDirection::Forward, config.step_length),
            Command::Backward => self.walk(terrain, StepDirection::Backward, config.step_length),
            Command::TiltUp => self.set_tilt(self.tilt + config.key_turn_step),
            Command::TiltDown => self.set_tilt(self.tilt - config.key_turn_step),
            Command::YawLeft => self.yaw -= config.key_turn_step,
            Command::YawRight => self.yaw += config.key_turn_step,
            Command::Screenshot => return CommandOutcome::Screenshot,
            Command::Quit => return CommandOutcome::Quit,
        }
        CommandOutcome::Continue
    }

    /// Camera position relative to the avatar
    pub fn compute_eye_offset(&self) -> Vec3 {
        let sf = zoom_factor(self.tilt);
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let lift = (1.25 * sf * self.tilt.to_radians().sin()).abs() + BASE_EYE_LIFT;
        Vec3::new(sf * sin_yaw, lift, -sf * cos_yaw)
    }

    /// Avatar position in 3D
    pub fn avatar_position(&self) -> Vec3 {
        Vec3::new(self.avatar.x, self.avatar_height, self.avatar.y)
    }

    pub fn view(&self) -> CameraView {
        let avatar = self.avatar_position();
        CameraView {
            eye: avatar + self.compute_eye_offset(),
            avatar,
            tilt: self.tilt,
            yaw: self.yaw,
            avatar_facing: -self.yaw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::terrain::HeightGrid;
    use proptest::prelude::*;

    fn hills(x: f32, z: f32) -> f32 {
        (x * 0.05).sin() * 10.0 + (z * 0.03).cos() * 4.0
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_init_samples_origin() {
        let state = CameraState::init(&hills, Vec2::ZERO, 2.0);
        assert_eq!(state.avatar_height(), hills(0.0, 0.0) + 2.0);
        assert_eq!(state.yaw, 0.0);
        assert_eq!(state.tilt(), INITIAL_TILT);
    }

    #[test]
    fn test_forward_follows_yaw() {
        let flat = |_: f32, _: f32| 0.0f32;
        let mut state = CameraState::init(&flat, Vec2::ZERO, 2.0);

        state.apply_step_command(&flat, StepDirection::Forward);
        assert!(approx(state.avatar.x, 0.0));
        assert!(approx(state.avatar.y, 1.0));

        state.yaw = 90.0;
        state.apply_step_command(&flat, StepDirection::Forward);
        assert!(approx(state.avatar.x, -1.0));
        assert!(approx(state.avatar.y, 1.0));

        state.apply_step_command(&flat, StepDirection::Backward);
        assert!(approx(state.avatar.x, 0.0));
        assert!(approx(state.avatar.y, 1.0));
    }

    #[test]
    fn test_height_follows_ground() {
        let grid = HeightGrid::from_fn(100.0, 100.0, 20.0, 10, |u, v| u + v).unwrap();
        let mut state = CameraState::init(&grid, Vec2::ZERO, 2.0);
        for _ in 0..30 {
            state.apply_step_command(&grid, StepDirection::Forward);
            let ground = grid.height_at(state.avatar.x, state.avatar.y);
            assert_eq!(state.avatar_height(), ground + 2.0);
        }
        // Walked uphill along +z
        assert!(state.avatar_height() > 20.0 + 2.0 - 0.1 * 20.0);
    }

    #[test]
    fn test_pointer_delta() {
        let mut state = CameraState::init(&hills, Vec2::ZERO, 2.0);
        state.apply_pointer_delta(10.0, 20.0, 0.2, 0.1);
        assert!(approx(state.yaw, -2.0));
        assert!(approx(state.tilt(), -8.0));
    }

    #[test]
    fn test_pointer_position_primes_first() {
        let config = CameraConfig::default();
        let mut state = CameraState::init(&hills, Vec2::ZERO, 2.0);

        state.apply_pointer_position(Vec2::new(400.0, 300.0), &config);
        assert_eq!(state.yaw, 0.0);
        assert_eq!(state.tilt(), INITIAL_TILT);

        state.apply_pointer_position(Vec2::new(410.0, 290.0), &config);
        assert!(approx(state.yaw, -2.0));
        assert!(approx(state.tilt(), -11.0));
    }

    #[test]
    fn test_tilt_limits_clamp() {
        let config = CameraConfig {
            tilt_limits: Some(TiltLimits {
                min: -60.0,
                max: -2.0,
            }),
            ..Default::default()
        };
        let mut state = CameraState::with_config(&hills, Vec2::ZERO, 2.0, &config);

        state.apply_pointer_delta(0.0, 10_000.0, 0.2, 0.1);
        assert_eq!(state.tilt(), -2.0);
        state.apply_pointer_delta(0.0, -10_000.0, 0.2, 0.1);
        assert_eq!(state.tilt(), -60.0);
        state.apply_command(&hills, Command::TiltDown, &config);
        assert_eq!(state.tilt(), -60.0);
    }

    #[test]
    fn test_unclamped_tilt_can_invert() {
        let mut state = CameraState::init(&hills, Vec2::ZERO, 2.0);
        state.apply_pointer_delta(0.0, 3000.0, 0.2, 0.1);
        assert!(state.tilt() > 90.0);
    }

    #[test]
    fn test_commands() {
        let config = CameraConfig::default();
        let mut state = CameraState::init(&hills, Vec2::ZERO, 2.0);

        let outcome = state.apply_command(&hills, Command::TiltDown, &config);
        assert_eq!(outcome, CommandOutcome::Continue);
        assert_eq!(state.tilt(), -12.0);
        state.apply_command(&hills, Command::TiltUp, &config);
        state.apply_command(&hills, Command::TiltUp, &config);
        assert_eq!(state.tilt(), -8.0);

        state.apply_command(&hills, Command::YawLeft, &config);
        assert_eq!(state.yaw, -2.0);
        state.apply_command(&hills, Command::YawRight, &config);
        state.apply_command(&hills, Command::YawRight, &config);
        assert_eq!(state.yaw, 2.0);

        let before = state.clone();
        let outcome = state.apply_command(&hills, Command::Screenshot, &config);
        assert_eq!(outcome, CommandOutcome::Screenshot);
        let outcome = state.apply_command(&hills, Command::Quit, &config);
        assert_eq!(outcome, CommandOutcome::Quit);
        assert_eq!(state, before);
    }

    #[test]
    fn test_zoom_boundary() {
        assert_eq!(zoom_factor(-1.0), CLOSE_ZOOM);
        assert_eq!(zoom_factor(0.0), CLOSE_ZOOM);
        assert_eq!(zoom_factor(30.0), CLOSE_ZOOM);
        assert!(approx(zoom_factor(-10.0), 13.75));
        assert!(zoom_factor(-1.001) > CLOSE_ZOOM);
        assert!(approx(zoom_factor(-1.001), 15.0 - 12.5 / 1.001));
    }

    #[test]
    fn test_eye_offset_at_start() {
        let state = CameraState::init(&hills, Vec2::ZERO, 2.0);
        let offset = state.compute_eye_offset();
        let expected_lift = (1.25 * 13.75 * (-10.0f32).to_radians().sin()).abs() + 3.25;
        assert!(approx(offset.x, 0.0));
        assert!(approx(offset.y, expected_lift));
        assert!(approx(offset.z, -13.75));
    }

    #[test]
    fn test_eye_offset_at_boundary_tilt() {
        let mut state = CameraState::init(&hills, Vec2::ZERO, 2.0);
        state.set_tilt(-1.0);
        state.yaw = 90.0;
        let offset = state.compute_eye_offset();
        assert!(approx(offset.x, 2.5));
        assert!(approx(offset.z, 0.0));
        assert!(approx(offset.y, (1.25 * 2.5 * (-1.0f32).to_radians().sin()).abs() + 3.25));
    }

    #[test]
    fn test_view_places_eye_relative_to_avatar() {
        let mut state = CameraState::init(&hills, Vec2::new(5.0, -3.0), 2.0);
        state.yaw = 30.0;
        let view = state.view();
        assert_eq!(view.avatar, Vec3::new(5.0, hills(5.0, -3.0) + 2.0, -3.0));
        assert_eq!(view.eye, view.avatar + state.compute_eye_offset());
        assert_eq!(view.avatar_facing, -30.0);
    }

    fn command_strategy() -> impl Strategy<Value = Command> {
        prop_oneof![
            Just(Command::Forward),
            Just(Command::Backward),
            Just(Command::TiltUp),
            Just(Command::TiltDown),
            Just(Command::YawLeft),
            Just(Command::YawRight),
        ]
    }

    proptest! {
        #[test]
        fn prop_height_invariant_holds(
            commands in prop::collection::vec(command_strategy(), 1..64),
            pointer in prop::collection::vec((-50.0f32..50.0, -50.0f32..50.0), 0..16),
        ) {
            let config = CameraConfig::default();
            let mut state = CameraState::init(&hills, Vec2::ZERO, 2.0);

            for (dx, dy) in pointer {
                state.apply_pointer_delta(dx, dy, config.yaw_sensitivity, config.tilt_sensitivity);
            }
            for command in commands {
                state.apply_command(&hills, command, &config);
                let expected = hills(state.avatar.x, state.avatar.y) + state.eye_offset();
                prop_assert_eq!(state.avatar_height().to_bits(), expected.to_bits());
            }
        }

        #[test]
        fn prop_eye_never_below_base_lift(tilt in -180.0f32..180.0, yaw in -720.0f32..720.0) {
            let mut state = CameraState::init(&hills, Vec2::ZERO, 2.0);
            state.set_tilt(tilt);
            state.yaw = yaw;
            let offset = state.compute_eye_offset();
            prop_assert!(offset.y >= BASE_EYE_LIFT);
            let horizontal = Vec2::new(offset.x, offset.z).length();
            prop_assert!((horizontal - zoom_factor(tilt)).abs() < 1e-3);
        }
    }
}
