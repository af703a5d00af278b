//! Body population and spawning
//!
//! The set is created once and never grows or shrinks during a run. Its
//! order is the pair iteration order used by the resolver.

use std::ops::RangeInclusive;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::consts::*;
use crate::error::ConstructionError;

/// Widest range the uniform sampler accepts without overflowing
fn sampleable_span(span: f32) -> bool {
    span.is_finite() && span <= f32::MAX / 2.0
}

/// Axis-aligned rectangle bodies spawn in and bounce inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// [0, width] x [0, height]
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    fn validate(&self) -> Result<(), ConstructionError> {
        let size = self.size();
        let usable = |span: f32| span > 0.0 && sampleable_span(span);
        if !(usable(size.x) && usable(size.y)) {
            return Err(ConstructionError::EmptyBounds {
                width: size.x,
                height: size.y,
            });
        }
        Ok(())
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::from_size(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

/// Everything needed to populate a set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub count: usize,
    pub radius_range: RangeInclusive<f32>,
    pub bounds: Bounds,
    /// Sampled independently for each velocity component
    pub velocity_range: RangeInclusive<f32>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_BODY_COUNT,
            radius_range: MIN_BODY_RADIUS..=MAX_BODY_RADIUS,
            bounds: Bounds::default(),
            velocity_range: -MAX_BODY_SPEED..=MAX_BODY_SPEED,
        }
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<(), ConstructionError> {
        if self.count > MAX_BODIES {
            return Err(ConstructionError::TooManyBodies {
                requested: self.count,
                max: MAX_BODIES,
            });
        }

        let (r_min, r_max) = (*self.radius_range.start(), *self.radius_range.end());
        let radius_ok = r_min.is_finite()
            && r_max.is_finite()
            && r_min > 0.0
            && r_min <= r_max
            && (r_max * r_max).is_finite();
        if !radius_ok {
            return Err(ConstructionError::InvalidRadiusRange {
                min: r_min,
                max: r_max,
            });
        }

        self.bounds.validate()?;

        let (v_min, v_max) = (*self.velocity_range.start(), *self.velocity_range.end());
        if !(v_min <= v_max && sampleable_span(v_max - v_min)) {
            return Err(ConstructionError::InvalidVelocityRange {
                min: v_min,
                max: v_max,
            });
        }

        Ok(())
    }
}

/// Build `count` bodies with uniformly sampled radius, position and velocity
pub fn create_random_bodies<R: Rng>(
    config: &SpawnConfig,
    rng: &mut R,
) -> Result<BodySet, ConstructionError> {
    config.validate()?;

    let bounds = config.bounds;
    let mut bodies = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let radius = rng.random_range(config.radius_range.clone());
        let pos = Vec2::new(
            rng.random_range(bounds.min.x..=bounds.max.x),
            rng.random_range(bounds.min.y..=bounds.max.y),
        );
        let vel = Vec2::new(
            rng.random_range(config.velocity_range.clone()),
            rng.random_range(config.velocity_range.clone()),
        );
        bodies.push(Body::new(pos, vel, radius)?);
    }

    Ok(BodySet { bodies, bounds })
}

/// Fixed-size population of bodies plus the rectangle they live in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySet {
    bodies: Vec<Body>,
    pub bounds: Bounds,
}

impl BodySet {
    /// Wrap an explicit list of bodies (order is preserved)
    pub fn new(bodies: Vec<Body>, bounds: Bounds) -> Result<Self, ConstructionError> {
        bounds.validate()?;
        if bodies.len() > MAX_BODIES {
            return Err(ConstructionError::TooManyBodies {
                requested: bodies.len(),
                max: MAX_BODIES,
            });
        }
        Ok(Self { bodies, bounds })
    }

    /// Spawn a reproducible population from a seed
    pub fn spawn(config: &SpawnConfig, seed: u64) -> Result<Self, ConstructionError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        let set = create_random_bodies(config, &mut rng)?;
        log::info!("Spawned {} bodies (seed {})", set.len(), seed);
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access to the bodies; the population itself cannot change
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn total_momentum(&self) -> Vec2 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    pub fn total_kinetic_energy(&self) -> f32 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}
