//! Circular body record
//!
//! A body is plain data: no texture, no draw state. Mass is derived from the
//! radius so that a body's size alone decides how it trades momentum.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;

/// A moving disc in the overlay plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    radius: f32,
}

impl Body {
    /// Create a body, rejecting non-positive or non-finite radii
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Result<Self, ConstructionError> {
        // Mass is radius², so its square has to stay finite too
        if !(radius.is_finite() && radius > 0.0 && (radius * radius).is_finite()) {
            return Err(ConstructionError::InvalidRadius(radius));
        }
        Ok(Self { pos, vel, radius })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Mass proportional to disc area (radius²)
    #[inline]
    pub fn mass(&self) -> f32 {
        self.radius * self.radius
    }

    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        1.0 / self.mass()
    }

    #[inline]
    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass()
    }

    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass() * self.vel.length_squared()
    }

    /// True if the two discs interpenetrate (touching is not overlap)
    pub fn overlaps(&self, other: &Body) -> bool {
        let reach = self.radius + other.radius;
        self.pos.distance_squared(other.pos) < reach * reach
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_radius() {
        assert_eq!(
            Body::new(Vec2::ZERO, Vec2::ZERO, 0.0),
            Err(ConstructionError::InvalidRadius(0.0))
        );
        assert!(Body::new(Vec2::ZERO, Vec2::ZERO, -3.0).is_err());
        assert!(Body::new(Vec2::ZERO, Vec2::ZERO, f32::NAN).is_err());
        assert!(Body::new(Vec2::ZERO, Vec2::ZERO, f32::INFINITY).is_err());
        // Finite radius whose mass would overflow
        assert_eq!(
            Body::new(Vec2::ZERO, Vec2::ZERO, 2.0e19),
            Err(ConstructionError::InvalidRadius(2.0e19))
        );
    }

    #[test]
    fn test_mass_scales_with_area() {
        let small = Body::new(Vec2::ZERO, Vec2::ZERO, 5.0).unwrap();
        let large = Body::new(Vec2::ZERO, Vec2::ZERO, 10.0).unwrap();
        assert_eq!(small.mass(), 25.0);
        assert_eq!(large.mass(), 4.0 * small.mass());
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let a = Body::new(Vec2::ZERO, Vec2::ZERO, 10.0).unwrap();
        let b = Body::new(Vec2::new(20.0, 0.0), Vec2::ZERO, 10.0).unwrap();
        let c = Body::new(Vec2::new(19.9, 0.0), Vec2::ZERO, 10.0).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }
}
