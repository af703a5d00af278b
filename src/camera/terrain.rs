//! Terrain height sampling
//!
//! The camera never owns the ground; it only asks for the elevation under a
//! horizontal position. Any `Fn(f32, f32) -> f32` will do, and `HeightGrid`
//! provides a sampled elevation map for hosts without one.

use serde::{Deserialize, Serialize};

use crate::error::ConstructionError;

/// Ground elevation at a horizontal position `(x, z)`
pub trait TerrainHeight {
    fn height_at(&self, x: f32, z: f32) -> f32;
}

impl<F> TerrainHeight for F
where
    F: Fn(f32, f32) -> f32,
{
    #[inline]
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// Elevation map: a regular grid of normalized samples centered on the origin
///
/// Samples are stored row by row along z, each row running along x, and are
/// scaled by `height`. The map spans `[-width/2, width/2]` in x and
/// `[-depth/2, depth/2]` in z; positions outside clamp to the nearest edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightGrid {
    width: f32,
    depth: f32,
    height: f32,
    columns: usize,
    rows: usize,
    samples: Vec<f32>,
}

impl HeightGrid {
    pub fn new(
        width: f32,
        depth: f32,
        height: f32,
        columns: usize,
        samples: Vec<f32>,
    ) -> Result<Self, ConstructionError> {
        if !(width.is_finite() && depth.is_finite() && width > 0.0 && depth > 0.0) {
            return Err(ConstructionError::InvalidTerrain(format!(
                "extent {width} x {depth} must be positive"
            )));
        }
        if !height.is_finite() {
            return Err(ConstructionError::InvalidTerrain(format!(
                "height scale {height} is not finite"
            )));
        }
        if columns < 2 || samples.len() < 2 * columns || samples.len() % columns != 0 {
            return Err(ConstructionError::InvalidTerrain(format!(
                "{} samples do not form a grid of at least 2x2 with {columns} columns",
                samples.len()
            )));
        }
        if samples.iter().any(|s| !s.is_finite()) {
            return Err(ConstructionError::InvalidTerrain(
                "samples must be finite".to_string(),
            ));
        }

        let rows = samples.len() / columns;
        Ok(Self {
            width,
            depth,
            height,
            columns,
            rows,
            samples,
        })
    }

    /// Build a `divisions + 1` square grid by evaluating `f(u, v)` over [0, 1]²
    pub fn from_fn(
        width: f32,
        depth: f32,
        height: f32,
        divisions: usize,
        f: impl Fn(f32, f32) -> f32,
    ) -> Result<Self, ConstructionError> {
        let n = divisions + 1;
        let step = 1.0 / divisions.max(1) as f32;
        let samples = (0..n)
            .flat_map(|row| (0..n).map(move |col| (col as f32 * step, row as f32 * step)))
            .map(|(u, v)| f(u, v))
            .collect();
        Self::new(width, depth, height, n, samples)
    }

    /// Level ground at elevation zero
    pub fn flat(width: f32, depth: f32) -> Result<Self, ConstructionError> {
        Self::new(width, depth, 0.0, 2, vec![0.0; 4])
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    #[inline]
    fn sample(&self, col: usize, row: usize) -> f32 {
        self.samples[row * self.columns + col]
    }
}

impl TerrainHeight for HeightGrid {
    /// Bilinear interpolation between the four surrounding samples
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let max_col = (self.columns - 1) as f32;
        let max_row = (self.rows - 1) as f32;
        let gx = ((x / self.width + 0.5) * max_col).clamp(0.0, max_col);
        let gz = ((z / self.depth + 0.5) * max_row).clamp(0.0, max_row);

        let c0 = (gx.floor() as usize).min(self.columns - 2);
        let r0 = (gz.floor() as usize).min(self.rows - 2);
        let tx = gx - c0 as f32;
        let tz = gz - r0 as f32;

        let near = self.sample(c0, r0) * (1.0 - tx) + self.sample(c0 + 1, r0) * tx;
        let far = self.sample(c0, r0 + 1) * (1.0 - tx) + self.sample(c0 + 1, r0 + 1) * tx;
        (near * (1.0 - tz) + far * tz) * self.height
    }
}
