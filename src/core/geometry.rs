//! Physical-space geometry of a voxel grid.
//!
//! A voxel index `i` maps to the physical point
//! `origin + direction * (spacing ∘ i)`, where the columns of `direction`
//! are the unit direction cosines of the image axes.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Physical coordinate of voxel (0, 0, 0).
    pub origin: [f64; 3],
    /// Distance between adjacent voxel centres along each axis.
    pub spacing: [f64; 3],
    /// Row-major direction cosine matrix; column `k` is the direction of axis `k`.
    pub direction: [[f64; 3]; 3],
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            origin: [0.0; 3],
            spacing: [1.0; 3],
            direction: IDENTITY,
        }
    }
}

const IDENTITY: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

impl Geometry {
    pub fn new(origin: [f64; 3], spacing: [f64; 3], direction: [[f64; 3]; 3]) -> Self {
        Self {
            origin,
            spacing,
            direction,
        }
    }

    /// Axis-aligned geometry at the origin.
    pub fn with_spacing(spacing: [f64; 3]) -> Self {
        Self {
            spacing,
            ..Self::default()
        }
    }

    /// Split a 3x4 affine (rows of `[m | t]`) into origin, spacing and direction.
    ///
    /// Spacing is the norm of each column of `m`. A zero column falls back to
    /// the corresponding unit axis.
    pub fn from_affine(affine: [[f64; 4]; 3]) -> Self {
        let origin = [affine[0][3], affine[1][3], affine[2][3]];
        let mut spacing = [0.0; 3];
        let mut direction = IDENTITY;

        for col in 0..3 {
            let column = Vector3::new(affine[0][col], affine[1][col], affine[2][col]);
            let norm = column.norm();
            spacing[col] = norm;
            if norm > 1e-9 {
                for row in 0..3 {
                    direction[row][col] = column[row] / norm;
                }
            }
        }

        Self {
            origin,
            spacing,
            direction,
        }
    }

    /// Inverse of [`Geometry::from_affine`].
    pub fn to_affine(&self) -> [[f64; 4]; 3] {
        let m = self.index_to_physical_matrix();
        let mut affine = [[0.0; 4]; 3];
        for row in 0..3 {
            for col in 0..3 {
                affine[row][col] = m[(row, col)];
            }
            affine[row][3] = self.origin[row];
        }
        affine
    }

    pub fn direction_matrix(&self) -> Matrix3<f64> {
        Matrix3::from_fn(|r, c| self.direction[r][c])
    }

    /// `direction * diag(spacing)`
    pub fn index_to_physical_matrix(&self) -> Matrix3<f64> {
        let scale = Matrix3::from_diagonal(&Vector3::from(self.spacing));
        self.direction_matrix() * scale
    }

    pub fn physical_to_index_matrix(&self) -> Result<Matrix3<f64>> {
        self.index_to_physical_matrix()
            .try_inverse()
            .ok_or(Error::DegenerateGeometry)
    }

    /// Affine map from indices of `output` to continuous indices of `self`.
    ///
    /// Fails when `self` cannot be inverted; `output` may be degenerate.
    pub fn index_mapping_from(&self, output: &Geometry) -> Result<IndexMapping> {
        let inv = self.physical_to_index_matrix()?;
        let linear = inv * output.index_to_physical_matrix();
        let offset = inv * (Vector3::from(output.origin) - Vector3::from(self.origin));
        Ok(IndexMapping { linear, offset })
    }
}

/// Precomputed `c = linear * o + offset` from an output grid index `o` to a
/// continuous input index `c`.
#[derive(Debug, Clone, Copy)]
pub struct IndexMapping {
    linear: Matrix3<f64>,
    offset: Vector3<f64>,
}

impl IndexMapping {
    #[inline]
    pub fn map(&self, index: [usize; 3]) -> [f64; 3] {
        let o = Vector3::new(index[0] as f64, index[1] as f64, index[2] as f64);
        let c = self.linear * o + self.offset;
        [c.x, c.y, c.z]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 3], b: [f64; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn affine_round_trip_keeps_direction_and_spacing() {
        // 90 degrees about z, anisotropic spacing
        let g = Geometry::new(
            [10.0, -5.0, 2.5],
            [0.7, 0.7, 1.0],
            [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
        );
        let back = Geometry::from_affine(g.to_affine());
        assert!(close(back.origin, g.origin));
        assert!(close(back.spacing, g.spacing));
        for r in 0..3 {
            assert!(close(back.direction[r], g.direction[r]));
        }
    }

    #[test]
    fn mapping_follows_rotated_output_grid() {
        // Output axes swapped relative to the input, shifted by one input voxel
        let input = Geometry::new(
            [1.0, 2.0, 3.0],
            [2.0, 0.5, 1.5],
            [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        );
        let output = Geometry::new(
            [3.0, 2.0, 3.0],
            [1.0, 1.0, 1.5],
            [[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
        );
        let mapping = input.index_mapping_from(&output).unwrap();
        assert!(close(mapping.map([0, 0, 0]), [1.0, 0.0, 0.0]));
        // output x runs along physical y, output y along physical x
        assert!(close(mapping.map([2, 4, 1]), [3.0, 4.0, 1.0]));
    }

    #[test]
    fn zero_spacing_is_degenerate() {
        let g = Geometry::with_spacing([1.0, 0.0, 1.0]);
        assert!(matches!(
            g.physical_to_index_matrix(),
            Err(Error::DegenerateGeometry)
        ));
    }

    #[test]
    fn mapping_between_grids_with_shared_origin() {
        let input = Geometry::with_spacing([0.7, 0.7, 1.0]);
        let output = Geometry { spacing: [1.4, 1.4, 1.0], ..input };
        let mapping = input.index_mapping_from(&output).unwrap();
        assert!(close(mapping.map([0, 0, 0]), [0.0, 0.0, 0.0]));
        assert!(close(mapping.map([3, 5, 7]), [6.0, 10.0, 7.0]));
    }
}
