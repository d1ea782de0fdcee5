//! Interpolators for sampling a volume at continuous indices.
//!
//! Both interpolators share the buffer convention of the resample filter: a
//! continuous index is inside the buffer when every coordinate lies in
//! `[-0.5, n - 0.5)`. Callers are expected to check [`is_inside_buffer`]
//! before calling [`Interpolator::evaluate`].
pub mod bspline;
pub mod nearest;

pub use bspline::BSplineInterpolator;
pub use nearest::NearestNeighborInterpolator;

use ndarray::Array3;

use crate::types::InterpolatorKind;

pub trait Interpolator: Sync {
    /// Sample the volume at a continuous `[x, y, z]` index inside the buffer.
    fn evaluate(&self, index: [f64; 3]) -> f64;
}

#[inline]
pub fn is_inside_buffer(size: [usize; 3], index: [f64; 3]) -> bool {
    (0..3).all(|k| index[k] >= -0.5 && index[k] < size[k] as f64 - 0.5)
}

/// Build the interpolator for `kind` over `data`.
pub fn build_interpolator<'a>(
    kind: InterpolatorKind,
    data: &'a Array3<f64>,
) -> Box<dyn Interpolator + 'a> {
    match kind {
        InterpolatorKind::NearestNeighbor => Box::new(NearestNeighborInterpolator::new(data.view())),
        InterpolatorKind::BSpline => Box::new(BSplineInterpolator::new(data)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_bounds_are_half_open_around_voxel_centres() {
        let size = [4, 4, 1];
        assert!(is_inside_buffer(size, [-0.5, 0.0, 0.0]));
        assert!(is_inside_buffer(size, [3.49, 3.0, 0.2]));
        assert!(!is_inside_buffer(size, [3.5, 0.0, 0.0]));
        assert!(!is_inside_buffer(size, [0.0, -0.51, 0.0]));
        assert!(!is_inside_buffer(size, [0.0, 0.0, 0.5]));
    }

    #[test]
    fn empty_axis_has_no_inside() {
        assert!(!is_inside_buffer([0, 3, 3], [0.0, 0.0, 0.0]));
    }
}
