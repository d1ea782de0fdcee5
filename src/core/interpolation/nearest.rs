use ndarray::ArrayView3;

use super::Interpolator;

/// Copies the value of the closest voxel. Never produces values that are not
/// already present in the source, which keeps label identities intact.
#[derive(Debug, Clone)]
pub struct NearestNeighborInterpolator<'a> {
    data: ArrayView3<'a, f64>,
}

impl<'a> NearestNeighborInterpolator<'a> {
    pub fn new(data: ArrayView3<'a, f64>) -> Self {
        Self { data }
    }
}

/// Round half up, then clamp into `[0, len)`.
#[inline]
fn nearest_index(x: f64, len: usize) -> usize {
    let i = (x + 0.5).floor();
    if i <= 0.0 {
        0
    } else {
        (i as usize).min(len.saturating_sub(1))
    }
}

impl Interpolator for NearestNeighborInterpolator<'_> {
    fn evaluate(&self, index: [f64; 3]) -> f64 {
        let (nx, ny, nz) = self.data.dim();
        let i = nearest_index(index[0], nx);
        let j = nearest_index(index[1], ny);
        let k = nearest_index(index[2], nz);
        self.data[[i, j, k]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn rounds_half_up() {
        assert_eq!(nearest_index(1.49, 10), 1);
        assert_eq!(nearest_index(1.5, 10), 2);
        assert_eq!(nearest_index(-0.5, 10), 0);
        assert_eq!(nearest_index(9.49, 10), 9);
    }

    #[test]
    fn picks_closest_voxel() {
        let data = Array3::from_shape_fn((3, 3, 3), |(x, y, z)| (x + 10 * y + 100 * z) as f64);
        let interp = NearestNeighborInterpolator::new(data.view());
        assert_eq!(interp.evaluate([0.4, 1.6, 2.0]), 0.0 + 20.0 + 200.0);
        assert_eq!(interp.evaluate([1.5, 0.0, -0.2]), 2.0);
    }

    #[test]
    fn only_returns_source_values() {
        let data = Array3::from_shape_fn((4, 4, 2), |(x, y, _)| if x + y > 3 { 7.0 } else { 2.0 });
        let interp = NearestNeighborInterpolator::new(data.view());
        for step in 0..30 {
            let t = step as f64 * 0.1 - 0.4;
            let v = interp.evaluate([t, 3.0 - t, 0.7]);
            assert!(v == 7.0 || v == 2.0, "unexpected value {v}");
        }
    }
}
