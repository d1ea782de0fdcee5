//! Cubic B-spline interpolation.
//!
//! The volume is first converted to B-spline coefficients with the recursive
//! prefilter of Unser et al. (mirror boundary conditions), so the resulting
//! interpolant passes exactly through the original samples. Evaluation then
//! combines a 4x4x4 neighbourhood of coefficients with the cubic basis
//! weights.

use ndarray::{Array3, Axis, Zip};
use tracing::debug;

use super::Interpolator;

/// Pole of the cubic B-spline prefilter, `sqrt(3) - 2`.
const POLE: f64 = -0.267_949_192_431_122_7;
/// Truncation tolerance for the causal initialisation sum.
const TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone)]
pub struct BSplineInterpolator {
    coefficients: Array3<f64>,
}

impl BSplineInterpolator {
    pub fn new(data: &Array3<f64>) -> Self {
        debug!("Computing B-spline coefficients for {:?} volume", data.dim());
        let mut coefficients = data.clone();
        for axis in 0..3 {
            Zip::from(coefficients.lanes_mut(Axis(axis))).par_for_each(|mut lane| {
                let mut buffer = lane.to_vec();
                prefilter_line(&mut buffer);
                for (dst, src) in lane.iter_mut().zip(buffer) {
                    *dst = src;
                }
            });
        }
        Self { coefficients }
    }
}

/// In-place conversion of samples to cubic B-spline coefficients.
fn prefilter_line(c: &mut [f64]) {
    let n = c.len();
    if n < 2 {
        return;
    }
    let z = POLE;
    let lambda = (1.0 - z) * (1.0 - 1.0 / z);
    for v in c.iter_mut() {
        *v *= lambda;
    }

    c[0] = initial_causal_coefficient(c, z);
    for i in 1..n {
        c[i] += z * c[i - 1];
    }

    c[n - 1] = (z / (z * z - 1.0)) * (z * c[n - 2] + c[n - 1]);
    for i in (0..n - 1).rev() {
        c[i] = z * (c[i + 1] - c[i]);
    }
}

fn initial_causal_coefficient(c: &[f64], z: f64) -> f64 {
    let n = c.len();
    let horizon = (TOLERANCE.ln() / z.abs().ln()).ceil() as usize;

    if horizon < n {
        let mut zn = z;
        let mut sum = c[0];
        for &v in &c[1..horizon] {
            sum += zn * v;
            zn *= z;
        }
        sum
    } else {
        let iz = 1.0 / z;
        let mut zn = z;
        let mut z2n = z.powi(n as i32 - 1);
        let mut sum = c[0] + z2n * c[n - 1];
        z2n *= z2n * iz;
        for &v in &c[1..n - 1] {
            sum += (zn + z2n) * v;
            zn *= z;
            z2n *= iz;
        }
        sum / (1.0 - zn * zn)
    }
}

/// First support index and the four cubic basis weights at `x`.
#[inline]
fn support(x: f64) -> (isize, [f64; 4]) {
    let start = x.floor() as isize - 1;
    let w = x - (start + 1) as f64;
    let w3 = w * w * w / 6.0;
    let w0 = 1.0 / 6.0 + 0.5 * w * (w - 1.0) - w3;
    let w2 = w + w0 - 2.0 * w3;
    let w1 = 1.0 - w0 - w2 - w3;
    (start, [w0, w1, w2, w3])
}

/// Fold an index back into `[0, len)` by mirroring about the end samples.
#[inline]
fn mirror(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * len as isize - 2;
    let mut i = index.rem_euclid(period);
    if i >= len as isize {
        i = period - i;
    }
    i as usize
}

impl Interpolator for BSplineInterpolator {
    fn evaluate(&self, index: [f64; 3]) -> f64 {
        let (nx, ny, nz) = self.coefficients.dim();
        let (sx, wx) = support(index[0]);
        let (sy, wy) = support(index[1]);
        let (sz, wz) = support(index[2]);

        let ix = [0, 1, 2, 3].map(|k| mirror(sx + k, nx));
        let iy = [0, 1, 2, 3].map(|k| mirror(sy + k, ny));
        let iz = [0, 1, 2, 3].map(|k| mirror(sz + k, nz));

        let mut value = 0.0;
        for c in 0..4 {
            let mut plane = 0.0;
            for b in 0..4 {
                let mut row = 0.0;
                for a in 0..4 {
                    row += wx[a] * self.coefficients[[ix[a], iy[b], iz[c]]];
                }
                plane += wy[b] * row;
            }
            value += wz[c] * plane;
        }
        value
    }
}
