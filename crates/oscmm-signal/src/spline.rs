//! Natural cubic spline interpolation.
//!
//! Fits one cubic per interval with continuous first and second
//! derivatives and zero curvature at the end knots. The tridiagonal
//! system for the interior second derivatives is solved with the Thomas
//! algorithm in O(n).

use crate::error::{SignalError, SignalResult};

/// Interpolant over a set of `(x, y)` knots with strictly increasing x.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivative at each knot; zero at the boundaries.
    m: Vec<f64>,
}

impl CubicSpline {
    /// Build a natural spline through the knots.
    ///
    /// Requires at least two knots and strictly increasing, finite xs;
    /// anything else is `DegenerateSamples`.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> SignalResult<Self> {
        let n = xs.len();
        if n < 2 || ys.len() != n {
            return Err(SignalError::DegenerateSamples);
        }
        for w in xs.windows(2) {
            if !(w[1] > w[0]) {
                return Err(SignalError::DegenerateSamples);
            }
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(SignalError::DegenerateSamples);
        }

        let mut m = vec![0.0; n];
        if n > 2 {
            // Thomas algorithm on the interior knots.
            let mut diag = vec![0.0; n - 2];
            let mut rhs = vec![0.0; n - 2];
            let mut upper = vec![0.0; n - 2];

            for i in 1..n - 1 {
                let h0 = xs[i] - xs[i - 1];
                let h1 = xs[i + 1] - xs[i];
                diag[i - 1] = 2.0 * (h0 + h1);
                upper[i - 1] = h1;
                rhs[i - 1] =
                    6.0 * ((ys[i + 1] - ys[i]) / h1 - (ys[i] - ys[i - 1]) / h0);
            }

            for i in 1..n - 2 {
                let lower = xs[i + 1] - xs[i];
                let w = lower / diag[i - 1];
                diag[i] -= w * upper[i - 1];
                rhs[i] -= w * rhs[i - 1];
            }

            m[n - 2] = rhs[n - 3] / diag[n - 3];
            for i in (1..n - 2).rev() {
                m[i] = (rhs[i - 1] - upper[i - 1] * m[i + 1]) / diag[i - 1];
            }
        }

        Ok(Self { xs, ys, m })
    }

    /// Evaluate the spline at `x`.
    ///
    /// `x` must lie within the knot range; extrapolation is refused
    /// because the solver treats a threshold outside the sampled
    /// oscillator range as unanswerable.
    pub fn eval(&self, x: f64) -> SignalResult<f64> {
        let n = self.xs.len();
        let (lo, hi) = (self.xs[0], self.xs[n - 1]);
        if !x.is_finite() || x < lo || x > hi {
            return Err(SignalError::ThresholdOutOfRange(x, lo, hi));
        }

        // partition_point gives the first knot > x, so the interval
        // start is one before it.
        let i = self.xs.partition_point(|&k| k <= x).clamp(1, n - 1) - 1;

        let h = self.xs[i + 1] - self.xs[i];
        let a = (self.xs[i + 1] - x) / h;
        let b = (x - self.xs[i]) / h;
        let y = a * self.ys[i]
            + b * self.ys[i + 1]
            + ((a * a * a - a) * self.m[i] + (b * b * b - b) * self.m[i + 1]) * h * h / 6.0;
        Ok(y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_at_knots() {
        let xs = vec![0.0, 1.0, 2.5, 4.0];
        let ys = vec![1.0, -2.0, 0.5, 3.0];
        let s = CubicSpline::new(xs.clone(), ys.clone()).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert!((s.eval(*x).unwrap() - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_linear_data_reproduced() {
        let xs: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x - 7.0).collect();
        let s = CubicSpline::new(xs, ys).unwrap();
        for i in 0..90 {
            let x = i as f64 / 10.0;
            assert!((s.eval(x).unwrap() - (3.0 * x - 7.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_two_knots_is_line() {
        let s = CubicSpline::new(vec![0.0, 2.0], vec![10.0, 20.0]).unwrap();
        assert!((s.eval(1.0).unwrap() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_refused() {
        let s = CubicSpline::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0]).unwrap();
        assert!(matches!(
            s.eval(-0.1),
            Err(SignalError::ThresholdOutOfRange(..))
        ));
        assert!(matches!(
            s.eval(2.1),
            Err(SignalError::ThresholdOutOfRange(..))
        ));
    }

    #[test]
    fn test_rejects_duplicate_knots() {
        assert!(matches!(
            CubicSpline::new(vec![0.0, 1.0, 1.0], vec![0.0, 1.0, 2.0]),
            Err(SignalError::DegenerateSamples)
        ));
    }

    #[test]
    fn test_rejects_unsorted_knots() {
        assert!(matches!(
            CubicSpline::new(vec![0.0, 2.0, 1.0], vec![0.0, 1.0, 2.0]),
            Err(SignalError::DegenerateSamples)
        ));
    }

    #[test]
    fn test_rejects_single_knot() {
        assert!(CubicSpline::new(vec![1.0], vec![1.0]).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(CubicSpline::new(vec![0.0, f64::NAN], vec![0.0, 1.0]).is_err());
    }
}
