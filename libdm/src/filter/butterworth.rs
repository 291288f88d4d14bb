//! Butterworth low-pass design
//!
//! Analog prototype poles on the left half of the unit circle, frequency
//! pre-warping, bilinear transform to the z-plane, then expansion of the
//! zeros and poles into transfer-function polynomials. The result matches
//! the classic `butter(order, wn)` design.

use std::f64::consts::PI;

use rustfft::num_complex::Complex64;
use tracing::trace;

use crate::core::{DmError, DmResult};

/// bilinear transform constant for a normalized sample rate of 2
const BILINEAR_FS2: f64 = 4.0;

/// transfer function `b(z) / a(z)` of a digital filter
///
/// Both vectors have `order + 1` entries and `a[0] == 1`. Very low normalized
/// cutoffs (below about 1e-3) leave the poles bunched near `z = 1`, where the
/// expanded polynomial loses digits and the DC gain drifts slightly off unity.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl FilterCoefficients {
    /// design a low-pass Butterworth filter
    ///
    /// `normalized_cutoff` is relative to Nyquist and must lie strictly in (0, 1).
    pub fn butterworth_lowpass(order: usize, normalized_cutoff: f64) -> DmResult<Self> {
        if order == 0 {
            return Err(DmError::InvalidParameter {
                name: "order",
                value: 0.0,
            });
        }
        if !normalized_cutoff.is_finite() || normalized_cutoff <= 0.0 {
            return Err(DmError::InvalidParameter {
                name: "normalized_cutoff",
                value: normalized_cutoff,
            });
        }
        if normalized_cutoff >= 1.0 {
            // normalized units: Nyquist is 1, so the sample rate is 2
            return Err(DmError::NyquistViolation {
                cutoff_hz: normalized_cutoff,
                sample_rate_hz: 2.0,
            });
        }

        let warped = BILINEAR_FS2 * (PI * normalized_cutoff / 2.0).tan();
        let analog = butterworth_poles(order, warped);

        let digital: Vec<Complex64> = analog
            .iter()
            .map(|&p| (BILINEAR_FS2 + p) / (BILINEAR_FS2 - p))
            .collect();

        // every analog zero is at infinity, so all digital zeros sit at z = -1
        let denominator = analog
            .iter()
            .fold(Complex64::new(1.0, 0.0), |acc, &p| acc * (BILINEAR_FS2 - p));
        let gain = warped.powi(order as i32) / denominator.re;

        let b: Vec<f64> = binomial_row(order).into_iter().map(|c| gain * c).collect();
        let a: Vec<f64> = expand_roots(&digital).into_iter().map(|c| c.re).collect();

        trace!(?b, ?a, order, normalized_cutoff, "butterworth coefficients");
        Ok(FilterCoefficients { b, a })
    }

    /// numerator
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// denominator, `a[0] == 1`
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    pub fn order(&self) -> usize {
        self.a.len() - 1
    }

    /// single-pass |H| at a frequency relative to Nyquist (0 = DC, 1 = Nyquist)
    pub fn magnitude_at(&self, normalized_freq: f64) -> f64 {
        let w = PI * normalized_freq;
        let z_inv = Complex64::from_polar(1.0, -w);
        let eval = |coeffs: &[f64]| {
            coeffs
                .iter()
                .rev()
                .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z_inv + c)
        };
        (eval(&self.b) / eval(&self.a)).norm()
    }

    /// steady-state state vector for a unit step input
    ///
    /// Scaling this by the first input sample starts the filter as if that
    /// sample had been present forever, which removes the start-up transient.
    pub fn steady_state(&self) -> Vec<f64> {
        let n = self.order();
        let (b, a) = (&self.b, &self.a);

        let numerator: f64 = (1..=n).map(|k| b[k] - a[k] * b[0]).sum();
        let z0 = numerator / a.iter().sum::<f64>();

        let mut zi = Vec::with_capacity(n);
        zi.push(z0);
        let mut a_sum = 1.0;
        let mut c_sum = 0.0;
        for k in 1..n {
            a_sum += a[k];
            c_sum += b[k] - a[k] * b[0];
            zi.push(a_sum * z0 - c_sum);
        }
        zi
    }

    /// direct form II transposed, starting from state `zi`
    pub fn lfilter(&self, input: &[f64], zi: &[f64]) -> Vec<f64> {
        let n = self.order();
        let (b, a) = (&self.b, &self.a);
        let mut z = zi.to_vec();

        input
            .iter()
            .map(|&x| {
                let y = b[0] * x + z[0];
                for i in 0..n - 1 {
                    z[i] = b[i + 1] * x + z[i + 1] - a[i + 1] * y;
                }
                z[n - 1] = b[n] * x - a[n] * y;
                y
            })
            .collect()
    }
}

/// analog Butterworth poles scaled to `wc`
fn butterworth_poles(order: usize, wc: f64) -> Vec<Complex64> {
    let n = order as i64;
    (0..n)
        .map(|i| {
            let m = (-n + 1 + 2 * i) as f64;
            let theta = PI * m / (2 * n) as f64;
            -Complex64::from_polar(1.0, theta) * wc
        })
        .collect()
}

/// coefficients of (1 + z^-1)^n
fn binomial_row(n: usize) -> Vec<f64> {
    let mut row = vec![1.0];
    for _ in 0..n {
        let mut next = vec![1.0; row.len() + 1];
        for i in 1..row.len() {
            next[i] = row[i - 1] + row[i];
        }
        row = next;
    }
    row
}

/// monic polynomial with the given roots, highest power first
fn expand_roots(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &r in roots {
        coeffs.push(Complex64::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= r * prev;
        }
    }
    coeffs
}
