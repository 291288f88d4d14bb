use tracing::debug;

use super::butterworth::FilterCoefficients;
use crate::core::{DmError, DmResult};

/// low-pass smoothing applied forward then backward
///
/// Running the filter in both directions squares the magnitude response and
/// cancels the phase, so the output lines up with the input sample for
/// sample. The whole sequence has to be in memory.
#[derive(Debug, Clone)]
pub struct SmoothingFilter {
    coeffs: FilterCoefficients,
    zi: Vec<f64>,
    cutoff_hz: f64,
    sample_rate_hz: f64,
}

impl SmoothingFilter {
    /// validate parameters and design the coefficients once
    ///
    /// Parameter checks run before the Nyquist check, which runs before any
    /// coefficient is computed.
    pub fn new(cutoff_hz: f64, sample_rate_hz: f64, order: usize) -> DmResult<Self> {
        require_positive("cutoff_hz", cutoff_hz)?;
        require_positive("sample_rate_hz", sample_rate_hz)?;
        if order == 0 {
            return Err(DmError::InvalidParameter {
                name: "order",
                value: 0.0,
            });
        }

        let nyquist = sample_rate_hz / 2.0;
        if cutoff_hz >= nyquist {
            return Err(DmError::NyquistViolation {
                cutoff_hz,
                sample_rate_hz,
            });
        }

        let coeffs = FilterCoefficients::butterworth_lowpass(order, cutoff_hz / nyquist)?;
        let zi = coeffs.steady_state();
        Ok(SmoothingFilter {
            coeffs,
            zi,
            cutoff_hz,
            sample_rate_hz,
        })
    }

    pub fn coefficients(&self) -> &FilterCoefficients {
        &self.coeffs
    }

    pub fn order(&self) -> usize {
        self.coeffs.order()
    }

    pub fn cutoff_hz(&self) -> f64 {
        self.cutoff_hz
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    /// smallest input length `apply` accepts
    pub fn min_samples(&self) -> usize {
        self.order() + 1
    }

    /// filter `signal` with zero phase; output has the same length
    pub fn apply(&self, signal: &[f64]) -> DmResult<Vec<f64>> {
        if signal.len() < self.min_samples() {
            return Err(DmError::InsufficientSamples {
                required: self.min_samples(),
                actual: signal.len(),
            });
        }

        let padlen = (3 * (self.order() + 1)).min(signal.len() - 1);
        let extended = odd_extend(signal, padlen);

        let start: Vec<f64> = self.zi.iter().map(|z| z * extended[0]).collect();
        let mut forward = self.coeffs.lfilter(&extended, &start);
        forward.reverse();

        let start: Vec<f64> = self.zi.iter().map(|z| z * forward[0]).collect();
        let mut backward = self.coeffs.lfilter(&forward, &start);
        backward.reverse();

        debug!(
            samples = signal.len(),
            padlen,
            order = self.order(),
            cutoff_hz = self.cutoff_hz,
            "zero-phase smoothing"
        );
        Ok(backward[padlen..padlen + signal.len()].to_vec())
    }
}

fn require_positive(name: &'static str, value: f64) -> DmResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DmError::InvalidParameter { name, value })
    }
}

/// point-reflect `padlen` samples about each endpoint
///
/// Needs `padlen < signal.len()`.
fn odd_extend(signal: &[f64], padlen: usize) -> Vec<f64> {
    let n = signal.len();
    let first = signal[0];
    let last = signal[n - 1];

    let mut out = Vec::with_capacity(n + 2 * padlen);
    out.extend((1..=padlen).rev().map(|i| 2.0 * first - signal[i]));
    out.extend_from_slice(signal);
    out.extend((1..=padlen).map(|i| 2.0 * last - signal[n - 1 - i]));
    out
}
