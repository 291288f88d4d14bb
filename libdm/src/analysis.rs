//! Quality and spectral diagnostics for delta modulation output

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

/// summary of how well a reconstruction tracks its source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// root mean square difference
    pub rms_error: f64,
    /// signal-to-noise ratio in dB
    pub snr_db: f64,
    /// share of spectral energy above the reference frequency
    pub high_band_fraction: f64,
}

impl QualityReport {
    /// compare `estimate` against `original`
    ///
    /// # Arguments
    /// * `original` - Source samples
    /// * `estimate` - Reconstructed samples, same sample rate
    /// * `sample_rate_hz` - Sample rate in Hz
    /// * `band_hz` - Frequency above which energy counts as high band
    pub fn measure(original: &[f64], estimate: &[f64], sample_rate_hz: f64, band_hz: f64) -> Self {
        QualityReport {
            rms_error: rms_error(original, estimate),
            snr_db: snr_db(original, estimate),
            high_band_fraction: band_energy_above(estimate, sample_rate_hz, band_hz),
        }
    }
}

/// one-sided magnitude spectrum, `len / 2 + 1` bins
///
/// Bin `k` sits at `k * sample_rate / len` Hz.
pub fn spectrum_magnitude(signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(signal.len());
    let mut buffer: Vec<Complex<f64>> = signal.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut buffer);

    buffer
        .iter()
        .take(signal.len() / 2 + 1)
        .map(|c| c.norm())
        .collect()
}

/// fraction of spectral energy strictly above `freq_hz`, in [0, 1]
///
/// Returns 0 for an empty or all-zero signal.
pub fn band_energy_above(signal: &[f64], sample_rate_hz: f64, freq_hz: f64) -> f64 {
    let spectrum = spectrum_magnitude(signal);
    if spectrum.is_empty() {
        return 0.0;
    }

    let bin_hz = sample_rate_hz / signal.len() as f64;
    let mut total = 0.0;
    let mut above = 0.0;
    for (k, mag) in spectrum.iter().enumerate() {
        let energy = mag * mag;
        total += energy;
        if k as f64 * bin_hz > freq_hz {
            above += energy;
        }
    }

    if total > 0.0 {
        above / total
    } else {
        0.0
    }
}

/// rms of the difference over the common prefix
pub fn rms_error(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    (sum / n as f64).sqrt()
}

/// signal-to-noise ratio of `estimate` against `reference`, in dB
///
/// Infinite when the two match exactly.
pub fn snr_db(reference: &[f64], estimate: &[f64]) -> f64 {
    let signal: f64 = reference.iter().map(|x| x * x).sum();
    let noise: f64 = reference
        .iter()
        .zip(estimate)
        .map(|(x, y)| (x - y) * (x - y))
        .sum();

    if noise == 0.0 {
        f64::INFINITY
    } else {
        10.0 * (signal / noise).log10()
    }
}
