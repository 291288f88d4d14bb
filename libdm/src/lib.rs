//! # libdm
//!
//! Delta modulation: a one-bit-per-sample code that follows a signal with
//! fixed up/down steps, the matching demodulator, and a zero-phase
//! Butterworth low-pass that smooths the demodulated staircase.
//!
//! ```text
//! samples ──encode──▶ bits ──decode──▶ staircase ──smooth──▶ filtered
//! ```
//!
//! ## Example
//!
//! ```rust
//! use libdm::{decode, encode, smooth, Bit};
//!
//! let modulated = encode(&[0.0, 1.0, 0.0, -1.0], 0.5).unwrap();
//! assert_eq!(modulated.bits, vec![Bit::Up, Bit::Up, Bit::Down, Bit::Down]);
//!
//! let staircase = decode(&modulated.bits, 0.5).unwrap();
//! assert_eq!(staircase, vec![0.5, 1.0, 0.5, 0.0]);
//!
//! let filtered = smooth(&staircase, 10.0, 100.0, 2).unwrap();
//! assert_eq!(filtered.len(), staircase.len());
//! ```

pub mod analysis;
pub mod core;
pub mod filter;
pub mod modulation;
pub mod pipeline;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::{
    format_bits, parse_bits, Bit, DmError, DmResult, Modulated, StepSize, DEFAULT_CUTOFF_HZ,
    DEFAULT_FILTER_ORDER, INITIAL_REFERENCE,
};
pub use filter::{FilterCoefficients, SmoothingFilter};
pub use modulation::{Decoder, Encoder};
pub use pipeline::{Pipeline, PipelineOutput};

/// crate version, read from Cargo.toml at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// delta modulate `samples` with a fixed `step_size`
///
/// # Returns
/// the bitstream plus the encoder's reference staircase, both the length of
/// `samples`. Fails only if `step_size` is not a finite positive number.
pub fn encode(samples: &[f64], step_size: f64) -> DmResult<Modulated> {
    Ok(Encoder::new(step_size)?.encode(samples))
}

/// demodulate `bits` with `step_size`
///
/// The step is not checked against the encoder's; a different value gives a
/// rescaled staircase rather than an error.
pub fn decode(bits: &[Bit], step_size: f64) -> DmResult<Vec<f64>> {
    Ok(Decoder::new(step_size)?.decode(bits))
}

/// zero-phase Butterworth low-pass of `signal`
///
/// # Arguments
/// * `signal` - At least `order + 1` samples
/// * `cutoff_hz` - Cutoff, strictly below `sample_rate_hz / 2`
/// * `sample_rate_hz` - Sample rate of `signal`
/// * `order` - Filter order, [`DEFAULT_FILTER_ORDER`] in the classic setup
pub fn smooth(
    signal: &[f64],
    cutoff_hz: f64,
    sample_rate_hz: f64,
    order: usize,
) -> DmResult<Vec<f64>> {
    SmoothingFilter::new(cutoff_hz, sample_rate_hz, order)?.apply(signal)
}
