//! error taxonomy for the delta modulation core

use std::fmt;

/// everything that can go wrong in the numeric core
///
/// All variants are deterministic consequences of bad parameters or bad
/// input; nothing here is transient.
#[derive(Debug, Clone, PartialEq)]
pub enum DmError {
    /// a parameter that must be finite and positive was not
    InvalidParameter { name: &'static str, value: f64 },
    /// smoothing cutoff at or above half the sample rate
    NyquistViolation { cutoff_hz: f64, sample_rate_hz: f64 },
    /// too few samples for the filter order
    InsufficientSamples { required: usize, actual: usize },
    /// a bitstream symbol other than 0 or 1
    InvalidSymbol { symbol: char, position: usize },
    /// a numeric bit value other than 0 or 1
    InvalidBitValue(u8),
}

impl fmt::Display for DmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DmError::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter {name} = {value}: must be finite and positive")
            }
            DmError::NyquistViolation {
                cutoff_hz,
                sample_rate_hz,
            } => write!(
                f,
                "Cutoff {cutoff_hz} Hz must be below Nyquist ({} Hz at {sample_rate_hz} Hz sample rate)",
                sample_rate_hz / 2.0
            ),
            DmError::InsufficientSamples { required, actual } => {
                write!(f, "Filter needs at least {required} samples, got {actual}")
            }
            DmError::InvalidSymbol { symbol, position } => {
                write!(f, "Invalid bitstream symbol '{symbol}' at pos {position}")
            }
            DmError::InvalidBitValue(v) => write!(f, "Invalid bit value {v}: expected 0 or 1"),
        }
    }
}

impl std::error::Error for DmError {}

/// result type for delta modulation stuff
pub type DmResult<T> = Result<T, DmError>;
