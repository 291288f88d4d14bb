//! Smoothing filter for the decoded staircase
//!
//! A Butterworth low-pass (maximally flat passband, monotonic roll-off)
//! applied forward and backward so the smoothed signal has no group delay.

pub mod butterworth;
pub mod zero_phase;

pub use butterworth::FilterCoefficients;
pub use zero_phase::SmoothingFilter;
