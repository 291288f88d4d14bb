//! One-bit delta modulation
//!
//! The encoder tracks its input with a staircase that moves one fixed step
//! per sample; only the step direction is transmitted. The decoder replays
//! the same staircase from the bits alone.

pub mod decoder;
pub mod encoder;

pub use decoder::Decoder;
pub use encoder::Encoder;
