use tracing::debug;

use crate::core::{Bit, DmResult, StepSize, INITIAL_REFERENCE};

/// delta modulation decoder
///
/// Sees nothing but the bits. The step size has to be the one the encoder
/// used; a different step is not detected and just rescales the output.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    step: StepSize,
}

impl Decoder {
    pub fn new(step_size: f64) -> DmResult<Self> {
        Ok(Decoder {
            step: StepSize::new(step_size)?,
        })
    }

    pub fn step_size(&self) -> f64 {
        self.step.get()
    }

    /// rebuild the staircase from bits, seed excluded
    pub fn decode(&self, bits: &[Bit]) -> Vec<f64> {
        let step = self.step.get();
        let reconstructed: Vec<f64> = bits
            .iter()
            .scan(INITIAL_REFERENCE, |current, &bit| {
                *current += bit.direction() * step;
                Some(*current)
            })
            .collect();

        debug!(bits = bits.len(), step, "delta decoded");
        reconstructed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_steps() {
        let dec = Decoder::new(0.5).unwrap();
        let out = dec.decode(&[Bit::Up, Bit::Up, Bit::Down, Bit::Down]);
        assert_eq!(out, vec![0.5, 1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_decode_empty() {
        let dec = Decoder::new(0.3).unwrap();
        assert!(dec.decode(&[]).is_empty());
    }

    #[test]
    fn test_mismatched_step_rescales() {
        let bits = [Bit::Up, Bit::Up, Bit::Down];
        let base = Decoder::new(0.25).unwrap().decode(&bits);
        let doubled = Decoder::new(0.5).unwrap().decode(&bits);
        for (a, b) in base.iter().zip(doubled.iter()) {
            assert_eq!(*b, a * 2.0);
        }
    }
}
