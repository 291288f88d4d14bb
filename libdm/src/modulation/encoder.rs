use tracing::debug;

use crate::core::{Bit, DmResult, Modulated, StepSize, INITIAL_REFERENCE};

/// delta modulation encoder
///
/// Holds only the step size; every call to [`Encoder::encode`] starts a
/// fresh reference at zero, so one encoder can be reused across signals.
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    step: StepSize,
}

impl Encoder {
    /// fails with `InvalidParameter` unless `step_size` is finite and > 0
    pub fn new(step_size: f64) -> DmResult<Self> {
        Ok(Encoder {
            step: StepSize::new(step_size)?,
        })
    }

    pub fn step_size(&self) -> f64 {
        self.step.get()
    }

    /// encode samples to bits plus the reference staircase
    ///
    /// A sample strictly above the current reference emits `Up`; anything
    /// else, equality included, emits `Down`.
    pub fn encode(&self, samples: &[f64]) -> Modulated {
        let step = self.step.get();
        let mut reference = Vec::with_capacity(samples.len());

        let bits: Vec<Bit> = samples
            .iter()
            .scan(INITIAL_REFERENCE, |current, &sample| {
                let bit = Bit::from(sample > *current);
                *current += bit.direction() * step;
                reference.push(*current);
                Some(bit)
            })
            .collect();

        debug!(samples = samples.len(), step, "delta encoded");
        Modulated { bits, reference }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tie_goes_down() {
        // first sample equals the zero seed
        let enc = Encoder::new(1.0).unwrap();
        let out = enc.encode(&[0.0]);
        assert_eq!(out.bits, vec![Bit::Down]);
        assert_eq!(out.reference, vec![-1.0]);
    }

    #[test]
    fn test_tie_mid_stream() {
        // reference is 0.5 after the first up step, second sample matches it
        let enc = Encoder::new(0.5).unwrap();
        let out = enc.encode(&[1.0, 0.5]);
        assert_eq!(out.bits, vec![Bit::Up, Bit::Down]);
        assert_eq!(out.reference, vec![0.5, 0.0]);
    }

    #[test]
    fn test_rejects_bad_step() {
        assert!(Encoder::new(0.0).is_err());
        assert!(Encoder::new(-0.1).is_err());
        assert!(Encoder::new(f64::NAN).is_err());
        assert!(Encoder::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_encoder_is_reusable() {
        let enc = Encoder::new(0.25).unwrap();
        let samples = [0.3, 0.9, -0.2];
        assert_eq!(enc.encode(&samples), enc.encode(&samples));
    }
}
