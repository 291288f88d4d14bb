//! Encoder → decoder → smoothing filter, end to end

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Bit, DmResult, DEFAULT_CUTOFF_HZ, DEFAULT_FILTER_ORDER};
use crate::filter::SmoothingFilter;
use crate::modulation::{Decoder, Encoder};

/// every sequence the three stages produce, one entry per input sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub bits: Vec<Bit>,
    /// encoder staircase
    pub reference: Vec<f64>,
    /// decoder staircase, rebuilt from `bits` alone
    pub reconstructed: Vec<f64>,
    /// zero-phase low-pass of `reconstructed`
    pub filtered: Vec<f64>,
}

impl PipelineOutput {
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

/// delta modulation pipeline settings
///
/// Build with [`Pipeline::new`] and the `with_*` methods; nothing is
/// validated until [`Pipeline::run`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub step_size: f64,
    pub sample_rate_hz: f64,
    pub cutoff_hz: f64,
    pub order: usize,
}

impl Pipeline {
    pub fn new(step_size: f64, sample_rate_hz: f64) -> Self {
        Pipeline {
            step_size,
            sample_rate_hz,
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            order: DEFAULT_FILTER_ORDER,
        }
    }

    pub fn with_cutoff(mut self, cutoff_hz: f64) -> Self {
        self.cutoff_hz = cutoff_hz;
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// run all three stages over `samples`
    ///
    /// Every parameter is checked before the first stage starts, so a bad
    /// configuration never yields partial output. Empty input is accepted:
    /// encoder and decoder give empty sequences and the filter is skipped.
    pub fn run(&self, samples: &[f64]) -> DmResult<PipelineOutput> {
        let encoder = Encoder::new(self.step_size)?;
        let decoder = Decoder::new(self.step_size)?;
        let filter = SmoothingFilter::new(self.cutoff_hz, self.sample_rate_hz, self.order)?;

        if samples.is_empty() {
            return Ok(PipelineOutput::default());
        }

        let modulated = encoder.encode(samples);
        let reconstructed = decoder.decode(&modulated.bits);
        let filtered = filter.apply(&reconstructed)?;

        debug!(samples = samples.len(), "pipeline complete");
        Ok(PipelineOutput {
            bits: modulated.bits,
            reference: modulated.reference,
            reconstructed,
            filtered,
        })
    }
}
