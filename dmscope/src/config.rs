//! Demo configuration
//!
//! Loaded from JSON; any field left out falls back to the classic demo
//! setup (5 Hz tone, 100 Hz sampling, step 0.3, 10 Hz smoothing).

use anyhow::{ensure, Context, Result};
use libdm::{Pipeline, DEFAULT_CUTOFF_HZ, DEFAULT_FILTER_ORDER};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Sample rate in Hz
    pub sample_rate_hz: f64,
    /// Length of the synthesized tone in seconds
    pub duration_secs: f64,
    /// Tone frequency in Hz
    pub tone_hz: f64,
    /// Tone peak amplitude
    pub amplitude: f64,
    /// Delta modulation step
    pub step_size: f64,
    /// Smoothing cutoff in Hz
    pub cutoff_hz: f64,
    /// Butterworth order
    pub order: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 100.0,
            duration_secs: 1.0,
            tone_hz: 5.0,
            amplitude: 1.0,
            step_size: 0.3,
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            order: DEFAULT_FILTER_ORDER,
        }
    }
}

impl DemoConfig {
    /// Parse a JSON config file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Invalid config JSON")
    }

    /// Pipeline settings described by this config
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.step_size, self.sample_rate_hz)
            .with_cutoff(self.cutoff_hz)
            .with_order(self.order)
    }

    /// Check the tone parameters; pipeline parameters are checked by libdm
    pub fn validate_tone(&self) -> Result<()> {
        ensure!(
            self.sample_rate_hz.is_finite() && self.sample_rate_hz > 0.0,
            "sample_rate_hz must be positive, got {}",
            self.sample_rate_hz
        );
        ensure!(
            self.duration_secs.is_finite() && self.duration_secs >= 0.0,
            "duration_secs must be non-negative, got {}",
            self.duration_secs
        );
        ensure!(self.tone_hz.is_finite(), "tone_hz must be finite");
        ensure!(self.amplitude.is_finite(), "amplitude must be finite");
        Ok(())
    }
}
