//! dmscope - delta modulation demo driver
//!
//! Produces the input signal (a synthesized tone or an audio file), runs it
//! through the libdm encoder, decoder and smoothing filter, and exports every
//! stage as JSON or CSV so any plotting tool can draw the classic figures:
//! original, staircase, reconstruction and smoothed reconstruction.

pub mod audio;
pub mod config;

use anyhow::{Context, Result};
use libdm::analysis::QualityReport;
use libdm::{Bit, PipelineOutput};
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt::Write as _;
use tracing::info;

pub use config::DemoConfig;

/// Number of samples on the grid `0, 1/fs, 2/fs, ...` strictly below `duration_secs`
///
/// This is `ceil(duration / (1 / fs))`, so a partial trailing period still
/// gets a sample (`0.014 s` at 100 Hz is two samples, at 0 and 0.01).
pub fn sample_count(duration_secs: f64, sample_rate_hz: f64) -> usize {
    let period = 1.0 / sample_rate_hz;
    (duration_secs / period).ceil().max(0.0) as usize
}

/// `amplitude * sin(2π f t)` at `t = n / fs`
pub fn synthesize_tone(config: &DemoConfig) -> Result<Vec<f64>> {
    config.validate_tone()?;
    let len = sample_count(config.duration_secs, config.sample_rate_hz);
    Ok((0..len)
        .map(|n| {
            let t = n as f64 / config.sample_rate_hz;
            config.amplitude * (2.0 * PI * config.tone_hz * t).sin()
        })
        .collect())
}

/// Time axis in seconds for `len` samples
pub fn time_axis(len: usize, sample_rate_hz: f64) -> Vec<f64> {
    (0..len).map(|n| n as f64 / sample_rate_hz).collect()
}

/// Headline numbers for a demo run
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub samples: usize,
    pub step_size: f64,
    pub sample_rate_hz: f64,
    pub up_bits: usize,
    /// Decoder staircase against the original
    pub staircase: QualityReport,
    /// Smoothed output against the original
    pub filtered: QualityReport,
}

/// Everything needed to plot one run
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub generated_at: String,
    pub config: DemoConfig,
    pub summary: Summary,
    pub time: Vec<f64>,
    pub original: Vec<f64>,
    #[serde(flatten)]
    pub output: PipelineOutput,
}

impl DemoReport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }

    /// One row per sample: `time,original,reference,reconstructed,filtered,bit`
    pub fn to_csv(&self) -> String {
        let mut csv = String::from("time,original,reference,reconstructed,filtered,bit\n");
        for i in 0..self.original.len() {
            let _ = writeln!(
                csv,
                "{},{},{},{},{},{}",
                self.time[i],
                self.original[i],
                self.output.reference[i],
                self.output.reconstructed[i],
                self.output.filtered[i],
                u8::from(self.output.bits[i]),
            );
        }
        csv
    }
}

/// Run the pipeline over `samples` taken at `config.sample_rate_hz`
pub fn run_demo(config: &DemoConfig, samples: &[f64]) -> Result<DemoReport> {
    let output = config
        .pipeline()
        .run(samples)
        .context("Delta modulation pipeline failed")?;

    let rate = config.sample_rate_hz;
    let summary = Summary {
        samples: samples.len(),
        step_size: config.step_size,
        sample_rate_hz: rate,
        up_bits: output.bits.iter().filter(|&&b| b == Bit::Up).count(),
        staircase: QualityReport::measure(samples, &output.reconstructed, rate, config.cutoff_hz),
        filtered: QualityReport::measure(samples, &output.filtered, rate, config.cutoff_hz),
    };
    info!(
        samples = summary.samples,
        staircase_rms = summary.staircase.rms_error,
        filtered_rms = summary.filtered.rms_error,
        "demo run complete"
    );

    Ok(DemoReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        config: config.clone(),
        summary,
        time: time_axis(samples.len(), rate),
        original: samples.to_vec(),
        output,
    })
}

/// Smoothing settings for [`reconstruct_text`]
#[derive(Debug, Clone, Copy)]
pub struct SmoothingOptions {
    pub cutoff_hz: f64,
    pub sample_rate_hz: f64,
    pub order: usize,
}

/// Staircase (and optionally its smoothed version) rebuilt from a bitstream
#[derive(Debug, Clone, Serialize)]
pub struct Reconstruction {
    pub step_size: f64,
    pub reconstructed: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filtered: Option<Vec<f64>>,
}

impl Reconstruction {
    pub fn to_csv(&self) -> String {
        let mut csv = match self.filtered {
            Some(_) => String::from("index,reconstructed,filtered\n"),
            None => String::from("index,reconstructed\n"),
        };
        for (i, r) in self.reconstructed.iter().enumerate() {
            let _ = match &self.filtered {
                Some(f) => writeln!(csv, "{i},{r},{}", f[i]),
                None => writeln!(csv, "{i},{r}"),
            };
        }
        csv
    }
}

/// Decode a `0`/`1` text bitstream
pub fn reconstruct_text(
    text: &str,
    step_size: f64,
    smoothing: Option<SmoothingOptions>,
) -> Result<Reconstruction> {
    let bits = libdm::parse_bits(text).context("Failed to parse bitstream")?;
    let reconstructed = libdm::decode(&bits, step_size)?;
    let filtered = smoothing
        .map(|s| libdm::smooth(&reconstructed, s.cutoff_hz, s.sample_rate_hz, s.order))
        .transpose()
        .context("Failed to smooth reconstruction")?;

    Ok(Reconstruction {
        step_size,
        reconstructed,
        filtered,
    })
}
