use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dmscope::{audio, DemoConfig, DemoReport, SmoothingOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dmscope")]
#[command(version)]
#[command(about = "Delta modulation demo: encode, decode and smooth a signal", long_about = None)]
struct Cli {
    /// Log pipeline stages (repeat for trace output)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run encoder, decoder and smoothing filter; export every stage
    Run {
        #[command(flatten)]
        signal: SignalArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Encode only and write the bitstream as 0/1 text
    Encode {
        #[command(flatten)]
        signal: SignalArgs,
        /// Write bits and encoder reference as JSON instead
        #[arg(long)]
        json: bool,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Rebuild the staircase from a 0/1 bitstream file
    Decode {
        /// Bitstream file ('0'/'1', whitespace ignored)
        input: PathBuf,
        /// Step size used by the encoder
        #[arg(long)]
        step: f64,
        /// Sample rate in Hz, needed for smoothing
        #[arg(long, default_value = "100")]
        sample_rate: f64,
        /// Smoothing cutoff in Hz
        #[arg(long, default_value = "10")]
        cutoff: f64,
        /// Butterworth order
        #[arg(long, default_value = "4")]
        order: usize,
        /// Skip the smoothing filter
        #[arg(long)]
        no_smooth: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SignalArgs {
    /// JSON config file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Audio file to use instead of a synthesized tone (wav, flac, mp3, ogg, ...)
    ///
    /// The smoothing filter runs in transfer-function form, which loses
    /// precision when the cutoff is a tiny fraction of the sample rate: a
    /// 10 Hz cutoff on 44.1 kHz audio passes DC at about 0.9997 instead of 1.
    /// Resample the file down or raise --cutoff when that matters.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Sample rate in Hz for the synthesized tone
    #[arg(long)]
    sample_rate: Option<f64>,
    /// Tone length in seconds
    #[arg(long)]
    duration: Option<f64>,
    /// Tone frequency in Hz
    #[arg(long)]
    tone: Option<f64>,
    /// Tone peak amplitude
    #[arg(long)]
    amplitude: Option<f64>,
    /// Delta modulation step size
    #[arg(long)]
    step: Option<f64>,
    /// Smoothing cutoff in Hz
    #[arg(long)]
    cutoff: Option<f64>,
    /// Butterworth order
    #[arg(long)]
    order: Option<usize>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            signal,
            format,
            output,
        } => run(&signal, format, output.as_deref())?,
        Commands::Encode {
            signal,
            json,
            output,
        } => encode(&signal, json, output.as_deref())?,
        Commands::Decode {
            input,
            step,
            sample_rate,
            cutoff,
            order,
            no_smooth,
            format,
            output,
        } => {
            let smoothing = (!no_smooth).then_some(SmoothingOptions {
                cutoff_hz: cutoff,
                sample_rate_hz: sample_rate,
                order,
            });
            decode(&input, step, smoothing, format, output.as_deref())?
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve config + overrides and produce the input samples
fn load_signal(args: &SignalArgs) -> Result<(DemoConfig, Vec<f64>)> {
    let mut config = match &args.config {
        Some(path) => DemoConfig::from_json_file(path)?,
        None => DemoConfig::default(),
    };

    if let Some(v) = args.sample_rate {
        config.sample_rate_hz = v;
    }
    if let Some(v) = args.duration {
        config.duration_secs = v;
    }
    if let Some(v) = args.tone {
        config.tone_hz = v;
    }
    if let Some(v) = args.amplitude {
        config.amplitude = v;
    }
    if let Some(v) = args.step {
        config.step_size = v;
    }
    if let Some(v) = args.cutoff {
        config.cutoff_hz = v;
    }
    if let Some(v) = args.order {
        config.order = v;
    }

    let samples = match &args.input {
        Some(path) => {
            eprintln!("Reading {}...", path.display());
            let audio = audio::read_audio_file(path).context("Failed to read audio file")?;
            eprintln!("  Sample rate: {} Hz", audio.sample_rate);
            eprintln!("  Channels: {} (mixed to mono)", audio.source_channels);
            eprintln!("  Duration: {:.2}s", audio.duration_secs());
            config.sample_rate_hz = audio.sample_rate as f64;
            config.duration_secs = audio.duration_secs();
            audio.samples
        }
        None => dmscope::synthesize_tone(&config)?,
    };

    if samples.is_empty() {
        bail!("Input signal is empty");
    }
    Ok((config, samples))
}

fn run(args: &SignalArgs, format: Format, output: Option<&Path>) -> Result<()> {
    let (config, samples) = load_signal(args)?;
    let report = dmscope::run_demo(&config, &samples)?;

    let content = match format {
        Format::Json => report.to_json()?,
        Format::Csv => report.to_csv(),
    };
    write_output(output, &content)?;
    print_summary(&report);
    Ok(())
}

fn encode(args: &SignalArgs, json: bool, output: Option<&Path>) -> Result<()> {
    let (config, samples) = load_signal(args)?;
    let modulated = libdm::encode(&samples, config.step_size)?;

    let content = if json {
        serde_json::to_string_pretty(&modulated).context("Failed to serialize bitstream")?
    } else {
        let mut bits = libdm::format_bits(&modulated.bits);
        bits.push('\n');
        bits
    };
    write_output(output, &content)?;
    eprintln!(
        "Encoded {} samples at step {} ({} bits)",
        samples.len(),
        config.step_size,
        modulated.len()
    );
    Ok(())
}

fn decode(
    input: &Path,
    step: f64,
    smoothing: Option<SmoothingOptions>,
    format: Format,
    output: Option<&Path>,
) -> Result<()> {
    let text = fs::read_to_string(input).context("Failed to read bitstream file")?;
    let rebuilt = dmscope::reconstruct_text(&text, step, smoothing)?;

    let content = match format {
        Format::Json => {
            serde_json::to_string_pretty(&rebuilt).context("Failed to serialize output")?
        }
        Format::Csv => rebuilt.to_csv(),
    };
    write_output(output, &content)?;
    eprintln!("Decoded {} bits", rebuilt.reconstructed.len());
    Ok(())
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).context("Failed to write output file")?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn print_summary(report: &DemoReport) {
    let s = &report.summary;
    eprintln!();
    eprintln!("Summary:");
    eprintln!("  Samples: {} at {} Hz", s.samples, s.sample_rate_hz);
    eprintln!("  Step size: {}", s.step_size);
    eprintln!("  Up bits: {} / {}", s.up_bits, s.samples);
    eprintln!(
        "  Staircase: RMS error {:.4}, SNR {:.2} dB, high band {:.2}%",
        s.staircase.rms_error,
        s.staircase.snr_db,
        s.staircase.high_band_fraction * 100.0
    );
    eprintln!(
        "  Smoothed:  RMS error {:.4}, SNR {:.2} dB, high band {:.2}%",
        s.filtered.rms_error,
        s.filtered.snr_db,
        s.filtered.high_band_fraction * 100.0
    );
}
