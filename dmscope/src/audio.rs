use anyhow::{Context, Result};
use std::io::Cursor;
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, SampleBuffer};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

/// Audio file mixed down to a single channel
#[derive(Debug, Clone)]
pub struct MonoAudio {
    /// Samples in range [-1.0, 1.0]
    pub samples: Vec<f64>,
    pub sample_rate: u32,
    /// Channel count of the source before mixing
    pub source_channels: usize,
}

impl MonoAudio {
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Read an audio file (wav, flac, mp3, ogg, ...) and average its channels
pub fn read_audio_file(path: &Path) -> Result<MonoAudio> {
    let file = std::fs::File::open(path).context("Failed to open audio file")?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    read_from_source(mss, path.extension().and_then(|e| e.to_str()))
}

/// Read audio from bytes
pub fn read_audio_from_bytes(bytes: &[u8]) -> Result<MonoAudio> {
    let cursor = Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());
    read_from_source(mss, None)
}

fn read_from_source(mss: MediaSourceStream, extension: Option<&str>) -> Result<MonoAudio> {
    // Create hint from file extension
    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("Unsupported audio format")?;

    let mut format = probed.format;

    // Find the first audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No audio track found")?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .context("Unknown sample rate")?;
    let source_channels = track
        .codec_params
        .channels
        .context("Unknown channel count")?
        .count();

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create decoder")?;

    let mut samples = Vec::new();

    // Decode all packets
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(e) => return Err(e).context("Error reading packet"),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(symphonia::core::errors::Error::DecodeError(msg)) => {
                warn!(msg, "skipping undecodable packet");
                continue;
            }
            Err(e) => return Err(e).context("Error decoding packet"),
        };

        append_mono(decoded, &mut samples);
    }

    debug!(
        samples = samples.len(),
        sample_rate, source_channels, "audio loaded"
    );
    Ok(MonoAudio {
        samples,
        sample_rate,
        source_channels,
    })
}

/// Convert any sample format (integer widths 8 to 32, signed or unsigned,
/// float) to f64 and average each frame's channels.
fn append_mono(decoded: AudioBufferRef, samples: &mut Vec<f64>) {
    let spec = *decoded.spec();
    let channels = spec.channels.count();
    if channels == 0 || decoded.frames() == 0 {
        return;
    }

    let mut interleaved = SampleBuffer::<f64>::new(decoded.capacity() as u64, spec);
    interleaved.copy_interleaved_ref(decoded);

    let scale = 1.0 / channels as f64;
    samples.extend(
        interleaved
            .samples()
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f64>() * scale),
    );
}
