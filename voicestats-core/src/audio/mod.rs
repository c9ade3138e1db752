//! WAV loading.
//!
//! Accepts only what the classifier can consume without conversion: one
//! channel, 16-bit integer samples, 8/16/32 kHz. Anything else is a fatal
//! format error; there is no down-mixing or resampling.
//!
//! The file handle lives inside the `hound::WavReader` and is released when
//! the reader drops at the end of `read_wave`, on success or failure.

use std::path::Path;

use tracing::debug;

use crate::error::{Result, VoiceStatsError};

/// Sample rates accepted on input (Hz).
pub const SUPPORTED_SAMPLE_RATES: [u32; 3] = [8_000, 16_000, 32_000];

/// Decoded mono PCM plus the metadata the analysis needs.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmAudio {
    /// 16-bit little-endian mono samples.
    pub pcm: Vec<u8>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Length in seconds, from the container's frame count.
    pub duration: f64,
}

impl PcmAudio {
    /// Wrap in-memory samples (duration derived from the sample count).
    pub fn from_samples(samples: &[i16], sample_rate: u32) -> Self {
        let pcm = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
        Self {
            pcm,
            sample_rate,
            duration: samples.len() as f64 / sample_rate as f64,
        }
    }
}

/// Read a mono 16-bit PCM WAV file.
///
/// # Errors
/// - `VoiceStatsError::Wav` if the file cannot be opened or decoded.
/// - `UnsupportedChannels` / `UnsupportedSampleWidth` /
///   `UnsupportedSampleFormat` / `UnsupportedSampleRate` on format mismatch.
pub fn read_wave(path: impl AsRef<Path>) -> Result<PcmAudio> {
    let path = path.as_ref();
    let wav_err = |source| VoiceStatsError::Wav {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = hound::WavReader::open(path).map_err(wav_err)?;
    let spec = reader.spec();

    if spec.channels != 1 {
        return Err(VoiceStatsError::UnsupportedChannels {
            path: path.to_path_buf(),
            channels: spec.channels,
        });
    }
    if spec.sample_format != hound::SampleFormat::Int {
        return Err(VoiceStatsError::UnsupportedSampleFormat {
            path: path.to_path_buf(),
        });
    }
    if spec.bits_per_sample != 16 {
        return Err(VoiceStatsError::UnsupportedSampleWidth {
            path: path.to_path_buf(),
            bits: spec.bits_per_sample,
        });
    }
    if !SUPPORTED_SAMPLE_RATES.contains(&spec.sample_rate) {
        return Err(VoiceStatsError::UnsupportedSampleRate {
            path: path.to_path_buf(),
            sample_rate: spec.sample_rate,
        });
    }

    let frames = reader.duration();
    let mut pcm = Vec::with_capacity(frames as usize * 2);
    for sample in reader.samples::<i16>() {
        pcm.extend_from_slice(&sample.map_err(wav_err)?.to_le_bytes());
    }

    let duration = frames as f64 / spec.sample_rate as f64;
    debug!(
        path = %path.display(),
        sample_rate = spec.sample_rate,
        duration,
        bytes = pcm.len(),
        "wav loaded"
    );

    Ok(PcmAudio {
        pcm,
        sample_rate: spec.sample_rate,
        duration,
    })
}
