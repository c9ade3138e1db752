use std::path::PathBuf;

use thiserror::Error;

/// All errors produced by voicestats-core.
#[derive(Debug, Error)]
pub enum VoiceStatsError {
    #[error("failed to read WAV {}: {source}", path.display())]
    Wav {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("{}: expected 1 channel, found {channels}", path.display())]
    UnsupportedChannels { path: PathBuf, channels: u16 },

    #[error("{}: expected 16-bit samples, found {bits} bits", path.display())]
    UnsupportedSampleWidth { path: PathBuf, bits: u16 },

    #[error("{}: expected integer PCM samples, found floating point", path.display())]
    UnsupportedSampleFormat { path: PathBuf },

    #[error("{}: sample rate {sample_rate} Hz is not one of 8000, 16000, 32000", path.display())]
    UnsupportedSampleRate { path: PathBuf, sample_rate: u32 },

    #[error("aggressiveness must be in 0..=3, got {0}")]
    InvalidAggressiveness(i64),

    #[error("classifier rejected a {len}-byte frame at {sample_rate} Hz")]
    InvalidFrameLength { len: usize, sample_rate: u32 },

    #[error("{}: audio has zero duration, voiced proportion is undefined", path.display())]
    ZeroDuration { path: PathBuf },

    #[error("total duration across all files is zero, voiced proportion is undefined")]
    ZeroTotalDuration,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("report serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, VoiceStatsError>;
