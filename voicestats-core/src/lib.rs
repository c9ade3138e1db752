//! # voicestats-core
//!
//! Measures how much of a mono PCM WAV file is voiced.
//!
//! ## Architecture
//!
//! ```text
//! WAV file → read_wave → PcmAudio
//!                           │
//!                     FrameSlicer (30 ms frames)
//!                           │
//!            Segmenter ◄── VoiceActivityDetector::classify
//!          (hangover window)
//!                           │
//!                   Segment { start, end }
//!                           │
//!                 FileStats → TotalStats → Report
//! ```
//!
//! Frames and segments are produced lazily; only the decoded PCM buffer is
//! held in memory.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod audio;
pub mod buffering;
pub mod engine;
pub mod error;
pub mod stats;
pub mod vad;

// Convenience re-exports for downstream crates
pub use audio::{read_wave, PcmAudio};
pub use buffering::frame::{Frame, FrameSlicer};
pub use engine::segmenter::{Segment, Segmenter};
pub use engine::{AnalysisConfig, VoiceStatsEngine};
pub use error::{Result, VoiceStatsError};
pub use stats::{FileStats, Report, TotalStats, TotalSummary};
pub use vad::{VadDecision, VoiceActivityDetector};

#[cfg(feature = "webrtc")]
pub use vad::WebRtcVad;
