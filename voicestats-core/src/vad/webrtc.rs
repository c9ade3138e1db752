//! WebRTC (libfvad) frame classifier.
//!
//! Wraps `webrtc_vad::Vad`. The native detector only accepts 10, 20 or 30 ms
//! frames at 8/16/32/48 kHz; anything else is reported as
//! `VoiceStatsError::InvalidFrameLength`.
//!
//! `webrtc_vad::Vad` is `!Send`, so a `WebRtcVad` stays on the thread that
//! built it.

use tracing::debug;
use webrtc_vad::{SampleRate, Vad, VadMode};

use super::{VadDecision, VoiceActivityDetector};
use crate::{
    buffering::frame::BYTES_PER_SAMPLE,
    error::{Result, VoiceStatsError},
};

/// Classifier backed by the WebRTC voice activity detector.
pub struct WebRtcVad {
    vad: Vad,
    aggressiveness: u8,
    /// Rate the native detector is currently configured for.
    sample_rate: Option<u32>,
    /// Scratch buffer for byte → i16 conversion, reused across frames.
    samples: Vec<i16>,
}

impl WebRtcVad {
    /// Build a detector with aggressiveness `0..=3` (higher filters more
    /// non-speech).
    pub fn new(aggressiveness: i64) -> Result<Self> {
        let aggressiveness = u8::try_from(aggressiveness)
            .ok()
            .filter(|a| *a <= 3)
            .ok_or(VoiceStatsError::InvalidAggressiveness(aggressiveness))?;

        let mut vad = Vad::new();
        vad.set_mode(mode_for(aggressiveness));
        debug!(aggressiveness, "webrtc vad created");

        Ok(Self {
            vad,
            aggressiveness,
            sample_rate: None,
            samples: Vec::new(),
        })
    }

    pub fn aggressiveness(&self) -> u8 {
        self.aggressiveness
    }

    fn configure_rate(&mut self, sample_rate: u32, len: usize) -> Result<()> {
        if self.sample_rate == Some(sample_rate) {
            return Ok(());
        }
        let rate = match sample_rate {
            8_000 => SampleRate::Rate8kHz,
            16_000 => SampleRate::Rate16kHz,
            32_000 => SampleRate::Rate32kHz,
            48_000 => SampleRate::Rate48kHz,
            _ => return Err(VoiceStatsError::InvalidFrameLength { len, sample_rate }),
        };
        self.vad = Vad::new_with_rate_and_mode(rate, mode_for(self.aggressiveness));
        self.sample_rate = Some(sample_rate);
        Ok(())
    }
}

fn mode_for(aggressiveness: u8) -> VadMode {
    match aggressiveness {
        0 => VadMode::Quality,
        1 => VadMode::LowBitrate,
        2 => VadMode::Aggressive,
        _ => VadMode::VeryAggressive,
    }
}

impl VoiceActivityDetector for WebRtcVad {
    fn classify(&mut self, frame: &[u8], sample_rate: u32) -> Result<VadDecision> {
        let invalid = || VoiceStatsError::InvalidFrameLength {
            len: frame.len(),
            sample_rate,
        };

        if frame.is_empty() || frame.len() % BYTES_PER_SAMPLE != 0 {
            return Err(invalid());
        }
        self.configure_rate(sample_rate, frame.len())?;

        self.samples.clear();
        self.samples.extend(
            frame
                .chunks_exact(BYTES_PER_SAMPLE)
                .map(|b| i16::from_le_bytes([b[0], b[1]])),
        );

        self.vad
            .is_voice_segment(&self.samples)
            .map(VadDecision::from)
            .map_err(|()| invalid())
    }
}

impl std::fmt::Debug for WebRtcVad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebRtcVad")
            .field("aggressiveness", &self.aggressiveness)
            .field("sample_rate", &self.sample_rate)
            .finish_non_exhaustive()
    }
}
