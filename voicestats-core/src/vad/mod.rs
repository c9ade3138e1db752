//! Voice Activity Detection (VAD) abstraction.
//!
//! The `VoiceActivityDetector` trait is the seam between the segmenter and the
//! frame classifier: `WebRtcVad` in production, scripted fakes in tests.

#[cfg(feature = "webrtc")]
pub mod webrtc;

#[cfg(feature = "webrtc")]
pub use webrtc::WebRtcVad;

use crate::error::Result;

/// Whether a given audio frame contains speech or silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VadDecision {
    /// The frame contains speech.
    Speech,
    /// The frame is silence or non-speech noise.
    Silence,
}

impl VadDecision {
    pub fn is_speech(self) -> bool {
        self == VadDecision::Speech
    }
}

impl From<bool> for VadDecision {
    fn from(is_speech: bool) -> Self {
        if is_speech {
            VadDecision::Speech
        } else {
            VadDecision::Silence
        }
    }
}

/// Trait for frame classifiers.
///
/// Implementations are treated as deterministic: the same bytes at the same
/// rate always yield the same decision.
pub trait VoiceActivityDetector {
    /// Classify one frame of 16-bit little-endian mono PCM.
    ///
    /// # Errors
    /// Returns `VoiceStatsError::InvalidFrameLength` when `frame` is not a
    /// length the classifier supports at `sample_rate`.
    fn classify(&mut self, frame: &[u8], sample_rate: u32) -> Result<VadDecision>;

    /// Convenience wrapper over [`classify`](Self::classify).
    fn is_speech(&mut self, frame: &[u8], sample_rate: u32) -> Result<bool> {
        self.classify(frame, sample_rate).map(VadDecision::is_speech)
    }
}

impl<D: VoiceActivityDetector + ?Sized> VoiceActivityDetector for &mut D {
    fn classify(&mut self, frame: &[u8], sample_rate: u32) -> Result<VadDecision> {
        (**self).classify(frame, sample_rate)
    }
}

impl<D: VoiceActivityDetector + ?Sized> VoiceActivityDetector for Box<D> {
    fn classify(&mut self, frame: &[u8], sample_rate: u32) -> Result<VadDecision> {
        (**self).classify(frame, sample_rate)
    }
}
