//! `VoiceStatsEngine` — runs the per-file analysis.
//!
//! ## Per-file flow
//!
//! ```text
//! read_wave(path)
//!     └─► FrameSlicer(frame_duration_ms)
//!         └─► Segmenter(padding window, VAD)
//!             └─► FileStats { duration, voiced, proportion }
//! ```
//!
//! Each file gets its own slicer, segmenter, window and detector. Nothing is
//! shared between files, so callers may analyse files on separate threads and
//! fold the results with `TotalStats::merge`.

pub mod segmenter;

use std::path::Path;

use tracing::info;

use crate::{
    audio::{read_wave, PcmAudio},
    buffering::frame::FrameSlicer,
    error::{Result, VoiceStatsError},
    stats::FileStats,
    vad::VoiceActivityDetector,
};

use segmenter::{padding_frames, Segment, Segmenter};

#[cfg(feature = "webrtc")]
use crate::vad::WebRtcVad;

/// Configuration for `VoiceStatsEngine`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Classifier aggressiveness, 0 (least) to 3 (most). Default: 3.
    pub aggressiveness: i64,
    /// Frame length handed to the classifier (ms). WebRTC accepts 10, 20 or
    /// 30. Default: 30.
    pub frame_duration_ms: u32,
    /// Hangover window length (ms). Default: 300 (10 frames of 30 ms).
    pub padding_duration_ms: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            aggressiveness: 3,
            frame_duration_ms: 30,
            padding_duration_ms: 300,
        }
    }
}

impl AnalysisConfig {
    pub fn with_aggressiveness(aggressiveness: i64) -> Self {
        Self {
            aggressiveness,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_duration_ms == 0 {
            return Err(VoiceStatsError::InvalidConfig(
                "frame duration must be at least 1 ms".into(),
            ));
        }
        Ok(())
    }

    /// Capacity of the hangover window in frames.
    pub fn padding_frames(&self) -> usize {
        padding_frames(self.padding_duration_ms, self.frame_duration_ms)
    }
}

/// Stateless driver: all per-file state lives in the iterators it builds.
#[derive(Debug, Clone)]
pub struct VoiceStatsEngine {
    config: AnalysisConfig,
}

impl VoiceStatsEngine {
    /// # Errors
    /// `VoiceStatsError::InvalidConfig` if `config` fails validation.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Lazily segment `audio` with `vad`.
    pub fn segments<'a, D: VoiceActivityDetector>(
        &self,
        audio: &'a PcmAudio,
        vad: D,
    ) -> Segmenter<FrameSlicer<'a>, D> {
        let frames = FrameSlicer::new(self.config.frame_duration_ms, &audio.pcm, audio.sample_rate);
        Segmenter::new(frames, vad, audio.sample_rate, self.config.padding_frames())
    }

    /// Segment `audio` and summarise it as `file`.
    pub fn analyze_pcm<D: VoiceActivityDetector>(
        &self,
        file: impl AsRef<Path>,
        audio: &PcmAudio,
        vad: D,
    ) -> Result<FileStats> {
        let segments = self.segments(audio, vad).collect::<Result<Vec<Segment>>>()?;
        let stats = FileStats::new(file, audio.duration, segments)?;
        info!(
            file = %stats.file.display(),
            sample_rate = audio.sample_rate,
            duration = stats.duration,
            voiced = stats.voiced,
            segments = stats.segments.len(),
            "file analysed"
        );
        Ok(stats)
    }

    /// Read `path` and analyse it with a caller-supplied detector.
    pub fn analyze_file_with<D: VoiceActivityDetector>(
        &self,
        path: impl AsRef<Path>,
        vad: D,
    ) -> Result<FileStats> {
        let path = path.as_ref();
        let audio = read_wave(path)?;
        self.analyze_pcm(path, &audio, vad)
    }

    /// Read `path` and analyse it with a fresh WebRTC detector.
    #[cfg(feature = "webrtc")]
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<FileStats> {
        let vad = WebRtcVad::new(self.config.aggressiveness)?;
        self.analyze_file_with(path, vad)
    }
}
