use approx::assert_abs_diff_eq;

use voicestats_core::{
    AnalysisConfig, PcmAudio, Segment, VadDecision, VoiceActivityDetector, VoiceStatsEngine,
    VoiceStatsError,
};

const RATE: u32 = 16_000;
/// 30 ms at 16 kHz.
const FRAME_SAMPLES: usize = 480;
const FRAME_SECS: f64 = 0.03;

/// Speech whenever any sample in the frame is non-zero.
struct LoudnessVad;

impl VoiceActivityDetector for LoudnessVad {
    fn classify(&mut self, frame: &[u8], _sample_rate: u32) -> voicestats_core::Result<VadDecision> {
        Ok(frame.iter().any(|b| *b != 0).into())
    }
}

struct AlwaysVad(VadDecision);

impl VoiceActivityDetector for AlwaysVad {
    fn classify(&mut self, _frame: &[u8], _sample_rate: u32) -> voicestats_core::Result<VadDecision> {
        Ok(self.0)
    }
}

/// Rejects anything but 30 ms frames at 16 kHz.
struct StrictLengthVad;

impl VoiceActivityDetector for StrictLengthVad {
    fn classify(&mut self, frame: &[u8], sample_rate: u32) -> voicestats_core::Result<VadDecision> {
        if frame.len() != FRAME_SAMPLES * 2 {
            return Err(VoiceStatsError::InvalidFrameLength {
                len: frame.len(),
                sample_rate,
            });
        }
        Ok(VadDecision::Silence)
    }
}

/// One 30 ms frame per script entry (loud for `true`), plus one trailing
/// sample so the last whole frame is still sliced.
fn scripted_audio(script: &[bool]) -> PcmAudio {
    let mut samples = Vec::with_capacity(script.len() * FRAME_SAMPLES + 1);
    for &speech in script {
        let value = if speech { 1_000 } else { 0 };
        samples.extend(std::iter::repeat(value).take(FRAME_SAMPLES));
    }
    samples.push(0);
    PcmAudio::from_samples(&samples, RATE)
}

fn script(runs: &[(bool, usize)]) -> Vec<bool> {
    runs.iter()
        .flat_map(|&(speech, n)| std::iter::repeat(speech).take(n))
        .collect()
}

fn engine() -> VoiceStatsEngine {
    VoiceStatsEngine::new(AnalysisConfig::default()).unwrap()
}

fn segments_for(script: &[bool]) -> Vec<Segment> {
    let audio = scripted_audio(script);
    engine()
        .segments(&audio, LoudnessVad)
        .collect::<voicestats_core::Result<Vec<_>>>()
        .unwrap()
}

fn assert_segment(segment: &Segment, start: f64, end: f64) {
    assert_abs_diff_eq!(segment.start, start, epsilon = 1e-9);
    assert_abs_diff_eq!(segment.end, end, epsilon = 1e-9);
}

#[test]
fn nine_of_ten_speech_frames_do_not_trigger() {
    let segments = segments_for(&script(&[(false, 1), (true, 9), (false, 5)]));
    assert!(segments.is_empty());
}

#[test]
fn ten_of_ten_speech_frames_trigger() {
    let segments = segments_for(&script(&[(false, 1), (true, 10), (false, 12)]));
    assert_eq!(segments.len(), 1);
    // Window held frames 1..=10 when it tripped; released once frames
    // 11..=20 were all silent.
    assert_segment(&segments[0], FRAME_SECS, 21.0 * FRAME_SECS);
    assert_eq!(segments[0].frames, 20);
}

#[test]
fn speech_window_is_padded_by_hangover() {
    let segments = segments_for(&script(&[(false, 20), (true, 30), (false, 40)]));
    assert_eq!(segments.len(), 1);
    // Speech occupies 0.6 s..1.5 s; the release waits out ten silent frames.
    assert_segment(&segments[0], 0.6, 1.8);
}

#[test]
fn bursts_yield_ordered_non_overlapping_segments() {
    let burst = [(true, 15), (false, 15)];
    let runs: Vec<_> = burst.iter().cycle().take(6).copied().collect();
    let segments = segments_for(&script(&runs));

    assert_eq!(segments.len(), 3);
    assert_segment(&segments[0], 0.0, 0.75);
    assert_segment(&segments[1], 0.9, 1.65);
    assert_segment(&segments[2], 1.8, 2.55);

    for pair in segments.windows(2) {
        assert!(pair[0].start <= pair[0].end);
        assert!(pair[0].end <= pair[1].start);
        assert!(pair[1].start <= pair[1].end);
    }
    for s in &segments {
        let frames = s.end / FRAME_SECS;
        assert_abs_diff_eq!(frames, frames.round(), epsilon = 1e-6);
    }
}

#[test]
fn alternating_frames_never_trigger() {
    let alternating: Vec<bool> = (0..200).map(|i| i % 2 == 0).collect();
    assert!(segments_for(&alternating).is_empty());
}

#[test]
fn all_speech_flushes_single_segment() {
    let audio = scripted_audio(&[true; 100]);
    let segments: Vec<_> = engine()
        .segments(&audio, AlwaysVad(VadDecision::Speech))
        .collect::<voicestats_core::Result<_>>()
        .unwrap();
    assert_eq!(segments.len(), 1);
    assert_segment(&segments[0], 0.0, 100.0 * FRAME_SECS);
    assert_eq!(segments[0].frames, 100);
}

#[test]
fn all_silence_emits_nothing() {
    let audio = scripted_audio(&[false; 100]);
    assert_eq!(
        engine()
            .segments(&audio, AlwaysVad(VadDecision::Silence))
            .count(),
        0
    );
}

#[test]
fn short_padding_window_triggers_immediately() {
    let config = AnalysisConfig {
        padding_duration_ms: 30,
        ..AnalysisConfig::default()
    };
    assert_eq!(config.padding_frames(), 1);
    let engine = VoiceStatsEngine::new(config).unwrap();
    let audio = scripted_audio(&script(&[(false, 2), (true, 3), (false, 2)]));
    let segments: Vec<_> = engine
        .segments(&audio, LoudnessVad)
        .collect::<voicestats_core::Result<_>>()
        .unwrap();
    assert_eq!(segments.len(), 1);
    // Released by the first silent frame.
    assert_segment(&segments[0], 2.0 * FRAME_SECS, 6.0 * FRAME_SECS);
}

#[test]
fn padding_shorter_than_a_frame_never_triggers() {
    let config = AnalysisConfig {
        padding_duration_ms: 20,
        ..AnalysisConfig::default()
    };
    let engine = VoiceStatsEngine::new(config).unwrap();
    let audio = scripted_audio(&[true; 50]);
    let stats = engine
        .analyze_pcm("speech.wav", &audio, AlwaysVad(VadDecision::Speech))
        .unwrap();
    assert!(stats.segments.is_empty());
}

#[test]
fn classifier_rejection_is_fatal() {
    let config = AnalysisConfig {
        frame_duration_ms: 20,
        ..AnalysisConfig::default()
    };
    let engine = VoiceStatsEngine::new(config).unwrap();
    let audio = scripted_audio(&[true; 10]);
    let err = engine
        .analyze_pcm("x.wav", &audio, StrictLengthVad)
        .unwrap_err();
    assert!(matches!(
        err,
        VoiceStatsError::InvalidFrameLength {
            len: 640,
            sample_rate: RATE
        }
    ));
}

#[test]
fn voiced_never_exceeds_duration() {
    let runs = [(true, 40), (false, 5), (true, 40), (false, 30)];
    let audio = scripted_audio(&script(&runs));
    let stats = engine()
        .analyze_pcm("mixed.wav", &audio, LoudnessVad)
        .unwrap();
    assert!(stats.voiced > 0.0);
    assert!(stats.voiced <= stats.duration);
    assert!((0.0..=1.0).contains(&stats.proportion));
}
