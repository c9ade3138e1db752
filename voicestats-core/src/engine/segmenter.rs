//! Hangover segmenter: turns per-frame VAD decisions into voiced segments.
//!
//! ## States
//!
//! ```text
//!              > 90 % of window is speech
//!   Untriggered ─────────────────────────► Triggered
//!        ▲     start = oldest frame in window   │
//!        │                                      │
//!        └──────────────────────────────────────┘
//!              > 90 % of window is silence
//!              emit (start, end of current frame)
//! ```
//!
//! The window is cleared on every transition. If the frames run out while
//! triggered, one final segment closes at the end of the last frame.
//!
//! `Segmenter` is a pull-based iterator: frames are sliced, classified and
//! voted on only as segments are requested.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    buffering::{frame::Frame, PaddingWindow, Vote},
    error::Result,
    vad::{VadDecision, VoiceActivityDetector},
};

/// A contiguous voiced region, padding included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds, always on a frame boundary.
    pub end: f64,
    /// Frames accumulated between trigger and release.
    pub frames: usize,
}

impl Segment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Window capacity for a padding duration: `floor(padding_ms / frame_ms)`.
pub fn padding_frames(padding_duration_ms: u32, frame_duration_ms: u32) -> usize {
    padding_duration_ms
        .checked_div(frame_duration_ms)
        .unwrap_or(0) as usize
}

/// Iterator of voiced segments over a frame sequence.
///
/// Yields `Err` once if the detector rejects a frame, then ends.
pub struct Segmenter<I, D> {
    frames: I,
    vad: D,
    sample_rate: u32,
    window: PaddingWindow,
    triggered: bool,
    start: f64,
    /// Size of the voiced-frames accumulator for the open segment.
    voiced_frames: usize,
    /// End time of the most recently consumed frame.
    last_end: f64,
    done: bool,
}

impl<'a, I, D> Segmenter<I, D>
where
    I: Iterator<Item = Frame<'a>>,
    D: VoiceActivityDetector,
{
    pub fn new(frames: I, vad: D, sample_rate: u32, num_padding_frames: usize) -> Self {
        Self {
            frames,
            vad,
            sample_rate,
            window: PaddingWindow::new(num_padding_frames),
            triggered: false,
            start: 0.0,
            voiced_frames: 0,
            last_end: 0.0,
            done: false,
        }
    }

    /// Whether a segment is currently open.
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Feed one frame through the state machine, returning a segment if it
    /// closed one.
    fn step(&mut self, frame: Frame<'a>) -> Result<Option<Segment>> {
        let decision = self.vad.classify(frame.bytes, self.sample_rate)?;
        self.last_end = frame.end();
        let vote = Vote {
            timestamp: frame.timestamp,
            decision,
        };

        if !self.triggered {
            self.window.push(vote);
            if self.window.exceeds_ratio(VadDecision::Speech) {
                self.start = self.window.oldest().map_or(frame.timestamp, |v| v.timestamp);
                self.triggered = true;
                self.voiced_frames += self.window.clear();
                debug!(start = self.start, "voice triggered");
            }
            return Ok(None);
        }

        self.voiced_frames += 1;
        self.window.push(vote);
        if !self.window.exceeds_ratio(VadDecision::Silence) {
            return Ok(None);
        }

        self.triggered = false;
        let segment = Segment {
            start: self.start,
            end: frame.end(),
            frames: self.voiced_frames,
        };
        self.window.clear();
        self.voiced_frames = 0;
        debug!(start = segment.start, end = segment.end, "voice released");
        Ok(Some(segment))
    }

    /// Close the open segment, if any, at the end of the last frame.
    fn flush(&mut self) -> Option<Segment> {
        if !self.triggered || self.voiced_frames == 0 {
            return None;
        }
        self.triggered = false;
        let segment = Segment {
            start: self.start,
            end: self.last_end,
            frames: std::mem::take(&mut self.voiced_frames),
        };
        debug!(start = segment.start, end = segment.end, "voice open at end of audio");
        Some(segment)
    }
}

impl<'a, I, D> Iterator for Segmenter<I, D>
where
    I: Iterator<Item = Frame<'a>>,
    D: VoiceActivityDetector,
{
    type Item = Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        while let Some(frame) = self.frames.next() {
            match self.step(frame) {
                Ok(Some(segment)) => return Some(Ok(segment)),
                Ok(None) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        self.done = true;
        self.flush().map(Ok)
    }
}

impl<'a, I, D> std::iter::FusedIterator for Segmenter<I, D>
where
    I: Iterator<Item = Frame<'a>>,
    D: VoiceActivityDetector,
{
}
