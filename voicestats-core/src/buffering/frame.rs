//! Fixed-duration PCM frames and the iterator that slices them out of a buffer.
//!
//! ## Slicing arithmetic
//!
//! ```text
//! n        = trunc(sample_rate * (frame_ms / 1000) * 2)   bytes per frame
//! duration = (n / sample_rate) / 2                        seconds per frame
//! ```
//!
//! The duration is derived from `n` rather than from `frame_ms` so timestamps
//! always agree with the bytes actually sliced. Iteration stops while
//! `offset + n < len` is false, so any trailing bytes that do not leave room
//! for a further frame are dropped, never padded.

use tracing::trace;

/// Bytes per 16-bit mono sample.
pub const BYTES_PER_SAMPLE: usize = 2;

/// One slice of 16-bit little-endian mono PCM with its position in the stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<'a> {
    /// Raw PCM bytes, `frame_len` long.
    pub bytes: &'a [u8],
    /// Start time in seconds from the beginning of the buffer.
    pub timestamp: f64,
    /// Length in seconds.
    pub duration: f64,
}

impl Frame<'_> {
    /// Time at which this frame ends.
    pub fn end(&self) -> f64 {
        self.timestamp + self.duration
    }
}

/// Byte length of one frame of `frame_duration_ms` at `sample_rate`.
pub fn frame_len(frame_duration_ms: u32, sample_rate: u32) -> usize {
    (sample_rate as f64 * (frame_duration_ms as f64 / 1000.0) * BYTES_PER_SAMPLE as f64) as usize
}

/// Lazy iterator over the frames of a PCM buffer.
#[derive(Debug, Clone)]
pub struct FrameSlicer<'a> {
    audio: &'a [u8],
    frame_len: usize,
    offset: usize,
    timestamp: f64,
    duration: f64,
}

impl<'a> FrameSlicer<'a> {
    pub fn new(frame_duration_ms: u32, audio: &'a [u8], sample_rate: u32) -> Self {
        let n = frame_len(frame_duration_ms, sample_rate);
        let duration = if sample_rate == 0 {
            0.0
        } else {
            (n as f64 / sample_rate as f64) / BYTES_PER_SAMPLE as f64
        };
        Self {
            audio,
            frame_len: n,
            offset: 0,
            timestamp: 0.0,
            duration,
        }
    }

    /// Bytes per yielded frame.
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Seconds per yielded frame.
    pub fn frame_duration(&self) -> f64 {
        self.duration
    }
}

impl<'a> Iterator for FrameSlicer<'a> {
    type Item = Frame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.frame_len;
        if n == 0 || self.offset + n >= self.audio.len() {
            if self.offset < self.audio.len() {
                trace!(
                    dropped = self.audio.len() - self.offset,
                    "trailing bytes not sliced into a frame"
                );
                self.offset = self.audio.len();
            }
            return None;
        }

        let frame = Frame {
            bytes: &self.audio[self.offset..self.offset + n],
            timestamp: self.timestamp,
            duration: self.duration,
        };
        self.timestamp += self.duration;
        self.offset += n;
        Some(frame)
    }
}

impl std::iter::FusedIterator for FrameSlicer<'_> {}
