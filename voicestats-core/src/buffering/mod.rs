//! Fixed-capacity padding window for the hangover segmenter.
//!
//! Uses `ringbuf::HeapRb` with `push_overwrite`, so the window is allocated
//! once and the oldest vote is evicted when a new one arrives at capacity.

pub mod frame;

use ringbuf::{
    traits::{Consumer, Observer, RingBuffer},
    HeapRb,
};

use crate::vad::VadDecision;

/// One classified frame as remembered by the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vote {
    /// Start time of the frame (seconds).
    pub timestamp: f64,
    pub decision: VadDecision,
}

/// Sliding window over the most recent `capacity` votes.
///
/// A capacity of zero is valid: the window then never holds anything.
pub struct PaddingWindow {
    ring: Option<HeapRb<Vote>>,
    capacity: usize,
}

impl PaddingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: (capacity > 0).then(|| HeapRb::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.ring.as_ref().map_or(0, |rb| rb.occupied_len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Push a vote, evicting the oldest one if the window is full.
    pub fn push(&mut self, vote: Vote) {
        if let Some(rb) = self.ring.as_mut() {
            let _evicted = rb.push_overwrite(vote);
        }
    }

    /// Oldest vote still in the window.
    pub fn oldest(&self) -> Option<&Vote> {
        self.ring.as_ref().and_then(|rb| rb.iter().next())
    }

    /// Number of votes in the window with the given decision.
    pub fn count(&self, decision: VadDecision) -> usize {
        self.ring.as_ref().map_or(0, |rb| {
            rb.iter().filter(|v| v.decision == decision).count()
        })
    }

    /// `true` when strictly more than 90 % of the capacity voted `decision`.
    pub fn exceeds_ratio(&self, decision: VadDecision) -> bool {
        self.count(decision) as f64 > 0.9 * self.capacity() as f64
    }

    /// Empty the window, returning how many votes were discarded.
    pub fn clear(&mut self) -> usize {
        self.ring.as_mut().map_or(0, |rb| Consumer::clear(rb))
    }
}

impl std::fmt::Debug for PaddingWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaddingWindow")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}
