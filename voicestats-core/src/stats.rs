//! Per-file and cross-file voiced-time statistics.
//!
//! ```text
//! Segment* ──sum(end - start)──► FileStats { duration, voiced, proportion }
//! FileStats* ──────────────────► TotalStats { total_duration, total_voiced }
//! ```
//!
//! All types serialise with camelCase field names for the JSON report.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    engine::segmenter::Segment,
    error::{Result, VoiceStatsError},
};

/// Voiced-time summary of one input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStats {
    /// Path as given on input.
    pub file: PathBuf,
    /// Audio length in seconds.
    pub duration: f64,
    /// Sum of segment lengths in seconds.
    pub voiced: f64,
    /// `voiced / duration`.
    pub proportion: f64,
    pub segments: Vec<Segment>,
}

impl FileStats {
    /// Sum the segments of `file` and compute its voiced proportion.
    ///
    /// # Errors
    /// `VoiceStatsError::ZeroDuration` when `duration` is not positive, since
    /// the proportion would be NaN or infinite.
    pub fn new(file: impl AsRef<Path>, duration: f64, segments: Vec<Segment>) -> Result<Self> {
        let file = file.as_ref().to_path_buf();
        if duration <= 0.0 {
            return Err(VoiceStatsError::ZeroDuration { path: file });
        }
        let voiced = voiced_seconds(&segments);
        Ok(Self {
            file,
            duration,
            voiced,
            proportion: voiced / duration,
            segments,
        })
    }
}

/// Total voiced time of `segments`, summed in order.
pub fn voiced_seconds(segments: &[Segment]) -> f64 {
    segments.iter().fold(0.0, |acc, s| acc + s.duration())
}

/// Running totals across files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalStats {
    pub total_duration: f64,
    pub total_voiced: f64,
    /// Number of files folded in.
    pub files: usize,
}

impl TotalStats {
    pub fn add(&mut self, stats: &FileStats) {
        self.total_duration += stats.duration;
        self.total_voiced += stats.voiced;
        self.files += 1;
    }

    /// Combine two partial totals (e.g. from independent workers).
    pub fn merge(self, other: TotalStats) -> TotalStats {
        TotalStats {
            total_duration: self.total_duration + other.total_duration,
            total_voiced: self.total_voiced + other.total_voiced,
            files: self.files + other.files,
        }
    }

    /// `total_voiced / total_duration`.
    ///
    /// # Errors
    /// `VoiceStatsError::ZeroTotalDuration` when nothing has been added.
    pub fn proportion(&self) -> Result<f64> {
        if self.total_duration <= 0.0 {
            return Err(VoiceStatsError::ZeroTotalDuration);
        }
        Ok(self.total_voiced / self.total_duration)
    }
}

impl<'a> Extend<&'a FileStats> for TotalStats {
    fn extend<T: IntoIterator<Item = &'a FileStats>>(&mut self, iter: T) {
        for stats in iter {
            self.add(stats);
        }
    }
}

/// Cross-file total as rendered in a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalSummary {
    pub total_duration: f64,
    pub total_voiced: f64,
    pub total_proportion: f64,
}

/// Everything printed for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub files: Vec<FileStats>,
    /// Present only when more than one file was analysed.
    pub total: Option<TotalSummary>,
}

impl Report {
    pub fn new(files: Vec<FileStats>) -> Result<Self> {
        let mut totals = TotalStats::default();
        totals.extend(&files);
        let total = if totals.files > 1 {
            Some(TotalSummary {
                total_duration: totals.total_duration,
                total_voiced: totals.total_voiced,
                total_proportion: totals.proportion()?,
            })
        } else {
            None
        };
        Ok(Self { files, total })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
