//! Viewing progress and its reductions
//!
//! Progress is tracked per (viewer, video) as an integer percentage in
//! `[0, 100]`. The platform serves progress as a flat record list; clients
//! reduce it into a [`ProgressIndex`] for constant-time lookup. Both the
//! reduction and lookups are total: bad input clamps or defaults, it never
//! errors.

use std::collections::HashMap;
use std::time::Duration;

use crate::ids::VideoID;

/// Integer completion percentage, clamped to `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "u8")
)]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const COMPLETE: Percent = Percent(100);

    /// Create a new percentage, clamping to 100
    pub fn new(value: u8) -> Self {
        Percent(value.min(100))
    }

    /// Percentage of `duration` covered by `position`, rounded down
    ///
    /// Floor, not round: overshooting the true position would let a later
    /// resume skip content the viewer has not actually seen. An unknown
    /// (zero) duration yields zero.
    pub fn from_position(position: Duration, duration: Duration) -> Self {
        if duration.is_zero() {
            return Percent::ZERO;
        }
        let ratio = position.as_secs_f64() / duration.as_secs_f64();
        Percent::new((ratio * 100.0).floor().min(100.0) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Whether the video has been watched to the end
    pub fn is_complete(&self) -> bool {
        self.0 == 100
    }
}

impl From<u8> for Percent {
    fn from(value: u8) -> Self {
        Percent::new(value)
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// One viewer's stored progress on one video
///
/// Supplied by the platform as part of a video bundle. The server keys
/// records by (viewer, video); the viewer is implicit client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ProgressRecord {
    pub video_id: VideoID,
    #[cfg_attr(feature = "serde", serde(rename = "progress"))]
    pub percent: Percent,
}

/// Mapping from video to last-known completion percentage
///
/// Built once per bundle fetch by reducing the flat record list; replaced
/// wholesale when the bundle is refetched, never patched in place. Videos
/// without a record report [`Percent::ZERO`].
#[derive(Debug, Clone, Default)]
pub struct ProgressIndex {
    entries: HashMap<VideoID, Percent>,
}

impl ProgressIndex {
    /// Reduce a record list into an index
    ///
    /// The upstream store holds at most one record per video; should a
    /// duplicate slip through anyway, the last record wins and the overwrite
    /// is logged.
    pub fn from_records(records: impl IntoIterator<Item = ProgressRecord>) -> Self {
        let mut entries = HashMap::new();
        for record in records {
            if let Some(previous) = entries.insert(record.video_id, record.percent) {
                log::warn!(
                    "duplicate progress record for video {}: {} replaces {}",
                    record.video_id,
                    record.percent,
                    previous
                );
            }
        }
        Self { entries }
    }

    /// Last-known percentage for a video, zero when absent
    pub fn percent_for(&self, video_id: &VideoID) -> Percent {
        self.entries.get(video_id).copied().unwrap_or(Percent::ZERO)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ProgressRecord> for ProgressIndex {
    fn from_iter<T: IntoIterator<Item = ProgressRecord>>(iter: T) -> Self {
        Self::from_records(iter)
    }
}
