//! Adjacent-video navigation within a course
//!
//! Ordering comes from each video's declared 1-based sequence index, not from
//! list order. The sequence is a derived, read-only projection: recomputed
//! from the authoritative video list whenever that list changes, and never
//! cached across courses. Rebuilding it is cheap.

use lectern_model::{Video, VideoID};

/// The videos adjacent to the open one, absent at either end of the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    pub previous: Option<VideoID>,
    pub next: Option<VideoID>,
}

/// A course's videos, ordered by sequence index.
#[derive(Debug, Clone)]
pub struct CourseSequence {
    ordered: Vec<Video>,
}

impl CourseSequence {
    /// Stable-sort `videos` by sequence index.
    ///
    /// Duplicate indices keep their input order; gaps are preserved as-is.
    /// Neither is validated here; ordering stays deterministic regardless.
    pub fn new(videos: &[Video]) -> Self {
        let mut ordered = videos.to_vec();
        ordered.sort_by_key(|video| video.index.value());
        Self { ordered }
    }

    /// The videos in watch order.
    pub fn videos(&self) -> &[Video] {
        &self.ordered
    }

    /// Previous and next video around `video_id`.
    ///
    /// The open video is located by identity, meaning its position in the sorted
    /// list, never `sequence_index - 1` arithmetic, so the first video
    /// (index 1) and courses with index gaps both resolve correctly. An
    /// unknown ID has no neighbors.
    pub fn neighbors(&self, video_id: &VideoID) -> Neighbors {
        let Some(position) = self.ordered.iter().position(|video| video.id == *video_id) else {
            return Neighbors::default();
        };

        Neighbors {
            previous: position
                .checked_sub(1)
                .map(|previous| self.ordered[previous].id),
            next: self.ordered.get(position + 1).map(|video| video.id),
        }
    }

    pub fn previous(&self, video_id: &VideoID) -> Option<VideoID> {
        self.neighbors(video_id).previous
    }

    pub fn next(&self, video_id: &VideoID) -> Option<VideoID> {
        self.neighbors(video_id).next
    }
}
