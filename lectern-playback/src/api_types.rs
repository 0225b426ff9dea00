//! Wire types for the catalog collaborator
//!
//! A video bundle is the one-shot payload the platform serves per video-open:
//! the video itself, its course, every sibling video, the viewer's progress
//! records for the course, and the playable URL. Record fields the engine has
//! no use for (server-side user IDs, progress timestamps) are ignored on
//! deserialization.

use serde::{Deserialize, Serialize};
use url::Url;

use lectern_model::{Course, Percent, ProgressIndex, ProgressRecord, Video};

use crate::navigator::CourseSequence;

/// Everything needed to open one video, fetched as a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoBundle {
    pub course: Course,
    pub video: Video,
    pub all_videos: Vec<Video>,
    pub all_progress: Vec<ProgressRecord>,
    /// Playable URL for the bundled video; served per-bundle and never part
    /// of the video record itself.
    pub url: Url,
}

impl VideoBundle {
    /// Reduce the bundled records into a lookup index.
    pub fn progress_index(&self) -> ProgressIndex {
        self.all_progress.iter().copied().collect()
    }

    /// Stored progress for the bundled video, zero when unwatched.
    pub fn resume_percent(&self) -> Percent {
        self.progress_index().percent_for(&self.video.id)
    }

    /// Watch-order projection of the bundled course.
    pub fn course_sequence(&self) -> CourseSequence {
        CourseSequence::new(&self.all_videos)
    }
}
