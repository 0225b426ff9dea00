use chrono::{DateTime, Utc};
use url::Url;

use crate::ids::{CourseID, VideoID};
use crate::numbers::SequenceIndex;

/// A single video within a course
///
/// Owned by the catalog side and immutable once fetched. A course contains
/// many videos; a video belongs to exactly one course. The playable URL is
/// never part of the record itself; it travels separately, bundle by
/// bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Video {
    pub id: VideoID,
    pub course_id: CourseID,
    /// 1-based ordinal within the owning course
    pub index: SequenceIndex,
    pub name: String,
    pub description: String,
    /// Free-sample videos are viewable without owning the course
    pub free: bool,
    pub image_url: Url,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
