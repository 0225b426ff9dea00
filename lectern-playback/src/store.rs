use async_trait::async_trait;
use lectern_model::{Percent, VideoID};

use crate::error::PlaybackError;

/// Upstream sink for observed playback progress.
///
/// The narrow seam between the sync scheduler and the transport layer,
/// implemented by [`ApiClient`](crate::ApiClient) in production and by stubs
/// in tests. `put_progress` must be idempotent: after a transport failure the
/// scheduler retries with the same or a larger percentage on its next tick.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn put_progress(&self, video_id: VideoID, percent: Percent)
    -> Result<(), PlaybackError>;
}
