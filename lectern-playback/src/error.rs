use thiserror::Error;

/// Errors surfaced by the playback-progress engine.
///
/// Neither variant is fatal to the hosting page. The playback session is the
/// unit of failure containment: a failed bundle fetch renders as unavailable
/// content, and a persistent flush failure degrades only resume-accuracy for
/// that one video.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The video bundle could not be retrieved. Surfaced to the UI as
    /// "content unavailable"; never retried automatically.
    #[error("content unavailable: {0:#}")]
    ContentUnavailable(#[source] anyhow::Error),

    /// A progress flush did not reach the remote store. Absorbed by the
    /// scheduler; the next tick carries whatever delta is pending.
    #[error("progress flush failed: {0:#}")]
    Flush(#[source] anyhow::Error),
}

impl PlaybackError {
    pub fn content_unavailable(err: impl Into<anyhow::Error>) -> Self {
        PlaybackError::ContentUnavailable(err.into())
    }

    pub fn flush(err: impl Into<anyhow::Error>) -> Self {
        PlaybackError::Flush(err.into())
    }
}
