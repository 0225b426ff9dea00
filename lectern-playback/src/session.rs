//! Per-video playback session lifecycle
//!
//! A [`PlaybackSession`] owns the transient state that exists only while a
//! given video is being watched: the position cell and the flush cadence.
//! The [`PlaybackController`] guarantees single ownership of that cadence:
//! the previous session's timer is torn down before a new one is armed, so
//! two videos' progress can never cross-talk.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use lectern_model::{Percent, VideoID};

use crate::scheduler::SyncScheduler;
use crate::store::ProgressStore;
use crate::tracker::PositionTracker;

/// Transient per-video state: the tracker cell plus the running flush task.
///
/// Created when playback starts for a video, discarded when the viewer
/// navigates away. Dropping the session cancels its scheduler.
#[derive(Debug)]
pub struct PlaybackSession {
    video_id: VideoID,
    tracker: PositionTracker,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PlaybackSession {
    /// Arm the flush cadence for `video_id`.
    ///
    /// Must be called from within a Tokio runtime; the scheduler runs as a
    /// spawned task until the session is stopped or dropped.
    pub fn start<S: ProgressStore + 'static>(
        video_id: VideoID,
        store: Arc<S>,
        flush_interval: Duration,
    ) -> Self {
        let tracker = PositionTracker::new();
        let cancel = CancellationToken::new();
        let scheduler = SyncScheduler::new(video_id, tracker.clone(), store, flush_interval);
        let task = tokio::spawn(scheduler.run(cancel.clone()));
        log::debug!("playback session started for video {video_id}");

        Self { video_id, tracker, cancel, task }
    }

    pub fn video_id(&self) -> VideoID {
        self.video_id
    }

    /// Handle for wiring the player's time-update callback.
    pub fn tracker(&self) -> PositionTracker {
        self.tracker.clone()
    }

    /// The time-update hook: record the player's current position.
    pub fn report_position(&self, position: Duration, duration: Duration) {
        self.tracker.observe(position, duration);
    }

    /// Latest observed completion percentage.
    pub fn observed(&self) -> Percent {
        self.tracker.observed()
    }

    /// Tear the session down deterministically.
    pub fn stop(self) {
        // Drop does the actual work
        log::debug!("playback session stopped for video {}", self.video_id);
    }
}

impl Drop for PlaybackSession {
    fn drop(&mut self) {
        self.cancel.cancel();
        self.task.abort();
    }
}

/// Owns at most one [`PlaybackSession`] and enforces cancel-before-arm on
/// video switches.
pub struct PlaybackController<S> {
    store: Arc<S>,
    flush_interval: Duration,
    session: Option<PlaybackSession>,
}

impl<S> fmt::Debug for PlaybackController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("flush_interval", &self.flush_interval)
            .field("open_video", &self.session.as_ref().map(|s| s.video_id()))
            .finish()
    }
}

impl<S: ProgressStore + 'static> PlaybackController<S> {
    pub fn new(store: Arc<S>, flush_interval: Duration) -> Self {
        Self { store, flush_interval, session: None }
    }

    /// Open a video: any previous session is cancelled first, then a fresh
    /// cadence is armed.
    pub fn open(&mut self, video_id: VideoID) -> &PlaybackSession {
        if let Some(previous) = self.session.take() {
            previous.stop();
        }
        let session = PlaybackSession::start(video_id, Arc::clone(&self.store), self.flush_interval);
        self.session.insert(session)
    }

    /// Tear down without a replacement (view teardown).
    pub fn close(&mut self) {
        if let Some(session) = self.session.take() {
            session.stop();
        }
    }

    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }
}
