//! Periodic progress flushing
//!
//! A two-state loop (idle / flushing) that wakes on a fixed period while a
//! video is open, reads the tracker's latest sample, and pushes it upstream
//! only when it differs from the last value the store accepted. There is no
//! explicit retry or backoff: a failed flush leaves the marker untouched, so
//! the next tick re-attempts whatever delta has accumulated. That periodic
//! retry is the delivery mechanism (best-effort at-least-once, at most one
//! period of staleness after a transient failure), not an accident.
//!
//! The loop awaits each in-flight request before taking the next tick, so
//! flushes are never pipelined and the flushed marker only ever records a
//! value sampled before its request went out.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use lectern_model::{Percent, VideoID};

use crate::store::ProgressStore;
use crate::tracker::PositionTracker;

/// Period between flush attempts while a video is open.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(20);

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Observed progress equals the last flushed value; nothing was sent.
    Unchanged,
    /// The store accepted the carried percentage.
    Flushed(Percent),
    /// The store rejected the write or the transport failed; the flushed
    /// marker is untouched and the next tick retries.
    Failed,
}

/// Periodically flushes tracked progress for one video.
///
/// Owns the `last_flushed` marker exclusively; the tracker cell is its only
/// other input. One scheduler exists per playback session and dies with it.
pub struct SyncScheduler<S> {
    video_id: VideoID,
    tracker: PositionTracker,
    store: Arc<S>,
    interval: Duration,
    last_flushed: Percent,
}

impl<S> fmt::Debug for SyncScheduler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncScheduler")
            .field("video_id", &self.video_id)
            .field("interval", &self.interval)
            .field("last_flushed", &self.last_flushed)
            .finish()
    }
}

impl<S: ProgressStore> SyncScheduler<S> {
    pub fn new(
        video_id: VideoID,
        tracker: PositionTracker,
        store: Arc<S>,
        interval: Duration,
    ) -> Self {
        Self {
            video_id,
            tracker,
            store,
            interval,
            // Starts at zero for every session; the first changed observation
            // is flushed once even if the store already holds it (the PUT is
            // idempotent).
            last_flushed: Percent::ZERO,
        }
    }

    /// Last percentage the store accepted, as sampled at request time.
    pub fn last_flushed(&self) -> Percent {
        self.last_flushed
    }

    /// Run the flush cadence until `cancel` fires.
    ///
    /// Cancellation is observed between ticks; switching videos or tearing
    /// the view down cancels this loop before a new one may be armed.
    pub async fn run(mut self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // an interval yields immediately; the first flush window opens one
        // full period after playback starts
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    self.flush_if_changed().await;
                }
            }
        }
        log::debug!("progress sync stopped for video {}", self.video_id);
    }

    /// Flush the current observation if it moved since the last accepted one.
    pub async fn flush_if_changed(&mut self) -> FlushOutcome {
        let observed = self.tracker.observed();
        if observed == self.last_flushed {
            return FlushOutcome::Unchanged;
        }

        // `observed` is pinned here; anything the player reports while the
        // request is in flight stays pending for the next tick.
        match self.store.put_progress(self.video_id, observed).await {
            Ok(()) => {
                log::debug!("flushed progress {observed} for video {}", self.video_id);
                self.last_flushed = observed;
                FlushOutcome::Flushed(observed)
            }
            Err(err) => {
                log::warn!("progress flush for video {} failed: {err}", self.video_id);
                FlushOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::anyhow;
    use mockall::Sequence;
    use mockall::predicate::eq;

    use super::*;
    use crate::error::PlaybackError;
    use crate::store::MockProgressStore;

    fn scheduler_with(
        video_id: VideoID,
        tracker: PositionTracker,
        store: MockProgressStore,
    ) -> SyncScheduler<MockProgressStore> {
        SyncScheduler::new(video_id, tracker, Arc::new(store), DEFAULT_FLUSH_INTERVAL)
    }

    #[tokio::test]
    async fn unchanged_progress_is_never_flushed() {
        // no expectations registered: any call would panic the mock
        let store = MockProgressStore::new();
        let mut scheduler = scheduler_with(VideoID::new(), PositionTracker::new(), store);

        assert_eq!(scheduler.flush_if_changed().await, FlushOutcome::Unchanged);
        assert_eq!(scheduler.last_flushed(), Percent::ZERO);
    }

    #[tokio::test]
    async fn accepted_flush_advances_the_marker() {
        let video_id = VideoID::new();
        let tracker = PositionTracker::new();
        tracker.observe(Duration::from_secs(40), Duration::from_secs(100));

        let mut store = MockProgressStore::new();
        store
            .expect_put_progress()
            .with(eq(video_id), eq(Percent::new(40)))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut scheduler = scheduler_with(video_id, tracker, store);
        assert_eq!(
            scheduler.flush_if_changed().await,
            FlushOutcome::Flushed(Percent::new(40)),
        );
        assert_eq!(scheduler.last_flushed(), Percent::new(40));

        // same observation again: the next tick carries nothing
        assert_eq!(scheduler.flush_if_changed().await, FlushOutcome::Unchanged);
    }

    #[tokio::test]
    async fn failed_flush_is_retried_with_fresh_progress() {
        // A flush of 55 fails; playback continues to 57 before the next
        // tick. Exactly one successful PUT goes out, carrying 57, and the
        // marker stays at zero in between.
        let video_id = VideoID::new();
        let tracker = PositionTracker::new();
        let duration = Duration::from_secs(100);

        let mut store = MockProgressStore::new();
        let mut seq = Sequence::new();
        store
            .expect_put_progress()
            .with(eq(video_id), eq(Percent::new(55)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(PlaybackError::flush(anyhow!("store unreachable"))));
        store
            .expect_put_progress()
            .with(eq(video_id), eq(Percent::new(57)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let mut scheduler = scheduler_with(video_id, tracker.clone(), store);

        tracker.observe(Duration::from_secs(55), duration);
        assert_eq!(scheduler.flush_if_changed().await, FlushOutcome::Failed);
        assert_eq!(scheduler.last_flushed(), Percent::ZERO);

        tracker.observe(Duration::from_secs(57), duration);
        assert_eq!(
            scheduler.flush_if_changed().await,
            FlushOutcome::Flushed(Percent::new(57)),
        );
        assert_eq!(scheduler.last_flushed(), Percent::new(57));
    }

    #[tokio::test]
    async fn marker_records_the_pre_request_sample() {
        // Progress advances while the request is in flight; the marker must
        // keep the value sampled when the request was issued, so the fresher
        // value is flushed by a later tick instead of being swallowed.
        let video_id = VideoID::new();
        let tracker = PositionTracker::new();
        let duration = Duration::from_secs(100);
        tracker.observe(Duration::from_secs(55), duration);

        let mut store = MockProgressStore::new();
        let in_flight = tracker.clone();
        store.expect_put_progress().times(1).returning(move |_, _| {
            in_flight.observe(Duration::from_secs(57), duration);
            Ok(())
        });

        let mut scheduler = scheduler_with(video_id, tracker.clone(), store);
        assert_eq!(
            scheduler.flush_if_changed().await,
            FlushOutcome::Flushed(Percent::new(55)),
        );
        assert_eq!(scheduler.last_flushed(), Percent::new(55));
        // the mid-flight advance is still pending
        assert_ne!(tracker.observed(), scheduler.last_flushed());
    }

    /// Recording stub for driving [`SyncScheduler::run`] under a paused
    /// clock, where mock expectation ordering is awkward.
    #[derive(Default)]
    struct RecordingStore {
        puts: Mutex<Vec<u8>>,
    }

    impl RecordingStore {
        fn puts(&self) -> Vec<u8> {
            self.puts.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ProgressStore for RecordingStore {
        async fn put_progress(
            &self,
            _video_id: VideoID,
            percent: Percent,
        ) -> Result<(), PlaybackError> {
            self.puts.lock().unwrap().push(percent.value());
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn run_flushes_per_period_and_stops_on_cancel() {
        let video_id = VideoID::new();
        let tracker = PositionTracker::new();
        let store = Arc::new(RecordingStore::default());
        let duration = Duration::from_secs(100);

        let scheduler =
            SyncScheduler::new(video_id, tracker.clone(), Arc::clone(&store), DEFAULT_FLUSH_INTERVAL);
        let cancel = CancellationToken::new();
        let task = tokio::spawn(scheduler.run(cancel.clone()));

        tracker.observe(Duration::from_secs(30), duration);
        tokio::time::sleep(Duration::from_secs(21)).await;
        assert_eq!(store.puts(), vec![30]);

        // nothing new observed: the next tick stays quiet
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(store.puts(), vec![30]);

        tracker.observe(Duration::from_secs(55), duration);
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(store.puts(), vec![30, 55]);

        cancel.cancel();
        task.await.expect("scheduler task");

        // cancelled cadence stays silent no matter how far playback moves
        tracker.observe(Duration::from_secs(90), duration);
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(store.puts(), vec![30, 55]);
    }
}
