//! Render-decoupled position sampling
//!
//! The player fires time updates many times per second. Those samples land in
//! a plain shared cell, never in any reactive or render-facing state: a store
//! here wakes nothing up, so sampling cannot feed back into the rendering
//! pipeline and desynchronize the player from its own progress bar. The sync
//! scheduler reads the cell on its own timer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;

use lectern_model::Percent;

/// Shared cell holding the most recently observed completion percentage.
///
/// Cloning yields another handle onto the same cell. The UI's time-update
/// callback is the only writer; the scheduler is the only reader.
#[derive(Debug, Clone, Default)]
pub struct PositionTracker {
    observed: Arc<AtomicU8>,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a player-reported position.
    ///
    /// Converts to `floor(position * 100 / duration)`, clamped to `[0, 100]`.
    /// Called at native time-update frequency; a relaxed atomic store is the
    /// entire cost.
    pub fn observe(&self, position: Duration, duration: Duration) {
        let percent = Percent::from_position(position, duration);
        self.observed.store(percent.value(), Ordering::Relaxed);
    }

    /// Latest observed percentage, zero before the first sample.
    pub fn observed(&self) -> Percent {
        Percent::new(self.observed.load(Ordering::Relaxed))
    }
}
