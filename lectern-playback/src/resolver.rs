//! Start-position resolution
//!
//! Maps stored progress to the offset playback should begin at. Invoked
//! exactly once per video-open event, at the moment the player first reports
//! its duration (the duration is unknown before readiness). The function is
//! deliberately stateless so that discipline stays with the caller; re-running
//! it on a UI re-render would force the playback head backwards.

use std::time::Duration;

use lectern_model::Percent;

/// Offset at which to start playback, given stored progress and the media
/// duration.
///
/// A fully-watched video restarts from the beginning: the playback engine
/// refuses to advance past a position already marked as ended. Anything else
/// resumes at `floor(duration_secs * percent / 100)` whole seconds.
pub fn resolve_start(stored: Percent, duration: Duration) -> Duration {
    if stored.is_complete() {
        return Duration::ZERO;
    }
    let secs = (duration.as_secs_f64() * f64::from(stored.value()) / 100.0).floor();
    Duration::from_secs(secs as u64)
}
