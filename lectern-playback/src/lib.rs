//! Playback-progress synchronization for Lectern course videos
//!
//! This crate is the client-side engine that resumes a video at the viewer's
//! last watched position, samples ongoing playback without touching any
//! render-facing state, periodically flushes only-changed progress to the
//! platform, and orders a course's videos for prev/next navigation.
//!
//! ## Key Concepts
//!
//! - **Bundle**: the combined payload of a video, its course siblings,
//!   progress records, and playable URL, fetched as one unit
//!   ([`VideoBundle`]).
//! - **Flush**: a network write persisting the currently observed percentage
//!   upstream, attempted once per tick and only when the value moved
//!   ([`SyncScheduler`]).
//! - **Session**: the transient per-video state (position cell plus flush
//!   cadence) created when playback starts and discarded on navigation
//!   ([`PlaybackSession`]).
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use lectern_model::VideoID;
//! use lectern_playback::{ApiClient, PlaybackConfig, PlaybackController, resolve_start};
//!
//! async fn open_video(video_id: VideoID) -> anyhow::Result<()> {
//!     let config = PlaybackConfig::load();
//!     let client = Arc::new(ApiClient::new(&config)?);
//!
//!     let bundle = client.video_bundle(&video_id).await?;
//!     let mut controller =
//!         PlaybackController::new(Arc::clone(&client), config.flush_interval());
//!     let session = controller.open(video_id);
//!
//!     // once the player reports readiness and its duration becomes known:
//!     let duration = Duration::from_secs(600);
//!     let start = resolve_start(bundle.resume_percent(), duration);
//!     // player.seek(start); then, from the player's time-update callback:
//!     session.report_position(start, duration);
//!     Ok(())
//! }
//! ```

pub mod api_client;
pub mod api_types;
pub mod config;
pub mod error;
pub mod navigator;
pub mod resolver;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod tracker;

// Intentionally curated re-exports for downstream consumers.
pub use api_client::ApiClient;
pub use api_types::VideoBundle;
pub use config::PlaybackConfig;
pub use error::PlaybackError;
pub use navigator::{CourseSequence, Neighbors};
pub use resolver::resolve_start;
pub use scheduler::{DEFAULT_FLUSH_INTERVAL, FlushOutcome, SyncScheduler};
pub use session::{PlaybackController, PlaybackSession};
pub use store::ProgressStore;
pub use tracker::PositionTracker;
