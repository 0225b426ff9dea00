//! HTTP client for the catalog collaborator
//!
//! The engine's entire upstream surface is two endpoints: fetching a video
//! bundle and putting back a progress percentage. Auth, sessions, and the
//! rest of the platform API belong to the hosting application.

use std::fmt;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use lectern_model::{Percent, VideoID};

use crate::api_types::VideoBundle;
use crate::config::PlaybackConfig;
use crate::error::PlaybackError;
use crate::store::ProgressStore;

/// Client for the platform's video endpoints.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl ApiClient {
    /// Build a client from the playback configuration.
    pub fn new(config: &PlaybackConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("failed to build HTTP client")?;

        // a trailing slash keeps Url::join appending instead of replacing
        let mut base = config.server_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .with_context(|| format!("invalid server url: {}", config.server_url))?;

        log::info!("[ApiClient] using server at {base_url}");
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid endpoint path: {path}"))
    }

    /// Fetch the full bundle for a video.
    ///
    /// Any failure (transport, status, malformed payload) surfaces as
    /// [`PlaybackError::ContentUnavailable`]; the engine does not retry
    /// bundle fetches.
    pub async fn video_bundle(&self, video_id: &VideoID) -> Result<VideoBundle, PlaybackError> {
        self.fetch_bundle(video_id)
            .await
            .map_err(PlaybackError::content_unavailable)
    }

    async fn fetch_bundle(&self, video_id: &VideoID) -> Result<VideoBundle> {
        let url = self.endpoint(&format!("videos/{video_id}/full"))?;
        log::debug!("[ApiClient] GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("bundle request failed")?
            .error_for_status()
            .context("bundle request rejected")?;

        response
            .json()
            .await
            .context("malformed bundle payload")
    }

    /// Persist an observed percentage for a video. Idempotent upstream.
    pub async fn update_progress(
        &self,
        video_id: &VideoID,
        percent: Percent,
    ) -> Result<(), PlaybackError> {
        self.put_progress_inner(video_id, percent)
            .await
            .map_err(PlaybackError::flush)
    }

    async fn put_progress_inner(&self, video_id: &VideoID, percent: Percent) -> Result<()> {
        #[derive(Serialize)]
        struct ProgressUp {
            progress: Percent,
        }

        let url = self.endpoint(&format!("videos/{video_id}/progress"))?;
        log::debug!("[ApiClient] PUT {url} ({percent})");

        self.client
            .put(url)
            .json(&ProgressUp { progress: percent })
            .send()
            .await
            .context("progress request failed")?
            .error_for_status()
            .context("progress request rejected")?;

        Ok(())
    }
}

#[async_trait]
impl ProgressStore for ApiClient {
    async fn put_progress(
        &self,
        video_id: VideoID,
        percent: Percent,
    ) -> Result<(), PlaybackError> {
        self.update_progress(&video_id, percent).await
    }
}
