use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Client-side playback settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    pub server_url: String,
    /// Seconds between progress flush attempts while a video is open.
    pub flush_interval_secs: u64,
    /// Per-request HTTP timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            flush_interval_secs: 20,
            request_timeout_secs: 30,
        }
    }
}

impl PlaybackConfig {
    pub fn load() -> Self {
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("lectern").join("config.json");
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = serde_json::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<(), std::io::Error> {
        if let Some(config_dir) = dirs::config_dir() {
            let app_dir = config_dir.join("lectern");
            std::fs::create_dir_all(&app_dir)?;
            let config_path = app_dir.join("config.json");
            let content = serde_json::to_string_pretty(self)?;
            std::fs::write(config_path, content)?;
        }
        Ok(())
    }

    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_sync_design() {
        let config = PlaybackConfig::default();
        assert_eq!(config.flush_interval(), Duration::from_secs(20));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = PlaybackConfig {
            server_url: "https://api.lectern.test".to_string(),
            flush_interval_secs: 5,
            request_timeout_secs: 10,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: PlaybackConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.server_url, config.server_url);
        assert_eq!(back.flush_interval_secs, 5);
    }
}
