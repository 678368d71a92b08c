// Uploader configuration. The endpoint used to be a literal baked into the
// upload script; it is now passed in, with env vars as the usual source.

use anyhow::{Context, Result};
use std::time::Duration;

/// Endpoint of a locally running upload server.
pub const DEFAULT_UPLOAD_URL: &str = "http://localhost:3000/api/upload";

pub const UPLOAD_URL_ENV: &str = "VIDEO_UPLOAD_URL";
pub const TIMEOUT_SECS_ENV: &str = "VIDEO_UPLOAD_TIMEOUT_SECS";

/// Where to send videos and how long to wait. `timeout: None` means the
/// request blocks until the server answers or the connection drops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploaderConfig {
    pub endpoint: String,
    pub timeout: Option<Duration>,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_UPLOAD_URL)
    }
}

impl UploaderConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        UploaderConfig {
            endpoint: endpoint.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Create a config from `VIDEO_UPLOAD_URL` and `VIDEO_UPLOAD_TIMEOUT_SECS`,
    /// falling back to the local server and no timeout.
    pub fn from_env() -> Result<Self> {
        Self::from_values(
            std::env::var(UPLOAD_URL_ENV).ok(),
            std::env::var(TIMEOUT_SECS_ENV).ok(),
        )
    }

    fn from_values(endpoint: Option<String>, timeout_secs: Option<String>) -> Result<Self> {
        let endpoint = endpoint
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UPLOAD_URL.into());
        let mut config = UploaderConfig::new(endpoint);
        if let Some(raw) = timeout_secs.filter(|s| !s.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().with_context(|| {
                format!(
                    "{} must be a whole number of seconds, got {:?}",
                    TIMEOUT_SECS_ENV, raw
                )
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_server_without_timeout() {
        let config = UploaderConfig::from_values(None, None).unwrap();
        assert_eq!(config, UploaderConfig::default());
        assert_eq!(config.endpoint, DEFAULT_UPLOAD_URL);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn reads_endpoint_and_timeout() {
        let config = UploaderConfig::from_values(
            Some("https://videos.example.com/api/upload".into()),
            Some(" 45 ".into()),
        )
        .unwrap();
        assert_eq!(config.endpoint, "https://videos.example.com/api/upload");
        assert_eq!(config.timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn blank_values_fall_back() {
        let config = UploaderConfig::from_values(Some("  ".into()), Some(String::new())).unwrap();
        assert_eq!(config, UploaderConfig::default());
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        let err = UploaderConfig::from_values(None, Some("soon".into())).unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_SECS_ENV));
    }
}
