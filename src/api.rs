// Upload client: a small blocking HTTP client that sends one video to the
// upload server as multipart/form-data and reads back what the server
// stored. Synchronous on purpose; one request per call, no retries.

use crate::config::UploaderConfig;
use crate::error::UploadError;
use crate::ui;
use anyhow::{Context, Result};
use reqwest::blocking::{multipart, Client};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Multipart field the server reads the video from.
pub const VIDEO_FIELD: &str = "video";
/// Declared media type. The bytes themselves are never inspected.
pub const VIDEO_MIME: &str = "video/mp4";
const FALLBACK_FILE_NAME: &str = "video.mp4";

/// What the server stored. Only `filename` and `size` are guaranteed; the
/// remaining fields are filled in when the server sends them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedVideo {
    pub filename: String,
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a 200 response from the upload endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UploadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: UploadedVideo,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Blocking uploader bound to one endpoint.
#[derive(Clone)]
pub struct Uploader {
    client: Client,
    config: UploaderConfig,
}

impl Uploader {
    /// Build the underlying HTTP client. A timeout is only applied when the
    /// config asks for one; otherwise requests wait indefinitely.
    pub fn new(config: UploaderConfig) -> Result<Self> {
        // The blocking client defaults to 30s, so `None` has to be explicit.
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Uploader { client, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Upload the video at `path`. A missing file fails with
    /// [`UploadError::NotFound`] without touching the network; any status
    /// other than 200 is [`UploadError::ServerRejected`].
    pub fn upload(&self, path: &Path) -> Result<UploadResponse, UploadError> {
        ensure_exists(path)?;
        self.send(path)
    }

    /// Same as [`Uploader::upload`], but prints each stage to `out` and folds
    /// every failure into `None`. Nothing is propagated to the caller.
    pub fn upload_and_report<W: Write>(
        &self,
        path: &Path,
        out: &mut W,
    ) -> Option<UploadResponse> {
        let outcome = ensure_exists(path).and_then(|_| {
            let _ = ui::report_start(out, &base_name(path));
            self.send(path)
        });
        match outcome {
            Ok(response) => {
                let _ = ui::report_success(out, &response);
                Some(response)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "upload failed");
                let _ = ui::report_failure(out, &err);
                None
            }
        }
    }

    fn send(&self, path: &Path) -> Result<UploadResponse, UploadError> {
        let io_err = |source| UploadError::Io {
            path: path.to_path_buf(),
            source,
        };

        // The file handle moves into the multipart part and is dropped with
        // the request, whichever way `send` returns.
        let file = File::open(path).map_err(io_err)?;
        let metadata = file.metadata().map_err(io_err)?;
        if !metadata.is_file() {
            return Err(io_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        let len = metadata.len();
        let part = multipart::Part::reader_with_length(file, len)
            .file_name(base_name(path))
            .mime_str(VIDEO_MIME)?;
        let form = multipart::Form::new().part(VIDEO_FIELD, part);

        debug!(endpoint = %self.config.endpoint, bytes = len, "sending upload");
        let res = self.client.post(&self.config.endpoint).multipart(form).send()?;

        let status = res.status();
        debug!(status = status.as_u16(), "upload response received");
        if status != StatusCode::OK {
            let body = res.text().unwrap_or_else(|_| "".into());
            return Err(UploadError::ServerRejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = res.text()?;
        let response: UploadResponse = serde_json::from_str(&body)?;
        Ok(response)
    }
}

fn ensure_exists(path: &Path) -> Result<(), UploadError> {
    if path.exists() {
        Ok(())
    } else {
        Err(UploadError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Final path component, used as the multipart filename so directory
/// names never reach the server.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn base_name_drops_directories() {
        assert_eq!(base_name(Path::new("/tmp/videos/clip.mp4")), "clip.mp4");
        assert_eq!(base_name(Path::new("clip.mov")), "clip.mov");
    }

    #[test]
    fn base_name_falls_back_without_file_component() {
        assert_eq!(base_name(Path::new("/")), FALLBACK_FILE_NAME);
        assert_eq!(base_name(Path::new("videos/..")), FALLBACK_FILE_NAME);
    }

    #[test]
    fn parses_full_server_response() {
        let body = r#"{
            "success": true,
            "message": "Video uploaded successfully!",
            "data": {
                "filename": "clip-1700000000000-42.mp4",
                "originalName": "clip.mp4",
                "size": 1234,
                "savedTo": "videos/clip-1700000000000-42.mp4",
                "uploadedAt": "2024-01-01T00:00:00.000Z"
            }
        }"#;
        let resp: UploadResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.success, Some(true));
        assert_eq!(resp.data.filename, "clip-1700000000000-42.mp4");
        assert_eq!(resp.data.size, 1234);
        assert_eq!(resp.data.original_name.as_deref(), Some("clip.mp4"));
        assert_eq!(resp.data.saved_to.as_deref(), Some("videos/clip-1700000000000-42.mp4"));
        assert!(resp.data.extra.is_empty());
    }

    #[test]
    fn minimal_response_keeps_unknown_fields() {
        let body = r#"{"data":{"filename":"x.mp4","size":1234,"codec":"h264"},"requestId":"abc"}"#;
        let resp: UploadResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.data.filename, "x.mp4");
        assert_eq!(resp.data.size, 1234);
        assert_eq!(resp.success, None);
        assert_eq!(resp.data.extra.get("codec"), Some(&Value::from("h264")));
        assert_eq!(resp.extra.get("requestId"), Some(&Value::from("abc")));
    }

    #[test]
    fn response_without_data_is_rejected() {
        let result = serde_json::from_str::<UploadResponse>(r#"{"success":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_fails_before_sending() {
        let uploader = Uploader::new(UploaderConfig::new("http://127.0.0.1:9/api/upload")).unwrap();
        let path = PathBuf::from("/definitely/not/here/clip.mp4");
        let err = uploader.upload(&path).unwrap_err();
        assert!(matches!(err, UploadError::NotFound { .. }));
    }
}
