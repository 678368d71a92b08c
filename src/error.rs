// Error types for the upload flow. Each variant maps to one failure tier:
// the local precondition, a server-side rejection, or anything that broke
// on the way (file I/O, transport, unparseable response).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UploadError {
    /// The path did not exist. Raised before any network activity.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The server answered with anything other than 200.
    #[error("server rejected upload: {status} - {body}")]
    ServerRejected { status: u16, body: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl UploadError {
    /// True when the request never left the machine.
    pub fn is_local(&self) -> bool {
        matches!(self, UploadError::NotFound { .. } | UploadError::Io { .. })
    }
}
