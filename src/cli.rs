// Command-line surface of the `video-upload` binary.

use crate::config::UploaderConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Path used when nothing is given and there is no terminal to ask on.
pub const DEFAULT_VIDEO_PATH: &str = "example.mp4";

#[derive(Debug, Parser)]
#[command(author, version, about = "Upload a video file to the video upload server")]
pub struct Args {
    /// Video to upload. Prompted for when omitted.
    pub path: Option<PathBuf>,

    /// Upload endpoint. Overrides VIDEO_UPLOAD_URL.
    #[arg(long)]
    pub url: Option<String>,

    /// Give up after this many seconds. Overrides VIDEO_UPLOAD_TIMEOUT_SECS.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print the server's full JSON response after a successful upload.
    #[arg(long)]
    pub show_response: bool,

    /// Do not show the activity spinner while waiting for the server.
    #[arg(long)]
    pub no_spinner: bool,
}

impl Args {
    /// Apply command-line overrides on top of `base`.
    pub fn apply(&self, base: UploaderConfig) -> UploaderConfig {
        let mut config = base;
        if let Some(url) = &self.url {
            config.endpoint = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_UPLOAD_URL;

    #[test]
    fn parses_path_and_flags() {
        let args = Args::try_parse_from([
            "video-upload",
            "/tmp/videos/clip.mp4",
            "--url",
            "http://localhost:3000/upload",
            "--timeout-secs",
            "10",
            "--show-response",
        ])
        .unwrap();
        assert_eq!(args.path, Some(PathBuf::from("/tmp/videos/clip.mp4")));
        assert!(args.show_response);
        assert!(!args.no_spinner);

        let config = args.apply(UploaderConfig::default());
        assert_eq!(config.endpoint, "http://localhost:3000/upload");
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn no_overrides_keep_base_config() {
        let args = Args::try_parse_from(["video-upload"]).unwrap();
        assert!(args.path.is_none());
        let config = args.apply(UploaderConfig::default());
        assert_eq!(config.endpoint, DEFAULT_UPLOAD_URL);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn rejects_bad_timeout() {
        assert!(Args::try_parse_from(["video-upload", "--timeout-secs", "later"]).is_err());
    }
}
