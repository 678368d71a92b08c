// UI layer: human-readable status lines for each stage of an upload, plus
// the interactive bits used by the binary (path prompt, spinner).
//
// Report functions take any `io::Write` so the binary prints to stdout and
// tests can capture the text.

use crate::api::UploadResponse;
use crate::error::UploadError;
use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

pub fn report_start<W: Write>(out: &mut W, file_name: &str) -> io::Result<()> {
    writeln!(out, "📤 Uploading {}...", file_name)
}

pub fn report_success<W: Write>(out: &mut W, response: &UploadResponse) -> io::Result<()> {
    writeln!(out, "✅ Upload successful!")?;
    writeln!(out, "   Saved as: {}", response.data.filename)?;
    writeln!(out, "   Size: {} bytes", response.data.size)
}

/// One message per failure kind. Rejections always show the status code
/// and the raw response text.
pub fn report_failure<W: Write>(out: &mut W, err: &UploadError) -> io::Result<()> {
    match err {
        UploadError::NotFound { path } => {
            writeln!(out, "❌ Error: File not found: {}", path.display())
        }
        UploadError::ServerRejected { status, body } => {
            writeln!(out, "❌ Upload failed: {}", status)?;
            writeln!(out, "   Error: {}", body)?;
            if let Some(msg) = server_error_message(body) {
                writeln!(out, "   Server message: {}", msg)?;
            }
            Ok(())
        }
        other => writeln!(out, "❌ Error uploading video: {}", other),
    }
}

/// Pretty-printed copy of the whole response body.
pub fn report_full_response<W: Write>(out: &mut W, response: &UploadResponse) -> io::Result<()> {
    let pretty = serde_json::to_string_pretty(response).map_err(io::Error::other)?;
    writeln!(out)?;
    writeln!(out, "📋 Full response:")?;
    writeln!(out, "{}", pretty)
}

/// The upload server answers errors as `{"error": "..."}`. Pull that
/// message out when present; the raw body is printed either way.
fn server_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}

/// Ask for a video path on the terminal.
pub fn prompt_video_path(default: &str) -> Result<String> {
    let path: String = Input::new()
        .with_prompt("Video file path")
        .default(default.to_string())
        .interact_text()?;
    Ok(path)
}

/// Spinner shown while the blocking request is in flight. It only signals
/// activity; there is no byte-level progress.
pub fn upload_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Waiting for the upload server...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Writer that hides the spinner around every write, so report lines are
/// never overdrawn by a spinner tick.
pub struct SpinnerWriter<'a, W: Write> {
    inner: W,
    spinner: Option<&'a ProgressBar>,
}

impl<'a, W: Write> SpinnerWriter<'a, W> {
    pub fn new(inner: W, spinner: Option<&'a ProgressBar>) -> Self {
        SpinnerWriter { inner, spinner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for SpinnerWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let inner = &mut self.inner;
        match self.spinner {
            Some(spinner) => spinner.suspend(|| -> io::Result<usize> {
                let n = inner.write(buf)?;
                inner.flush()?;
                Ok(n)
            }),
            None => inner.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let inner = &mut self.inner;
        match self.spinner {
            Some(spinner) => spinner.suspend(|| inner.flush()),
            None => inner.flush(),
        }
    }
}
