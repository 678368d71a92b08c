// Entrypoint for the uploader CLI.
// - Resolves the video path (argument, prompt, or `example.mp4`).
// - Builds the uploader from env config plus command-line overrides.
// - Exits non-zero when the upload produced no result.

use anyhow::Result;
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use video_upload_cli::cli::{Args, DEFAULT_VIDEO_PATH};
use video_upload_cli::{ui, Uploader, UploaderConfig};

fn main() -> Result<ExitCode> {
    // Logs go to stderr; stdout carries only the upload report.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = args.apply(UploaderConfig::from_env()?);
    let uploader = Uploader::new(config)?;
    tracing::info!(endpoint = uploader.endpoint(), "uploader ready");

    let path = resolve_path(&args)?;

    // Report lines go through the spinner so a tick never overdraws them.
    let spinner = (!args.no_spinner && io::stderr().is_terminal()).then(ui::upload_spinner);
    let mut out = ui::SpinnerWriter::new(io::stdout().lock(), spinner.as_ref());
    let result = uploader.upload_and_report(&path, &mut out);
    if let Some(spinner) = &spinner {
        spinner.finish_and_clear();
    }
    let mut stdout = out.into_inner();

    match result {
        Some(response) => {
            if args.show_response {
                ui::report_full_response(&mut stdout, &response)?;
            }
            Ok(ExitCode::SUCCESS)
        }
        None => Ok(ExitCode::FAILURE),
    }
}

fn resolve_path(args: &Args) -> Result<PathBuf> {
    if let Some(path) = &args.path {
        return Ok(path.clone());
    }
    if io::stdin().is_terminal() {
        return Ok(PathBuf::from(ui::prompt_video_path(DEFAULT_VIDEO_PATH)?));
    }
    Ok(PathBuf::from(DEFAULT_VIDEO_PATH))
}
