// Library root
// -----------
// The binary (`main.rs`) wires these modules together; tests drive the
// uploader directly against a stub server.
//
// Module responsibilities:
// - `api`: the blocking uploader and the response types of the upload
//   endpoint.
// - `error`: the tagged error returned by `Uploader::upload`.
// - `config`: endpoint and timeout, loaded from the environment.
// - `ui`: status messages, the path prompt and the spinner.
// - `cli`: command-line arguments.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod ui;

pub use api::{UploadResponse, UploadedVideo, Uploader};
pub use config::UploaderConfig;
pub use error::UploadError;
