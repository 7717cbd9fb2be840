//! CLI command handlers. Each command is in its own file.

mod config_path;
mod upload;

pub use config_path::run_config_path;
pub use upload::{run_upload, UploadArgs};
