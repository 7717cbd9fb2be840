pub mod config;
pub mod logging;

pub mod client;
pub mod credentials;
pub mod discover;
pub mod error;
pub mod target;
pub mod upload;

pub use error::UploadError;
pub use upload::{upload_all, upload_to_web_server, UploadOptions, UploadResult};
