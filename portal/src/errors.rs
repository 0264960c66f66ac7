//! Error types for the deployment portal

use thiserror::Error;

/// Main error type for the portal
///
/// None of these reach callers of [`crate::store::reports::ReportStore`];
/// the store folds them into its fallback path.
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    StatusError { status: http::StatusCode, url: String },

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),
}
