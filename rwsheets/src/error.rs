//! Error types for the rwsheets library

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the library
#[derive(Debug, Error)]
pub enum SheetsError {
    /// A date string did not match the supplied layout
    #[error("unable to parse date: {0}")]
    Parse(#[from] chrono::ParseError),

    #[error("unable to read contents of credential file {path}")]
    ReadCredentials {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to read contents of token file {path}")]
    ReadToken {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to cache oauth token at path {path}")]
    SaveToken {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OAuth client configuration could not be built
    #[error("failed to create oauth2 config: {0}")]
    Config(String),

    #[error("unable to read authorization code: {0}")]
    Prompt(String),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the Sheets or OAuth endpoints
    #[error("api returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no sheet data found")]
    NoData,
}

pub type Result<T> = std::result::Result<T, SheetsError>;

impl SheetsError {
    /// Whether the request that produced this error is worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            SheetsError::Api { status, .. } => *status == 429 || *status >= 500,
            SheetsError::Http(err) => err.is_timeout() || err.is_connect(),
            _ => false,
        }
    }
}
