//! Pluggy client errors
//!
//! Error types for calls against the Pluggy API.

use reqwest::StatusCode;

use super::models::Resource;

/// Broad failure category surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Credentials are missing or blank
    Config,
    /// Token exchange was rejected
    Auth,
    /// Any other upstream call failed or returned an unusable body
    Upstream,
}

/// Errors that can occur while talking to Pluggy
#[derive(Debug, thiserror::Error)]
pub enum PluggyError {
    /// Credentials are not configured
    #[error("Pluggy credentials are not configured (PLUGGY_CLIENT_ID / PLUGGY_CLIENT_SECRET)")]
    MissingCredentials,

    /// POST /auth returned a non-success status
    #[error("Pluggy authentication failed: {status} {body}")]
    AuthRejected { status: StatusCode, body: String },

    /// POST /auth succeeded but carried no apiKey
    #[error("Pluggy authentication response has no apiKey")]
    MissingApiKey,

    /// Any other call returned a non-success status
    #[error("Pluggy {operation} failed: {status} {body}")]
    Upstream {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    /// Success status but the body was not what we expect
    #[error("Pluggy {operation} returned a malformed response: {reason}")]
    MalformedResponse {
        operation: &'static str,
        reason: String,
    },

    /// Network-level failure (connect, timeout, body read)
    #[error("Pluggy request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The cursor chain did not terminate within the configured bound
    #[error("Pluggy {resource} listing exceeded {max_pages} pages")]
    PageLimitExceeded { resource: Resource, max_pages: usize },
}

impl PluggyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PluggyError::MissingCredentials => ErrorKind::Config,
            PluggyError::AuthRejected { .. } | PluggyError::MissingApiKey => ErrorKind::Auth,
            PluggyError::Upstream { .. }
            | PluggyError::MalformedResponse { .. }
            | PluggyError::Transport(_)
            | PluggyError::PageLimitExceeded { .. } => ErrorKind::Upstream,
        }
    }
}
