//! Unified error type for backend requests.
//!
//! Callers get one error channel for an attempted operation: a request
//! that never completed and a request the server rejected both surface
//! as [`ApiError`]. The variants preserve what is known, but callers are
//! not expected to branch on them for recovery - there is no client-side
//! retry.

use thiserror::Error;

/// Errors produced by the resource client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not complete (connection refused, timeout, DNS).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    ///
    /// `message` is taken from the response body's `detail` or `message`
    /// field when present, otherwise it is a generic `HTTP {status}` text.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Parse(String),
}

impl ApiError {
    /// HTTP status of a rejection, if this error is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Http(_) | Self::Parse(_) => None,
        }
    }
}
