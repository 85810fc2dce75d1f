//! Error types shared by the transport, repository and form layers.

use thiserror::Error;

/// Backend configuration problems, detected before any request is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing backend setting {0}")]
    Missing(&'static str),

    #[error("backend URL must start with http:// or https://, got {0:?}")]
    InvalidUrl(String),
}

/// Failures raised while building or sending a request.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    #[error("invalid request: {0}")]
    InvalidRequest(#[from] http::Error),

    #[error("unsupported method {0}")]
    UnsupportedMethod(http::Method),

    #[error("network error: {0}")]
    Network(String),
}

/// Errors surfaced by [`crate::api::ReviewRepository`].
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Failed to fetch reviews: {0}")]
    Fetch(u16),

    /// Carries the backend's response body, or `Submit failed: {status}`
    /// when the body was empty.
    #[error("{0}")]
    Submit(String),

    #[error("malformed review payload: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("could not encode review: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// User-facing validation failures for the review form. The display text is
/// shown to the visitor verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a star rating.")]
    MissingRating,

    #[error("Review must be at least 10 characters.")]
    TooShort,

    #[error("Review must be under 2000 characters.")]
    TooLong,
}
