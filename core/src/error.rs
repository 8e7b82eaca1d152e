//! Error types for the blog API client and the sample data store.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers routinely treat
//! "the article does not exist" as a normal outcome rather than a failure.
//! `Validation` covers both the backend's 422 and emails the signup form
//! rejects before sending. Every other non-2xx response lands in `Server`
//! with the raw status code and body for diagnostics.

use thiserror::Error;

/// Errors returned by `BlogClient` parse methods and by request executors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The round trip never completed: no connectivity, DNS failure, reset.
    #[error("network error: {0}")]
    Network(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the payload (422) or the input was malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The server returned a non-2xx status other than 404 and 422.
    #[error("HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Errors raised while assembling a `SampleStore`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate article id {0:?}")]
    DuplicateId(String),

    /// An article's category slug has no matching category id.
    #[error("article {article_id:?} references unknown category {slug:?}")]
    UnknownCategory { article_id: String, slug: String },

    #[error("invalid bundled data: {0}")]
    InvalidData(String),
}
