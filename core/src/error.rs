//! Error type for the todo API client.
//!
//! # Design
//! Every failed REST call is a `FetchFailure`. The variants only refine the
//! cause for logging: `NotFound` is split out because callers frequently
//! distinguish "the resource does not exist" from "the server returned an
//! unexpected status."

use thiserror::Error;

/// A REST call returned a non-success status or could not complete.
#[derive(Debug, Error)]
pub enum FetchFailure {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
