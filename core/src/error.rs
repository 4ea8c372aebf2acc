//! Error types for building and executing requests.
//!
//! # Design
//! Build failures surface synchronously from `RequestBuilder`; everything the
//! executor can hit comes back through the same `Result` as a decoded value.
//! Causes are boxed and passed through unchanged, so callers can downcast a
//! transport or decoder error back to the concrete type they supplied.

use thiserror::Error;

/// Opaque, thread-safe error cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `RequestBuilder` and `RequestExecutor`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encoding(#[source] BoxError),

    /// The transport reported an error. The decoder was not invoked.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The response body could not be decoded into the expected type.
    #[error("failed to decode response body: {0}")]
    Decoding(#[source] BoxError),

    /// The transport returned neither a body nor an error.
    #[error("ambiguous response: transport returned neither data nor an error")]
    AmbiguousResponse,
}
