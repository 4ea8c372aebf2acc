//! Typed HTTP request building and execution.
//!
//! # Overview
//! Callers describe an API call as a typed descriptor (path, method, headers,
//! optional body). `RequestBuilder` turns it into a `TransportRequest`, and
//! `RequestExecutor` sends that through an injected `Transport` and decodes
//! the response into a typed value.
//!
//! # Design
//! - Data flows one way: descriptor → builder → `TransportRequest` →
//!   executor → `Result<T, ApiError>`.
//! - The builder is synchronous and pure; the executor suspends only while
//!   the transport is in flight.
//! - Body encoding and response decoding are plain functions passed per
//!   call, with JSON defaults.
//! - No state is shared between calls, so any number may run concurrently.

pub mod builder;
pub mod error;
pub mod executor;
pub mod http;
pub mod request;
pub mod transport;
pub mod ureq_transport;

pub use builder::{encode_json, RequestBuilder};
pub use error::{ApiError, BoxError};
pub use executor::RequestExecutor;
pub use http::{HeaderKey, HeaderValue, Headers, HttpMethod, TransportRequest};
pub use request::{Endpoint, EndpointWithBody, Request, RequestBody};
pub use transport::{RawResponse, ResponseMetadata, Transport};
pub use ureq_transport::{TransportConfig, UreqTransport};
