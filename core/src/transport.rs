//! The seam between the executor and a concrete HTTP stack.
//!
//! # Design
//! A transport sends one `TransportRequest` and reports what came back: an
//! error, or a response whose body and metadata may each be missing. It
//! promises nothing about retries, timeouts or redirects. The executor
//! receives a transport at construction time, so tests can substitute a fake.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BoxError;
use crate::http::TransportRequest;

/// Status line and headers of a received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMetadata {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

/// What a transport received for a request that did not fail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub body: Option<Vec<u8>>,
    pub metadata: Option<ResponseMetadata>,
}

impl RawResponse {
    pub fn with_body(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: Some(body.into()),
            metadata: None,
        }
    }
}

/// Sends requests over some network stack.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<RawResponse, BoxError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: TransportRequest) -> Result<RawResponse, BoxError> {
        (**self).send(request).await
    }
}
