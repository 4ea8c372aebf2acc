//! Turns request descriptors into transport-ready requests.
//!
//! # Design
//! `RequestBuilder` holds only a base URL and a set of default headers; it
//! carries no state between calls and never touches the network. Body
//! encoding is a plain function passed per call, with JSON as the default.
//! Encoding failures are returned synchronously from the `build_*` call that
//! triggered them.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, BoxError};
use crate::http::{HeaderKey, HeaderValue, Headers, TransportRequest};
use crate::request::{Request, RequestBody};

/// Stateless converter from descriptors to `TransportRequest` values.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: String,
    default_headers: Headers,
}

impl RequestBuilder {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_headers: Headers::new(),
        }
    }

    /// Register a header sent with every request. A descriptor header with
    /// the same canonical key takes precedence.
    pub fn with_default_header(mut self, key: HeaderKey, value: HeaderValue) -> Self {
        self.default_headers.insert(key, value);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request without a body.
    pub fn build<R: Request + ?Sized>(&self, request: &R) -> TransportRequest {
        let built = TransportRequest {
            method: request.method(),
            url: self.url_for(request.endpoint_path()),
            headers: self.header_fields(request.headers()),
            body: None,
        };
        debug!(method = %built.method, url = %built.url, "built request");
        built
    }

    /// Build a request whose body is encoded as JSON.
    pub fn build_with_body<R: RequestBody + ?Sized>(
        &self,
        request: &R,
    ) -> Result<TransportRequest, ApiError> {
        self.build_with_encoder(request, encode_json)
    }

    /// Build a request whose body is produced by `encode`.
    ///
    /// `Ok(None)` from the encoder leaves the body absent.
    pub fn build_with_encoder<R, F, E>(
        &self,
        request: &R,
        encode: F,
    ) -> Result<TransportRequest, ApiError>
    where
        R: RequestBody + ?Sized,
        F: FnOnce(&R::Body) -> Result<Option<Vec<u8>>, E>,
        E: Into<BoxError>,
    {
        let mut built = self.build(request);
        built.body = encode(request.body()).map_err(|e| ApiError::Encoding(e.into()))?;
        debug!(
            body_len = built.body.as_ref().map_or(0, Vec::len),
            "encoded request body"
        );
        Ok(built)
    }

    fn url_for(&self, endpoint_path: &str) -> String {
        format!("{}/{}", self.base_url, endpoint_path.trim_start_matches('/'))
    }

    fn header_fields(&self, headers: &Headers) -> BTreeMap<String, String> {
        self.default_headers
            .iter()
            .chain(headers.iter())
            .map(|(key, value)| (key.as_str().to_string(), value.as_str().to_string()))
            .collect()
    }
}

/// Default body encoder: serialize `body` to JSON bytes.
pub fn encode_json<B: Serialize + ?Sized>(body: &B) -> Result<Option<Vec<u8>>, serde_json::Error> {
    serde_json::to_vec(body).map(Some)
}
