//! Declarative descriptions of API calls.
//!
//! # Design
//! "Has no body" and "has a body" are two capabilities rather than two
//! subclasses: every descriptor implements [`Request`], and descriptors that
//! carry a payload additionally implement [`RequestBody`]. The builder is
//! overloaded per capability, so a bodiless descriptor can never be built
//! with an encoder and a body-bearing one always goes through one.
//!
//! Callers usually implement the traits on their own per-endpoint types.
//! [`Endpoint`] and [`EndpointWithBody`] cover ad-hoc calls.

use serde::Serialize;

use crate::http::{HeaderKey, HeaderValue, Headers, HttpMethod};

/// Path, method and headers of one API call.
pub trait Request {
    fn endpoint_path(&self) -> &str;
    fn method(&self) -> HttpMethod;
    fn headers(&self) -> &Headers;
}

/// A request that carries a serializable body.
pub trait RequestBody: Request {
    type Body: Serialize;

    fn body(&self) -> &Self::Body;
}

/// Bodiless descriptor built in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    method: HttpMethod,
    headers: Headers,
}

impl Endpoint {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            headers: Headers::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Add a header, replacing any earlier value under the same canonical key.
    pub fn with_header(mut self, key: HeaderKey, value: HeaderValue) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Attach a body, turning this into a body-bearing descriptor.
    pub fn with_body<B: Serialize>(self, body: B) -> EndpointWithBody<B> {
        EndpointWithBody {
            endpoint: self,
            body,
        }
    }
}

impl Request for Endpoint {
    fn endpoint_path(&self) -> &str {
        &self.path
    }

    fn method(&self) -> HttpMethod {
        self.method
    }

    fn headers(&self) -> &Headers {
        &self.headers
    }
}

/// Descriptor carrying a body of type `B`.
#[derive(Debug, Clone)]
pub struct EndpointWithBody<B> {
    endpoint: Endpoint,
    body: B,
}

impl<B: Serialize> EndpointWithBody<B> {
    pub fn with_header(mut self, key: HeaderKey, value: HeaderValue) -> Self {
        self.endpoint = self.endpoint.with_header(key, value);
        self
    }
}

impl<B> Request for EndpointWithBody<B> {
    fn endpoint_path(&self) -> &str {
        self.endpoint.endpoint_path()
    }

    fn method(&self) -> HttpMethod {
        self.endpoint.method()
    }

    fn headers(&self) -> &Headers {
        self.endpoint.headers()
    }
}

impl<B: Serialize> RequestBody for EndpointWithBody<B> {
    type Body = B;

    fn body(&self) -> &B {
        &self.body
    }
}
