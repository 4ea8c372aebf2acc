//! HTTP vocabulary and the transport-ready request.
//!
//! # Design
//! Methods, header keys and header values are closed sets that each reduce to
//! a canonical wire string. `Custom` variants pass their string through
//! untouched; the caller owns wire-format validity, so no casing or
//! whitespace normalisation happens here.
//!
//! `TransportRequest` is plain data. The builder produces it and the executor
//! hands it to a `Transport`, so it never refers to a concrete HTTP stack.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header field name.
///
/// Two keys are equal when their canonical strings are equal, so
/// `HeaderKey::Custom("Content-Type".into())` and `HeaderKey::ContentType`
/// occupy the same slot in a [`Headers`] map.
#[derive(Debug, Clone)]
pub enum HeaderKey {
    Authorization,
    ContentType,
    Custom(String),
}

impl HeaderKey {
    pub fn as_str(&self) -> &str {
        match self {
            HeaderKey::Authorization => "Authorization",
            HeaderKey::ContentType => "Content-Type",
            HeaderKey::Custom(key) => key,
        }
    }
}

impl PartialEq for HeaderKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for HeaderKey {}

impl Hash for HeaderKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl fmt::Display for HeaderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header field value.
#[derive(Debug, Clone)]
pub enum HeaderValue {
    ApplicationJson,
    Custom(String),
}

impl HeaderValue {
    pub fn as_str(&self) -> &str {
        match self {
            HeaderValue::ApplicationJson => "application/json",
            HeaderValue::Custom(value) => value,
        }
    }
}

impl PartialEq for HeaderValue {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for HeaderValue {}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Headers declared by a request descriptor. Inserting a key whose canonical
/// string is already present replaces the earlier value.
pub type Headers = HashMap<HeaderKey, HeaderValue>;

/// A fully formed request, ready to be dispatched by a `Transport`.
///
/// Header fields are keyed by canonical strings. The map is ordered so that
/// logs and test assertions are stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl TransportRequest {
    /// Look up a header field by its canonical name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}
