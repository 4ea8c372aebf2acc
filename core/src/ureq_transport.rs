//! Default `Transport` backed by a blocking `ureq` agent.
//!
//! Each request runs on tokio's blocking pool so the caller's task is only
//! suspended while the round-trip is in flight. 4xx/5xx responses are data,
//! not errors; interpreting status codes is left to the decoder.

use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;
use ureq::Agent;

use crate::error::BoxError;
use crate::http::{HttpMethod, TransportRequest};
use crate::transport::{RawResponse, ResponseMetadata, Transport};

/// Settings for the underlying `ureq` agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Upper bound on the whole request/response cycle. `None` waits forever.
    pub timeout: Option<Duration>,
    /// Responses with larger bodies fail with a transport error.
    pub max_response_bytes: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            max_response_bytes: 10 * 1024 * 1024,
        }
    }
}

/// `Transport` that dispatches requests through a shared `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
    max_response_bytes: u64,
}

impl UreqTransport {
    pub fn new(config: TransportConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self {
            agent,
            max_response_bytes: config.max_response_bytes,
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: TransportRequest) -> Result<RawResponse, BoxError> {
        let agent = self.agent.clone();
        let limit = self.max_response_bytes;
        let response = tokio::task::spawn_blocking(move || send_blocking(&agent, request, limit)).await??;
        Ok(response)
    }
}

fn send_blocking(agent: &Agent, request: TransportRequest, limit: u64) -> Result<RawResponse, ureq::Error> {
    let TransportRequest {
        method,
        url,
        headers,
        body,
    } = request;

    let mut response = match method {
        HttpMethod::Get => {
            let mut builder = agent.get(&url);
            for (key, value) in &headers {
                builder = builder.header(key, value);
            }
            match body {
                Some(body) => builder.force_send_body().send(&body[..])?,
                None => builder.call()?,
            }
        }
        HttpMethod::Post => {
            let mut builder = agent.post(&url);
            for (key, value) in &headers {
                builder = builder.header(key, value);
            }
            match body {
                Some(body) => builder.send(&body[..])?,
                None => builder.send_empty()?,
            }
        }
    };

    let metadata = ResponseMetadata {
        status: response.status().as_u16(),
        headers: response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect(),
    };
    let bytes = response.body_mut().with_config().limit(limit).read_to_vec()?;
    trace!(status = metadata.status, body_len = bytes.len(), %url, "received response");

    // Empty bodies are reported as absent.
    Ok(RawResponse {
        body: (!bytes.is_empty()).then_some(bytes),
        metadata: Some(metadata),
    })
}
