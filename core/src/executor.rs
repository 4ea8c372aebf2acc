//! Sends transport-ready requests and decodes their responses.
//!
//! # Design
//! Every `execute*` call performs exactly one dispatch through the injected
//! `Transport` and resolves to exactly one of: a decoded value, a transport
//! error, a decoding error, or an ambiguous response (no error and no body).
//! Failures are returned, never logged or retried here.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ApiError, BoxError};
use crate::http::TransportRequest;
use crate::transport::Transport;
use crate::ureq_transport::UreqTransport;

/// Executes requests over an injected transport.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
}

impl RequestExecutor {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Execute `request` and decode the response body as JSON.
    pub async fn execute<T: DeserializeOwned>(&self, request: TransportRequest) -> Result<T, ApiError> {
        self.execute_with(request, |bytes: &[u8]| serde_json::from_slice(bytes))
            .await
    }

    /// Execute `request` and decode the response body with `decode`.
    ///
    /// `decode` is called at most once, and only when the transport returned
    /// a body.
    pub async fn execute_with<T, F, E>(&self, request: TransportRequest, decode: F) -> Result<T, ApiError>
    where
        F: FnOnce(&[u8]) -> Result<T, E>,
        E: Into<BoxError>,
    {
        debug!(
            method = %request.method,
            url = %request.url,
            body_len = request.body.as_ref().map_or(0, Vec::len),
            "dispatching request"
        );
        let response = self.transport.send(request).await.map_err(ApiError::Transport)?;
        let bytes = response.body.ok_or(ApiError::AmbiguousResponse)?;
        decode(&bytes).map_err(|e| ApiError::Decoding(e.into()))
    }
}

impl Default for RequestExecutor {
    fn default() -> Self {
        Self::new(UreqTransport::default())
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use thiserror::Error;

    use super::*;
    use crate::http::HttpMethod;
    use crate::transport::{RawResponse, ResponseMetadata};

    #[derive(Debug, Error)]
    #[error("fake failure")]
    struct FakeError;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct FakeDecodable {
        id: String,
    }

    fn fake_decodable() -> FakeDecodable {
        FakeDecodable {
            id: "someId".to_string(),
        }
    }

    enum Reply {
        Data(Vec<u8>),
        Error,
        Nothing,
    }

    struct FakeTransport {
        reply: Reply,
        calls: AtomicUsize,
        last_request: Mutex<Option<TransportRequest>>,
    }

    impl FakeTransport {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: TransportRequest) -> Result<RawResponse, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            match &self.reply {
                Reply::Data(bytes) => Ok(RawResponse::with_body(bytes.clone())),
                Reply::Error => Err(Box::new(FakeError)),
                Reply::Nothing => Ok(RawResponse {
                    body: None,
                    metadata: Some(ResponseMetadata {
                        status: 204,
                        headers: Vec::new(),
                    }),
                }),
            }
        }
    }

    fn request() -> TransportRequest {
        TransportRequest {
            method: HttpMethod::Get,
            url: "http://google.com".to_string(),
            headers: Default::default(),
            body: None,
        }
    }

    fn data_transport() -> Arc<FakeTransport> {
        FakeTransport::new(Reply::Data(serde_json::to_vec(&fake_decodable()).unwrap()))
    }

    #[tokio::test]
    async fn dispatches_the_request_once() {
        let transport = data_transport();
        let executor = RequestExecutor::new(transport.clone());

        let _: Result<FakeDecodable, _> = executor.execute(request()).await;

        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert_eq!(transport.last_request.lock().unwrap().as_ref(), Some(&request()));
    }

    #[tokio::test]
    async fn returned_data_is_decoded() {
        let executor = RequestExecutor::new(data_transport());

        let decoded: FakeDecodable = executor.execute(request()).await.unwrap();

        assert_eq!(decoded, fake_decodable());
    }

    #[tokio::test]
    async fn transport_error_skips_decoding() {
        let transport = FakeTransport::new(Reply::Error);
        let executor = RequestExecutor::new(transport.clone());
        let decode_calls = AtomicUsize::new(0);

        let err = executor
            .execute_with(request(), |bytes: &[u8]| {
                decode_calls.fetch_add(1, Ordering::SeqCst);
                serde_json::from_slice::<FakeDecodable>(bytes)
            })
            .await
            .unwrap_err();

        match err {
            ApiError::Transport(cause) => assert!(cause.downcast_ref::<FakeError>().is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(decode_calls.load(Ordering::SeqCst), 0);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn custom_decoder_result_is_returned() {
        let executor = RequestExecutor::new(data_transport());
        let decode_calls = AtomicUsize::new(0);

        let value = executor
            .execute_with(request(), |bytes: &[u8]| {
                decode_calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, FakeError>(bytes.len())
            })
            .await
            .unwrap();

        assert_eq!(value, serde_json::to_vec(&fake_decodable()).unwrap().len());
        assert_eq!(decode_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn custom_decoder_failure_is_decoding_error() {
        let executor = RequestExecutor::new(data_transport());
        let decode_calls = AtomicUsize::new(0);

        let err = executor
            .execute_with(request(), |_: &[u8]| {
                decode_calls.fetch_add(1, Ordering::SeqCst);
                Err::<FakeDecodable, _>(FakeError)
            })
            .await
            .unwrap_err();

        match err {
            ApiError::Decoding(cause) => assert!(cause.downcast_ref::<FakeError>().is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(decode_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn mismatched_json_is_decoding_error() {
        let executor = RequestExecutor::new(FakeTransport::new(Reply::Data(br#"{"other":1}"#.to_vec())));

        let err = executor.execute::<FakeDecodable>(request()).await.unwrap_err();

        assert!(matches!(err, ApiError::Decoding(_)));
    }

    #[tokio::test]
    async fn neither_data_nor_error_is_ambiguous() {
        let executor = RequestExecutor::new(FakeTransport::new(Reply::Nothing));
        let decode_calls = AtomicUsize::new(0);

        let err = executor
            .execute_with(request(), |bytes: &[u8]| {
                decode_calls.fetch_add(1, Ordering::SeqCst);
                serde_json::from_slice::<FakeDecodable>(bytes)
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::AmbiguousResponse));
        assert_eq!(decode_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn concurrent_calls_are_independent() {
        let transport = data_transport();
        let executor = RequestExecutor::new(transport.clone());

        let (a, b) = tokio::join!(
            executor.execute::<FakeDecodable>(request()),
            executor.execute::<FakeDecodable>(request()),
        );

        assert_eq!(a.unwrap(), fake_decodable());
        assert_eq!(b.unwrap(), fake_decodable());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }
}
