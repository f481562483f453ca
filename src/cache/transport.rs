//! Transport boundary for outgoing HTTP requests.
//!
//! Every request the application makes (asset fetches and the webhook POST
//! alike) is built as an `OutboundRequest` and executed through the
//! `Transport` trait, so the interception policy in `fetcher` sits at a
//! single seam and tests can observe exactly which requests reach the
//! network.

use async_trait::async_trait;
use reqwest::{header, Client, Method, StatusCode, Url};
use thiserror::Error;

/// HTTP request timeout in seconds.
/// 30s allows for slow endpoints while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Network(err.to_string())
    }
}

/// An outgoing request as seen by the interception layer.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub json_body: Option<serde_json::Value>,
}

impl OutboundRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            json_body: None,
        }
    }

    pub fn post_json(url: Url, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            url,
            json_body: Some(body),
        }
    }
}

/// A raw response from the transport, before any caching decision.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: OutboundRequest)
        -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        request: OutboundRequest,
    ) -> Result<TransportResponse, TransportError> {
        let mut builder = self.client.request(request.method, request.url);
        if let Some(body) = &request.json_body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());
        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Scripted transport for tests. Records every dispatched request and
    /// replies from a per-URL script; unscripted URLs get a plain 200.
    pub(crate) struct MockTransport {
        requests: Mutex<Vec<OutboundRequest>>,
        replies: Mutex<HashMap<String, Result<TransportResponse, TransportError>>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                replies: Mutex::new(HashMap::new()),
            }
        }

        pub(crate) fn reply(self, url: &str, reply: Result<TransportResponse, TransportError>) -> Self {
            self.replies.lock().unwrap().insert(url.to_string(), reply);
            self
        }

        pub(crate) fn reply_status(self, url: &str, status: u16, body: &[u8]) -> Self {
            self.reply(
                url,
                Ok(TransportResponse {
                    status: StatusCode::from_u16(status).unwrap(),
                    content_type: Some("text/plain".to_string()),
                    body: body.to_vec(),
                }),
            )
        }

        pub(crate) fn requests(&self) -> Vec<OutboundRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn hits(&self, url: &str) -> usize {
            self.requests
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.url.as_str() == url)
                .count()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn execute(
            &self,
            request: OutboundRequest,
        ) -> Result<TransportResponse, TransportError> {
            let url = request.url.to_string();
            self.requests.lock().unwrap().push(request.clone());

            match self.replies.lock().unwrap().get(&url) {
                Some(reply) => reply.clone(),
                None => Ok(TransportResponse {
                    status: StatusCode::OK,
                    content_type: Some("text/plain".to_string()),
                    body: b"ok".to_vec(),
                }),
            }
        }
    }
}
