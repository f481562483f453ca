//! Webhook client for submitting logged entries.
//!
//! The remote side is a single configured endpoint that accepts one JSON
//! `Entry` per POST. Any 2xx status is success; everything else (or a
//! transport failure) surfaces as an `ApiError` and leaves retry to the user.

use std::sync::Arc;

use reqwest::Url;
use tracing::{debug, info};

use crate::cache::{AssetFetcher, OutboundRequest};
use crate::models::Entry;

use super::ApiError;

/// Client for the configured webhook endpoint.
/// Clone is cheap - the fetcher is shared behind an Arc.
#[derive(Clone)]
pub struct WebhookClient {
    fetcher: Arc<AssetFetcher>,
    url: Url,
}

impl WebhookClient {
    pub fn new(fetcher: Arc<AssetFetcher>, url: Url) -> Self {
        Self { fetcher, url }
    }

    /// Submit one entry. The request goes through the fetch boundary, where
    /// cross-origin POSTs pass straight to the network.
    pub async fn submit(&self, entry: &Entry) -> Result<(), ApiError> {
        let body = serde_json::to_value(entry)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to serialize entry: {e}")))?;

        debug!(url = %self.url, "Submitting entry");
        let response = self
            .fetcher
            .dispatch(OutboundRequest::post_json(self.url.clone(), body))
            .await?;

        if response.status.is_success() {
            info!(status = %response.status, "Entry accepted");
            Ok(())
        } else {
            let body = String::from_utf8_lossy(&response.body);
            Err(ApiError::from_status(response.status, &body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::transport::testing::MockTransport;
    use crate::cache::{AssetStore, TransportError};
    use crate::models::DiaperType;
    use chrono::{TimeZone, Utc};
    use reqwest::Method;
    use tempfile::tempdir;

    const WEBHOOK: &str = "https://hooks.example.net/webhook/tracker";

    fn entry() -> Entry {
        let ts = Utc.with_ymd_and_hms(2026, 8, 6, 14, 30, 0).unwrap();
        Entry::new(ts, Some(4.0), Some(DiaperType::Poop))
    }

    fn client(transport: MockTransport, root: &std::path::Path) -> (WebhookClient, Arc<MockTransport>) {
        let transport = Arc::new(transport);
        let store = AssetStore::new(root.to_path_buf()).unwrap();
        let fetcher = Arc::new(AssetFetcher::new(transport.clone(), store, None));
        (
            WebhookClient::new(fetcher, Url::parse(WEBHOOK).unwrap()),
            transport,
        )
    }

    #[tokio::test]
    async fn test_submit_success_on_2xx() {
        let dir = tempdir().unwrap();
        let transport = MockTransport::new().reply_status(WEBHOOK, 201, b"created");
        let (client, transport) = client(transport, dir.path());

        client.submit(&entry()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].url.as_str(), WEBHOOK);
        assert_eq!(
            requests[0].json_body,
            Some(serde_json::to_value(entry()).unwrap())
        );
    }

    #[tokio::test]
    async fn test_submit_maps_server_error() {
        let dir = tempdir().unwrap();
        let transport = MockTransport::new().reply_status(WEBHOOK, 500, b"boom");
        let (client, _) = client(transport, dir.path());

        let err = client.submit(&entry()).await.unwrap_err();
        assert!(matches!(err, ApiError::ServerError(_)));
    }

    #[tokio::test]
    async fn test_submit_maps_network_failure() {
        let dir = tempdir().unwrap();
        let transport = MockTransport::new().reply(
            WEBHOOK,
            Err(TransportError::Network("dns failure".to_string())),
        );
        let (client, _) = client(transport, dir.path());

        let err = client.submit(&entry()).await.unwrap_err();
        assert!(matches!(err, ApiError::NetworkError(_)));
    }

    #[tokio::test]
    async fn test_submit_never_touches_the_asset_store() {
        let dir = tempdir().unwrap();
        let (client, _) = client(MockTransport::new(), dir.path());

        client.submit(&entry()).await.unwrap();
        client.submit(&entry()).await.unwrap();

        let store = AssetStore::new(dir.path().to_path_buf()).unwrap();
        assert!(store.load("/webhook/tracker").is_none());
    }
}
