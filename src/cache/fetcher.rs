//! Fetch interception: cache-first for same-origin asset requests,
//! network-only passthrough for everything else.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use reqwest::{Method, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, warn};

use super::store::{AssetStore, CachedAsset};
use super::transport::{OutboundRequest, Transport, TransportError, TransportResponse};

/// Same-origin static assets mirrored for offline use. Cached verbatim by
/// their request path.
pub const ASSET_MANIFEST: &[&str] = &[
    "/",
    "/index.html",
    "/css/styles.css",
    "/js/app.js",
    "/manifest.json",
    "/icons/icon-192x192.png",
    "/icons/icon-512x512.png",
];

/// Maximum concurrent fetches while priming the cache.
const MAX_CONCURRENT_FETCHES: usize = 4;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Network(#[from] TransportError),

    #[error("asset {path} returned status {status}")]
    BadAssetStatus { path: String, status: StatusCode },

    #[error("invalid asset url: {0}")]
    InvalidUrl(String),

    #[error("cache store error: {0}")]
    Store(String),
}

/// Where a response was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Served {
    Cache,
    Network,
}

/// A response from the interception layer.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    pub served: Served,
}

impl From<TransportResponse> for FetchedResponse {
    fn from(response: TransportResponse) -> Self {
        Self {
            status: response.status,
            content_type: response.content_type,
            body: response.body,
            served: Served::Network,
        }
    }
}

impl FetchedResponse {
    fn from_cache(asset: CachedAsset) -> Self {
        Self {
            status: StatusCode::OK,
            content_type: asset.meta.content_type,
            body: asset.body,
            served: Served::Cache,
        }
    }
}

/// The single boundary every outgoing request passes through.
///
/// Requests outside the configured asset origin (the webhook POST included)
/// go straight to the network and never touch the store. Same-origin GETs are
/// served cache-first; a miss is fetched from the network and stored when the
/// response status is exactly 200.
pub struct AssetFetcher {
    transport: Arc<dyn Transport>,
    store: AssetStore,
    origin: Option<Url>,
}

impl AssetFetcher {
    pub fn new(transport: Arc<dyn Transport>, store: AssetStore, origin: Option<Url>) -> Self {
        Self {
            transport,
            store,
            origin,
        }
    }

    fn is_cacheable(&self, request: &OutboundRequest) -> bool {
        request.method == Method::GET
            && self
                .origin
                .as_ref()
                .is_some_and(|origin| request.url.origin() == origin.origin())
    }

    /// Dispatch one outgoing request through the interception policy.
    pub async fn dispatch(&self, request: OutboundRequest) -> Result<FetchedResponse, FetchError> {
        if !self.is_cacheable(&request) {
            return Ok(self.transport.execute(request).await?.into());
        }

        let path = request.url.path().to_string();
        if let Some(asset) = self.store.load(&path) {
            debug!(path, "Serving asset from cache");
            return Ok(FetchedResponse::from_cache(asset));
        }

        let response = self.transport.execute(request).await?;
        if response.status == StatusCode::OK {
            if let Err(e) = self
                .store
                .save(&path, response.content_type.clone(), &response.body)
            {
                warn!(path, error = %e, "Failed to store fetched asset");
            }
        }
        Ok(response.into())
    }

    /// Populate the current generation with every manifest asset.
    ///
    /// Fetches go straight to the network with bounded concurrency. Any
    /// failed or non-200 fetch fails the install; assets stored before the
    /// failure are left in place. Returns the number of assets cached, or 0
    /// without touching the network when no asset origin is configured.
    pub async fn install(&self) -> Result<usize, FetchError> {
        let Some(origin) = self.origin.clone() else {
            debug!("No asset origin configured, skipping install");
            return Ok(0);
        };

        let mut fetches = Vec::with_capacity(ASSET_MANIFEST.len());
        for path in ASSET_MANIFEST.iter().copied() {
            fetches.push(self.install_one(&origin, path));
        }
        let results: Vec<Result<(), FetchError>> = stream::iter(fetches)
            .buffer_unordered(MAX_CONCURRENT_FETCHES)
            .collect()
            .await;

        for result in results {
            result?;
        }
        Ok(ASSET_MANIFEST.len())
    }

    async fn install_one(&self, origin: &Url, path: &str) -> Result<(), FetchError> {
        let url = origin
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(format!("{path}: {e}")))?;

        let response = self.transport.execute(OutboundRequest::get(url)).await?;
        if response.status != StatusCode::OK {
            return Err(FetchError::BadAssetStatus {
                path: path.to_string(),
                status: response.status,
            });
        }

        self.store
            .save(path, response.content_type, &response.body)
            .map_err(|e| FetchError::Store(e.to_string()))?;
        debug!(path, "Cached asset");
        Ok(())
    }

    /// Prune generations from prior versions. After this only the current
    /// generation's entries remain on disk.
    pub fn activate(&self) -> Result<usize, FetchError> {
        self.store.activate().map_err(|e| FetchError::Store(e.to_string()))
    }

    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    pub fn origin(&self) -> Option<&Url> {
        self.origin.as_ref()
    }
}
