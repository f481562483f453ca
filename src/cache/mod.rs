//! Offline-first asset caching.
//!
//! This module mirrors the tracker's static assets locally so the app keeps
//! working without a network connection:
//!
//! - `store`: versioned on-disk cache generations with activation pruning
//! - `fetcher`: the interception policy (cache-first for same-origin GETs,
//!   network-only passthrough for everything else)
//! - `transport`: the HTTP seam every outgoing request goes through

pub mod fetcher;
pub mod store;
pub mod transport;

pub use fetcher::{AssetFetcher, FetchError, FetchedResponse, Served, ASSET_MANIFEST};
pub use store::{AssetStore, CachedAsset, ASSET_CACHE_VERSION};
pub use transport::{
    HttpTransport, OutboundRequest, Transport, TransportError, TransportResponse,
};
