// Allow dead code: store inspection helpers exercised by tests
#![allow(dead_code)]

//! Versioned on-disk store for mirrored static assets.
//!
//! Each cache generation is a directory named `assets-<tag>` under the cache
//! root, holding one body file and one metadata sidecar per asset. Exactly one
//! generation is current at a time; `activate` deletes every other one.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Current cache generation tag. Bump whenever the asset manifest changes to
/// invalidate prior generations on the next activation.
pub const ASSET_CACHE_VERSION: &str = "v1";

/// Generation directories are named `assets-<tag>`.
const GENERATION_PREFIX: &str = "assets-";

/// Metadata stored next to each cached body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetMeta {
    pub path: String,
    pub content_type: Option<String>,
    pub cached_at: DateTime<Utc>,
}

/// A cached asset: body bytes plus metadata.
#[derive(Debug, Clone)]
pub struct CachedAsset {
    pub meta: AssetMeta,
    pub body: Vec<u8>,
}

pub struct AssetStore {
    root: PathBuf,
    generation: PathBuf,
}

impl AssetStore {
    /// Open (creating if absent) the current cache generation under `root`.
    pub fn new(root: PathBuf) -> Result<Self> {
        Self::with_version(root, ASSET_CACHE_VERSION)
    }

    /// Open a specific generation.
    pub fn with_version(root: PathBuf, tag: &str) -> Result<Self> {
        let generation = root.join(format!("{GENERATION_PREFIX}{tag}"));
        std::fs::create_dir_all(&generation).with_context(|| {
            format!("Failed to create cache generation {}", generation.display())
        })?;
        Ok(Self { root, generation })
    }

    /// Map an asset path to a flat file name inside the generation directory.
    fn cache_key(path: &str) -> String {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            "root".to_string()
        } else {
            trimmed.replace('/', "__")
        }
    }

    fn body_path(&self, path: &str) -> PathBuf {
        self.generation.join(Self::cache_key(path))
    }

    fn meta_path(&self, path: &str) -> PathBuf {
        self.generation
            .join(format!("{}.meta.json", Self::cache_key(path)))
    }

    /// Load a cached asset. Missing and unreadable entries both come back as
    /// None; a corrupt entry is logged and treated as a miss.
    pub fn load(&self, path: &str) -> Option<CachedAsset> {
        let meta_path = self.meta_path(path);
        let body_path = self.body_path(path);
        if !meta_path.exists() || !body_path.exists() {
            return None;
        }

        let meta = match std::fs::read_to_string(&meta_path) {
            Ok(contents) => match serde_json::from_str::<AssetMeta>(&contents) {
                Ok(meta) => meta,
                Err(e) => {
                    debug!(path, error = %e, "Corrupt cache metadata, treating as miss");
                    return None;
                }
            },
            Err(e) => {
                debug!(path, error = %e, "Failed to read cache metadata, treating as miss");
                return None;
            }
        };

        match std::fs::read(&body_path) {
            Ok(body) => Some(CachedAsset { meta, body }),
            Err(e) => {
                debug!(path, error = %e, "Failed to read cached body, treating as miss");
                None
            }
        }
    }

    /// Store a copy of an asset in the current generation. Concurrent writers
    /// of the same path are last-writer-wins.
    pub fn save(&self, path: &str, content_type: Option<String>, body: &[u8]) -> Result<()> {
        let meta = AssetMeta {
            path: path.to_string(),
            content_type,
            cached_at: Utc::now(),
        };

        std::fs::write(self.body_path(path), body)
            .with_context(|| format!("Failed to write cached body for {path}"))?;
        let contents = serde_json::to_string_pretty(&meta)?;
        std::fs::write(self.meta_path(path), contents)
            .with_context(|| format!("Failed to write cache metadata for {path}"))?;
        Ok(())
    }

    /// Delete every generation directory except the current one. Returns the
    /// number of stale generations removed.
    pub fn activate(&self) -> Result<usize> {
        let mut removed = 0;
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if !name.starts_with(GENERATION_PREFIX) || entry.path() == self.generation {
                continue;
            }

            std::fs::remove_dir_all(entry.path())
                .with_context(|| format!("Failed to remove stale cache generation {name}"))?;
            info!(generation = name, "Removed stale cache generation");
            removed += 1;
        }
        Ok(removed)
    }

    /// Names of the generation directories currently on disk, current one
    /// included.
    pub fn generations(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if name.starts_with(GENERATION_PREFIX) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
