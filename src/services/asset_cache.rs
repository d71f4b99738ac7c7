//! Offline asset cache
//!
//! The widget's fixed bundle is read into memory once at startup and served
//! from there. Anything not in the bundle falls through to the asset
//! directory on disk.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Cache bucket name; change it whenever `ASSET_MANIFEST` changes
pub const CACHE_NAME: &str = "chronodeck-v1";

/// Request paths installed into the cache
pub const ASSET_MANIFEST: &[&str] = &[
    "/",
    "/index.html",
    "/styles.css",
    "/script.js",
    "/manifest.json",
    "/assets/clock.svg",
    "/assets/timer.svg",
    "/assets/stopwatch.svg",
    "/assets/dark.svg",
    "/assets/light.svg",
];

#[derive(Debug, Clone)]
pub struct CachedAsset {
    pub body: Bytes,
    pub content_type: &'static str,
}

/// Cache summary for status reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSummary {
    pub name: String,
    pub entries: usize,
}

#[derive(Debug)]
pub struct AssetCache {
    root: PathBuf,
    entries: HashMap<String, CachedAsset>,
}

impl AssetCache {
    /// A cache with nothing installed; every lookup misses
    pub fn empty(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: HashMap::new(),
        }
    }

    /// Read every manifest entry from `root`.
    ///
    /// Installation is all or nothing: if any entry cannot be read the cache
    /// stays empty and requests go straight to disk.
    pub async fn install(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut entries = HashMap::with_capacity(ASSET_MANIFEST.len());

        for &request_path in ASSET_MANIFEST {
            let file = file_for(&root, request_path);
            match tokio::fs::read(&file).await {
                Ok(body) => {
                    entries.insert(
                        request_path.to_string(),
                        CachedAsset {
                            body: Bytes::from(body),
                            content_type: content_type_for(&file),
                        },
                    );
                }
                Err(e) => {
                    warn!(
                        "Cache {} install failed at {} ({}): {}, serving from disk only",
                        CACHE_NAME,
                        request_path,
                        file.display(),
                        e
                    );
                    return Self::empty(root);
                }
            }
        }

        info!("Cache {} installed with {} entries", CACHE_NAME, entries.len());
        Self { root, entries }
    }

    pub fn get(&self, request_path: &str) -> Option<&CachedAsset> {
        self.entries.get(request_path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> CacheSummary {
        CacheSummary {
            name: CACHE_NAME.to_string(),
            entries: self.entries.len(),
        }
    }
}

fn file_for(root: &Path, request_path: &str) -> PathBuf {
    match request_path.trim_start_matches('/') {
        "" => root.join("index.html"),
        relative => root.join(relative),
    }
}

fn content_type_for(file: &Path) -> &'static str {
    match file.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}
