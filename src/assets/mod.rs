//! Static asset lookup.
//!
//! The router only needs "give me the bytes behind this path, or nothing",
//! so the frontend build directory and the in-memory map used by tests both
//! sit behind [`AssetSource`].

use std::{collections::HashMap, path::Path};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request},
};
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait AssetSource: Send + Sync {
    /// `path` is the request path as received, leading slash and percent
    /// escapes included.
    async fn fetch(&self, path: &str) -> Option<Asset>;
}

/// Files under a directory on disk, served through [`ServeDir`].
///
/// `/` and `dir/` resolve to `index.html`. Paths escaping the root and
/// directories without a trailing slash are not assets.
#[derive(Debug, Clone)]
pub struct DirAssets {
    dir: ServeDir,
}

impl DirAssets {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            dir: ServeDir::new(root),
        }
    }
}

#[async_trait]
impl AssetSource for DirAssets {
    async fn fetch(&self, path: &str) -> Option<Asset> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .ok()?;

        let response = match self.dir.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        if !response.status().is_success() {
            return None;
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        match axum::body::to_bytes(Body::new(response.into_body()), usize::MAX).await {
            Ok(bytes) => Some(Asset {
                content_type,
                bytes: bytes.to_vec(),
            }),
            Err(e) => {
                debug!(path, error = %e, "Static asset unreadable");
                None
            }
        }
    }
}

/// Assets held in memory, keyed by request path (`/index.html`, `/css/app.css`).
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: HashMap<String, Asset>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, content_type: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content_type, bytes);
        self
    }

    pub fn insert(&mut self, path: &str, content_type: &str, bytes: impl Into<Vec<u8>>) {
        let key = format!("/{}", path.trim_start_matches('/'));
        self.files.insert(
            key,
            Asset {
                content_type: content_type.to_string(),
                bytes: bytes.into(),
            },
        );
    }
}

#[async_trait]
impl AssetSource for MemoryAssets {
    async fn fetch(&self, path: &str) -> Option<Asset> {
        let key = if path.ends_with('/') {
            format!("{path}index.html")
        } else {
            path.to_string()
        };
        self.files.get(&key).cloned()
    }
}
