//! In-process asset store.

use super::AssetStore;
use crate::error::AssetError;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Inner {
    assets: HashMap<String, Vec<u8>>,
    uploads: Vec<(String, String)>,
}

/// Asset store that keeps everything in memory.
///
/// Uploads are assigned the ids `asset-1`, `asset-2`, … in call order. Used by the test
/// suites and by offline conversions where no platform is reachable.
#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    inner: Mutex<Inner>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `bytes` available under `asset_id`, as if uploaded earlier.
    pub fn insert(&self, asset_id: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.lock().assets.insert(asset_id.into(), bytes.into());
    }

    /// `(asset id, file name)` of every upload so far, in call order.
    pub fn uploads(&self) -> Vec<(String, String)> {
        self.lock().uploads.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl AssetStore for MemoryAssetStore {
    fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, AssetError> {
        let mut inner = self.lock();
        let id = format!("asset-{}", inner.uploads.len() + 1);
        inner.assets.insert(id.clone(), bytes.to_vec());
        inner.uploads.push((id.clone(), filename.to_string()));
        Ok(id)
    }

    fn fetch(&self, asset_id: &str) -> Result<Vec<u8>, AssetError> {
        self.lock()
            .assets
            .get(asset_id)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(asset_id.to_string()))
    }
}
