//! Platform-backed asset store
//!
//! Uploads go through the authenticated files endpoint of the API; downloads are plain GETs
//! against the static file host.

use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use super::{asset_url, content_type_for, AssetStore, DEFAULT_API_URL, DEFAULT_STATIC_URL};
use crate::error::AssetError;

/// Default request timeout, matching the platform client
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: UploadedFile,
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    id: String,
}

/// Asset store talking to the platform over HTTP
#[derive(Debug, Clone)]
pub struct HttpAssetStore {
    /// Base URL of the API (uploads)
    api_base: String,
    /// Base URL of the static file host (downloads)
    static_base: String,
    /// Value of the `X-Token` header; downloads do not need one
    token: Option<String>,
    client: Client,
}

impl HttpAssetStore {
    /// Create a store against the default platform endpoints
    pub fn new(token: impl Into<String>) -> Result<Self, AssetError> {
        Self::with_urls(token, DEFAULT_API_URL, DEFAULT_STATIC_URL, DEFAULT_TIMEOUT)
    }

    /// Create a store against custom endpoints
    pub fn with_urls(
        token: impl Into<String>,
        api_base: impl Into<String>,
        static_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AssetError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            static_base: static_base.into().trim_end_matches('/').to_string(),
            token: Some(token.into()),
            client,
        })
    }

    /// Create a download-only store. Uploads fail with [`AssetError::MissingToken`].
    pub fn for_downloads(
        static_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AssetError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            api_base: DEFAULT_API_URL.to_string(),
            static_base: static_base.into().trim_end_matches('/').to_string(),
            token: None,
            client,
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn static_base(&self) -> &str {
        &self.static_base
    }

    fn check_status(response: Response) -> Result<Response, AssetError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AssetError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

impl AssetStore for HttpAssetStore {
    fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, AssetError> {
        let token = self.token.as_deref().ok_or(AssetError::MissingToken)?;
        let url = format!("{}/files", self.api_base);
        debug!(%url, filename, size = bytes.len(), "uploading asset");

        let part = Part::bytes(bytes.to_vec())
            .file_name(filename.to_string())
            .mime_str(content_type_for(filename))?;
        let form = Form::new().part("attachment", part);

        let response = self
            .client
            .post(&url)
            .header("X-Token", token)
            .multipart(form)
            .send()?;
        let body = Self::check_status(response)?.text()?;

        let parsed: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| AssetError::InvalidResponse(format!("{e}: {body}")))?;
        Ok(parsed.file.id)
    }

    fn fetch(&self, asset_id: &str) -> Result<Vec<u8>, AssetError> {
        let url = asset_url(&self.static_base, asset_id);
        debug!(%url, "downloading asset");

        let response = self.client.get(&url).send()?;
        Ok(Self::check_status(response)?.bytes()?.to_vec())
    }
}
