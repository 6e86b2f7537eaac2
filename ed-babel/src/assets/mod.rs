//! Asset transfer capability
//!
//! Converting Markdown to Ed-XML uploads every referenced image, and converting back may
//! download them again. Both conversions only see the [`AssetStore`] trait, so the tree walks
//! stay free of network code and tests can substitute [`MemoryAssetStore`].

#[cfg(feature = "http")]
pub mod http;
pub mod memory;

use crate::error::AssetError;
use url::Url;

#[cfg(feature = "http")]
pub use http::HttpAssetStore;
pub use memory::MemoryAssetStore;

/// Default base URL of the platform API
pub const DEFAULT_API_URL: &str = "https://edstem.org/api";

/// Default base URL images are served from
pub const DEFAULT_STATIC_URL: &str = "https://static.au.edusercontent.com";

/// Upload and download of binary assets by opaque id.
///
/// Implementations decide on transport, authentication and retries. The converters treat every
/// call as "succeeds or returns an error".
pub trait AssetStore: Send + Sync {
    /// Store `bytes` under `filename` and return the id the platform assigned.
    fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, AssetError>;

    /// Retrieve the bytes of a previously stored asset.
    fn fetch(&self, asset_id: &str) -> Result<Vec<u8>, AssetError>;
}

/// Public URL of an uploaded asset.
pub fn asset_url(static_base: &str, asset_id: &str) -> String {
    format!("{}/files/{}", static_base.trim_end_matches('/'), asset_id)
}

/// Extract the asset id from an image `src`.
///
/// The id is the path segment following `files`, or the last segment when the URL has no
/// `files` segment. Relative sources are treated as bare paths.
pub fn asset_id_from_src(src: &str) -> Option<String> {
    let path = match Url::parse(src) {
        Ok(url) => url.path().to_string(),
        Err(_) => src
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let id = match segments.iter().position(|s| *s == "files") {
        Some(index) => segments.get(index + 1).copied(),
        None => segments.last().copied(),
    };
    id.map(str::to_string)
}

/// Content type announced for an uploaded file, guessed from its extension.
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
