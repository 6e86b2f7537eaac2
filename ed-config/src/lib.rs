//! Shared configuration loader for the edconv toolchain.
//!
//! `defaults/edconv.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`EdConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use ed_babel::transforms::{EdToMarkdownOptions, MarkdownToEdOptions};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TOML: &str = include_str!("../defaults/edconv.default.toml");

/// Name of the optional per-project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "edconv.toml";

/// Top-level configuration consumed by edconv.
#[derive(Debug, Clone, Deserialize)]
pub struct EdConfig {
    pub api: ApiConfig,
    pub assets: AssetsConfig,
    pub render: RenderConfig,
}

/// Where and how to reach the platform API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub token_env: String,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    pub static_base_url: String,
    pub image_extension: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub download_images: bool,
}

impl EdConfig {
    /// Options for Markdown → Ed-XML, resolving images relative to `base_dir`.
    pub fn markdown_to_ed_options(&self, base_dir: Option<PathBuf>) -> MarkdownToEdOptions {
        MarkdownToEdOptions {
            asset_base_url: self.assets.static_base_url.clone(),
            base_dir,
        }
    }

    /// Options for Ed-XML → Markdown, downloading images into `asset_folder`.
    pub fn ed_to_markdown_options(&self, asset_folder: PathBuf) -> EdToMarkdownOptions {
        EdToMarkdownOptions {
            asset_folder,
            download_images: self.render.download_images,
            image_extension: self.assets.image_extension.clone(),
            document_dir: None,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<EdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<EdConfig, ConfigError> {
    Loader::new().build()
}
