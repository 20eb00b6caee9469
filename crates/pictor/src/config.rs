//! Image viewer configuration.
//!
//! Everything has a compiled-in default, so a configuration file is never
//! required. When one is present it is TOML with kebab-case keys:
//!
//! ```toml
//! seed-path = "~/Pictures"
//! image-extensions = ["jpg", "png"]
//! response-ordering = "latest-request"
//! asset-root = "/opt/pictor/renderer"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Path listed when the viewer starts.
pub const DEFAULT_SEED_PATH: &str = "./";

/// Extensions shown as image frames by default.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];

/// Which listing response the viewer renders when requests overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseOrdering {
    /// Only the response to the most recent request is rendered; responses to
    /// superseded requests are discarded.
    #[default]
    LatestRequest,
    /// Every response is rendered as it arrives, including answers to
    /// superseded requests. Each render replaces the containers' children,
    /// so the last response to arrive is what stays on screen.
    LastResponse,
}

/// Errors loading a [`ViewerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid TOML for [`ViewerConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// An image extension was empty or contained a dot.
    #[error("invalid image extension: {0:?}")]
    InvalidExtension(String),
}

/// Configuration for an [`ImageViewer`](crate::ImageViewer).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ViewerConfig {
    /// Path fired through the input when the viewer starts.
    pub seed_path: String,
    /// File extensions, without the dot, rendered as image frames.
    /// Matching is case-sensitive.
    pub image_extensions: Vec<String>,
    /// How overlapping listing responses are handled.
    pub response_ordering: ResponseOrdering,
    /// Asset root handed to the directory lister. `None` keeps the lister's
    /// install-relative default.
    pub asset_root: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            seed_path: DEFAULT_SEED_PATH.to_string(),
            image_extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            response_ordering: ResponseOrdering::default(),
            asset_root: None,
        }
    }
}

impl ViewerConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set the seed path.
    pub fn with_seed_path(mut self, seed_path: impl Into<String>) -> Self {
        self.seed_path = seed_path.into();
        self
    }

    /// Set the image extensions.
    pub fn with_image_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the response ordering.
    pub fn with_response_ordering(mut self, ordering: ResponseOrdering) -> Self {
        self.response_ordering = ordering;
        self
    }

    /// Set the asset root.
    pub fn with_asset_root(mut self, asset_root: impl Into<PathBuf>) -> Self {
        self.asset_root = Some(asset_root.into());
        self
    }

    /// Returns true if `filename` ends with `.<ext>` for a configured extension.
    pub fn is_image(&self, filename: &str) -> bool {
        self.image_extensions.iter().any(|ext| {
            filename
                .strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self
            .image_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.contains('.'))
        {
            Some(ext) => Err(ConfigError::InvalidExtension(ext.clone())),
            None => Ok(()),
        }
    }
}
