//! Placeholder resource bundles for desktop builds

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    resources::{ResourceBundle, ResourceStream},
};
use bytes::Bytes;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Logical name of the bundled placeholder avatar
pub const PLACEHOLDER_AVATAR: &str = "placeholder.png";

const PLACEHOLDER_AVATAR_PNG: &[u8] = include_bytes!("../resources/placeholder.png");

/// Resource bundle compiled into the binary
///
/// The default bundle carries the placeholder avatar. Extra assets can be
/// registered with [`EmbeddedResources::with_asset`].
#[derive(Debug, Clone)]
pub struct EmbeddedResources {
    assets: HashMap<String, Bytes>,
}

impl EmbeddedResources {
    /// Create a bundle with no assets at all
    pub fn empty() -> Self {
        Self {
            assets: HashMap::new(),
        }
    }

    /// Register (or replace) an asset
    pub fn with_asset(mut self, name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.assets.insert(name.into(), data.into());
        self
    }

    /// Names of all registered assets
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assets.keys().map(String::as_str)
    }
}

impl Default for EmbeddedResources {
    fn default() -> Self {
        Self::empty().with_asset(
            PLACEHOLDER_AVATAR,
            Bytes::from_static(PLACEHOLDER_AVATAR_PNG),
        )
    }
}

#[async_trait]
impl ResourceBundle for EmbeddedResources {
    async fn open(&self, name: &str) -> Result<ResourceStream> {
        let data = self
            .assets
            .get(name)
            .cloned()
            .ok_or_else(|| BridgeError::NotFound(name.to_string()))?;
        Ok(Box::new(Cursor::new(data)))
    }

    async fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }
}

/// Resource bundle backed by a directory on disk
///
/// Lets operators override bundled assets without rebuilding. Only plain
/// relative names are served; anything that could escape the root is
/// reported as not found.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let plain = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if name.is_empty() || !plain {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[async_trait]
impl ResourceBundle for DirectoryResources {
    async fn open(&self, name: &str) -> Result<ResourceStream> {
        let path = self
            .resolve(name)
            .ok_or_else(|| BridgeError::NotFound(name.to_string()))?;

        match fs::File::open(&path).await {
            Ok(file) => {
                debug!(path = ?path, "Opened resource");
                Ok(Box::new(file))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BridgeError::NotFound(name.to_string()))
            }
            Err(e) => Err(BridgeError::Io(e)),
        }
    }
}
