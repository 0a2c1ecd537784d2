//! Static Resource Bundle Abstraction
//!
//! Fixed assets (placeholder images and the like) shipped with the server.
//! Desktop builds use the embedded bundle from `bridge-desktop`; hosts can
//! point the gateway at any other implementation.

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::error::Result;

/// Readable handle on a bundled asset.
pub type ResourceStream = Box<dyn AsyncRead + Send + Unpin>;

/// Resource bundle trait
///
/// # Contract
///
/// - Assets are addressed by logical name (e.g. `"placeholder.png"`)
/// - A missing asset is reported as [`BridgeError::NotFound`](crate::BridgeError::NotFound)
/// - Bundles are read-only and safe to share across concurrent requests
#[async_trait]
pub trait ResourceBundle: Send + Sync {
    /// Open the asset registered under `name`.
    async fn open(&self, name: &str) -> Result<ResourceStream>;

    /// Check whether an asset exists without opening it.
    async fn contains(&self, name: &str) -> bool {
        self.open(name).await.is_ok()
    }
}
