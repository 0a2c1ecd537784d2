//! Artwork Resolution Abstraction
//!
//! The artwork storage engine lives outside the gateway. It owns caching,
//! resizing and on-disk layout; the gateway only asks it for a byte stream.

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::error::Result;

/// Exclusively owned image byte stream handed out by an [`ArtworkResolver`].
///
/// Dropping the stream releases whatever the resolver holds behind it
/// (file handle, cache entry, pooled buffer).
pub type ArtworkStream = Box<dyn AsyncRead + Send + Unpin>;

/// Artwork resolver trait
///
/// Maps an opaque artwork identifier and a requested pixel size to an image
/// byte stream.
///
/// # Contract
///
/// - `size == 0` means the natural/original size of the stored image
/// - Absence must be reported as [`BridgeError::NotFound`](crate::BridgeError::NotFound)
///   so callers can tell "doesn't exist" apart from infrastructure failure
/// - Any other error is treated as an upstream failure and propagated as-is
///
/// # Example
///
/// ```ignore
/// use bridge_traits::artwork::ArtworkResolver;
/// use tokio::io::AsyncReadExt;
///
/// async fn load(resolver: &dyn ArtworkResolver) -> Result<Vec<u8>> {
///     let mut stream = resolver.get("al-42", 300).await?;
///     let mut buf = Vec::new();
///     stream.read_to_end(&mut buf).await?;
///     Ok(buf)
/// }
/// ```
#[async_trait]
pub trait ArtworkResolver: Send + Sync {
    /// Open the artwork identified by `id`, scaled to `size` pixels.
    async fn get(&self, id: &str, size: u32) -> Result<ArtworkStream>;
}
