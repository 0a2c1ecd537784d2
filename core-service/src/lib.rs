//! Media retrieval gateway façade and bootstrap helpers.
//!
//! This crate serves the ancillary media of a music-server protocol
//! endpoint: user avatars, cover art and song lyrics. Storage, resizing, the
//! user datastore and the avatar provider are host-provided collaborators
//! wired in through [`GatewayDependencies`]. Desktop deployments typically
//! enable the `desktop-shims` feature (which depends on `bridge-desktop`) to
//! get the bundled placeholder avatar and a SQLite-backed datastore out of
//! the box.
//!
//! ```ignore
//! use core_service::{MediaRetrievalGateway, Request};
//! use bridge_traits::BufferedResponse;
//!
//! let mut response = BufferedResponse::new();
//! gateway
//!     .get_cover_art(&Request::from_query("id=al-42&size=300"), &mut response)
//!     .await?;
//!
//! let lyrics = gateway
//!     .get_lyrics(&Request::from_query("artist=Daft+Punk&title=Veridis+Quo"))
//!     .await?;
//! ```

pub mod avatar;
pub mod cover_art;
pub mod error;
pub mod gateway;
pub mod lyrics;
pub mod params;
pub mod responses;

#[cfg(test)]
mod testing;

pub use cover_art::DEFAULT_COVER_ART_ID;
pub use error::{ErrorCode, ErrorPayload, Result, ServiceError};
pub use gateway::{GatewayDependencies, GatewayDependenciesBuilder, MediaRetrievalGateway};
pub use params::{Request, RequestParams};
pub use responses::Lyrics;

#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
use std::sync::Arc;

#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
use bridge_traits::{ArtworkResolver, AvatarUrlProvider};
#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
use core_library::db::DatabaseConfig;
#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
use core_runtime::GatewayConfig;

/// Convenience bootstrapper for desktop hosts.
///
/// Opens (and migrates) the SQLite datastore described by `database`, and
/// serves the placeholder avatar from the bundle compiled into
/// `bridge-desktop`. Artwork resolution and avatar URLs stay host-provided.
///
/// ```ignore
/// use core_library::db::DatabaseConfig;
/// use core_runtime::GatewayConfig;
///
/// let config = GatewayConfig::from_env()?;
/// let gateway = core_service::bootstrap_desktop(
///     config,
///     DatabaseConfig::new("gateway.db"),
///     artwork_resolver,
///     avatar_provider,
/// )
/// .await?;
/// ```
#[cfg(all(feature = "desktop-shims", not(target_arch = "wasm32")))]
pub async fn bootstrap_desktop(
    config: GatewayConfig,
    database: DatabaseConfig,
    artwork: Arc<dyn ArtworkResolver>,
    avatars: Arc<dyn AvatarUrlProvider>,
) -> Result<MediaRetrievalGateway> {
    use bridge_desktop::EmbeddedResources;
    use core_library::repositories::{SqliteMediaFileRepository, SqliteUserRepository};

    let pool = core_library::db::create_pool(database).await?;

    let deps = GatewayDependencies::new(
        artwork,
        avatars,
        Arc::new(EmbeddedResources::default()),
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteMediaFileRepository::new(pool)),
    );

    MediaRetrievalGateway::new(config, deps)
}
