//! Gateway façade and its collaborator bundle.

use std::sync::Arc;

use bridge_traits::{ArtworkResolver, AvatarUrlProvider, ResourceBundle};
use core_library::repositories::{MediaFileRepository, UserRepository};
use core_runtime::GatewayConfig;
use tracing::info;

use crate::error::{Result, ServiceError};

/// Aggregated handle to every collaborator the gateway consumes.
pub struct GatewayDependencies {
    pub artwork: Arc<dyn ArtworkResolver>,
    pub avatars: Arc<dyn AvatarUrlProvider>,
    pub resources: Arc<dyn ResourceBundle>,
    pub users: Arc<dyn UserRepository>,
    pub media_files: Arc<dyn MediaFileRepository>,
}

impl GatewayDependencies {
    /// Construct a dependency bundle from explicit handles.
    pub fn new(
        artwork: Arc<dyn ArtworkResolver>,
        avatars: Arc<dyn AvatarUrlProvider>,
        resources: Arc<dyn ResourceBundle>,
        users: Arc<dyn UserRepository>,
        media_files: Arc<dyn MediaFileRepository>,
    ) -> Self {
        Self {
            artwork,
            avatars,
            resources,
            users,
            media_files,
        }
    }

    pub fn builder() -> GatewayDependenciesBuilder {
        GatewayDependenciesBuilder::default()
    }
}

/// Incremental assembly of [`GatewayDependencies`]
///
/// Useful when hosts wire collaborators from different places; `build`
/// reports the first one that was never supplied.
#[derive(Default)]
pub struct GatewayDependenciesBuilder {
    artwork: Option<Arc<dyn ArtworkResolver>>,
    avatars: Option<Arc<dyn AvatarUrlProvider>>,
    resources: Option<Arc<dyn ResourceBundle>>,
    users: Option<Arc<dyn UserRepository>>,
    media_files: Option<Arc<dyn MediaFileRepository>>,
}

impl GatewayDependenciesBuilder {
    pub fn artwork(mut self, resolver: Arc<dyn ArtworkResolver>) -> Self {
        self.artwork = Some(resolver);
        self
    }

    pub fn avatars(mut self, provider: Arc<dyn AvatarUrlProvider>) -> Self {
        self.avatars = Some(provider);
        self
    }

    pub fn resources(mut self, bundle: Arc<dyn ResourceBundle>) -> Self {
        self.resources = Some(bundle);
        self
    }

    pub fn users(mut self, repository: Arc<dyn UserRepository>) -> Self {
        self.users = Some(repository);
        self
    }

    pub fn media_files(mut self, repository: Arc<dyn MediaFileRepository>) -> Self {
        self.media_files = Some(repository);
        self
    }

    pub fn build(self) -> Result<GatewayDependencies> {
        Ok(GatewayDependencies {
            artwork: require(self.artwork, "ArtworkResolver")?,
            avatars: require(self.avatars, "AvatarUrlProvider")?,
            resources: require(self.resources, "ResourceBundle")?,
            users: require(self.users, "UserRepository")?,
            media_files: require(self.media_files, "MediaFileRepository")?,
        })
    }
}

fn require<T>(handle: Option<T>, capability: &str) -> Result<T> {
    handle.ok_or_else(|| ServiceError::CapabilityMissing {
        capability: capability.to_string(),
        message: "No implementation was provided to the gateway".to_string(),
    })
}

/// Media retrieval gateway: avatars, cover art and lyrics.
///
/// Holds read-only configuration and shared collaborator handles only, so
/// clones are cheap and one instance serves any number of concurrent
/// requests.
#[derive(Clone)]
pub struct MediaRetrievalGateway {
    pub(crate) config: Arc<GatewayConfig>,
    pub(crate) deps: Arc<GatewayDependencies>,
}

impl MediaRetrievalGateway {
    /// Create a gateway from validated configuration and its collaborators.
    pub fn new(config: GatewayConfig, deps: GatewayDependencies) -> Result<Self> {
        config.validate()?;

        info!(
            enable_gravatar = config.features.enable_gravatar,
            cover_art_cache_policy = %config.cover_art_cache_policy,
            "Media retrieval gateway initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            deps: Arc::new(deps),
        })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Access the collaborators being used by the gateway.
    pub fn dependencies(&self) -> Arc<GatewayDependencies> {
        Arc::clone(&self.deps)
    }
}
