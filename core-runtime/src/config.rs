//! # Gateway Configuration Module
//!
//! Provides configuration management for the media retrieval gateway.
//!
//! ## Overview
//!
//! The configuration is read-only once built: it is set at process start,
//! handed to the gateway at construction and never mutated while requests
//! are served. Use [`GatewayConfig::builder`] for explicit wiring or
//! [`GatewayConfig::from_env`] to pick values up from the environment.
//!
//! ## Usage
//!
//! ```
//! use core_runtime::config::{CoverArtCachePolicy, GatewayConfig};
//!
//! let config = GatewayConfig::builder()
//!     .enable_gravatar(true)
//!     .cover_art_cache_policy(CoverArtCachePolicy::SuccessOnly)
//!     .build()
//!     .expect("valid config");
//!
//! assert!(config.features.enable_gravatar);
//! assert_eq!(config.cover_art_cache_control(), "public, max-age=315360000");
//! ```
//!
//! ## Environment
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `MRG_ENABLE_GRAVATAR` | redirect avatars to the external provider | `false` |
//! | `MRG_PLACEHOLDER_AVATAR` | asset name of the placeholder avatar | `placeholder.png` |
//! | `MRG_AVATAR_SIZE` | size hint passed to the avatar provider | `0` |
//! | `MRG_COVER_ART_MAX_AGE` | `max-age` (seconds) for artwork responses | `315360000` |
//! | `MRG_COVER_ART_CACHE_POLICY` | `success-only` or `unconditional` | `success-only` |

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Asset name of the bundled placeholder avatar
pub const DEFAULT_PLACEHOLDER_AVATAR: &str = "placeholder.png";

/// Ten years, as sent in `max-age` for artwork responses
pub const DEFAULT_COVER_ART_MAX_AGE: Duration = Duration::from_secs(315_360_000);

/// Largest avatar size external providers accept
pub const MAX_AVATAR_SIZE: u32 = 2048;

/// Directive sent on artwork error responses under
/// [`CoverArtCachePolicy::SuccessOnly`]
pub const NO_CACHE_DIRECTIVE: &str = "no-cache, no-store";

/// When the long-lived `cache-control` directive is attached to cover-art
/// responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverArtCachePolicy {
    /// Long-lived directive only once the resolver produced a stream; error
    /// responses are marked uncacheable.
    #[default]
    SuccessOnly,
    /// Long-lived directive set before resolution, so error responses carry
    /// it too. Matches servers that predate the success-only behaviour.
    Unconditional,
}

impl CoverArtCachePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SuccessOnly => "success-only",
            Self::Unconditional => "unconditional",
        }
    }
}

impl fmt::Display for CoverArtCachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoverArtCachePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success-only" | "success_only" => Ok(Self::SuccessOnly),
            "unconditional" => Ok(Self::Unconditional),
            other => Err(Error::Config(format!(
                "Unknown cover art cache policy '{}'. Expected 'success-only' or 'unconditional'.",
                other
            ))),
        }
    }
}

/// Feature flags control optional functionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureFlags {
    /// Redirect avatar requests to the external avatar provider instead of
    /// always serving the placeholder
    pub enable_gravatar: bool,
}

/// Gateway configuration.
///
/// Use [`GatewayConfigBuilder`] to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Features flags
    pub features: FeatureFlags,

    /// Asset name of the placeholder avatar in the resource bundle
    pub placeholder_avatar: String,

    /// Size hint passed to the avatar provider (0 = provider default)
    pub avatar_size: u32,

    /// `max-age` sent with artwork responses
    pub cover_art_max_age: Duration,

    /// When the long-lived artwork directive is set
    pub cover_art_cache_policy: CoverArtCachePolicy,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            features: FeatureFlags::default(),
            placeholder_avatar: DEFAULT_PLACEHOLDER_AVATAR.to_string(),
            avatar_size: 0,
            cover_art_max_age: DEFAULT_COVER_ART_MAX_AGE,
            cover_art_cache_policy: CoverArtCachePolicy::default(),
        }
    }
}

impl GatewayConfig {
    /// Creates a new builder for constructing a `GatewayConfig`.
    pub fn builder() -> GatewayConfigBuilder {
        GatewayConfigBuilder::default()
    }

    /// Build a configuration from `MRG_*` environment variables.
    ///
    /// Unset variables keep their defaults; malformed values are rejected.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(value) = lookup("MRG_ENABLE_GRAVATAR") {
            builder = builder.enable_gravatar(parse_bool("MRG_ENABLE_GRAVATAR", &value)?);
        }
        if let Some(value) = lookup("MRG_PLACEHOLDER_AVATAR") {
            builder = builder.placeholder_avatar(value);
        }
        if let Some(value) = lookup("MRG_AVATAR_SIZE") {
            let size = value.trim().parse::<u32>().map_err(|e| {
                Error::Config(format!("MRG_AVATAR_SIZE must be an integer: {}", e))
            })?;
            builder = builder.avatar_size(size);
        }
        if let Some(value) = lookup("MRG_COVER_ART_MAX_AGE") {
            let secs = value.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!("MRG_COVER_ART_MAX_AGE must be seconds: {}", e))
            })?;
            builder = builder.cover_art_max_age(Duration::from_secs(secs));
        }
        if let Some(value) = lookup("MRG_COVER_ART_CACHE_POLICY") {
            builder = builder.cover_art_cache_policy(value.parse()?);
        }

        builder.build()
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.placeholder_avatar.trim().is_empty() {
            return Err(Error::Config(
                "Placeholder avatar name cannot be empty".to_string(),
            ));
        }

        if self.avatar_size > MAX_AVATAR_SIZE {
            return Err(Error::Config(format!(
                "Avatar size exceeds maximum of {} pixels",
                MAX_AVATAR_SIZE
            )));
        }

        if self.cover_art_max_age.is_zero() {
            return Err(Error::Config(
                "Cover art max-age must be greater than 0 seconds".to_string(),
            ));
        }

        Ok(())
    }

    /// Long-lived `cache-control` value for artwork responses
    pub fn cover_art_cache_control(&self) -> String {
        format!("public, max-age={}", self.cover_art_max_age.as_secs())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(Error::Config(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}

/// Builder for constructing [`GatewayConfig`] instances.
#[derive(Debug, Default)]
pub struct GatewayConfigBuilder {
    features: FeatureFlags,
    placeholder_avatar: Option<String>,
    avatar_size: Option<u32>,
    cover_art_max_age: Option<Duration>,
    cover_art_cache_policy: Option<CoverArtCachePolicy>,
}

impl GatewayConfigBuilder {
    /// Enable or disable redirects to the external avatar provider.
    pub fn enable_gravatar(mut self, enabled: bool) -> Self {
        self.features.enable_gravatar = enabled;
        self
    }

    /// Sets all feature flags at once.
    pub fn features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    /// Sets the asset name of the placeholder avatar.
    pub fn placeholder_avatar(mut self, name: impl Into<String>) -> Self {
        self.placeholder_avatar = Some(name.into());
        self
    }

    /// Sets the size hint passed to the avatar provider.
    pub fn avatar_size(mut self, size: u32) -> Self {
        self.avatar_size = Some(size);
        self
    }

    /// Sets the `max-age` of artwork responses.
    pub fn cover_art_max_age(mut self, max_age: Duration) -> Self {
        self.cover_art_max_age = Some(max_age);
        self
    }

    /// Sets when the long-lived artwork directive is attached.
    pub fn cover_art_cache_policy(mut self, policy: CoverArtCachePolicy) -> Self {
        self.cover_art_cache_policy = Some(policy);
        self
    }

    /// Builds the final `GatewayConfig` instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a value fails validation.
    pub fn build(self) -> Result<GatewayConfig> {
        let defaults = GatewayConfig::default();

        let config = GatewayConfig {
            features: self.features,
            placeholder_avatar: self
                .placeholder_avatar
                .unwrap_or(defaults.placeholder_avatar),
            avatar_size: self.avatar_size.unwrap_or(defaults.avatar_size),
            cover_art_max_age: self
                .cover_art_max_age
                .unwrap_or(defaults.cover_art_max_age),
            cover_art_cache_policy: self
                .cover_art_cache_policy
                .unwrap_or(defaults.cover_art_cache_policy),
        };

        config.validate()?;

        Ok(config)
    }
}
