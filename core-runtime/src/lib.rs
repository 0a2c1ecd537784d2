//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the media gateway:
//! - Logging and tracing infrastructure
//! - Configuration management
//!
//! ## Overview
//!
//! Both pieces are set up once at process start. Configuration is read-only
//! afterwards and injected into the gateway explicitly; nothing here is
//! consulted as ambient global state while requests are handled.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{CoverArtCachePolicy, FeatureFlags, GatewayConfig, GatewayConfigBuilder};
pub use error::{Error, Result};
