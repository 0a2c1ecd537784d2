//! # Host Bridge Traits
//!
//! Contracts for every collaborator the media gateway relies on but does not
//! own.
//!
//! ## Overview
//!
//! The gateway resolves avatars, cover art and lyrics on behalf of the
//! protocol endpoint. Storage, resizing, the avatar provider's URL scheme and
//! the HTTP server itself all live elsewhere; this crate pins down the narrow
//! interface the gateway consumes from each of them.
//!
//! ## Traits
//!
//! ### Media
//! - [`ArtworkResolver`](artwork::ArtworkResolver) - Opaque id + size to image byte stream
//! - [`AvatarUrlProvider`](avatar::AvatarUrlProvider) - Email to external avatar URL
//! - [`ResourceBundle`](resources::ResourceBundle) - Static placeholder assets
//!
//! ### Protocol
//! - [`ResponseSink`](http::ResponseSink) - Headers, redirects and body bytes for one request
//!
//! ### Utilities
//! - [`LoggerSink`](logging::LoggerSink) - Forward structured logs to host logging
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! must report absence as [`BridgeError::NotFound`] so the gateway can map it
//! to a distinct "data not found" protocol error.
//!
//! ## Thread Safety
//!
//! Collaborator traits require `Send + Sync`; a single gateway instance serves
//! concurrent requests. [`ResponseSink`](http::ResponseSink) is per request and
//! only needs `Send`.

pub mod artwork;
pub mod avatar;
pub mod error;
pub mod http;
pub mod logging;
pub mod resources;

pub use error::BridgeError;

// Re-export commonly used types
pub use artwork::{ArtworkResolver, ArtworkStream};
pub use avatar::AvatarUrlProvider;
pub use http::{BufferedResponse, ResponseSink};
pub use logging::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use resources::{ResourceBundle, ResourceStream};
