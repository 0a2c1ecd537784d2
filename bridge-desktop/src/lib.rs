//! # Desktop Bridge Implementations
//!
//! Default implementations of the bridge traits a desktop deployment of the
//! gateway can provide on its own.
//!
//! ## Overview
//!
//! - `ResourceBundle` compiled into the binary ([`EmbeddedResources`])
//! - `ResourceBundle` read from a directory ([`DirectoryResources`])
//!
//! Artwork storage, the user datastore and the avatar provider are always
//! supplied by the host.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{EmbeddedResources, PLACEHOLDER_AVATAR};
//! use bridge_traits::ResourceBundle;
//!
//! let resources = EmbeddedResources::default();
//! let stream = resources.open(PLACEHOLDER_AVATAR).await?;
//! ```

mod resources;

pub use resources::{DirectoryResources, EmbeddedResources, PLACEHOLDER_AVATAR};
