//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (e.g., `core-service`, `bridge-desktop`). Host
//! applications can depend on `media-gateway-workspace` and enable the
//! documented features without needing to wire each crate individually.

#[cfg(feature = "gateway")]
pub use core_service as gateway;
