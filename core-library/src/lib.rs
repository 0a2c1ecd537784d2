//! # Library Datastore Module
//!
//! Owns the user/media datastore the gateway reads from and provides
//! repository patterns for data access.
//!
//! ## Overview
//!
//! This module manages:
//! - SQLite database schema and migrations
//! - Repository traits for users and media files
//! - SQLite implementations of those traits
//!
//! The gateway depends on the traits only; hosts with their own datastore
//! implement [`UserRepository`](repositories::UserRepository) and
//! [`MediaFileRepository`](repositories::MediaFileRepository) directly.

pub mod db;
pub mod error;
pub mod models;
pub mod repositories;

pub use error::{LibraryError, Result};
