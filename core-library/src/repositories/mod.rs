//! # Repository Pattern Implementation
//!
//! Repository traits and SQLite implementations for the datastore contracts
//! the gateway consumes.
//!
//! ## Architecture
//!
//! - Traits define the interface for each repository
//! - SQLite implementations use sqlx for async database access
//! - All operations return `Result<T>` for error handling
//!
//! ## Available Repositories
//!
//! - `UserRepository` - User lookup by username
//! - `MediaFileRepository` - Media files, including the lyrics lookup

pub mod media_file;
pub mod user;

pub use media_file::{LyricsFilter, MediaFileRepository, SqliteMediaFileRepository};
pub use user::{SqliteUserRepository, UserRepository};
