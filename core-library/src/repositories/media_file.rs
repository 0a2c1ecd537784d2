//! Media file repository trait and implementation

use crate::error::{LibraryError, Result};
use crate::models::MediaFile;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{query_as, SqlitePool};

/// Filter for songs that carry lyrics
///
/// Matches on exact artist and title. Empty strings are matched literally,
/// so an empty artist only selects files whose artist is empty too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsFilter {
    pub artist: String,
    pub title: String,
}

impl LyricsFilter {
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
        }
    }
}

/// Media file repository interface for data access operations
#[async_trait]
pub trait MediaFileRepository: Send + Sync {
    /// Find a media file by its ID
    async fn find_by_id(&self, id: &str) -> Result<Option<MediaFile>>;

    /// All media files matching `filter` that have non-empty lyrics
    ///
    /// # Ordering
    /// Most recently updated first, ties broken by ascending id. Callers
    /// that only want one rendition take the first element.
    async fn find_with_lyrics(&self, filter: &LyricsFilter) -> Result<Vec<MediaFile>>;

    /// Insert a new media file
    ///
    /// # Errors
    /// Returns error if:
    /// - A file with the same ID or path already exists
    /// - Media file validation fails
    /// - Database error occurs
    async fn insert(&self, file: &MediaFile) -> Result<()>;

    /// Replace the lyrics of an existing media file
    ///
    /// # Errors
    /// Returns [`LibraryError::NotFound`] if the file does not exist
    async fn update_lyrics(&self, id: &str, lyrics: &str, updated_at: i64) -> Result<()>;
}

/// SQLite implementation of MediaFileRepository
pub struct SqliteMediaFileRepository {
    pool: SqlitePool,
}

impl SqliteMediaFileRepository {
    /// Create a new SQLite media file repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaFileRepository for SqliteMediaFileRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<MediaFile>> {
        let file = query_as::<_, MediaFile>("SELECT * FROM media_files WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(file)
    }

    async fn find_with_lyrics(&self, filter: &LyricsFilter) -> Result<Vec<MediaFile>> {
        let files = query_as::<_, MediaFile>(
            r#"
            SELECT * FROM media_files
            WHERE artist = ? AND title = ? AND lyrics <> ''
            ORDER BY updated_at DESC, id ASC
            "#,
        )
        .bind(&filter.artist)
        .bind(&filter.title)
        .fetch_all(&self.pool)
        .await?;

        Ok(files)
    }

    async fn insert(&self, file: &MediaFile) -> Result<()> {
        file.validate().map_err(|msg| LibraryError::InvalidInput {
            field: "media_file".to_string(),
            message: msg,
        })?;

        sqlx::query(
            r#"
            INSERT INTO media_files (
                id, path, title, artist, album, lyrics, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&file.id)
        .bind(&file.path)
        .bind(&file.title)
        .bind(&file.artist)
        .bind(&file.album)
        .bind(&file.lyrics)
        .bind(file.created_at)
        .bind(file.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_lyrics(&self, id: &str, lyrics: &str, updated_at: i64) -> Result<()> {
        let result = sqlx::query("UPDATE media_files SET lyrics = ?, updated_at = ? WHERE id = ?")
            .bind(lyrics)
            .bind(updated_at)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LibraryError::NotFound {
                entity_type: "MediaFile".to_string(),
                id: id.to_string(),
            });
        }

        Ok(())
    }
}
