//! Domain models for the user/media datastore
//!
//! The gateway only ever reads these records; writes exist for seeding and
//! for the host's own management surfaces.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Server user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique identifier
    pub id: String,
    /// Login name, unique case-insensitively
    pub username: String,
    /// Display name
    pub name: String,
    /// Contact email, used to derive the external avatar
    pub email: Option<String>,
    /// Timestamps
    pub created_at: i64,
    pub updated_at: i64,
}

impl User {
    /// Create a new user without an email address
    pub fn new(username: impl Into<String>) -> Self {
        let username = username.into();
        let now = chrono::Utc::now().timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            name: username.clone(),
            username,
            email: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Email address, if one is set. Blank values count as unset.
    pub fn email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
    }

    /// Validate user data
    pub fn validate(&self) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("Username cannot be empty".to_string());
        }

        if let Some(email) = self.email() {
            if !email.contains('@') {
                return Err(format!("Email '{}' is not a valid address", email));
            }
        }

        Ok(())
    }
}

/// Media file as indexed by the library scanner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MediaFile {
    /// Unique identifier
    pub id: String,
    /// Path of the file inside the library
    pub path: String,
    /// Track title
    pub title: String,
    /// Track artist
    pub artist: String,
    /// Album name
    pub album: Option<String>,
    /// Raw lyrics text (plain or LRC with timestamp markers), empty if none
    pub lyrics: String,
    /// Timestamps
    pub created_at: i64,
    pub updated_at: i64,
}

impl MediaFile {
    /// Create a new media file without lyrics
    pub fn new(
        path: impl Into<String>,
        artist: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            path: path.into(),
            title: title.into(),
            artist: artist.into(),
            album: None,
            lyrics: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_lyrics(mut self, lyrics: impl Into<String>) -> Self {
        self.lyrics = lyrics.into();
        self
    }

    pub fn has_lyrics(&self) -> bool {
        !self.lyrics.is_empty()
    }

    /// Validate media file data
    pub fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("Media file path cannot be empty".to_string());
        }

        if self.updated_at < self.created_at {
            return Err("Media file updated_at precedes created_at".to_string());
        }

        Ok(())
    }
}
