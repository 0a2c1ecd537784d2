//! In-memory collaborators for unit tests.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use bridge_traits::{
    error::Result as BridgeResult, ArtworkResolver, ArtworkStream, AvatarUrlProvider, BridgeError,
    ResourceBundle, ResourceStream,
};
use core_library::models::{MediaFile, User};
use core_library::repositories::{LyricsFilter, MediaFileRepository, UserRepository};
use core_library::Result as LibraryResult;
use core_runtime::GatewayConfig;

use crate::gateway::{GatewayDependencies, MediaRetrievalGateway};

pub const PLACEHOLDER_BYTES: &[u8] = b"placeholder-avatar";

#[derive(Default)]
pub struct TestCollaborators {
    users: Vec<User>,
    media_files: Vec<MediaFile>,
    artwork: HashMap<String, Vec<u8>>,
    artwork_failure: Option<String>,
    no_placeholder: bool,
}

impl TestCollaborators {
    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_media_file(mut self, file: MediaFile) -> Self {
        self.media_files.push(file);
        self
    }

    pub fn with_artwork(mut self, id: &str, data: &[u8]) -> Self {
        self.artwork.insert(id.to_string(), data.to_vec());
        self
    }

    pub fn with_artwork_failure(mut self, message: &str) -> Self {
        self.artwork_failure = Some(message.to_string());
        self
    }

    pub fn without_placeholder(mut self) -> Self {
        self.no_placeholder = true;
        self
    }
}

pub fn gateway_with(config: GatewayConfig, collaborators: TestCollaborators) -> MediaRetrievalGateway {
    let deps = GatewayDependencies::new(
        Arc::new(FakeArtwork {
            images: collaborators.artwork,
            failure: collaborators.artwork_failure,
        }),
        Arc::new(FakeAvatars),
        Arc::new(FakeResources {
            placeholder: !collaborators.no_placeholder,
        }),
        Arc::new(FakeUsers {
            users: collaborators.users,
        }),
        Arc::new(FakeMediaFiles {
            files: collaborators.media_files,
        }),
    );
    MediaRetrievalGateway::new(config, deps).unwrap()
}

struct FakeArtwork {
    images: HashMap<String, Vec<u8>>,
    failure: Option<String>,
}

#[async_trait]
impl ArtworkResolver for FakeArtwork {
    async fn get(&self, id: &str, _size: u32) -> BridgeResult<ArtworkStream> {
        if let Some(message) = &self.failure {
            return Err(BridgeError::OperationFailed(message.clone()));
        }
        let data = self
            .images
            .get(id)
            .cloned()
            .ok_or_else(|| BridgeError::NotFound(id.to_string()))?;
        Ok(Box::new(Cursor::new(data)))
    }
}

struct FakeAvatars;

impl AvatarUrlProvider for FakeAvatars {
    fn avatar_url(&self, email: &str, size: u32) -> String {
        format!("https://avatars.test/{}?s={}", email, size)
    }
}

struct FakeResources {
    placeholder: bool,
}

#[async_trait]
impl ResourceBundle for FakeResources {
    async fn open(&self, name: &str) -> BridgeResult<ResourceStream> {
        if self.placeholder && name == core_runtime::config::DEFAULT_PLACEHOLDER_AVATAR {
            Ok(Box::new(Cursor::new(PLACEHOLDER_BYTES)))
        } else {
            Err(BridgeError::NotFound(name.to_string()))
        }
    }
}

struct FakeUsers {
    users: Vec<User>,
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn find_by_username(&self, username: &str) -> LibraryResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|user| user.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn insert(&self, _user: &User) -> LibraryResult<()> {
        unimplemented!("read-only test double")
    }

    async fn count(&self) -> LibraryResult<i64> {
        Ok(self.users.len() as i64)
    }
}

struct FakeMediaFiles {
    files: Vec<MediaFile>,
}

#[async_trait]
impl MediaFileRepository for FakeMediaFiles {
    async fn find_by_id(&self, id: &str) -> LibraryResult<Option<MediaFile>> {
        Ok(self.files.iter().find(|file| file.id == id).cloned())
    }

    async fn find_with_lyrics(&self, filter: &LyricsFilter) -> LibraryResult<Vec<MediaFile>> {
        Ok(self
            .files
            .iter()
            .filter(|file| {
                file.artist == filter.artist && file.title == filter.title && file.has_lyrics()
            })
            .cloned()
            .collect())
    }

    async fn insert(&self, _file: &MediaFile) -> LibraryResult<()> {
        unimplemented!("read-only test double")
    }

    async fn update_lyrics(&self, _id: &str, _lyrics: &str, _updated_at: i64) -> LibraryResult<()> {
        unimplemented!("read-only test double")
    }
}
