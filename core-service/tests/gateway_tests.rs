//! End-to-end tests of the gateway against mocked and SQLite-backed
//! collaborators.

use std::io::Cursor;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use bridge_desktop::{EmbeddedResources, PLACEHOLDER_AVATAR};
use bridge_traits::{
    error::Result as BridgeResult,
    http::{header, BufferedResponse, ResponseSink, STATUS_FOUND},
    ArtworkResolver, ArtworkStream, AvatarUrlProvider, BridgeError, ResourceBundle,
};
use core_library::db::{create_test_pool, DatabaseConfig};
use core_library::models::{MediaFile, User};
use core_library::repositories::{
    LyricsFilter, MediaFileRepository, SqliteMediaFileRepository, SqliteUserRepository,
    UserRepository,
};
use core_runtime::{CoverArtCachePolicy, GatewayConfig};
use core_service::{
    ErrorCode, GatewayDependencies, Lyrics, MediaRetrievalGateway, Request, ServiceError,
};
use mockall::mock;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, ReadBuf};

mock! {
    pub Artwork {}

    #[async_trait]
    impl ArtworkResolver for Artwork {
        async fn get(&self, id: &str, size: u32) -> BridgeResult<ArtworkStream>;
    }
}

mock! {
    pub Users {}

    #[async_trait]
    impl UserRepository for Users {
        async fn find_by_username(&self, username: &str) -> core_library::Result<Option<User>>;
        async fn insert(&self, user: &User) -> core_library::Result<()>;
        async fn count(&self) -> core_library::Result<i64>;
    }
}

mock! {
    pub MediaFiles {}

    #[async_trait]
    impl MediaFileRepository for MediaFiles {
        async fn find_by_id(&self, id: &str) -> core_library::Result<Option<MediaFile>>;
        async fn find_with_lyrics(&self, filter: &LyricsFilter) -> core_library::Result<Vec<MediaFile>>;
        async fn insert(&self, file: &MediaFile) -> core_library::Result<()>;
        async fn update_lyrics(&self, id: &str, lyrics: &str, updated_at: i64) -> core_library::Result<()>;
    }
}

mock! {
    pub Avatars {}

    impl AvatarUrlProvider for Avatars {
        fn avatar_url(&self, email: &str, size: u32) -> String;
    }
}

/// Artwork stream that records when it is released
struct TrackedStream {
    inner: Cursor<Vec<u8>>,
    released: Arc<AtomicBool>,
}

impl AsyncRead for TrackedStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl Drop for TrackedStream {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

/// Response sink whose body refuses every write
#[derive(Default)]
struct BrokenSink {
    headers: Vec<(String, String)>,
    body: BrokenPipe,
}

#[derive(Default)]
struct BrokenPipe;

impl AsyncWrite for BrokenPipe {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        Poll::Ready(Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe)))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

impl ResponseSink for BrokenSink {
    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn redirect(&mut self, _location: &str, _status: u16) {
        panic!("cover art never redirects");
    }

    fn body(&mut self) -> &mut (dyn AsyncWrite + Send + Unpin) {
        &mut self.body
    }
}

struct Mocks {
    artwork: MockArtwork,
    avatars: MockAvatars,
    users: MockUsers,
    media_files: MockMediaFiles,
    resources: EmbeddedResources,
}

impl Mocks {
    fn new() -> Self {
        Self {
            artwork: MockArtwork::new(),
            avatars: MockAvatars::new(),
            users: MockUsers::new(),
            media_files: MockMediaFiles::new(),
            resources: EmbeddedResources::default(),
        }
    }

    fn into_gateway(self, config: GatewayConfig) -> MediaRetrievalGateway {
        let deps = GatewayDependencies::new(
            Arc::new(self.artwork),
            Arc::new(self.avatars),
            Arc::new(self.resources),
            Arc::new(self.users),
            Arc::new(self.media_files),
        );
        MediaRetrievalGateway::new(config, deps).unwrap()
    }
}

fn gravatar_enabled() -> GatewayConfig {
    GatewayConfig::builder().enable_gravatar(true).build().unwrap()
}

async fn placeholder_bytes() -> Vec<u8> {
    let mut stream = EmbeddedResources::default()
        .open(PLACEHOLDER_AVATAR)
        .await
        .unwrap();
    let mut bytes = Vec::new();
    stream.read_to_end(&mut bytes).await.unwrap();
    bytes
}

// =============================================================================
// Avatar
// =============================================================================

#[tokio::test]
async fn test_avatar_flag_off_never_touches_datastore() {
    let mut mocks = Mocks::new();
    mocks.users.expect_find_by_username().never();
    mocks.avatars.expect_avatar_url().never();
    let gateway = mocks.into_gateway(GatewayConfig::default());

    let mut response = BufferedResponse::new();
    gateway
        .get_avatar(&Request::from_query("username=alice"), &mut response)
        .await
        .unwrap();

    assert!(!response.is_redirect());
    assert_eq!(response.body, placeholder_bytes().await);
}

#[tokio::test]
async fn test_avatar_user_without_email_gets_placeholder() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_find_by_username()
        .times(1)
        .returning(|username| Ok(Some(User::new(username).with_email(""))));
    mocks.avatars.expect_avatar_url().never();
    let gateway = mocks.into_gateway(gravatar_enabled());

    let mut response = BufferedResponse::new();
    gateway
        .get_avatar(&Request::from_query("username=bob"), &mut response)
        .await
        .unwrap();

    assert!(!response.is_redirect());
    assert!(response.location().is_none());
    assert_eq!(response.body, placeholder_bytes().await);
}

#[tokio::test]
async fn test_avatar_redirects_user_with_email() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_find_by_username()
        .times(1)
        .returning(|username| Ok(Some(User::new(username).with_email("carol@example.com"))));
    mocks
        .avatars
        .expect_avatar_url()
        .times(1)
        .returning(|email, size| {
            assert_eq!(email, "carol@example.com");
            assert_eq!(size, 0);
            "https://www.gravatar.com/avatar/abc123".to_string()
        });
    let gateway = mocks.into_gateway(gravatar_enabled());

    let mut response = BufferedResponse::new();
    gateway
        .get_avatar(&Request::from_query("username=carol"), &mut response)
        .await
        .unwrap();

    assert_eq!(response.status, STATUS_FOUND);
    assert_eq!(
        response.location(),
        Some("https://www.gravatar.com/avatar/abc123")
    );
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_avatar_datastore_failure_is_propagated() {
    let mut mocks = Mocks::new();
    mocks
        .users
        .expect_find_by_username()
        .returning(|_| Err(core_library::LibraryError::Migration("schema drift".to_string())));
    let gateway = mocks.into_gateway(gravatar_enabled());

    let mut response = BufferedResponse::new();
    let err = gateway
        .get_avatar(&Request::from_query("username=dave"), &mut response)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Library(_)));
    assert_eq!(err.code(), ErrorCode::Generic);
}

#[tokio::test]
async fn test_missing_username_makes_no_collaborator_calls() {
    let mut mocks = Mocks::new();
    mocks.users.expect_find_by_username().never();
    let gateway = mocks.into_gateway(gravatar_enabled());

    let mut response = BufferedResponse::new();
    let err = gateway
        .get_avatar(&Request::from_query("user=alice"), &mut response)
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::MissingParameter);
    assert_eq!(err.to_payload().code.as_u16(), 10);
}

// =============================================================================
// Cover art
// =============================================================================

#[tokio::test]
async fn test_cover_art_default_id_not_found() {
    let mut mocks = Mocks::new();
    mocks
        .artwork
        .expect_get()
        .times(1)
        .returning(|id, size| {
            assert_eq!(id, "non-existent");
            assert_eq!(size, 0);
            Err(BridgeError::NotFound(id.to_string()))
        });
    let gateway = mocks.into_gateway(GatewayConfig::default());

    let mut response = BufferedResponse::new();
    let err = gateway
        .get_cover_art(&Request::from_query(""), &mut response)
        .await
        .unwrap_err();

    let payload = err.to_payload();
    assert_eq!(payload.code, ErrorCode::DataNotFound);
    assert_eq!(payload.message, "Artwork not found");
    assert!(response.header(header::CACHE_CONTROL).is_some());
}

#[tokio::test]
async fn test_cover_art_stream_released_after_copy() {
    let released = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&released);

    let mut mocks = Mocks::new();
    mocks.artwork.expect_get().times(1).returning(move |_, size| {
        assert_eq!(size, 600);
        Ok(Box::new(TrackedStream {
            inner: Cursor::new(b"\x89PNG artwork".to_vec()),
            released: Arc::clone(&flag),
        }) as ArtworkStream)
    });
    let gateway = mocks.into_gateway(GatewayConfig::default());

    let mut response = BufferedResponse::new();
    gateway
        .get_cover_art(&Request::from_query("id=al-7&size=600"), &mut response)
        .await
        .unwrap();

    assert_eq!(response.body, b"\x89PNG artwork");
    assert_eq!(
        response.header(header::CACHE_CONTROL),
        Some("public, max-age=315360000")
    );
    assert!(released.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_cover_art_stream_released_when_copy_fails() {
    let released = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&released);

    let mut mocks = Mocks::new();
    mocks.artwork.expect_get().returning(move |_, _| {
        Ok(Box::new(TrackedStream {
            inner: Cursor::new(vec![0u8; 4096]),
            released: Arc::clone(&flag),
        }) as ArtworkStream)
    });
    let gateway = mocks.into_gateway(GatewayConfig::default());

    let mut sink = BrokenSink::default();
    let err = gateway
        .get_cover_art(&Request::from_query("id=al-7"), &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Io(ref io) if io.kind() == std::io::ErrorKind::BrokenPipe));
    assert!(released.load(Ordering::SeqCst));

    // The last cache-control written wins; a truncated body must not be
    // cached long-term.
    let last_cache_control = sink
        .headers
        .iter()
        .rev()
        .find(|(name, _)| name == header::CACHE_CONTROL)
        .map(|(_, value)| value.as_str());
    assert_eq!(last_cache_control, Some("no-cache, no-store"));
}

#[tokio::test]
async fn test_cover_art_copy_failure_keeps_unconditional_directive() {
    let mut mocks = Mocks::new();
    mocks.artwork.expect_get().returning(|_, _| {
        Ok(Box::new(Cursor::new(vec![0u8; 4096])) as ArtworkStream)
    });
    let config = GatewayConfig::builder()
        .cover_art_cache_policy(CoverArtCachePolicy::Unconditional)
        .build()
        .unwrap();
    let gateway = mocks.into_gateway(config);

    let mut sink = BrokenSink::default();
    let err = gateway
        .get_cover_art(&Request::from_query("id=al-7"), &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Io(_)));
    let directives: Vec<&str> = sink
        .headers
        .iter()
        .filter(|(name, _)| name == header::CACHE_CONTROL)
        .map(|(_, value)| value.as_str())
        .collect();
    assert_eq!(directives, vec!["public, max-age=315360000"]);
}

#[tokio::test]
async fn test_cover_art_negative_size_clamped() {
    let mut mocks = Mocks::new();
    mocks.artwork.expect_get().times(1).returning(|_, size| {
        assert_eq!(size, 0);
        Ok(Box::new(Cursor::new(Vec::<u8>::new())) as ArtworkStream)
    });
    let gateway = mocks.into_gateway(GatewayConfig::default());

    let mut response = BufferedResponse::new();
    gateway
        .get_cover_art(&Request::from_query("id=al-1&size=-64"), &mut response)
        .await
        .unwrap();
}

// =============================================================================
// Lyrics
// =============================================================================

#[tokio::test]
async fn test_lyrics_no_rows_returns_empty_payload() {
    let mut mocks = Mocks::new();
    mocks
        .media_files
        .expect_find_with_lyrics()
        .times(1)
        .returning(|filter| {
            assert_eq!(filter, &LyricsFilter::new("", ""));
            Ok(Vec::new())
        });
    let gateway = mocks.into_gateway(GatewayConfig::default());

    let lyrics = gateway.get_lyrics(&Request::from_query("")).await.unwrap();

    assert_eq!(
        lyrics,
        Lyrics {
            artist: String::new(),
            title: String::new(),
            value: String::new(),
        }
    );
}

#[tokio::test]
async fn test_lyrics_catalog_failure_is_propagated() {
    let mut mocks = Mocks::new();
    mocks
        .media_files
        .expect_find_with_lyrics()
        .returning(|_| Err(core_library::LibraryError::Migration("locked".to_string())));
    let gateway = mocks.into_gateway(GatewayConfig::default());

    let err = gateway
        .get_lyrics(&Request::from_query("artist=A&title=B"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Library(_)));
}

// =============================================================================
// SQLite-backed datastore
// =============================================================================

async fn sqlite_gateway(config: GatewayConfig) -> (MediaRetrievalGateway, sqlx::SqlitePool) {
    let pool = create_test_pool().await.unwrap();
    let mut mocks = Mocks::new();
    mocks
        .avatars
        .expect_avatar_url()
        .returning(|email, _| format!("https://avatars.test/{}", email));

    let deps = GatewayDependencies::new(
        Arc::new(mocks.artwork),
        Arc::new(mocks.avatars),
        Arc::new(mocks.resources),
        Arc::new(SqliteUserRepository::new(pool.clone())),
        Arc::new(SqliteMediaFileRepository::new(pool.clone())),
    );
    (MediaRetrievalGateway::new(config, deps).unwrap(), pool)
}

#[tokio::test]
async fn test_sqlite_lyrics_most_recent_rendition_wins() {
    let (gateway, pool) = sqlite_gateway(GatewayConfig::default()).await;
    let files = SqliteMediaFileRepository::new(pool);

    let mut older = MediaFile::new("music/old.flac", "Daft Punk", "Veridis Quo")
        .with_lyrics("plain old lyrics");
    older.updated_at = older.created_at;
    let mut newer = MediaFile::new("music/new.flac", "Daft Punk", "Veridis Quo")
        .with_lyrics("[00:01.00]First\n[00:05.50]Second");
    newer.updated_at = newer.created_at + 60;

    files.insert(&older).await.unwrap();
    files.insert(&newer).await.unwrap();

    let lyrics = gateway
        .get_lyrics(&Request::from_query("artist=Daft+Punk&title=Veridis%20Quo"))
        .await
        .unwrap();

    assert_eq!(lyrics.artist, "Daft Punk");
    assert_eq!(lyrics.title, "Veridis Quo");
    assert_eq!(lyrics.value, "First\nSecond");
}

#[tokio::test]
async fn test_sqlite_unknown_user_is_data_not_found() {
    let (gateway, pool) = sqlite_gateway(gravatar_enabled()).await;
    SqliteUserRepository::new(pool)
        .insert(&User::new("erin").with_email("erin@example.com"))
        .await
        .unwrap();

    let mut response = BufferedResponse::new();
    gateway
        .get_avatar(&Request::from_query("username=ERIN"), &mut response)
        .await
        .unwrap();
    assert_eq!(response.location(), Some("https://avatars.test/erin@example.com"));

    let mut response = BufferedResponse::new();
    let err = gateway
        .get_avatar(&Request::from_query("username=frank"), &mut response)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DataNotFound);
}

#[tokio::test]
async fn test_bootstrap_desktop_serves_placeholder() {
    let gateway = core_service::bootstrap_desktop(
        GatewayConfig::default(),
        DatabaseConfig::in_memory(),
        Arc::new(MockArtwork::new()),
        Arc::new(MockAvatars::new()),
    )
    .await
    .unwrap();

    let mut response = BufferedResponse::new();
    gateway
        .get_avatar(&Request::from_query("username=anyone"), &mut response)
        .await
        .unwrap();
    assert_eq!(response.body, placeholder_bytes().await);

    let lyrics = gateway
        .get_lyrics(&Request::from_query("artist=x&title=y"))
        .await
        .unwrap();
    assert!(lyrics.is_empty());
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_share_one_gateway() {
    let mut mocks = Mocks::new();
    mocks.media_files.expect_find_with_lyrics().returning(|filter| {
        Ok(vec![MediaFile::new("music/x.mp3", filter.artist.clone(), filter.title.clone())
            .with_lyrics(format!("[00:01]{}", filter.title))])
    });
    let gateway = mocks.into_gateway(GatewayConfig::default());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let gateway = gateway.clone();
            tokio::spawn(async move {
                let request = Request::from_query(&format!("artist=Band&title=Song{}", i));
                gateway.get_lyrics(&request).await
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let lyrics = handle.await.unwrap().unwrap();
        assert_eq!(lyrics.value, format!("Song{}", i));
    }
}
