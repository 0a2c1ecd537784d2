//! Lyrics lookup

use core_library::repositories::LyricsFilter;
use core_metadata::lyrics::classify;
use tracing::{debug, error, instrument};

use crate::error::Result;
use crate::gateway::MediaRetrievalGateway;
use crate::params::Request;
use crate::responses::Lyrics;

impl MediaRetrievalGateway {
    /// Look up lyrics by `artist` and `title` (both default to empty).
    ///
    /// The first catalog match wins. Synced (LRC) lyrics come back with
    /// their timing markers stripped. No match is not an error: the payload
    /// is simply empty.
    #[instrument(skip_all, fields(request_id = %request.id(), endpoint = "getLyrics"))]
    pub async fn get_lyrics(&self, request: &Request) -> Result<Lyrics> {
        let params = request.params();
        let filter = LyricsFilter::new(params.string_or("artist", ""), params.string_or("title", ""));

        let files = self
            .deps
            .media_files
            .find_with_lyrics(&filter)
            .await
            .map_err(|err| {
                error!(artist = %filter.artist, title = %filter.title, error = %err, "Failed to query lyrics");
                err
            })?;

        let Some(file) = files.first() else {
            debug!(artist = %filter.artist, title = %filter.title, "No lyrics found");
            return Ok(Lyrics::empty());
        };

        let text = classify(&file.lyrics);
        debug!(
            media_file_id = %file.id,
            synced = text.synced,
            matches = files.len(),
            "Serving lyrics"
        );

        Ok(Lyrics {
            artist: filter.artist,
            title: filter.title,
            value: text.value,
        })
    }
}
