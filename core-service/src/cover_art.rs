//! Cover art streaming

use bridge_traits::http::{header, ResponseSink};
use core_runtime::config::NO_CACHE_DIRECTIVE;
use core_runtime::CoverArtCachePolicy;
use tracing::{debug, error, instrument};

use crate::error::{Result, ServiceError};
use crate::gateway::MediaRetrievalGateway;
use crate::params::Request;

/// Artwork id used when the request carries none
pub const DEFAULT_COVER_ART_ID: &str = "non-existent";

impl MediaRetrievalGateway {
    /// Stream the artwork named by `id` at `size` pixels into `sink`.
    ///
    /// `id` defaults to [`DEFAULT_COVER_ART_ID`], so a bare request still
    /// reaches the resolver and comes back as "not found". `size` defaults
    /// to 0 (original size); unparsable values fall back to 0 and negative
    /// ones are clamped to 0.
    ///
    /// A `cache-control` header is always written. Which directive lands on
    /// error responses depends on [`CoverArtCachePolicy`].
    ///
    /// # Errors
    /// - [`ServiceError::DataNotFound`] if the resolver has no such artwork
    /// - [`ServiceError::Bridge`] for any other resolver failure, unchanged
    /// - [`ServiceError::Io`] if copying the image bytes fails midway
    #[instrument(skip_all, fields(request_id = %request.id(), endpoint = "getCoverArt"))]
    pub async fn get_cover_art(&self, request: &Request, sink: &mut dyn ResponseSink) -> Result<()> {
        let params = request.params();
        let id = params.string_or("id", DEFAULT_COVER_ART_ID);
        let size = clamp_size(params.int_or("size", 0));

        let policy = self.config.cover_art_cache_policy;
        let cache_control = self.config.cover_art_cache_control();

        if policy == CoverArtCachePolicy::Unconditional {
            sink.set_header(header::CACHE_CONTROL, &cache_control);
        }

        let mut image = match self.deps.artwork.get(id, size).await {
            Ok(image) => image,
            Err(err) => {
                if policy == CoverArtCachePolicy::SuccessOnly {
                    sink.set_header(header::CACHE_CONTROL, NO_CACHE_DIRECTIVE);
                }

                if err.is_not_found() {
                    error!(id = %id, size, error = %err, "Couldn't find cover art");
                    return Err(ServiceError::DataNotFound("Artwork not found".to_string()));
                }

                error!(id = %id, size, error = %err, "Error retrieving cover art");
                return Err(err.into());
            }
        };

        if policy == CoverArtCachePolicy::SuccessOnly {
            sink.set_header(header::CACHE_CONTROL, &cache_control);
        }

        // The stream is dropped when this function returns, whatever the
        // copy outcome.
        let bytes = match tokio::io::copy(&mut image, sink.body()).await {
            Ok(bytes) => bytes,
            Err(err) => {
                // A truncated body must not be cached under the long-lived
                // directive.
                if policy == CoverArtCachePolicy::SuccessOnly {
                    sink.set_header(header::CACHE_CONTROL, NO_CACHE_DIRECTIVE);
                }
                error!(id = %id, error = %err, "Failed to stream cover art");
                return Err(err.into());
            }
        };
        debug!(id = %id, size, bytes, "Served cover art");

        Ok(())
    }
}

fn clamp_size(size: i64) -> u32 {
    u32::try_from(size.max(0)).unwrap_or(u32::MAX)
}
