//! Avatar resolution
//!
//! With the external avatar provider enabled, users with an email address
//! are redirected to the provider; everyone else gets the bundled
//! placeholder image.

use bridge_traits::http::{ResponseSink, STATUS_FOUND};
use core_library::LibraryError;
use core_runtime::logging::redact_if_sensitive;
use tracing::{debug, error, instrument, warn};

use crate::error::{Result, ServiceError};
use crate::gateway::MediaRetrievalGateway;
use crate::params::Request;

impl MediaRetrievalGateway {
    /// Serve the avatar of the user named by the `username` parameter.
    ///
    /// Writes either a 302 redirect to the avatar provider or the raw
    /// placeholder bytes to `sink`.
    ///
    /// `username` is validated before the provider flag is consulted, so a
    /// request without it fails the same way whether or not the provider
    /// is enabled.
    ///
    /// # Errors
    /// - [`ServiceError::MissingParameter`] if `username` is absent, before
    ///   anything else happens
    /// - [`ServiceError::Library`] with [`LibraryError::NotFound`] for an
    ///   unknown user, or any other datastore failure
    /// - [`ServiceError::DataNotFound`] if the placeholder asset is missing
    #[instrument(skip_all, fields(request_id = %request.id(), endpoint = "getAvatar"))]
    pub async fn get_avatar(&self, request: &Request, sink: &mut dyn ResponseSink) -> Result<()> {
        let username = request.params().required_string("username")?;

        if !self.config.features.enable_gravatar {
            debug!("Avatar provider disabled");
            return self.serve_placeholder_avatar(sink).await;
        }

        let user = self
            .deps
            .users
            .find_by_username(username)
            .await
            .map_err(|err| {
                error!(username = %username, error = %err, "Failed to look up user");
                err
            })?
            .ok_or_else(|| {
                warn!(username = %username, "Avatar requested for unknown user");
                LibraryError::NotFound {
                    entity_type: "User".to_string(),
                    id: username.to_string(),
                }
            })?;

        let Some(email) = user.email() else {
            warn!(username = %username, "User needs an email for the avatar provider to work");
            return self.serve_placeholder_avatar(sink).await;
        };

        let location = self.deps.avatars.avatar_url(email, self.config.avatar_size);
        debug!(
            username = %username,
            email = %redact_if_sensitive("email", email),
            "Redirecting to external avatar"
        );
        sink.redirect(&location, STATUS_FOUND);

        Ok(())
    }

    async fn serve_placeholder_avatar(&self, sink: &mut dyn ResponseSink) -> Result<()> {
        let name = self.config.placeholder_avatar.as_str();

        let mut image = match self.deps.resources.open(name).await {
            Ok(image) => image,
            Err(err) if err.is_not_found() => {
                error!(asset = %name, error = %err, "Image not found");
                return Err(ServiceError::DataNotFound(
                    "Avatar image not found".to_string(),
                ));
            }
            Err(err) => {
                error!(asset = %name, error = %err, "Failed to open placeholder avatar");
                return Err(err.into());
            }
        };

        let bytes = tokio::io::copy(&mut image, sink.body()).await?;
        debug!(asset = %name, bytes, "Served placeholder avatar");

        Ok(())
    }
}
