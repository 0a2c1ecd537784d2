//! External avatar provider abstraction.

/// Derives a redirect URL for a user's avatar from their email address.
///
/// Implementations must be deterministic and must not perform network I/O;
/// the gateway only forwards the client to the returned location.
pub trait AvatarUrlProvider: Send + Sync {
    /// Build the avatar URL for `email`. `size == 0` leaves the size choice to
    /// the provider.
    fn avatar_url(&self, email: &str, size: u32) -> String;
}
