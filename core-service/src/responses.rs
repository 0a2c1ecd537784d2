//! Structured payloads returned to the protocol endpoint.

use serde::{Deserialize, Serialize};

/// Lyrics payload
///
/// `artist` and `title` echo the request; `value` is display text with any
/// timing markers already removed. All three are empty when no song
/// matched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lyrics {
    pub artist: String,
    pub title: String,
    pub value: String,
}

impl Lyrics {
    /// Payload for a lookup that matched nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.artist.is_empty() && self.title.is_empty() && self.value.is_empty()
    }
}
