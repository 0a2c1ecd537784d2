//! # Lyrics Sync Classifier
//!
//! Decides whether raw lyric text is time-synchronized (LRC style, one
//! `[mm:ss.ff]` marker per line) and produces display text with the timing
//! markers removed.
//!
//! ## Marker grammar
//!
//! A marker is a bracketed `[hh:]mm:ss[.ff]` token: optional one- or
//! two-digit hour, mandatory one- or two-digit minute and second, optional
//! one- or two-digit fraction. `[02:50]`, `[02:50.85]` and `[04:02:50.85]`
//! are markers; LRC tag lines such as `[ar:Artist]` and section labels such
//! as `[Chorus]` are not.
//!
//! ## Usage
//!
//! ```
//! use core_metadata::lyrics::classify;
//!
//! let lyrics = classify("[00:12.50]First line\n[00:17.20]Second line");
//! assert!(lyrics.synced);
//! assert_eq!(lyrics.value, "First line\nSecond line");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Timestamp marker grammar, `[hh:]mm:ss[.ff]` in square brackets
pub const TIMESTAMP_PATTERN: &str = r"\[([0-9]{1,2}:)?([0-9]{1,2}:)([0-9]{1,2})(\.[0-9]{1,2})?\]";

static TIMESTAMP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(TIMESTAMP_PATTERN).expect("timestamp pattern is a valid regex"));

// =============================================================================
// Core Types
// =============================================================================

/// Classified lyric text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsText {
    /// Display text; timing markers removed when `synced`
    pub value: String,
    /// Whether the raw text carried at least one timing marker
    pub synced: bool,
}

impl LyricsText {
    /// Plain text that needed no processing
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            synced: false,
        }
    }
}

// =============================================================================
// Classification
// =============================================================================

/// True if `raw` contains at least one timestamp marker anywhere.
pub fn is_synced(raw: &str) -> bool {
    TIMESTAMP_RE.is_match(raw)
}

/// Remove every timestamp marker from `raw`, leaving everything else
/// (line breaks included) untouched.
///
/// The result never contains a marker: removing one marker can join its
/// neighbours into a new one (`[[00:01]00:02]`), so stripping repeats until
/// nothing matches. Each pass shortens the text, so this terminates.
pub fn strip_timestamps(raw: &str) -> String {
    let mut text = TIMESTAMP_RE.replace_all(raw, "").into_owned();
    while TIMESTAMP_RE.is_match(&text) {
        text = TIMESTAMP_RE.replace_all(&text, "").into_owned();
    }
    text
}

/// Classify raw lyric text.
///
/// Synced text comes back stripped of its markers; anything else is
/// returned unchanged.
pub fn classify(raw: &str) -> LyricsText {
    if is_synced(raw) {
        LyricsText {
            value: strip_timestamps(raw),
            synced: true,
        }
    } else {
        LyricsText::plain(raw)
    }
}

// =============================================================================
// Tests
// =============================================================================
