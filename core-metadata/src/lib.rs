//! # Metadata & Lyrics Module
//!
//! Text processing for lyrics served by the gateway.
//!
//! ## Overview
//!
//! This module handles:
//! - Detecting time-synchronized (LRC) lyrics
//! - Stripping timing markers for display

pub mod lyrics;

pub use lyrics::{classify, is_synced, strip_timestamps, LyricsText, TIMESTAMP_PATTERN};
