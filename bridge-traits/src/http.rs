//! HTTP Response Abstraction
//!
//! The protocol endpoint owns the actual HTTP server. The gateway writes
//! headers, redirects and body bytes through [`ResponseSink`] so it stays
//! independent of the server framework.

use bytes::Bytes;
use std::collections::HashMap;
use tokio::io::AsyncWrite;

use crate::error::{BridgeError, Result};

/// Header names the gateway writes. Lowercase, as sent on the wire.
pub mod header {
    pub const CACHE_CONTROL: &str = "cache-control";
    pub const LOCATION: &str = "location";
}

/// 200 OK
pub const STATUS_OK: u16 = 200;
/// 302 Found: temporary redirect, re-issued by the client as GET
pub const STATUS_FOUND: u16 = 302;

/// Response writer handed to the gateway for a single request.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::http::{header, ResponseSink};
/// use tokio::io::AsyncWriteExt;
///
/// async fn write_png(sink: &mut dyn ResponseSink, png: &[u8]) -> std::io::Result<()> {
///     sink.set_header(header::CACHE_CONTROL, "no-cache");
///     sink.body().write_all(png).await
/// }
/// ```
pub trait ResponseSink: Send {
    /// Set (or replace) a response header.
    fn set_header(&mut self, name: &str, value: &str);

    /// Turn the response into a redirect to `location`. No body is written
    /// afterwards.
    fn redirect(&mut self, location: &str, status: u16);

    /// Writer for the raw response body.
    fn body(&mut self) -> &mut (dyn AsyncWrite + Send + Unpin);
}

/// In-memory [`ResponseSink`]
///
/// Collects everything the gateway writes. Hosts can translate it into
/// their framework's response type; tests inspect it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferedResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Default for BufferedResponse {
    fn default() -> Self {
        Self {
            status: STATUS_OK,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a header, case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Redirect target, if this response is a redirect
    pub fn location(&self) -> Option<&str> {
        if self.is_redirect() {
            self.header(header::LOCATION)
        } else {
            None
        }
    }

    /// Check if response status is a redirect (3xx)
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// Check if response status is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get response body as UTF-8 string
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.clone())
            .map_err(|e| BridgeError::OperationFailed(format!("Invalid UTF-8: {}", e)))
    }

    /// Consume the response, keeping only the body
    pub fn into_body(self) -> Bytes {
        Bytes::from(self.body)
    }
}

impl ResponseSink for BufferedResponse {
    fn set_header(&mut self, name: &str, value: &str) {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
    }

    fn redirect(&mut self, location: &str, status: u16) {
        self.status = status;
        self.set_header(header::LOCATION, location);
        self.body.clear();
    }

    fn body(&mut self) -> &mut (dyn AsyncWrite + Send + Unpin) {
        &mut self.body
    }
}
