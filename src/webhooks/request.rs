//! Incoming webhook requests and body restoration.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Cursor, Read};
use std::mem;

/// An incoming webhook delivery: headers plus a body stream.
///
/// Header names are matched case-insensitively; when a header is repeated the
/// first value wins. Values are kept as raw bytes.
///
/// Verifiers read the body exactly once and put back a fresh reader over the
/// same bytes before returning, so a handler can still parse the payload
/// afterwards.
///
/// # Example
///
/// ```rust
/// use std::io::Read;
/// use shopify_app_auth::webhooks::{verify_webhook_request, WebhookRequest, HEADER_HMAC};
///
/// let mut request = WebhookRequest::from_bytes(br#"{"id":1}"#.to_vec())
///     .with_header(HEADER_HMAC, "VnKUjZsLuN5iZWjn5EntcBVCF9kMN43LglzCE1/GSeY=");
///
/// assert!(verify_webhook_request("hush", &mut request));
///
/// let mut body = String::new();
/// request.body_mut().read_to_string(&mut body).unwrap();
/// assert_eq!(body, r#"{"id":1}"#);
/// ```
pub struct WebhookRequest {
    headers: HashMap<String, Vec<Vec<u8>>>,
    body: Box<dyn Read + Send>,
}

// Verify WebhookRequest is Send at compile time
const _: fn() = || {
    const fn assert_send<T: Send>() {}
    assert_send::<WebhookRequest>();
};

impl WebhookRequest {
    /// Creates a request around a body stream, without headers.
    #[must_use]
    pub fn new(body: impl Read + Send + 'static) -> Self {
        Self {
            headers: HashMap::new(),
            body: Box::new(body),
        }
    }

    /// Creates a request around an in-memory body, without headers.
    #[must_use]
    pub fn from_bytes(body: Vec<u8>) -> Self {
        Self::new(Cursor::new(body))
    }

    /// Adds a header value.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<Vec<u8>>) -> Self {
        self.append_header(name, value);
        self
    }

    /// Adds a header value.
    pub fn append_header(&mut self, name: &str, value: impl Into<Vec<u8>>) {
        self.headers
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value.into());
    }

    /// Returns the first value of a header as raw bytes.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&[u8]> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(Vec::as_slice)
    }

    /// Returns the first value of a header if it is UTF-8.
    #[must_use]
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.header(name)
            .and_then(|value| std::str::from_utf8(value).ok())
    }

    /// Returns the body stream.
    pub fn body_mut(&mut self) -> &mut (dyn Read + Send + 'static) {
        self.body.as_mut()
    }

    /// Consumes the request, returning the body stream.
    #[must_use]
    pub fn into_body(self) -> Box<dyn Read + Send> {
        self.body
    }

    /// Starts an exactly-once read of the body.
    ///
    /// Once [`BodyGuard::read_to_end`] has run, dropping the guard replaces
    /// the body with the bytes it read, whether or not reading succeeded. A
    /// guard dropped without reading leaves the body untouched.
    pub fn guard_body(&mut self) -> BodyGuard<'_> {
        BodyGuard {
            body: &mut self.body,
            buf: Vec::new(),
            consumed: false,
        }
    }
}

impl fmt::Debug for WebhookRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.headers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("WebhookRequest")
            .field("headers", &names)
            .finish_non_exhaustive()
    }
}

/// Scoped owner of a webhook body read.
///
/// Created by [`WebhookRequest::guard_body`]. If the body was read, on drop
/// the request body is replaced by a [`Cursor`] over exactly the bytes read,
/// including the partial bytes of a failed read.
pub struct BodyGuard<'a> {
    body: &'a mut Box<dyn Read + Send>,
    buf: Vec<u8>,
    consumed: bool,
}

impl BodyGuard<'_> {
    /// Reads the rest of the body into the guard.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error. Bytes read before the error are kept.
    pub fn read_to_end(&mut self) -> io::Result<usize> {
        self.consumed = true;
        self.body.read_to_end(&mut self.buf)
    }

    /// Returns the bytes read so far.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }
}

impl Drop for BodyGuard<'_> {
    fn drop(&mut self) {
        if self.consumed {
            *self.body = Box::new(Cursor::new(mem::take(&mut self.buf)));
        }
    }
}
