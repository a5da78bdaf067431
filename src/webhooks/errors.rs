//! Webhook verification error types.
//!
//! - [`WebhookError::EmptySecret`]: the verifying secret is empty
//! - [`WebhookError::MissingHeader`]: the signature header is absent or empty
//! - [`WebhookError::MalformedSignature`]: the signature is not base64 of a
//!   32-byte digest
//! - [`WebhookError::Io`]: the body could not be read
//! - [`WebhookError::EmptyBody`]: the body is empty
//! - [`WebhookError::Mismatch`]: the digests differ
//! - [`WebhookError::InvalidHmac`]: no configured secret verifies the request
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::webhooks::{WebhookError, HEADER_HMAC};
//!
//! let error = WebhookError::MissingHeader { header: HEADER_HMAC };
//! assert_eq!(error.to_string(), "header X-Shopify-Hmac-Sha256 not set");
//! ```

use thiserror::Error;

/// Reasons a webhook delivery fails verification.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The secret used to verify is empty.
    #[error("API secret is empty")]
    EmptySecret,

    /// A required header is absent or has an empty value.
    #[error("header {header} not set")]
    MissingHeader {
        /// The header name.
        header: &'static str,
    },

    /// The signature header does not decode to a 32-byte digest.
    #[error("malformed HMAC header: {reason}")]
    MalformedSignature {
        /// Decode error or the decoded length.
        reason: String,
    },

    /// Reading the request body failed.
    #[error("failed to read request body: {0}")]
    Io(#[from] std::io::Error),

    /// The request body is empty.
    #[error("request body is empty")]
    EmptyBody,

    /// The computed digest differs from the received one.
    ///
    /// Both digests are lowercase hex.
    #[error("expected hash {expected} does not equal {received}")]
    Mismatch {
        /// Digest computed over the body.
        expected: String,
        /// Digest carried by the header.
        received: String,
    },

    /// No configured secret verifies the request.
    #[error("Webhook signature verification failed")]
    InvalidHmac,
}

// Verify WebhookError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<WebhookError>();
};
