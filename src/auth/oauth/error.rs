//! OAuth error types.
//!
//! - [`OAuthError::Transport`]: the token exchange request could not be built,
//!   sent, or was answered with a non-success status
//! - [`OAuthError::Decode`]: the token endpoint answered with a body that is not
//!   `{access_token, scope}`
//! - [`OAuthError::InvalidCallback`]: a callback URL could not be parsed or
//!   canonicalized
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::auth::oauth::OAuthError;
//!
//! let error = OAuthError::Decode {
//!     reason: "missing field `access_token`".to_string(),
//! };
//! assert!(error.to_string().contains("access_token"));
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Errors that can occur during the OAuth handshake or callback verification.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// Building or sending the token exchange request failed.
    ///
    /// Wraps the HTTP client error, including non-2xx responses. Retry
    /// policy is left to the caller.
    #[error("Token exchange transport error: {0}")]
    Transport(#[from] HttpError),

    /// The token endpoint response did not decode into an access token.
    #[error("Failed to decode token response: {reason}")]
    Decode {
        /// Why decoding failed.
        reason: String,
    },

    /// The callback URL is malformed.
    #[error("Invalid callback: {reason}")]
    InvalidCallback {
        /// Description of what's invalid about the callback.
        reason: String,
    },
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};
