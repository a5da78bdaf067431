//! Configuration error types.
//!
//! All credential and domain constructors return `Result<T, ConfigError>` so
//! that invalid values are rejected before any OAuth or verification call is
//! made.
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building app credentials.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key is empty; use the client ID from the Partner Dashboard")]
    EmptyApiKey,

    /// API secret key cannot be empty.
    #[error("API secret key is empty; every signature check needs the app's client secret")]
    EmptyApiSecretKey,

    /// Shop name or domain is invalid.
    #[error("'{domain}' is not a shop name or *.myshopify.com domain")]
    InvalidShopDomain {
        /// The rejected input, trimmed and lowercased.
        domain: String,
    },

    /// A required builder field is missing.
    #[error("AppConfig field '{field}' was never set on the builder")]
    MissingRequiredField {
        /// Builder field name.
        field: &'static str,
    },

    /// Redirect URL is invalid.
    #[error("redirect URL '{url}' is not an absolute URL with a host")]
    InvalidHostUrl {
        /// The rejected input.
        url: String,
    },
}
