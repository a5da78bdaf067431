//! App credentials for the OAuth handshake and signature verification.
//!
//! - [`AppConfig`]: immutable app credentials, built once per app
//! - [`AppConfigBuilder`]: builder for [`AppConfig`]
//! - [`ApiKey`], [`ApiSecretKey`], [`ShopDomain`], [`HostUrl`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::{AppConfig, ApiKey, ApiSecretKey, HostUrl};
//!
//! let config = AppConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .api_secret_key(ApiSecretKey::new("my-secret").unwrap())
//!     .redirect_url(HostUrl::new("https://app.example/cb").unwrap())
//!     .scope("read_products,write_orders")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.scope(), "read_products,write_orders");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, ApiSecretKey, HostUrl, ShopDomain};

use crate::error::ConfigError;

/// Credentials of a Shopify app.
///
/// The API secret is the HMAC key for callback, proxy and webhook
/// signatures. An optional previous secret can be configured during key
/// rotation; the config-level verifiers accept signatures made with either.
#[derive(Clone, Debug)]
pub struct AppConfig {
    api_key: ApiKey,
    api_secret_key: ApiSecretKey,
    old_api_secret_key: Option<ApiSecretKey>,
    redirect_url: Option<HostUrl>,
    scope: String,
    user_agent_prefix: Option<String>,
}

impl AppConfig {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API secret key.
    #[must_use]
    pub const fn api_secret_key(&self) -> &ApiSecretKey {
        &self.api_secret_key
    }

    /// Returns the previous API secret key, if configured.
    #[must_use]
    pub const fn old_api_secret_key(&self) -> Option<&ApiSecretKey> {
        self.old_api_secret_key.as_ref()
    }

    /// Returns the OAuth redirect URL, if configured.
    #[must_use]
    pub const fn redirect_url(&self) -> Option<&HostUrl> {
        self.redirect_url.as_ref()
    }

    /// Returns the requested OAuth scope string, verbatim.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the secrets to try when verifying a signature, primary first.
    pub(crate) fn verification_secrets(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.api_secret_key.as_ref())
            .chain(self.old_api_secret_key.as_ref().map(|key| -> &str { key.as_ref() }))
    }
}

// Verify AppConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AppConfig>();
};

/// Builder for [`AppConfig`].
///
/// `api_key` and `api_secret_key` are required. The scope defaults to the
/// empty string and the redirect URL to none; both are still sent (empty)
/// in the authorization URL.
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_key: Option<ApiKey>,
    api_secret_key: Option<ApiSecretKey>,
    old_api_secret_key: Option<ApiSecretKey>,
    redirect_url: Option<HostUrl>,
    scope: Option<String>,
    user_agent_prefix: Option<String>,
}

impl AppConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Sets the API secret key (required).
    #[must_use]
    pub fn api_secret_key(mut self, key: ApiSecretKey) -> Self {
        self.api_secret_key = Some(key);
        self
    }

    /// Sets the previous API secret key, accepted during key rotation.
    #[must_use]
    pub fn old_api_secret_key(mut self, key: ApiSecretKey) -> Self {
        self.old_api_secret_key = Some(key);
        self
    }

    /// Sets the OAuth redirect URL.
    #[must_use]
    pub fn redirect_url(mut self, url: HostUrl) -> Self {
        self.redirect_url = Some(url);
        self
    }

    /// Sets the requested OAuth scope string, e.g. `read_products,write_orders`.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Sets the user agent prefix for token exchange requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` or
    /// `api_secret_key` are not set.
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;
        let api_secret_key = self
            .api_secret_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "api_secret_key",
            })?;

        Ok(AppConfig {
            api_key,
            api_secret_key,
            old_api_secret_key: self.old_api_secret_key,
            redirect_url: self.redirect_url,
            scope: self.scope.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
