//! OAuth authorization URL generation.
//!
//! [`build_authorize_url`] is the first step of the authorization code flow:
//! the merchant's browser is redirected to the returned URL, approves the
//! requested scope, and Shopify redirects back to the app's redirect URL with
//! a `code`, the echoed `state`, and an `hmac` over the callback parameters.
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::{AppConfig, ApiKey, ApiSecretKey, HostUrl, ShopDomain};
//! use shopify_app_auth::auth::oauth::{build_authorize_url, StateParam};
//!
//! let config = AppConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_secret_key(ApiSecretKey::new("your-secret").unwrap())
//!     .redirect_url(HostUrl::new("https://your-app.com/auth/callback").unwrap())
//!     .scope("read_products")
//!     .build()
//!     .unwrap();
//!
//! let shop = ShopDomain::new("example-shop").unwrap();
//! let state = StateParam::new();
//! let url = build_authorize_url(&config, &shop, state.as_ref());
//!
//! assert!(url.starts_with("https://example-shop.myshopify.com/admin/oauth/authorize?"));
//! // Store `state` in the user's session, then redirect to `url`
//! ```

use url::form_urlencoded;

use crate::config::{AppConfig, ShopDomain};

/// Path of the authorization endpoint on the shop's domain.
pub const AUTHORIZE_PATH: &str = "/admin/oauth/authorize";

/// Builds the URL that starts the authorization code flow for `shop`.
///
/// The query always carries `client_id`, `redirect_uri`, `scope` and
/// `state`, in that order, form-encoded. A missing redirect URL or an empty
/// scope is sent as an empty value.
///
/// `state` is passed through untouched; see
/// [`StateParam`](crate::auth::oauth::StateParam) for generating one.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::{AppConfig, ApiKey, ApiSecretKey, HostUrl, ShopDomain};
/// use shopify_app_auth::auth::oauth::build_authorize_url;
///
/// let config = AppConfig::builder()
///     .api_key(ApiKey::new("k1").unwrap())
///     .api_secret_key(ApiSecretKey::new("s1").unwrap())
///     .redirect_url(HostUrl::new("https://app.example/cb").unwrap())
///     .scope("read_products")
///     .build()
///     .unwrap();
///
/// let url = build_authorize_url(&config, &ShopDomain::new("acme").unwrap(), "xyz");
/// assert_eq!(
///     url,
///     "https://acme.myshopify.com/admin/oauth/authorize\
///      ?client_id=k1&redirect_uri=https%3A%2F%2Fapp.example%2Fcb&scope=read_products&state=xyz"
/// );
/// ```
#[must_use]
pub fn build_authorize_url(config: &AppConfig, shop: &ShopDomain, state: &str) -> String {
    let redirect_uri = config.redirect_url().map_or("", |url| url.as_ref());

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", config.api_key().as_ref())
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("scope", config.scope())
        .append_pair("state", state)
        .finish();

    format!("{}{AUTHORIZE_PATH}?{query}", shop.base_url())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::oauth::query::QueryParams;
    use crate::config::{ApiKey, ApiSecretKey, HostUrl};

    fn create_test_config() -> AppConfig {
        AppConfig::builder()
            .api_key(ApiKey::new("k1").unwrap())
            .api_secret_key(ApiSecretKey::new("super-secret-value").unwrap())
            .redirect_url(HostUrl::new("https://app.example/cb").unwrap())
            .scope("read_products")
            .build()
            .unwrap()
    }

    #[test]
    fn test_authorize_url_exact_query() {
        let config = create_test_config();
        let shop = ShopDomain::new("acme").unwrap();

        let url = build_authorize_url(&config, &shop, "xyz");
        let parsed = url::Url::parse(&url).unwrap();

        assert_eq!(parsed.scheme(), "https");
        assert_eq!(parsed.host_str(), Some("acme.myshopify.com"));
        assert_eq!(parsed.path(), AUTHORIZE_PATH);
        assert_eq!(
            parsed.query(),
            Some("client_id=k1&redirect_uri=https%3A%2F%2Fapp.example%2Fcb&scope=read_products&state=xyz")
        );
    }

    #[test]
    fn test_authorize_url_accepts_full_domain() {
        let config = create_test_config();
        let shop = ShopDomain::new("acme.myshopify.com").unwrap();

        let url = build_authorize_url(&config, &shop, "xyz");
        assert!(url.starts_with("https://acme.myshopify.com/admin/oauth/authorize?"));
    }

    #[test]
    fn test_authorize_url_keeps_empty_values() {
        let config = AppConfig::builder()
            .api_key(ApiKey::new("k1").unwrap())
            .api_secret_key(ApiSecretKey::new("s1").unwrap())
            .build()
            .unwrap();
        let shop = ShopDomain::new("acme").unwrap();

        let url = build_authorize_url(&config, &shop, "");
        assert!(url.ends_with("?client_id=k1&redirect_uri=&scope=&state="));

        let params = QueryParams::parse_url(&url).unwrap();
        assert_eq!(params.len(), 4);
        assert_eq!(params.get("redirect_uri"), Some(""));
        assert_eq!(params.get("scope"), Some(""));
        assert_eq!(params.get("state"), Some(""));
    }

    #[test]
    fn test_authorize_url_encodes_scope_and_state() {
        let config = AppConfig::builder()
            .api_key(ApiKey::new("k1").unwrap())
            .api_secret_key(ApiSecretKey::new("s1").unwrap())
            .scope("read_products,write_orders")
            .build()
            .unwrap();
        let shop = ShopDomain::new("acme").unwrap();

        let url = build_authorize_url(&config, &shop, "a b&c=d");
        assert!(url.contains("scope=read_products%2Cwrite_orders"));
        assert!(url.contains("state=a+b%26c%3Dd"));

        let params = QueryParams::parse_url(&url).unwrap();
        assert_eq!(params.get("scope"), Some("read_products,write_orders"));
        assert_eq!(params.get("state"), Some("a b&c=d"));
    }

    #[test]
    fn test_authorize_url_does_not_leak_secret() {
        let config = create_test_config();
        let shop = ShopDomain::new("acme").unwrap();

        let url = build_authorize_url(&config, &shop, "xyz");
        assert!(!url.contains("super-secret-value"));
    }
}
