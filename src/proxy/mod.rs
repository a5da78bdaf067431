//! App proxy request verification.
//!
//! When Shopify forwards a storefront request to an app proxy URL, it appends
//! `shop`, `path_prefix`, `timestamp`, `logged_in_customer_id` and a
//! `signature`: the lowercase hex HMAC-SHA256 of the other parameters in
//! proxy canonical form (see [`QueryParams::proxy_signable_string`]).
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::{AppConfig, ApiKey, ApiSecretKey};
//! use shopify_app_auth::proxy::verify_proxy_signature;
//!
//! let config = AppConfig::builder()
//!     .api_key(ApiKey::new("key").unwrap())
//!     .api_secret_key(ApiSecretKey::new("hush").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let url = "https://app.example/proxy?extra=1&extra=2&shop=shop-name.myshopify.com\
//!     &logged_in_customer_id=1&path_prefix=%2Fapps%2Fawesome_reviews&timestamp=1317327555\
//!     &signature=4c68c8624d737112c91818c11017d24d334b524cb5c2b8ba08daa056f7395ddb";
//! assert!(verify_proxy_signature(&config, url));
//! ```

use crate::auth::oauth::hmac::{compute_and_compare, Comparison, SignatureEncoding};
use crate::auth::oauth::query::{QueryParams, SIGNATURE_PARAM};
use crate::config::AppConfig;

/// Verifies an app proxy query against a single secret.
///
/// Only the first `signature` value is considered and it must be the exact
/// lowercase hex digest. A missing signature is `false`.
#[must_use]
pub fn verify_proxy_query(secret: &str, params: &QueryParams) -> bool {
    let received = params.get(SIGNATURE_PARAM).unwrap_or_default();

    compute_and_compare(
        secret,
        params.proxy_signable_string().as_bytes(),
        received.as_bytes(),
        SignatureEncoding::Hex,
        Comparison::EncodeComputed,
    )
}

/// Verifies the `signature` of an app proxy request URL.
///
/// The API secret is tried first, then the old API secret if one is
/// configured. A URL that does not parse is `false`.
#[must_use]
pub fn verify_proxy_signature(config: &AppConfig, url: &str) -> bool {
    let Ok(params) = QueryParams::parse_url(url) else {
        tracing::debug!("App proxy URL does not parse");
        return false;
    };

    let verified = config
        .verification_secrets()
        .any(|secret| verify_proxy_query(secret, &params));

    if !verified {
        tracing::debug!(
            shop = params.get("shop").unwrap_or_default(),
            has_signature = params.contains_key(SIGNATURE_PARAM),
            "App proxy signature verification failed"
        );
    }
    verified
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, ApiSecretKey};

    const SIGNED_PROXY: &str = "https://app.example/proxy?extra=1&extra=2\
        &shop=shop-name.myshopify.com&logged_in_customer_id=1\
        &path_prefix=%2Fapps%2Fawesome_reviews&timestamp=1317327555\
        &signature=4c68c8624d737112c91818c11017d24d334b524cb5c2b8ba08daa056f7395ddb";

    fn config_with_secret(secret: &str) -> AppConfig {
        AppConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new(secret).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_known_proxy_request_verifies() {
        assert!(verify_proxy_signature(&config_with_secret("hush"), SIGNED_PROXY));
    }

    #[test]
    fn test_proxy_request_without_customer_verifies() {
        let url = "https://app.example/proxy?shop=some-shop.myshopify.com\
            &path_prefix=%2Fapps%2Fawesome_reviews&timestamp=1317327555&extra=1&extra=2\
            &signature=2f40422c390a097f51a663391489cc5c5e234dd49badf100fb7ac0433a0e4f0f";
        assert!(verify_proxy_signature(&config_with_secret("hush"), url));
    }

    #[test]
    fn test_wrong_secret_fails() {
        assert!(!verify_proxy_signature(&config_with_secret("other"), SIGNED_PROXY));
    }

    #[test]
    fn test_tampered_parameter_fails() {
        let url = SIGNED_PROXY.replace("logged_in_customer_id=1", "logged_in_customer_id=2");
        assert!(!verify_proxy_signature(&config_with_secret("hush"), &url));
    }

    #[test]
    fn test_repeated_value_order_matters() {
        let url = SIGNED_PROXY.replace("extra=1&extra=2", "extra=2&extra=1");
        assert!(!verify_proxy_signature(&config_with_secret("hush"), &url));
    }

    #[test]
    fn test_uppercase_signature_fails() {
        let url = SIGNED_PROXY.replace(
            "4c68c8624d737112c91818c11017d24d334b524cb5c2b8ba08daa056f7395ddb",
            "4C68C8624D737112C91818C11017D24D334B524CB5C2B8BA08DAA056F7395DDB",
        );
        assert!(!verify_proxy_signature(&config_with_secret("hush"), &url));
    }

    #[test]
    fn test_missing_signature_fails() {
        let url = "https://app.example/proxy?shop=shop-name.myshopify.com&timestamp=1317327555";
        assert!(!verify_proxy_signature(&config_with_secret("hush"), url));
    }

    #[test]
    fn test_unparseable_url_fails() {
        assert!(!verify_proxy_signature(&config_with_secret("hush"), "proxy?signature=abc"));
    }

    #[test]
    fn test_old_secret_is_accepted() {
        let config = AppConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new("rotated").unwrap())
            .old_api_secret_key(ApiSecretKey::new("hush").unwrap())
            .build()
            .unwrap();
        assert!(verify_proxy_signature(&config, SIGNED_PROXY));
    }

    #[test]
    fn test_hmac_param_is_part_of_proxy_message() {
        let mut params = QueryParams::parse("shop=acme.myshopify.com&hmac=x");
        let signature =
            crate::auth::oauth::hmac::compute_signature("hmac=xshop=acme.myshopify.com", "hush");
        params.append(SIGNATURE_PARAM, signature);

        assert!(verify_proxy_query("hush", &params));
    }
}
