//! OAuth callback verification.
//!
//! Shopify signs the redirect back to the app with an `hmac` query parameter:
//! the lowercase hex HMAC-SHA256 of the remaining parameters in callback
//! canonical form (see [`QueryParams::callback_signable_string`]).
//!
//! A verified callback proves the parameters came from Shopify. It does not
//! prove the `state` is the one this browser was given; compare that
//! separately with [`StateParam::matches`](crate::auth::oauth::StateParam::matches).

use crate::auth::oauth::error::OAuthError;
use crate::auth::oauth::hmac::verify_message;
use crate::auth::oauth::query::{QueryParams, HMAC_PARAM};
use crate::config::AppConfig;

/// Verifies a callback's `hmac` against a single secret.
///
/// Only the first `hmac` value is considered. A missing or non-hex `hmac`
/// is `Ok(false)`.
///
/// # Errors
///
/// Returns [`OAuthError::InvalidCallback`] if the canonical message is not
/// valid UTF-8 after percent-decoding.
pub fn verify_callback_query(secret: &str, params: &QueryParams) -> Result<bool, OAuthError> {
    let received = params.get(HMAC_PARAM).unwrap_or_default();
    let message = params
        .callback_signable_string()
        .map_err(|e| OAuthError::InvalidCallback {
            reason: format!("callback parameters do not decode: {e}"),
        })?;

    Ok(verify_message(&message, received, secret))
}

/// Verifies the `hmac` of an OAuth callback URL.
///
/// The API secret is tried first, then the old API secret if one is
/// configured.
///
/// # Errors
///
/// Returns [`OAuthError::InvalidCallback`] if `url` is not an absolute URL or
/// its parameters cannot be canonicalized.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::{AppConfig, ApiKey, ApiSecretKey};
/// use shopify_app_auth::auth::oauth::verify_authorization_url;
///
/// let config = AppConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .api_secret_key(ApiSecretKey::new("hush").unwrap())
///     .build()
///     .unwrap();
///
/// let url = "https://app.example/cb?code=0907a61c0c8d55e99db179b68161bc00\
///     &hmac=4712bf92ffc2917d15a2f5a273e39f0116667419aa4b6ac0b3baaf26fa3c4d20\
///     &shop=some-shop.myshopify.com&timestamp=1337178173";
/// assert!(verify_authorization_url(&config, url).unwrap());
/// ```
pub fn verify_authorization_url(config: &AppConfig, url: &str) -> Result<bool, OAuthError> {
    let params = QueryParams::parse_url(url).map_err(|e| OAuthError::InvalidCallback {
        reason: format!("callback URL does not parse: {e}"),
    })?;

    for secret in config.verification_secrets() {
        if verify_callback_query(secret, &params)? {
            return Ok(true);
        }
    }

    tracing::debug!(
        shop = params.get("shop").unwrap_or_default(),
        has_hmac = params.contains_key(HMAC_PARAM),
        "Callback HMAC verification failed"
    );

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::oauth::hmac::compute_signature;
    use crate::config::{ApiKey, ApiSecretKey};

    const SIGNED_CALLBACK: &str = "https://app.example/cb?code=0907a61c0c8d55e99db179b68161bc00\
        &hmac=4712bf92ffc2917d15a2f5a273e39f0116667419aa4b6ac0b3baaf26fa3c4d20\
        &shop=some-shop.myshopify.com&timestamp=1337178173";

    fn config_with_secret(secret: &str) -> AppConfig {
        AppConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new(secret).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_known_callback_verifies() {
        assert!(verify_authorization_url(&config_with_secret("hush"), SIGNED_CALLBACK).unwrap());
    }

    #[test]
    fn test_known_callback_with_state_verifies() {
        let url = "https://app.example/cb?code=0907a61c0c8d55e99db179b68161bc00\
            &hmac=700e2dadb827fcc8609e9d5ce208b2e9cdaab9df07390d2cbca10d7c328fc4bf\
            &shop=some-shop.myshopify.com&state=0.6784241404160823&timestamp=1337178173";
        assert!(verify_authorization_url(&config_with_secret("hush"), url).unwrap());
    }

    #[test]
    fn test_parameter_order_does_not_matter() {
        let url = "https://app.example/cb?timestamp=1337178173\
            &shop=some-shop.myshopify.com\
            &hmac=4712bf92ffc2917d15a2f5a273e39f0116667419aa4b6ac0b3baaf26fa3c4d20\
            &code=0907a61c0c8d55e99db179b68161bc00";
        assert!(verify_authorization_url(&config_with_secret("hush"), url).unwrap());
    }

    #[test]
    fn test_signature_param_is_ignored() {
        let url = format!("{SIGNED_CALLBACK}&signature=anything");
        assert!(verify_authorization_url(&config_with_secret("hush"), &url).unwrap());
    }

    #[test]
    fn test_wrong_secret_fails() {
        assert!(!verify_authorization_url(&config_with_secret("other"), SIGNED_CALLBACK).unwrap());
    }

    #[test]
    fn test_tampered_parameter_fails() {
        let url = SIGNED_CALLBACK.replace("timestamp=1337178173", "timestamp=1337178174");
        assert!(!verify_authorization_url(&config_with_secret("hush"), &url).unwrap());
    }

    #[test]
    fn test_missing_or_malformed_hmac_fails() {
        let config = config_with_secret("hush");
        assert!(!verify_authorization_url(&config, "https://app.example/cb?code=a&shop=b").unwrap());
        assert!(!verify_authorization_url(&config, "https://app.example/cb?code=a&hmac=zz").unwrap());
    }

    #[test]
    fn test_uppercase_hmac_verifies() {
        let url = SIGNED_CALLBACK.replace(
            "4712bf92ffc2917d15a2f5a273e39f0116667419aa4b6ac0b3baaf26fa3c4d20",
            "4712BF92FFC2917D15A2F5A273E39F0116667419AA4B6AC0B3BAAF26FA3C4D20",
        );
        assert!(verify_authorization_url(&config_with_secret("hush"), &url).unwrap());
    }

    #[test]
    fn test_encoded_values_sign_decoded_form() {
        // HMAC-SHA256("code=a b&shop=x+y.myshopify.com&timestamp=1", "hush")
        let url = "https://app.example/cb?code=a%20b&shop=x%2By.myshopify.com&timestamp=1\
            &hmac=e950b94365d87cd4521735a9b7e5242f0aa165d756cbcc7723c92b2830601991";
        assert!(verify_authorization_url(&config_with_secret("hush"), url).unwrap());
    }

    #[test]
    fn test_old_secret_is_accepted() {
        let config = AppConfig::builder()
            .api_key(ApiKey::new("key").unwrap())
            .api_secret_key(ApiSecretKey::new("rotated").unwrap())
            .old_api_secret_key(ApiSecretKey::new("hush").unwrap())
            .build()
            .unwrap();
        assert!(verify_authorization_url(&config, SIGNED_CALLBACK).unwrap());
    }

    #[test]
    fn test_relative_url_is_invalid_callback() {
        let result = verify_authorization_url(&config_with_secret("hush"), "/cb?code=a");
        assert!(matches!(result, Err(OAuthError::InvalidCallback { .. })));
    }

    #[test]
    fn test_literal_percent_in_value_is_signed_verbatim() {
        let mut params = QueryParams::new();
        params.append("code", "%FF");
        params.append(HMAC_PARAM, compute_signature("code=%FF", "hush"));

        assert!(verify_callback_query("hush", &params).unwrap());
    }

    #[test]
    fn test_verify_callback_query_with_single_secret() {
        let mut params = QueryParams::new();
        params.append("shop", "acme.myshopify.com");
        params.append("timestamp", "1");
        params.append(
            HMAC_PARAM,
            compute_signature("shop=acme.myshopify.com&timestamp=1", "hush"),
        );

        assert!(verify_callback_query("hush", &params).unwrap());
        assert!(!verify_callback_query("nope", &params).unwrap());
    }
}
