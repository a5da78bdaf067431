//! Authorization code exchange.
//!
//! After the merchant approves the app, Shopify redirects to the app's
//! redirect URL with a one-time `code`. [`exchange_code_for_token`] trades it
//! for a permanent [`AccessToken`] by POSTing the app credentials to
//! `https://{shop}/admin/oauth/access_token`.
//!
//! Verify the callback first (see
//! [`verify_authorization_url`](crate::auth::oauth::verify_authorization_url))
//! and check its `state` before calling this.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_app_auth::auth::oauth::{exchange_code_for_token, verify_authorization_url};
//!
//! if verify_authorization_url(&config, callback_url)? {
//!     let token = exchange_code_for_token(&config, &shop, code).await?;
//!     store_token(&shop, &token.access_token).await;
//! }
//! ```

use crate::auth::oauth::error::OAuthError;
use crate::auth::AccessToken;
use crate::clients::{HttpClient, HttpRequest};
use crate::config::{AppConfig, ShopDomain};

/// Token endpoint path, relative to the shop's base URL.
pub const ACCESS_TOKEN_PATH: &str = "admin/oauth/access_token";

/// Exchanges an authorization code for an access token.
///
/// Builds an unauthenticated [`HttpClient`] for `shop` and delegates to
/// [`exchange_code_for_token_with_client`]. The request is sent once; the
/// code is single-use, so a failed call is not retried.
///
/// # Errors
///
/// - [`OAuthError::Transport`]: the client could not be built, the request
///   could not be sent, or Shopify answered with a non-2xx status
/// - [`OAuthError::Decode`]: the response is not `{access_token, scope}`
pub async fn exchange_code_for_token(
    config: &AppConfig,
    shop: &ShopDomain,
    code: &str,
) -> Result<AccessToken, OAuthError> {
    let client = HttpClient::new(shop, Some(config))?;
    exchange_code_for_token_with_client(&client, config, code).await
}

/// Exchanges an authorization code for an access token using a caller
/// provided client.
///
/// The client's base URI decides which shop is contacted.
///
/// # Errors
///
/// Same as [`exchange_code_for_token`].
///
/// # Example
///
/// ```rust,ignore
/// use shopify_app_auth::clients::HttpClient;
/// use shopify_app_auth::auth::oauth::exchange_code_for_token_with_client;
///
/// let client = HttpClient::new(&shop, Some(&config))?
///     .with_base_uri("http://127.0.0.1:8080");
/// let token = exchange_code_for_token_with_client(&client, &config, "code").await?;
/// ```
pub async fn exchange_code_for_token_with_client(
    client: &HttpClient,
    config: &AppConfig,
    code: &str,
) -> Result<AccessToken, OAuthError> {
    let client_id: &str = config.api_key().as_ref();
    let client_secret: &str = config.api_secret_key().as_ref();
    let body = serde_json::json!({
        "client_id": client_id,
        "client_secret": client_secret,
        "code": code,
    });

    let request = HttpRequest::builder(ACCESS_TOKEN_PATH)
        .body(body)
        .build()
        .map_err(|e| OAuthError::Transport(e.into()))?;

    let response = client.request(request).await.map_err(|e| {
        tracing::warn!(base_uri = %client.base_uri(), error = %e, "Access token request failed");
        OAuthError::Transport(e)
    })?;

    let token: AccessToken = serde_json::from_value(response.body).map_err(|e| {
        tracing::warn!(base_uri = %client.base_uri(), error = %e, "Access token response did not decode");
        OAuthError::Decode {
            reason: e.to_string(),
        }
    })?;

    tracing::debug!(base_uri = %client.base_uri(), scope = %token.scope, "Obtained access token");

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpError, HttpResponseError};
    use crate::config::{ApiKey, ApiSecretKey};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config() -> AppConfig {
        AppConfig::builder()
            .api_key(ApiKey::new("k1").unwrap())
            .api_secret_key(ApiSecretKey::new("s1").unwrap())
            .build()
            .unwrap()
    }

    fn mock_client(server: &MockServer, config: &AppConfig) -> HttpClient {
        HttpClient::new(&ShopDomain::new("acme").unwrap(), Some(config))
            .unwrap()
            .with_base_uri(server.uri())
    }

    #[tokio::test]
    async fn test_successful_exchange_returns_token() {
        let server = MockServer::start().await;
        let config = create_test_config();

        Mock::given(method("POST"))
            .and(path("/admin/oauth/access_token"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "client_id": "k1",
                "client_secret": "s1",
                "code": "abc"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "shpat_123",
                "scope": "read_products"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server, &config);
        let token = exchange_code_for_token_with_client(&client, &config, "abc")
            .await
            .unwrap();

        assert_eq!(token.access_token, "shpat_123");
        assert_eq!(token.scope, "read_products");
    }

    #[tokio::test]
    async fn test_unauthenticated_request_has_no_access_token_header() {
        let server = MockServer::start().await;
        let config = create_test_config();

        Mock::given(method("POST"))
            .and(path("/admin/oauth/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "shpat_123",
                "scope": "read_products"
            })))
            .mount(&server)
            .await;

        let client = mock_client(&server, &config);
        exchange_code_for_token_with_client(&client, &config, "abc")
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0]
            .headers
            .iter()
            .any(|(name, _)| name.as_str().eq_ignore_ascii_case("x-shopify-access-token")));
    }

    #[tokio::test]
    async fn test_error_status_maps_to_transport() {
        let server = MockServer::start().await;
        let config = create_test_config();

        Mock::given(method("POST"))
            .and(path("/admin/oauth/access_token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_request",
                "error_description": "The authorization code was not found or was already used"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server, &config);
        let result = exchange_code_for_token_with_client(&client, &config, "used").await;

        assert!(matches!(
            result,
            Err(OAuthError::Transport(HttpError::Response(HttpResponseError { code: 400, .. })))
        ));
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start().await;
        let config = create_test_config();

        Mock::given(method("POST"))
            .and(path("/admin/oauth/access_token"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = mock_client(&server, &config);
        let result = exchange_code_for_token_with_client(&client, &config, "abc").await;

        assert!(matches!(result, Err(OAuthError::Transport(_))));
    }

    #[tokio::test]
    async fn test_non_json_body_maps_to_decode() {
        let server = MockServer::start().await;
        let config = create_test_config();

        Mock::given(method("POST"))
            .and(path("/admin/oauth/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = mock_client(&server, &config);
        let result = exchange_code_for_token_with_client(&client, &config, "abc").await;

        assert!(matches!(result, Err(OAuthError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_missing_fields_map_to_decode() {
        let server = MockServer::start().await;
        let config = create_test_config();

        Mock::given(method("POST"))
            .and(path("/admin/oauth/access_token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "token": "shpat_123" })),
            )
            .mount(&server)
            .await;

        let client = mock_client(&server, &config);
        let result = exchange_code_for_token_with_client(&client, &config, "abc").await;

        match result {
            Err(OAuthError::Decode { reason }) => assert!(reason.contains("access_token")),
            other => panic!("Expected Decode error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_maps_to_transport() {
        let config = create_test_config();
        // Port 9 (discard) on localhost is closed in test environments
        let client = HttpClient::new(&ShopDomain::new("acme").unwrap(), Some(&config))
            .unwrap()
            .with_base_uri("http://127.0.0.1:9");

        let result = exchange_code_for_token_with_client(&client, &config, "abc").await;

        assert!(matches!(
            result,
            Err(OAuthError::Transport(HttpError::Network(_)))
        ));
    }
}
