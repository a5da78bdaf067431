//! # Shopify App Auth
//!
//! Authentication and request verification for Shopify apps: the OAuth
//! authorization code handshake, callback HMAC validation, app proxy
//! signature checks and webhook HMAC verification.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe app credentials via [`AppConfig`] and [`AppConfigBuilder`]
//! - Validated newtypes for API credentials and shop domains
//! - Authorization URL construction and CSRF state via [`auth::oauth`]
//! - Authorization code to access token exchange via [`auth::oauth`]
//! - Callback query HMAC validation via [`auth::oauth`]
//! - App proxy `signature` validation via [`proxy`]
//! - Webhook `X-Shopify-Hmac-Sha256` validation via [`webhooks`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shopify_app_auth::{AppConfig, ApiKey, ApiSecretKey, HostUrl};
//!
//! let config = AppConfig::builder()
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .api_secret_key(ApiSecretKey::new("your-api-secret").unwrap())
//!     .redirect_url(HostUrl::new("https://your-app.com/auth/callback").unwrap())
//!     .scope("read_products,write_orders")
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## OAuth Handshake
//!
//! ```rust,ignore
//! use shopify_app_auth::ShopDomain;
//! use shopify_app_auth::auth::oauth::{
//!     build_authorize_url, exchange_code_for_token, verify_authorization_url, QueryParams,
//!     StateParam,
//! };
//!
//! // Step 1: redirect the merchant to Shopify
//! let shop = ShopDomain::new("example-shop")?;
//! let state = StateParam::new();
//! let url = build_authorize_url(&config, &shop, state.as_ref());
//! // Store `state` in the user's session, then redirect to `url`
//!
//! // Step 2: Shopify redirects back to the callback
//! if !verify_authorization_url(&config, &callback_url)? {
//!     return Err("forged callback".into());
//! }
//! let params = QueryParams::parse_url(&callback_url)?;
//! if !state.matches(params.get("state").unwrap_or_default()) {
//!     return Err("state mismatch".into());
//! }
//!
//! // Step 3: exchange the code for a permanent token
//! let token = exchange_code_for_token(&config, &shop, params.get("code").unwrap_or_default())
//!     .await?;
//! println!("granted scopes: {}", token.scope);
//! ```
//!
//! ## Webhooks
//!
//! ```rust
//! use shopify_app_auth::webhooks::{verify_webhook_request, WebhookRequest, HEADER_HMAC};
//!
//! let mut request = WebhookRequest::from_bytes(br#"{"id":1}"#.to_vec())
//!     .with_header(HEADER_HMAC, "VnKUjZsLuN5iZWjn5EntcBVCF9kMN43LglzCE1/GSeY=");
//!
//! assert!(verify_webhook_request("hush", &mut request));
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: credentials are passed explicitly
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Constant-time comparison**: every signature check compares digests
//!   without early exit
//! - **Async where it talks to Shopify**: only the token exchange does I/O

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod proxy;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use auth::AccessToken;
pub use config::{ApiKey, ApiSecretKey, AppConfig, AppConfigBuilder, HostUrl, ShopDomain};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpRequest, HttpRequestBuilder, HttpResponse, HttpResponseError,
    InvalidHttpRequestError,
};

// Re-export the verification entry points
pub use auth::oauth::{
    build_authorize_url, exchange_code_for_token, verify_authorization_url, OAuthError,
    QueryParams, StateParam,
};
pub use proxy::verify_proxy_signature;
pub use webhooks::{verify_webhook, verify_webhook_request, WebhookError, WebhookRequest};
