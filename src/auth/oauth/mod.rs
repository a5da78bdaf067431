//! OAuth 2.0 authorization code flow and callback verification.
//!
//! # Authorization Code Grant
//!
//! 1. **Authorization** ([`build_authorize_url`]): redirect the merchant to
//!    Shopify with a fresh [`StateParam`].
//! 2. **Callback verification** ([`verify_authorization_url`]): when Shopify
//!    redirects back, check the `hmac` over the callback parameters and
//!    compare the echoed `state`.
//! 3. **Code exchange** ([`exchange_code_for_token`]): trade the one-time
//!    `code` for an [`AccessToken`](crate::AccessToken).
//!
//! # Signatures
//!
//! [`hmac`] holds the HMAC-SHA256 primitive shared with webhook and app-proxy
//! verification. [`QueryParams`] produces the canonical message a query
//! string signature covers.
//!
//! # Security Features
//!
//! - **Constant-Time Comparison**: digests and state values are compared in
//!   constant time
//! - **Key Rotation Support**: an old API secret key is accepted alongside
//!   the current one
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_app_auth::{AppConfig, ApiKey, ApiSecretKey, HostUrl, ShopDomain};
//! use shopify_app_auth::auth::oauth::{
//!     build_authorize_url, exchange_code_for_token, verify_authorization_url, QueryParams,
//!     StateParam,
//! };
//!
//! let config = AppConfig::builder()
//!     .api_key(ApiKey::new("your-api-key")?)
//!     .api_secret_key(ApiSecretKey::new("your-secret")?)
//!     .redirect_url(HostUrl::new("https://your-app.com/auth/callback")?)
//!     .scope("read_products,write_orders")
//!     .build()?;
//!
//! // Step 1: redirect
//! let shop = ShopDomain::new("example-shop")?;
//! let state = StateParam::new();
//! let url = build_authorize_url(&config, &shop, state.as_ref());
//!
//! // Step 2: callback handler
//! if !verify_authorization_url(&config, callback_url)? {
//!     return Err("forged callback".into());
//! }
//! let params = QueryParams::parse_url(callback_url)?;
//! if !state.matches(params.get("state").unwrap_or_default()) {
//!     return Err("state mismatch".into());
//! }
//!
//! // Step 3: exchange
//! let token = exchange_code_for_token(&config, &shop, params.get("code").unwrap_or_default()).await?;
//! ```

mod authorize_url;
mod callback;
mod error;
pub mod hmac;
pub mod query;
mod state;
mod token_exchange;

pub use authorize_url::{build_authorize_url, AUTHORIZE_PATH};
pub use callback::{verify_authorization_url, verify_callback_query};
pub use error::OAuthError;
pub use hmac::{verify_message, Comparison, SignatureEncoding};
pub use query::QueryParams;
pub use state::StateParam;
pub use token_exchange::{
    exchange_code_for_token, exchange_code_for_token_with_client, ACCESS_TOKEN_PATH,
};
