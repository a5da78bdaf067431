//! Authentication with a shop.
//!
//! - [`oauth`]: authorization URL, callback verification and code exchange
//! - [`AccessToken`]: the credential the code exchange yields
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_app_auth::auth::oauth::{build_authorize_url, exchange_code_for_token};
//!
//! // 1. Redirect the merchant
//! let url = build_authorize_url(&config, &shop, state.as_ref());
//!
//! // 2. After the verified callback, exchange the code
//! let token = exchange_code_for_token(&config, &shop, code).await?;
//! println!("Granted: {}", token.scope);
//! ```

pub mod oauth;
mod token;

pub use token::AccessToken;
