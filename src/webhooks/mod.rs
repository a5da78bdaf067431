//! Webhook delivery verification.
//!
//! - [`WebhookRequest`]: headers plus a readable body stream
//! - [`BodyGuard`]: exactly-once body read that restores the body on drop
//! - [`verify_webhook_request`] / [`verify_webhook_request_verbose`]: verify
//!   against one secret
//! - [`verify_webhook`]: verify with [`AppConfig`](crate::AppConfig) and get
//!   the delivery's [`WebhookContext`]
//! - [`WebhookError`]: why a delivery failed verification
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::webhooks::{
//!     verify_webhook_request_verbose, WebhookRequest, HEADER_HMAC,
//! };
//!
//! let mut request = WebhookRequest::from_bytes(br#"{"id":1}"#.to_vec())
//!     .with_header(HEADER_HMAC, "VnKUjZsLuN5iZWjn5EntcBVCF9kMN43LglzCE1/GSeY=");
//!
//! verify_webhook_request_verbose("hush", &mut request).unwrap();
//!
//! // The body is still there for the handler
//! let payload: serde_json::Value = serde_json::from_reader(request.body_mut()).unwrap();
//! assert_eq!(payload["id"], 1);
//! ```
//!
//! # Error Handling
//!
//! ```rust
//! use shopify_app_auth::webhooks::WebhookError;
//!
//! fn status_for(error: &WebhookError) -> u16 {
//!     match error {
//!         WebhookError::EmptySecret => 500,
//!         WebhookError::Io(_) => 400,
//!         _ => 401,
//!     }
//! }
//! assert_eq!(status_for(&WebhookError::InvalidHmac), 401);
//! ```

mod errors;
mod request;
mod verification;

pub use errors::WebhookError;
pub use request::{BodyGuard, WebhookRequest};
pub use verification::{
    verify_webhook, verify_webhook_request, verify_webhook_request_verbose, WebhookContext,
    HEADER_API_VERSION, HEADER_HMAC, HEADER_SHOP_DOMAIN, HEADER_TOPIC, HEADER_WEBHOOK_ID,
};
