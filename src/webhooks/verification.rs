//! Webhook signature verification.
//!
//! Shopify signs every webhook delivery with HMAC-SHA256 over the raw body,
//! keyed by the app's API secret, and sends the base64 digest in the
//! `X-Shopify-Hmac-Sha256` header.
//!
//! - [`verify_webhook_request`]: silent, `true` or `false`
//! - [`verify_webhook_request_verbose`]: reports why verification failed
//! - [`verify_webhook`]: uses [`AppConfig`], supports key rotation and returns
//!   the delivery's [`WebhookContext`]
//!
//! All three read the body exactly once and restore it before returning, on
//! every path.
//!
//! # Security
//!
//! All digest comparisons are constant-time.

use crate::auth::oauth::hmac::{
    compute_and_compare, compute_digest, constant_time_eq, Comparison, SignatureEncoding,
    DIGEST_LENGTH,
};
use crate::config::AppConfig;
use crate::webhooks::{WebhookError, WebhookRequest};

/// HTTP header name for the HMAC-SHA256 signature.
///
/// The value is the base64-encoded HMAC-SHA256 of the request body.
pub const HEADER_HMAC: &str = "X-Shopify-Hmac-Sha256";

/// HTTP header name for the webhook topic (e.g. `orders/create`).
pub const HEADER_TOPIC: &str = "X-Shopify-Topic";

/// HTTP header name for the shop domain (e.g. `example.myshopify.com`).
pub const HEADER_SHOP_DOMAIN: &str = "X-Shopify-Shop-Domain";

/// HTTP header name for the API version of the payload (e.g. `2025-10`).
pub const HEADER_API_VERSION: &str = "X-Shopify-API-Version";

/// HTTP header name for the unique delivery ID.
pub const HEADER_WEBHOOK_ID: &str = "X-Shopify-Webhook-Id";

/// Metadata of a verified webhook delivery.
///
/// Returned by [`verify_webhook`]. Every field is read from the request
/// headers; a header that is absent or not UTF-8 is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookContext {
    topic: Option<String>,
    shop_domain: Option<String>,
    api_version: Option<String>,
    webhook_id: Option<String>,
}

impl WebhookContext {
    fn from_request(request: &WebhookRequest) -> Self {
        let header = |name: &str| request.header_str(name).map(String::from);
        Self {
            topic: header(HEADER_TOPIC),
            shop_domain: header(HEADER_SHOP_DOMAIN),
            api_version: header(HEADER_API_VERSION),
            webhook_id: header(HEADER_WEBHOOK_ID),
        }
    }

    /// Returns the webhook topic, e.g. `orders/create`.
    #[must_use]
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// Returns the shop domain.
    #[must_use]
    pub fn shop_domain(&self) -> Option<&str> {
        self.shop_domain.as_deref()
    }

    /// Returns the API version of the payload.
    #[must_use]
    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// Returns the delivery ID, useful for idempotency.
    #[must_use]
    pub fn webhook_id(&self) -> Option<&str> {
        self.webhook_id.as_deref()
    }
}

/// Verifies a webhook delivery against a single secret.
///
/// The header value is compared byte-for-byte with the base64 digest of the
/// body. A missing header, an unreadable body or a mismatch all yield
/// `false`; a read error verifies whatever was read before it.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::webhooks::{verify_webhook_request, WebhookRequest, HEADER_HMAC};
///
/// let mut request = WebhookRequest::from_bytes(br#"{"id":1}"#.to_vec())
///     .with_header(HEADER_HMAC, "VnKUjZsLuN5iZWjn5EntcBVCF9kMN43LglzCE1/GSeY=");
/// assert!(verify_webhook_request("hush", &mut request));
/// ```
#[must_use]
pub fn verify_webhook_request(secret: &str, request: &mut WebhookRequest) -> bool {
    let received = request.header(HEADER_HMAC).unwrap_or_default().to_vec();

    let mut guard = request.guard_body();
    if let Err(e) = guard.read_to_end() {
        tracing::debug!(error = %e, "Webhook body read failed");
    }

    let verified = compute_and_compare(
        secret,
        guard.bytes(),
        &received,
        SignatureEncoding::Base64,
        Comparison::EncodeComputed,
    );
    if !verified {
        tracing::debug!(body_len = guard.bytes().len(), "Webhook HMAC verification failed");
    }
    verified
}

/// Verifies a webhook delivery against a single secret, reporting the first
/// failed check.
///
/// Checks run in this order: secret non-empty, header present, header decodes
/// to a 32-byte digest, body readable, body non-empty, digests equal.
///
/// # Errors
///
/// Returns the [`WebhookError`] for the first failed check.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::webhooks::{
///     verify_webhook_request_verbose, WebhookError, WebhookRequest, HEADER_HMAC,
/// };
///
/// let mut request = WebhookRequest::from_bytes(br#"{"id":1}"#.to_vec());
/// assert!(matches!(
///     verify_webhook_request_verbose("hush", &mut request),
///     Err(WebhookError::MissingHeader { header: HEADER_HMAC })
/// ));
/// ```
pub fn verify_webhook_request_verbose(
    secret: &str,
    request: &mut WebhookRequest,
) -> Result<(), WebhookError> {
    if secret.is_empty() {
        return Err(WebhookError::EmptySecret);
    }

    let received = request
        .header(HEADER_HMAC)
        .filter(|value| !value.is_empty())
        .ok_or(WebhookError::MissingHeader {
            header: HEADER_HMAC,
        })?;

    let received = SignatureEncoding::Base64.decode(received).map_err(|e| {
        WebhookError::MalformedSignature {
            reason: e.to_string(),
        }
    })?;
    if received.len() != DIGEST_LENGTH {
        return Err(WebhookError::MalformedSignature {
            reason: format!(
                "received HMAC is {} bytes, expected {DIGEST_LENGTH}",
                received.len()
            ),
        });
    }

    let mut guard = request.guard_body();
    guard.read_to_end()?;
    if guard.bytes().is_empty() {
        return Err(WebhookError::EmptyBody);
    }

    let computed = compute_digest(guard.bytes(), secret);
    if !constant_time_eq(&computed, &received) {
        return Err(WebhookError::Mismatch {
            expected: hex::encode(computed),
            received: hex::encode(received),
        });
    }

    Ok(())
}

/// Verifies a webhook delivery with the app's credentials and returns its
/// context.
///
/// The API secret is tried first, then the old API secret if one is
/// configured, so deliveries signed before a key rotation still verify.
///
/// # Errors
///
/// - [`WebhookError::MissingHeader`]: no signature header
/// - [`WebhookError::Io`]: the body could not be read
/// - [`WebhookError::InvalidHmac`]: no configured secret matches
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::webhooks::{verify_webhook, WebhookRequest, HEADER_HMAC, HEADER_TOPIC};
/// use shopify_app_auth::{AppConfig, ApiKey, ApiSecretKey};
/// use shopify_app_auth::auth::oauth::hmac::compute_signature_base64;
///
/// let config = AppConfig::builder()
///     .api_key(ApiKey::new("key").unwrap())
///     .api_secret_key(ApiSecretKey::new("secret").unwrap())
///     .build()
///     .unwrap();
///
/// let body = b"test payload";
/// let mut request = WebhookRequest::from_bytes(body.to_vec())
///     .with_header(HEADER_HMAC, compute_signature_base64(body, "secret"))
///     .with_header(HEADER_TOPIC, "orders/create");
///
/// let context = verify_webhook(&config, &mut request).unwrap();
/// assert_eq!(context.topic(), Some("orders/create"));
/// ```
pub fn verify_webhook(
    config: &AppConfig,
    request: &mut WebhookRequest,
) -> Result<WebhookContext, WebhookError> {
    let received = request
        .header(HEADER_HMAC)
        .filter(|value| !value.is_empty())
        .ok_or(WebhookError::MissingHeader {
            header: HEADER_HMAC,
        })?
        .to_vec();

    let verified = {
        let mut guard = request.guard_body();
        guard.read_to_end()?;
        config.verification_secrets().any(|secret| {
            compute_and_compare(
                secret,
                guard.bytes(),
                &received,
                SignatureEncoding::Base64,
                Comparison::EncodeComputed,
            )
        })
    };

    let context = WebhookContext::from_request(request);
    if !verified {
        tracing::debug!(
            topic = context.topic().unwrap_or_default(),
            shop = context.shop_domain().unwrap_or_default(),
            "Webhook HMAC verification failed"
        );
        return Err(WebhookError::InvalidHmac);
    }

    Ok(context)
}
