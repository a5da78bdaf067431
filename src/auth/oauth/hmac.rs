//! HMAC-SHA256 signing and constant-time verification.
//!
//! Shopify signs three kinds of messages with the app's API secret:
//!
//! | Message               | Carried in                    | Encoding |
//! |-----------------------|-------------------------------|----------|
//! | OAuth callback        | `hmac` query parameter        | hex      |
//! | App proxy request     | `signature` query parameter   | hex      |
//! | Webhook delivery      | `X-Shopify-Hmac-Sha256` header | base64   |
//!
//! All of them go through [`compute_and_compare`], which is parameterized by
//! the [`SignatureEncoding`] and by the [`Comparison`] direction: either the
//! computed digest is encoded and compared as text, or the received signature
//! is decoded and compared as raw bytes. The final comparison is always
//! constant-time and a length mismatch is a plain `false`.
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::auth::oauth::hmac::{
//!     compute_and_compare, compute_signature, Comparison, SignatureEncoding,
//! };
//!
//! let signature = compute_signature("shop=acme.myshopify.com", "hush");
//! assert!(compute_and_compare(
//!     "hush",
//!     b"shop=acme.myshopify.com",
//!     signature.as_bytes(),
//!     SignatureEncoding::Hex,
//!     Comparison::DecodeReceived,
//! ));
//! ```

use base64::prelude::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Size in bytes of an HMAC-SHA256 digest.
pub const DIGEST_LENGTH: usize = 32;

/// Text encoding of a signature on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignatureEncoding {
    /// Lowercase hexadecimal.
    Hex,
    /// RFC 4648 standard base64 with padding.
    Base64,
}

impl SignatureEncoding {
    /// Encodes raw digest bytes.
    #[must_use]
    pub fn encode(self, digest: &[u8]) -> String {
        match self {
            Self::Hex => hex::encode(digest),
            Self::Base64 => BASE64_STANDARD.encode(digest),
        }
    }

    /// Decodes a received signature into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureDecodeError`] if `signature` is not valid in this
    /// encoding.
    pub fn decode(self, signature: &[u8]) -> Result<Vec<u8>, SignatureDecodeError> {
        match self {
            Self::Hex => Ok(hex::decode(signature)?),
            Self::Base64 => Ok(BASE64_STANDARD.decode(signature)?),
        }
    }
}

/// Direction of the digest comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    /// Encode the computed digest and compare it with the received text as
    /// opaque bytes.
    EncodeComputed,
    /// Decode the received signature and compare it with the computed digest
    /// bytes. A signature that fails to decode never matches.
    DecodeReceived,
}

/// A received signature could not be decoded.
#[derive(Debug, Error, Clone)]
pub enum SignatureDecodeError {
    /// Not valid hexadecimal.
    #[error("invalid hex signature: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Not valid base64.
    #[error("invalid base64 signature: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Computes the raw HMAC-SHA256 digest of `message` keyed by `secret`.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_digest(message: &[u8], secret: &str) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

/// Computes a lowercase hex HMAC-SHA256 signature, the format used by the
/// callback `hmac` and proxy `signature` query parameters.
///
/// ```rust
/// use shopify_app_auth::auth::oauth::hmac::compute_signature;
///
/// let sig = compute_signature("message", "key");
/// assert_eq!(sig, "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a");
/// ```
#[must_use]
pub fn compute_signature(message: &str, secret: &str) -> String {
    SignatureEncoding::Hex.encode(&compute_digest(message.as_bytes(), secret))
}

/// Computes a base64 HMAC-SHA256 signature of raw bytes, the format of the
/// `X-Shopify-Hmac-Sha256` webhook header.
///
/// ```rust
/// use shopify_app_auth::auth::oauth::hmac::compute_signature_base64;
///
/// let sig = compute_signature_base64(b"message", "key");
/// assert_eq!(sig, "bp7ym3X//Ft6uuUn1Y/a2y/kLnIZARl2kXNDBl9Y7Uo=");
/// ```
#[must_use]
pub fn compute_signature_base64(message: &[u8], secret: &str) -> String {
    SignatureEncoding::Base64.encode(&compute_digest(message, secret))
}

/// Constant-time equality of two byte strings. Different lengths compare
/// unequal.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Constant-time equality of two strings.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}

/// Computes the HMAC-SHA256 of `message` and compares it with `received`.
///
/// See [`Comparison`] for the two directions. Returns `false` on any
/// mismatch, including a `received` value that does not decode.
#[must_use]
pub fn compute_and_compare(
    secret: &str,
    message: &[u8],
    received: &[u8],
    encoding: SignatureEncoding,
    comparison: Comparison,
) -> bool {
    let computed = compute_digest(message, secret);

    match comparison {
        Comparison::EncodeComputed => {
            constant_time_eq(encoding.encode(&computed).as_bytes(), received)
        }
        Comparison::DecodeReceived => encoding
            .decode(received)
            .map_or(false, |decoded| constant_time_eq(&decoded, &computed)),
    }
}

/// Verifies a message against a hex-encoded HMAC, decoding the received
/// value first.
///
/// ```rust
/// use shopify_app_auth::auth::oauth::hmac::{compute_signature, verify_message};
///
/// let mac = compute_signature("hello", "hush");
/// assert!(verify_message("hello", &mac, "hush"));
/// assert!(!verify_message("hello", "zz", "hush"));
/// ```
#[must_use]
pub fn verify_message(message: &str, message_mac: &str, secret: &str) -> bool {
    compute_and_compare(
        secret,
        message.as_bytes(),
        message_mac.as_bytes(),
        SignatureEncoding::Hex,
        Comparison::DecodeReceived,
    )
}
