//! Integration tests for app proxy signature verification.

use shopify_app_auth::auth::oauth::hmac::compute_signature;
use shopify_app_auth::proxy::{verify_proxy_query, verify_proxy_signature};
use shopify_app_auth::{ApiKey, ApiSecretKey, AppConfig, QueryParams};

const PROXY_URL: &str = "https://app.example/proxy/reviews?shop=some-shop.myshopify.com\
    &path_prefix=%2Fapps%2Fawesome_reviews&timestamp=1317327555\
    &extra=1&extra=2\
    &signature=2f40422c390a097f51a663391489cc5c5e234dd49badf100fb7ac0433a0e4f0f";

fn create_test_config(secret: &str) -> AppConfig {
    AppConfig::builder()
        .api_key(ApiKey::new("key").unwrap())
        .api_secret_key(ApiSecretKey::new(secret).unwrap())
        .build()
        .unwrap()
}

#[test]
fn test_forwarded_proxy_request_verifies() {
    assert!(verify_proxy_signature(&create_test_config("hush"), PROXY_URL));
}

#[test]
fn test_forwarded_proxy_request_with_other_secret_fails() {
    assert!(!verify_proxy_signature(&create_test_config("other"), PROXY_URL));
}

#[test]
fn test_added_parameter_invalidates_signature() {
    let url = format!("{PROXY_URL}&logged_in_customer_id=42");
    assert!(!verify_proxy_signature(&create_test_config("hush"), &url));
}

#[test]
fn test_signature_covers_decoded_values() {
    let url = PROXY_URL.replace("%2Fapps%2Fawesome_reviews", "/apps/awesome_reviews");
    assert!(verify_proxy_signature(&create_test_config("hush"), &url));
}

#[test]
fn test_query_built_by_hand_verifies() {
    let mut params = QueryParams::new();
    params.append("shop", "acme.myshopify.com");
    params.append("path_prefix", "/apps/reviews");
    params.append("timestamp", "1700000000");

    let message = params.proxy_signable_string();
    assert_eq!(
        message,
        "path_prefix=/apps/reviewsshop=acme.myshopify.comtimestamp=1700000000"
    );

    params.append("signature", compute_signature(&message, "hush"));
    assert!(verify_proxy_query("hush", &params));
    assert!(!verify_proxy_query("other", &params));
}
