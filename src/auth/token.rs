//! Access token returned by the authorization code exchange.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An access token granted for one shop.
///
/// Created once per successful
/// [`exchange_code_for_token`](crate::auth::oauth::exchange_code_for_token)
/// call. Persisting it is up to the caller.
///
/// The `Debug` output masks the token value.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::AccessToken;
///
/// let token: AccessToken = serde_json::from_str(
///     r#"{"access_token":"shpat_123","scope":"read_products,write_orders"}"#,
/// ).unwrap();
///
/// assert_eq!(token.access_token, "shpat_123");
/// assert_eq!(token.scopes().collect::<Vec<_>>(), vec!["read_products", "write_orders"]);
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// The access token string.
    pub access_token: String,
    /// The granted scopes, comma-separated, as returned by Shopify.
    pub scope: String,
}

impl AccessToken {
    /// Iterates over the granted scopes.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope
            .split(',')
            .map(str::trim)
            .filter(|scope| !scope.is_empty())
    }

    /// Returns `true` if `scope` was granted.
    #[must_use]
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes().any(|granted| granted == scope)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"*****")
            .field("scope", &self.scope)
            .finish()
    }
}

// Verify AccessToken is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AccessToken>();
};
