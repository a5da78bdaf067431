//! The OAuth `state` parameter.
//!
//! The app generates a fresh [`StateParam`] for every authorization request,
//! remembers it (usually in a cookie or server session) and checks it against
//! the `state` query parameter of the callback before exchanging the code.
//!
//! # Example
//!
//! ```rust
//! use shopify_app_auth::auth::oauth::StateParam;
//!
//! let state = StateParam::new();
//! assert_eq!(state.as_ref().len(), 15);
//!
//! let echoed = StateParam::from_raw(state.as_ref());
//! assert!(state.matches(echoed.as_ref()));
//! ```

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;

use super::hmac::constant_time_compare;

/// An opaque anti-forgery token carried through the OAuth redirect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateParam {
    value: String,
}

// Verify StateParam is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StateParam>();
};

impl StateParam {
    /// Length of generated nonces.
    pub const NONCE_LENGTH: usize = 15;

    /// Generates a random alphanumeric nonce from the thread-local CSPRNG.
    #[must_use]
    pub fn new() -> Self {
        let value = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::NONCE_LENGTH)
            .map(char::from)
            .collect();

        Self { value }
    }

    /// Wraps an existing state string, e.g. one read back from the callback.
    #[must_use]
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Compares `received` with this state in constant time.
    #[must_use]
    pub fn matches(&self, received: &str) -> bool {
        constant_time_compare(&self.value, received)
    }
}

impl Default for StateParam {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<str> for StateParam {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
