//! Query parameter sets and their signing canonicalizations.
//!
//! Shopify signs callback and app-proxy URLs over a canonical form of the
//! query string with the signature itself removed. The two forms differ:
//!
//! - **Callback** (`hmac` parameter): the remaining parameters are
//!   form-encoded in key order and the whole string is then percent-decoded
//!   once, e.g. `code=abc&shop=acme.myshopify.com&timestamp=1`.
//! - **App proxy** (`signature` parameter): each key's values are joined
//!   with `,`, rendered as `key=value`, sorted, and concatenated without a
//!   separator, e.g. `extra=1,2shop=acme.myshopify.comtimestamp=1`.
//!
//! [`QueryParams`] keeps keys in a sorted map, so neither form depends on
//! the order in which parameters arrived.

use std::collections::BTreeMap;
use std::string::FromUtf8Error;

use url::form_urlencoded;
use url::Url;

/// Query parameter carrying the hex signature of an OAuth callback.
pub const HMAC_PARAM: &str = "hmac";

/// Query parameter carrying the hex signature of an app-proxy request.
pub const SIGNATURE_PARAM: &str = "signature";

/// A decoded query parameter multiset.
///
/// Keys are sorted; values for a repeated key keep their arrival order.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::auth::oauth::QueryParams;
///
/// let params = QueryParams::parse("shop=acme.myshopify.com&extra=1&extra=2");
/// assert_eq!(params.get("extra"), Some("1"));
/// assert_eq!(params.get_all("extra"), ["1", "2"]);
/// assert_eq!(params.proxy_signable_string(), "extra=1,2shop=acme.myshopify.com");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, Vec<String>>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `application/x-www-form-urlencoded` query string (without
    /// the leading `?`).
    #[must_use]
    pub fn parse(query: &str) -> Self {
        form_urlencoded::parse(query.as_bytes()).collect()
    }

    /// Collects the query parameters of a parsed URL.
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        url.query_pairs().collect()
    }

    /// Parses an absolute URL and collects its query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if `url` is not an absolute URL.
    pub fn parse_url(url: &str) -> Result<Self, url::ParseError> {
        Ok(Self::from_url(&Url::parse(url)?))
    }

    /// Appends a value for `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.entry(key.into()).or_default().push(value.into());
    }

    /// Returns the first value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns all values for `key`, in arrival order.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.params.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes `key` and returns its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.params.remove(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        })
    }

    /// Returns the message signed by the `hmac` parameter of an OAuth
    /// callback.
    ///
    /// `hmac` and `signature` are excluded. The remaining pairs are
    /// form-encoded in key order and the result is percent-decoded once
    /// more, `+` standing for a space.
    ///
    /// # Errors
    ///
    /// Returns [`FromUtf8Error`] if the decoded message is not UTF-8.
    ///
    /// ```rust
    /// use shopify_app_auth::auth::oauth::QueryParams;
    ///
    /// let params = QueryParams::parse("state=a%26b&hmac=ff&code=x+y");
    /// assert_eq!(params.callback_signable_string().unwrap(), "code=x y&state=a&b");
    /// ```
    pub fn callback_signable_string(&self) -> Result<String, FromUtf8Error> {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(
                self.iter()
                    .filter(|(key, _)| *key != HMAC_PARAM && *key != SIGNATURE_PARAM),
            )
            .finish();

        urlencoding::decode(&encoded.replace('+', " ")).map(std::borrow::Cow::into_owned)
    }

    /// Returns the message signed by the `signature` parameter of an app
    /// proxy request.
    ///
    /// `signature` is excluded. Each key becomes `key=v1,v2,...`; the
    /// strings are sorted and concatenated without a separator.
    #[must_use]
    pub fn proxy_signable_string(&self) -> String {
        let mut pairs: Vec<String> = self
            .params
            .iter()
            .filter(|(key, _)| key.as_str() != SIGNATURE_PARAM)
            .map(|(key, values)| format!("{key}={}", values.join(",")))
            .collect();
        pairs.sort_unstable();
        pairs.concat()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.append(key, value);
        }
        params
    }
}
