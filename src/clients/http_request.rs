//! HTTP request type and builder.

use std::collections::HashMap;

use crate::clients::errors::InvalidHttpRequestError;

/// A JSON `POST` relative to an [`HttpClient`](crate::clients::HttpClient)'s
/// base URI.
///
/// Every call this crate makes against a shop is a form of `POST` with a JSON
/// body, so the body is required.
///
/// # Example
///
/// ```rust
/// use shopify_app_auth::clients::HttpRequest;
/// use serde_json::json;
///
/// let request = HttpRequest::builder("admin/oauth/access_token")
///     .body(json!({"code": "abc"}))
///     .build()
///     .unwrap();
/// assert_eq!(request.path, "admin/oauth/access_token");
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The path relative to the client's base URI, without a leading `/`.
    pub path: String,
    /// The JSON request body.
    pub body: serde_json::Value,
    /// Additional headers to include in the request.
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequest {
    /// Creates a new builder.
    #[must_use]
    pub fn builder(path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::EmptyPath`] if the path is empty.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.path.trim_start_matches('/').is_empty() {
            return Err(InvalidHttpRequestError::EmptyPath);
        }
        Ok(())
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    path: String,
    body: Option<serde_json::Value>,
    extra_headers: Option<HashMap<String, String>>,
}

impl HttpRequestBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            body: None,
            extra_headers: None,
        }
    }

    /// Sets the JSON request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds a header on top of the client defaults. A later value for the
    /// same name replaces the earlier one.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let headers = self.extra_headers.get_or_insert_with(HashMap::new);
        headers.insert(name.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBody`] if no body was set and
    /// [`InvalidHttpRequestError::EmptyPath`] if the path is empty.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let body = self.body.ok_or(InvalidHttpRequestError::MissingBody)?;
        let request = HttpRequest {
            path: self.path,
            body,
            extra_headers: self.extra_headers,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_token_exchange_shaped_request_builds() {
        let request = HttpRequest::builder("admin/oauth/access_token")
            .body(json!({"client_id": "k1", "client_secret": "hush", "code": "c0de"}))
            .build()
            .unwrap();

        assert_eq!(request.body["code"], "c0de");
        assert!(request.extra_headers.is_none());
    }

    #[test]
    fn test_missing_body_is_rejected() {
        let error = HttpRequest::builder("admin/oauth/access_token")
            .build()
            .unwrap_err();

        assert_eq!(error, InvalidHttpRequestError::MissingBody);
    }

    #[test]
    fn test_slash_only_path_is_empty() {
        for path in ["", "/", "//"] {
            assert_eq!(
                HttpRequest::builder(path).body(json!({})).build().unwrap_err(),
                InvalidHttpRequestError::EmptyPath,
                "path {path:?}"
            );
        }
    }

    #[test]
    fn test_repeated_header_keeps_last_value() {
        let request = HttpRequest::builder("admin/oauth/access_token")
            .body(json!({}))
            .header("X-Request-Source", "first")
            .header("X-Request-Source", "second")
            .build()
            .unwrap();

        let headers = request.extra_headers.unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["X-Request-Source"], "second");
    }
}
