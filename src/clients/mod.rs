//! HTTP client types for calls against a shop.
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: the async HTTP client, scoped to one shop
//! - [`HttpRequest`]: a JSON `POST` relative to the client's base URI
//! - [`HttpResponse`]: a parsed JSON response
//! - [`HttpError`]: everything that can go wrong sending a request
//!
//! # Example
//!
//! ```rust,ignore
//! use shopify_app_auth::ShopDomain;
//! use shopify_app_auth::clients::{HttpClient, HttpRequest};
//! use serde_json::json;
//!
//! let shop = ShopDomain::new("my-store")?;
//! let client = HttpClient::new(&shop, None)?;
//!
//! let request = HttpRequest::builder("admin/oauth/access_token")
//!     .body(json!({"client_id": "...", "client_secret": "...", "code": "..."}))
//!     .build()?;
//!
//! let response = client.request(request).await?;
//! ```
//!
//! Requests are attempted once; non-2xx responses surface as
//! [`HttpError::Response`].

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
