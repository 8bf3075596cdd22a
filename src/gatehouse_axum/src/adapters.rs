//! Axum implementations of the gateway's HTTP traits.
//!
//! The traits live in `gatehouse_core`; wrapping Axum's types here keeps the orphan rule
//! happy:
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  gatehouse_core::GatewayRequest (trait)    │
//! └────────────────┬───────────────────────────┘
//!                  │
//!                  ▼
//! ┌────────────────────────────────────────────┐
//! │  AxumRequest { method, uri, headers, .. }  │
//! │  impl GatewayRequest for AxumRequest { }   │
//! └────────────────────────────────────────────┘
//! ```

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, Method, Response, StatusCode, Uri, request::Parts};
use axum_extra::extract::cookie::CookieJar;
use gatehouse_core::{GatewayRequest, GatewayResponseBuilder};

/// The request parts a registration handler reads, extracted before the form body.
pub struct AxumRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    cookies: CookieJar,
}

impl From<&Parts> for AxumRequest {
    fn from(parts: &Parts) -> Self {
        Self {
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            cookies: CookieJar::from_headers(&parts.headers),
            headers: parts.headers.clone(),
        }
    }
}

impl<S> FromRequestParts<S> for AxumRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from(&*parts))
    }
}

impl GatewayRequest for AxumRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(|cookie| cookie.value())
    }

    fn method(&self) -> &str {
        self.method.as_str()
    }

    fn path(&self) -> &str {
        self.uri.path()
    }
}

/// Builds an `axum` response through [`GatewayResponseBuilder`].
pub struct AxumResponseBuilder {
    builder: axum::http::response::Builder,
    body: Option<String>,
}

impl AxumResponseBuilder {
    pub fn new() -> Self {
        Self {
            builder: Response::builder(),
            body: None,
        }
    }
}

impl Default for AxumResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayResponseBuilder for AxumResponseBuilder {
    type Response = Response<Body>;

    fn status(mut self, code: u16) -> Self {
        self.builder = self.builder.status(code);
        self
    }

    fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    fn json_body(mut self, body: serde_json::Value) -> Self {
        self.builder = self.builder.header("content-type", "application/json");
        self.body = Some(body.to_string());
        self
    }

    fn build(self) -> Self::Response {
        let body = self.body.unwrap_or_default();
        self.builder.body(Body::from(body)).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Invalid response parts");
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        })
    }
}

pub fn response_builder() -> AxumResponseBuilder {
    AxumResponseBuilder::new()
}
