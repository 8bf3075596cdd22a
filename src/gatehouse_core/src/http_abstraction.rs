//! HTTP abstraction traits for the registration gateway.
//!
//! Web frameworks implement these traits on newtype wrappers of their own request and
//! response types, so the registration handlers never depend on a particular framework.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  gatehouse_core: defines HTTP traits     │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  gatehouse_axum: newtype wrappers        │
//! │  struct AxumRequest(Parts)               │
//! │  impl GatewayRequest for AxumRequest { } │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  gatehouse_adapters::handlers use the    │
//! │  traits, generic over the framework      │
//! └──────────────────────────────────────────┘
//! ```

/// Read access to the parts of a request the gateway cares about.
pub trait GatewayRequest {
    /// Get a header value by name.
    ///
    /// Header names compare case-insensitively.
    /// Returns `None` if the header doesn't exist or isn't valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;

    /// Get a cookie value by name from the Cookie header.
    fn cookie(&self, name: &str) -> Option<&str>;

    /// Get the HTTP method (GET, POST, etc.)
    fn method(&self) -> &str;

    /// Get the request path
    fn path(&self) -> &str;
}

/// Builder for the framework's response type.
///
/// ```ignore
/// builder
///     .status(303)
///     .header("location", "/auth/sign_in")
///     .build()
/// ```
pub trait GatewayResponseBuilder: Sized {
    /// The final response type produced by this builder
    type Response;

    /// Set the HTTP status code
    fn status(self, code: u16) -> Self;

    /// Add an HTTP header
    fn header(self, name: &str, value: &str) -> Self;

    /// Set a JSON body with Content-Type header
    fn json_body(self, body: serde_json::Value) -> Self;

    /// Build the final response
    fn build(self) -> Self::Response;
}

/// Shorthands for the responses the registration steps produce.
///
/// Implemented for every `GatewayResponseBuilder`.
pub trait GatewayResponseHelpers: GatewayResponseBuilder {
    /// 200 with a JSON body
    fn ok_json(self, body: serde_json::Value) -> Self::Response {
        self.status(200).json_body(body).build()
    }

    /// 303 See Other to `location`
    fn see_other(self, location: &str) -> Self::Response {
        self.status(303).header("location", location).build()
    }

    /// 404 with an empty JSON error
    fn not_found(self) -> Self::Response {
        self.status(404)
            .json_body(serde_json::json!({ "error": "Not Found" }))
            .build()
    }

    /// 422 with a JSON body; used when a form comes back with errors
    fn unprocessable(self, body: serde_json::Value) -> Self::Response {
        self.status(422).json_body(body).build()
    }

    /// 500 Internal Server Error
    fn internal_error(self, message: &str) -> Self::Response {
        self.status(500)
            .json_body(serde_json::json!({ "error": message }))
            .build()
    }
}

impl<T: GatewayResponseBuilder> GatewayResponseHelpers for T {}
