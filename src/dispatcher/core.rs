use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use serde_json::Value;
use smallvec::SmallVec;

use crate::ids::RequestId;

/// Maximum number of query/path parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Maximum inline headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Ordered `(name, value)` parameter storage.
///
/// Names are `Arc<str>` because path variable names come from the route table
/// and are shared by every request that matches the route.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Ordered `(name, value)` header storage.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// An incoming request as seen by routes and handlers.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Correlation id for log lines
    pub request_id: RequestId,
    /// HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Decoded request path, without the query string
    pub path: String,
    /// Query string parameters in arrival order, followed by any path
    /// variables merged in by the router
    pub query_params: ParamVec,
    /// HTTP headers in arrival order
    pub headers: HeaderVec,
    /// Request body parsed as JSON (if present)
    pub body: Option<Value>,
}

impl HandlerRequest {
    /// Create a bare request for `method` and `path`.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            method,
            path: path.into(),
            query_params: ParamVec::new(),
            headers: HeaderVec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((Arc::from(name), value.into()));
        self
    }

    #[must_use]
    pub fn with_query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query_params.push((Arc::from(name), value.into()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Get a query parameter by name.
    ///
    /// Returns the first value recorded. The router appends path variables
    /// after the query-string pairs, so a query parameter shadows a path
    /// variable of the same name; use [`get_query_params`](Self::get_query_params)
    /// to see both.
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// All values recorded for a query parameter, in order.
    #[must_use]
    pub fn get_query_params(&self, name: &str) -> Vec<&str> {
        self.query_params
            .iter()
            .filter(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Convert query_params to a HashMap, keeping the first value per name
    /// as [`get_query_param`](Self::get_query_param) does.
    /// Note: This allocates - use get_query_param() in hot paths
    #[must_use]
    pub fn query_params_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::with_capacity(self.query_params.len());
        for (k, v) in &self.query_params {
            map.entry(k.to_string()).or_insert_with(|| v.clone());
        }
        map
    }

    /// Convert headers to a HashMap.
    /// Note: This allocates - use get_header() in hot paths
    #[must_use]
    pub fn headers_map(&self) -> HashMap<String, String> {
        self.headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }
}

/// The outbound response sink handed to handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// HTTP response headers
    pub headers: HeaderVec,
    /// Response body
    pub body: String,
}

impl Default for HandlerResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: HeaderVec::new(),
            body: String::new(),
        }
    }
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Plain-text response.
    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        let mut resp = Self::new(status, HeaderVec::new(), body);
        resp.set_header("content-type", "text/plain; charset=utf-8".to_string());
        resp
    }

    /// JSON response. A value that cannot be serialised yields an empty body.
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        let mut resp = Self::new(
            status,
            HeaderVec::new(),
            serde_json::to_string(body).unwrap_or_default(),
        );
        resp.set_header("content-type", "application/json".to_string());
        resp
    }

    /// Create an error response with a `{"error": message}` body.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, &serde_json::json!({ "error": message }))
    }

    /// The client error written when no route accepts a request.
    #[must_use]
    pub fn not_found(path: &str) -> Self {
        let mut resp = Self::text(404, format!("Could not find route for: {path}"));
        resp.set_header("x-content-type-options", "nosniff".to_string());
        resp
    }

    /// Get a header by name
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header (case-insensitive).
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// The callable contract for anything that can answer a request.
///
/// Routers and handler chains implement it too, so they can be nested as
/// route handlers. Business logic stays behind this trait; the router never
/// looks inside.
pub trait Handler: Send + Sync {
    fn serve(&self, req: HandlerRequest, resp: &mut HandlerResponse);
}

impl<F> Handler for F
where
    F: Fn(HandlerRequest, &mut HandlerResponse) + Send + Sync,
{
    fn serve(&self, req: HandlerRequest, resp: &mut HandlerResponse) {
        self(req, resp)
    }
}

/// Shared, type-erased handler as stored by routes and the registry.
pub type SharedHandler = Arc<dyn Handler>;
