//! Conversions between the `http` crate types and the router's request and
//! response records.

use std::sync::Arc;

use http::{HeaderName, HeaderValue, Request, Response, StatusCode};
use tracing::{debug, warn};

use super::core::{HandlerRequest, HandlerResponse, HeaderVec, ParamVec};
use crate::ids::RequestId;

/// Parse a raw query string (`a=1&b=2`) into ordered pairs.
#[must_use]
pub fn parse_query_params(query: &str) -> ParamVec {
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (Arc::from(k.as_ref()), v.into_owned()))
        .collect()
}

/// Percent-decode a request path, keeping the raw text when it does not
/// decode to UTF-8.
#[must_use]
pub fn decode_path(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            debug!(path = %raw, error = %e, "Path is not valid UTF-8 once decoded; using raw path");
            raw.to_string()
        }
    }
}

impl HandlerRequest {
    /// Build a request record from an `http::Request`.
    ///
    /// The URI is split into a decoded path and query pairs, headers that are
    /// not valid UTF-8 are skipped, and a non-empty body is parsed as JSON when
    /// it is JSON.
    pub fn from_http<B: AsRef<[u8]>>(req: Request<B>) -> Self {
        let (parts, body) = req.into_parts();

        let mut headers = HeaderVec::new();
        for (name, value) in &parts.headers {
            match value.to_str() {
                Ok(v) => headers.push((Arc::from(name.as_str()), v.to_string())),
                Err(_) => warn!(header = %name, "Skipping header with non UTF-8 value"),
            }
        }

        let request_id = RequestId::from_headers(&parts.headers);

        let query_params = parts
            .uri
            .query()
            .map(parse_query_params)
            .unwrap_or_default();

        let bytes = body.as_ref();
        let body = if bytes.is_empty() {
            None
        } else {
            serde_json::from_slice(bytes).ok()
        };

        Self {
            request_id,
            method: parts.method,
            path: decode_path(parts.uri.path()),
            query_params,
            headers,
            body,
        }
    }
}

impl HandlerResponse {
    /// Convert into an `http::Response` for the transport layer.
    ///
    /// An out-of-range status becomes 500; headers whose name or value the
    /// `http` crate rejects are dropped with a warning.
    #[must_use]
    pub fn into_http(self) -> Response<String> {
        let mut resp = Response::new(self.body);
        *resp.status_mut() =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        for (name, value) in self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(n), Ok(v)) => {
                    resp.headers_mut().append(n, v);
                }
                _ => warn!(header = %name, "Dropping header that is not valid HTTP"),
            }
        }
        resp
    }
}
