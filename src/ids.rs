//! Request correlation ids.
//!
//! The router and the handler chain log the same `request_id` field, so one
//! request's routing decision and every chain step can be pulled out of a
//! shared log. A caller that already tagged the request upstream keeps its
//! tag: [`HandlerRequest::from_http`](crate::dispatcher::HandlerRequest::from_http)
//! adopts a well-formed `x-request-id` header instead of minting a new id.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use http::HeaderMap;

/// Inbound header an upstream proxy or client may use to pin the id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// ULID tagging one request through routing and its handler chain.
///
/// Ids minted in the same millisecond still sort in creation order, which
/// keeps interleaved log lines readable.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(pub ulid::Ulid);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Adopt the upstream id in `headers`, or mint one.
    ///
    /// Values that are not UTF-8 or not a ULID are ignored; surrounding
    /// whitespace is not significant.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::from_header_or_new(headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()))
    }

    /// Same as [`from_headers`](Self::from_headers) for an already extracted
    /// header value.
    #[must_use]
    pub fn from_header_or_new(header_value: Option<&str>) -> Self {
        header_value
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_default()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ulid::Ulid::from_string(s).map(Self)
    }
}
