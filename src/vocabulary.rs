//! Method and header name tokens.
//!
//! A small closed vocabulary offered for convenience when declaring routes.
//! Every API that accepts one of these also accepts a raw string, so callers
//! are never limited to the names listed here.

use std::fmt;
use std::str::FromStr;

/// Standard HTTP method tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Options,
    Trace,
    Connect,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Trace,
        HttpMethod::Connect,
    ];

    /// The uppercase wire token, e.g. `"GET"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for HttpMethod {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for HttpMethod {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownToken(s.to_string()))
    }
}

impl From<HttpMethod> for http::Method {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Delete => http::Method::DELETE,
            HttpMethod::Options => http::Method::OPTIONS,
            HttpMethod::Trace => http::Method::TRACE,
            HttpMethod::Connect => http::Method::CONNECT,
        }
    }
}

/// Standard header names used in route header requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpHeader {
    Accept,
    ContentType,
}

impl HttpHeader {
    pub const ALL: [HttpHeader; 2] = [HttpHeader::Accept, HttpHeader::ContentType];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpHeader::Accept => "Accept",
            HttpHeader::ContentType => "Content-Type",
        }
    }
}

impl fmt::Display for HttpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for HttpHeader {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for HttpHeader {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpHeader::ALL
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownToken(s.to_string()))
    }
}

/// A string that is not part of the closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown token '{0}'")]
pub struct UnknownToken(pub String);
