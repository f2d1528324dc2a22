use std::fmt;
use std::sync::Arc;

use http::{HeaderName, Method};
use regex::Regex;
use tracing::debug;

use super::error::RouteError;
use super::pattern::{join_prefix, PathPattern};
use crate::dispatcher::{Handler, HandlerRequest, ParamVec, SharedHandler};

/// Which rule accepted the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedBy {
    /// The anchored path pattern matched the whole path.
    Pattern,
    /// The primary pattern failed and the prefix pattern at this index
    /// (registration order) was found inside the path.
    Prefix(usize),
}

/// Result of a successful [`Route::matches`].
///
/// Owns the extracted variables, so concurrent matches against the same
/// route never share state.
#[derive(Debug, Clone)]
pub struct RouteMatch<'r> {
    /// The route that accepted the request
    pub route: &'r Route,
    /// Path variables from the primary pattern, in pattern order.
    /// Empty when the route matched through a prefix.
    pub path_params: ParamVec,
    pub matched_by: MatchedBy,
}

impl RouteMatch<'_> {
    /// Get a path variable by name
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Append every path variable to the request's query parameters.
    pub fn merge_into(&self, req: &mut HandlerRequest) {
        req.query_params.extend(
            self.path_params
                .iter()
                .map(|(k, v)| (Arc::clone(k), v.clone())),
        );
    }
}

/// A registered rule pairing a path, method and header predicate with a
/// handler.
///
/// Built once through [`Route::builder`] and immutable afterwards.
pub struct Route {
    name: Option<String>,
    pattern: PathPattern,
    methods: Vec<Method>,
    headers: Vec<(HeaderName, Regex)>,
    prefixes: Vec<PathPattern>,
    handler: SharedHandler,
}

impl Route {
    /// Start building a route for `template`.
    ///
    /// See [`pattern`](super::pattern) for the template grammar.
    #[must_use]
    pub fn builder(template: impl Into<String>) -> RouteBuilder {
        RouteBuilder::new(template)
    }

    /// Test the request against this route.
    ///
    /// The path must match the anchored pattern or, failing that, contain a
    /// match of one of the prefix patterns. A non-empty method set must
    /// contain the request method. Every header requirement needs the header
    /// present with a value containing a match of its pattern.
    #[must_use]
    pub fn matches(&self, req: &HandlerRequest) -> Option<RouteMatch<'_>> {
        let matched_by = if self.pattern.is_match(&req.path) {
            MatchedBy::Pattern
        } else {
            let idx = self.prefixes.iter().position(|p| p.is_match(&req.path))?;
            MatchedBy::Prefix(idx)
        };

        if !self.accepts_method(&req.method) {
            return None;
        }

        if !self.accepts_headers(req) {
            return None;
        }

        let path_params = match matched_by {
            MatchedBy::Pattern => self.pattern.captures(&req.path).unwrap_or_default(),
            MatchedBy::Prefix(_) => ParamVec::new(),
        };

        Some(RouteMatch {
            route: self,
            path_params,
            matched_by,
        })
    }

    fn accepts_method(&self, method: &Method) -> bool {
        self.methods.is_empty() || self.methods.contains(method)
    }

    fn accepts_headers(&self, req: &HandlerRequest) -> bool {
        self.headers.iter().all(|(name, pattern)| {
            req.get_header(name.as_str())
                .is_some_and(|value| pattern.is_match(value))
        })
    }

    /// Diagnostic label; falls back to the path template.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.pattern.template())
    }

    #[must_use]
    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    /// The anchored regex source the template compiled to.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    #[must_use]
    pub fn variable_names(&self) -> &[Arc<str>] {
        self.pattern.variables()
    }

    /// Allowed methods; empty means any method.
    #[must_use]
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// Prefix patterns in registration order.
    #[must_use]
    pub fn prefix_patterns(&self) -> Vec<&str> {
        self.prefixes.iter().map(PathPattern::as_str).collect()
    }

    #[must_use]
    pub fn handler(&self) -> &SharedHandler {
        &self.handler
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name())
            .field("pattern", &self.pattern.as_str())
            .field("methods", &self.methods)
            .field(
                "headers",
                &self
                    .headers
                    .iter()
                    .map(|(n, p)| (n.as_str(), p.as_str()))
                    .collect::<Vec<_>>(),
            )
            .field("prefixes", &self.prefix_patterns())
            .finish_non_exhaustive()
    }
}

/// Collects a route definition; all validation happens in [`build`](Self::build).
pub struct RouteBuilder {
    template: String,
    name: Option<String>,
    methods: Vec<String>,
    headers: Vec<(String, String)>,
    prefixes: Vec<String>,
    handler: Option<SharedHandler>,
}

impl RouteBuilder {
    fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            name: None,
            methods: Vec::new(),
            headers: Vec::new(),
            prefixes: Vec::new(),
            handler: None,
        }
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Allow a method. Tokens are upper-cased; repeats collapse.
    #[must_use]
    pub fn method(mut self, method: impl AsRef<str>) -> Self {
        self.methods.push(method.as_ref().trim().to_ascii_uppercase());
        self
    }

    /// Require `name` to be present with a value matching `pattern`.
    ///
    /// The first requirement declared for a header name wins.
    #[must_use]
    pub fn header(mut self, name: impl AsRef<str>, pattern: impl Into<String>) -> Self {
        self.headers
            .push((name.as_ref().to_string(), pattern.into()));
        self
    }

    /// Add a prefix pattern tried when the primary pattern fails.
    ///
    /// `/articles/` with prefix `/css/` accepts `/articles/css/site.css`.
    #[must_use]
    pub fn path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push(prefix.into());
        self
    }

    #[must_use]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handler = Some(Arc::new(handler));
        self
    }

    #[must_use]
    pub fn shared_handler(mut self, handler: SharedHandler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Compile every pattern and validate the definition.
    pub fn build(self) -> Result<Route, RouteError> {
        let pattern = PathPattern::compile(&self.template)?;

        let mut methods: Vec<Method> = Vec::with_capacity(self.methods.len());
        for token in &self.methods {
            let method = Method::from_bytes(token.as_bytes()).map_err(|_| {
                RouteError::InvalidMethod {
                    method: token.clone(),
                }
            })?;
            if !methods.contains(&method) {
                methods.push(method);
            }
        }

        let mut headers: Vec<(HeaderName, Regex)> = Vec::with_capacity(self.headers.len());
        for (name, value_pattern) in &self.headers {
            let header = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                RouteError::InvalidHeaderName {
                    header: name.clone(),
                }
            })?;
            if headers.iter().any(|(h, _)| *h == header) {
                debug!(
                    route = %self.template,
                    header = %header,
                    pattern = %value_pattern,
                    "Ignoring repeated header requirement"
                );
                continue;
            }
            let regex = Regex::new(value_pattern).map_err(|e| RouteError::InvalidHeaderPattern {
                header: name.clone(),
                pattern: value_pattern.clone(),
                source: e,
            })?;
            headers.push((header, regex));
        }

        let prefixes = self
            .prefixes
            .iter()
            .map(|p| PathPattern::compile_prefix(&join_prefix(&self.template, p)))
            .collect::<Result<Vec<_>, _>>()?;

        let handler = self.handler.ok_or_else(|| RouteError::MissingHandler {
            template: self.template.clone(),
        })?;

        Ok(Route {
            name: self.name,
            pattern,
            methods,
            headers,
            prefixes,
            handler,
        })
    }
}
