//! # Router Module
//!
//! Path matching and first-match-wins route resolution.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling path templates such as `/articles/{id:\d*}` into anchored
//!   regex patterns with named groups
//! - Matching incoming requests on path, method and headers
//! - Extracting path variables from matched routes
//! - Dispatching to the matched route's handler, or answering 404
//!
//! ## Architecture
//!
//! 1. **Compilation**: [`RouteBuilder::build`] compiles the template, the
//!    header patterns and the prefix patterns. Every malformed template or
//!    regex is reported here as a [`RouteError`], never while serving.
//!
//! 2. **Matching**: [`Router::find_route`] tests routes in registration
//!    order and returns the first [`RouteMatch`]. The match carries its own
//!    copy of the path variables; routes hold no per-request state.
//!
//! ## Example
//!
//! ```rust
//! use webroute::dispatcher::{HandlerRequest, HandlerResponse};
//! use webroute::router::{Route, Router};
//! use http::Method;
//!
//! let mut router = Router::new();
//! router
//!     .add(
//!         Route::builder("/articles/{id:\\d*}/detail/")
//!             .method("GET")
//!             .handler(|req: HandlerRequest, resp: &mut HandlerResponse| {
//!                 resp.body = req.get_query_param("id").unwrap_or_default().to_string();
//!             })
//!             .build()?,
//!     );
//!
//! let req = HandlerRequest::new(Method::GET, "/articles/21/detail/");
//! let found = router.find_route(&req).expect("route");
//! assert_eq!(found.get_path_param("id"), Some("21"));
//! assert_eq!(router.handle(req).body, "21");
//! # Ok::<(), webroute::router::RouteError>(())
//! ```
//!
//! ## Performance
//!
//! Lookup is a linear scan, O(n) in the number of routes. Precedence is
//! registration order, so there is no index to keep in sync.

mod core;
mod error;
mod metrics;
pub mod pattern;
mod route;
#[cfg(test)]
mod tests;

pub use self::core::Router;
pub use error::RouteError;
pub use metrics::RoutingMetrics;
pub use pattern::PathPattern;
pub use route::{MatchedBy, Route, RouteBuilder, RouteMatch};
