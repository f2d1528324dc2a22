//! # webroute
//!
//! **webroute** is a small HTTP request router: requests are matched against
//! an ordered table of routes (path template, allowed methods, required
//! headers) and handed to the first route that accepts them. Routes can use
//! a [`HandlerChain`](middleware::HandlerChain) as their handler to run a
//! sequence of processors with early termination.
//!
//! ## Architecture
//!
//! - **[`router`]** - Path template compilation, route matching and first-match-wins dispatch
//! - **[`dispatcher`]** - Request/response types, the [`Handler`](dispatcher::Handler) contract, `http` crate conversions
//! - **[`middleware`]** - Handler chains with a per-request status machine
//! - **[`config`]** - Declarative YAML route tables
//! - **[`registry`]** - Named handlers referenced from route tables
//! - **[`vocabulary`]** - Standard method and header name tokens
//! - **[`ids`]** - ULID request ids for log correlation
//! - **[`otel`]** - Structured logging setup
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Transport
//!     participant Router
//!     participant Route
//!     participant Chain as HandlerChain
//!
//!     Transport->>Router: HandlerRequest
//!     loop routes, in registration order
//!         Router->>Route: matches(&req)
//!     end
//!     alt no route matched
//!         Router-->>Transport: 404 Could not find route for: <path>
//!     else first match
//!         Router->>Router: merge path variables into query params
//!         Router->>Chain: serve(req, resp)
//!         loop processors until STOPPED
//!             Chain->>Chain: state = processor.serve_req(state)
//!         end
//!         Chain-->>Transport: response
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use webroute::dispatcher::{HandlerRequest, HandlerResponse};
//! use webroute::middleware::{ChainedRequestState, HandlerChain};
//! use webroute::router::{Route, Router};
//! use webroute::vocabulary::{HttpHeader, HttpMethod};
//! use http::Method;
//!
//! let mut chain = HandlerChain::new();
//! chain
//!     .add(|mut s: ChainedRequestState| {
//!         if s.request.get_header("x-api-key").is_none() {
//!             s.response = HandlerResponse::error(401, "missing api key");
//!             return s.stop();
//!         }
//!         s.active()
//!     })
//!     .add(|mut s: ChainedRequestState| {
//!         let id = s.request.get_query_param("id").unwrap_or_default().to_string();
//!         s.response = HandlerResponse::text(200, format!("article {id}"));
//!         s.active()
//!     });
//!
//! let mut router = Router::new();
//! router.add(
//!     Route::builder("/articles/{id:\\d+}")
//!         .method(HttpMethod::Get)
//!         .header(HttpHeader::Accept, "text/.*")
//!         .handler(chain)
//!         .build()?,
//! );
//!
//! let req = HandlerRequest::new(Method::GET, "/articles/7")
//!     .with_header("accept", "text/plain")
//!     .with_header("x-api-key", "k");
//! assert_eq!(router.handle(req).body, "article 7");
//!
//! let missing = HandlerRequest::new(Method::GET, "/nowhere");
//! assert_eq!(router.handle(missing).status, 404);
//! # Ok::<(), webroute::router::RouteError>(())
//! ```
//!
//! ## Concurrency
//!
//! Matching never mutates a route: path variables are returned in a
//! [`RouteMatch`](router::RouteMatch) and every chain run owns its own
//! state. A fully built [`Router`](router::Router) can be shared behind an
//! `Arc` and served from any number of threads. Registration needs
//! `&mut Router`, so it has to finish before serving starts.

pub mod config;
pub mod dispatcher;
pub mod ids;
pub mod middleware;
pub mod otel;
pub mod registry;
pub mod router;
pub mod vocabulary;

pub use dispatcher::{Handler, HandlerRequest, HandlerResponse};
pub use middleware::{ChainStatus, ChainedHandler, ChainedRequestState, HandlerChain};
pub use router::{Route, RouteError, Router};
