//! # Dispatcher Module
//!
//! Request and response records plus the [`Handler`] contract that routes
//! dispatch to.
//!
//! ## Overview
//!
//! - [`HandlerRequest`] carries the method, decoded path, ordered query
//!   parameters and headers of one request. The router appends matched path
//!   variables to `query_params`, so handlers read `{id}` the same way they
//!   read `?id=`.
//! - [`HandlerResponse`] is the response sink a handler writes into.
//! - [`Handler`] is implemented by closures, by
//!   [`Router`](crate::router::Router) and by
//!   [`HandlerChain`](crate::middleware::HandlerChain).
//!
//! ## Transport integration
//!
//! The crate does not own a server. [`HandlerRequest::from_http`] and
//! [`HandlerResponse::into_http`] bridge to whatever transport speaks the
//! `http` crate types.
//!
//! ```rust
//! use webroute::dispatcher::{HandlerRequest, HandlerResponse};
//! use webroute::router::{Route, Router};
//!
//! let mut router = Router::new();
//! router.add(
//!     Route::builder("/hello/{name}")
//!         .method("GET")
//!         .handler(|req: HandlerRequest, resp: &mut HandlerResponse| {
//!             let name = req.get_query_param("name").unwrap_or("world");
//!             resp.body = format!("hello {name}");
//!         })
//!         .build()
//!         .unwrap(),
//! );
//!
//! let http_req = http::Request::get("/hello/ferris").body(Vec::<u8>::new()).unwrap();
//! let resp = router.handle(HandlerRequest::from_http(http_req)).into_http();
//! assert_eq!(resp.body(), "hello ferris");
//! ```

mod convert;
mod core;

pub use convert::{decode_path, parse_query_params};
pub use self::core::{
    Handler, HandlerRequest, HandlerResponse, HeaderVec, ParamVec, SharedHandler,
    MAX_INLINE_HEADERS, MAX_INLINE_PARAMS,
};
