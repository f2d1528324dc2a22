//! # Handler Chain Module
//!
//! Sequential request processing with early termination.
//!
//! A [`HandlerChain`] holds an ordered list of [`ChainedHandler`]s. For each
//! request a fresh [`ChainedRequestState`] is created and passed through the
//! processors in order; any processor can leave the state `Stopped` to skip
//! the rest. Authentication guards, request logging and response decoration
//! are the typical uses.
//!
//! A chain is itself a [`Handler`](crate::dispatcher::Handler), so it can be
//! registered as a route's handler.

mod chain;
mod core;

pub use self::core::{ChainStatus, ChainedHandler, ChainedRequestState};
pub use chain::{ChainRun, HandlerChain};
