use std::fmt;

use crate::dispatcher::{HandlerRequest, HandlerResponse};

/// Lifecycle of one request passing through a [`HandlerChain`](super::HandlerChain).
///
/// ```text
/// READY ──(processor runs)──▶ ACTIVE ──(processor asks to halt)──▶ STOPPED
///   └──────────────(loop ends, by exhaustion or STOPPED)──────────▶ FINISHED
/// ```
///
/// Processors may set any value; the driver only reacts to `Stopped` and
/// always finishes on `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainStatus {
    /// No processor has run yet
    #[default]
    Ready,
    /// A processor ran and did not ask to halt
    Active,
    /// A processor asked the chain to halt
    Stopped,
    /// Set by the driver once the loop is over
    Finished,
}

impl ChainStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ChainStatus::Ready => "ready",
            ChainStatus::Active => "active",
            ChainStatus::Stopped => "stopped",
            ChainStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for ChainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The per-request record threaded through a chain.
///
/// Created fresh for every request and owned by the chain run, so nothing
/// is shared between requests.
#[derive(Debug)]
pub struct ChainedRequestState {
    pub request: HandlerRequest,
    pub response: HandlerResponse,
    pub status: ChainStatus,
}

impl ChainedRequestState {
    #[must_use]
    pub fn new(request: HandlerRequest, response: HandlerResponse) -> Self {
        Self {
            request,
            response,
            status: ChainStatus::Ready,
        }
    }

    /// Mark the request as processed without halting the chain.
    #[must_use]
    pub fn active(mut self) -> Self {
        self.status = ChainStatus::Active;
        self
    }

    /// Ask the driver to skip every remaining processor.
    #[must_use]
    pub fn stop(mut self) -> Self {
        self.status = ChainStatus::Stopped;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: ChainStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.status == ChainStatus::Stopped
    }
}

/// One step of a handler chain.
///
/// Takes the state by value and hands back the state the next step sees.
pub trait ChainedHandler: Send + Sync {
    fn serve_req(&self, state: ChainedRequestState) -> ChainedRequestState;
}

impl<F> ChainedHandler for F
where
    F: Fn(ChainedRequestState) -> ChainedRequestState + Send + Sync,
{
    fn serve_req(&self, state: ChainedRequestState) -> ChainedRequestState {
        self(state)
    }
}
