use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use super::core::{ChainStatus, ChainedHandler, ChainedRequestState};
use crate::dispatcher::{Handler, HandlerRequest, HandlerResponse};

/// Outcome of one pass through a [`HandlerChain`].
#[derive(Debug)]
pub struct ChainRun {
    /// Final state; its status is always [`ChainStatus::Finished`]
    pub state: ChainedRequestState,
    /// Processors invoked, counting the one that halted the chain
    pub executed: usize,
    /// Whether a processor halted the chain before the end
    pub halted: bool,
}

/// An ordered list of processors sharing one per-request state.
///
/// Useful as a route handler: pre-processing steps, a main handler and
/// post-processing steps run in order until one of them stops the chain.
///
/// ```rust
/// use webroute::middleware::{ChainedRequestState, HandlerChain};
/// use webroute::dispatcher::{HandlerRequest, HandlerResponse};
/// use http::Method;
///
/// let mut chain = HandlerChain::new();
/// chain
///     .add(|s: ChainedRequestState| s.active())
///     .add(|mut s: ChainedRequestState| {
///         s.response.status = 401;
///         s.stop()
///     })
///     .add(|_s: ChainedRequestState| -> ChainedRequestState { unreachable!("skipped") });
///
/// let run = chain.run(HandlerRequest::new(Method::GET, "/"), HandlerResponse::default());
/// assert_eq!(run.executed, 2);
/// assert_eq!(run.state.response.status, 401);
/// ```
#[derive(Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn ChainedHandler>>,
    last_executed: AtomicUsize,
}

impl HandlerChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a processor. Processors run in the order they are added.
    pub fn add<H: ChainedHandler + 'static>(&mut self, handler: H) -> &mut Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    pub fn add_shared(&mut self, handler: Arc<dyn ChainedHandler>) -> &mut Self {
        self.handlers.push(handler);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Processors invoked by the most recent [`run`](Self::run).
    ///
    /// Diagnostic only: concurrent requests overwrite it. Use
    /// [`ChainRun::executed`] for a per-request figure.
    #[must_use]
    pub fn last_executed(&self) -> usize {
        self.last_executed.load(Ordering::Relaxed)
    }

    /// Drive one request through the chain.
    ///
    /// Starts at `Ready`, feeds the state through each processor in order and
    /// breaks as soon as a processor leaves it `Stopped`. The status is then
    /// forced to `Finished`, whatever the last processor left behind.
    pub fn run(&self, request: HandlerRequest, response: HandlerResponse) -> ChainRun {
        let request_id = request.request_id;
        let mut state = ChainedRequestState::new(request, response);
        let mut executed = 0;
        let mut halted = false;

        for (idx, handler) in self.handlers.iter().enumerate() {
            executed = idx + 1;
            state = handler.serve_req(state);

            if state.is_stopped() {
                halted = true;
                debug!(
                    request_id = %request_id,
                    processor = executed,
                    remaining = self.handlers.len() - executed,
                    "Chain stopped by processor"
                );
                break;
            }
        }

        state.status = ChainStatus::Finished;
        self.last_executed.store(executed, Ordering::Relaxed);

        info!(
            request_id = %request_id,
            executed = executed,
            chain_len = self.handlers.len(),
            halted = halted,
            status = state.response.status,
            "Handler chain finished"
        );

        ChainRun {
            state,
            executed,
            halted,
        }
    }
}

impl Handler for HandlerChain {
    fn serve(&self, req: HandlerRequest, resp: &mut HandlerResponse) {
        let run = self.run(req, std::mem::take(resp));
        *resp = run.state.response;
    }
}

impl std::fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerChain")
            .field("len", &self.handlers.len())
            .field("last_executed", &self.last_executed())
            .finish()
    }
}
