use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::metrics::RoutingMetrics;
use super::route::{Route, RouteMatch};
use crate::dispatcher::{Handler, HandlerRequest, HandlerResponse};

/// Ordered route table and HTTP entry point.
///
/// Routes are scanned in registration order and the **first** route whose
/// predicate accepts the request wins, even when a later route would be a
/// narrower match. Routes are only ever appended; nothing reorders or
/// removes them.
///
/// Registration takes `&mut self` and lookups take `&self`, so a router
/// shared across threads (e.g. behind an `Arc`) must be fully built before
/// it starts serving.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
    metrics: Arc<RoutingMetrics>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route. Returns `self` so registrations can be chained.
    pub fn add(&mut self, route: Route) -> &mut Self {
        info!(
            route = %route.name(),
            pattern = %route.pattern(),
            methods = ?route.methods(),
            position = self.routes.len(),
            "Route registered"
        );
        self.routes.push(route);
        self
    }

    /// Number of registered routes
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Registered routes in registration (= precedence) order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    #[must_use]
    pub fn metrics(&self) -> Arc<RoutingMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Find the first route that accepts `req`.
    ///
    /// `None` is the ordinary "no route" outcome, not an error.
    #[must_use]
    pub fn find_route(&self, req: &HandlerRequest) -> Option<RouteMatch<'_>> {
        debug!(
            request_id = %req.request_id,
            method = %req.method,
            path = %req.path,
            routes_count = self.routes.len(),
            "Route match attempt"
        );

        let start = Instant::now();
        let found = self.routes.iter().find_map(|route| route.matches(req));
        self.metrics.record_lookup(start.elapsed());

        match &found {
            Some(m) => info!(
                request_id = %req.request_id,
                method = %req.method,
                path = %req.path,
                route = %m.route.name(),
                matched_by = ?m.matched_by,
                path_params = ?m.path_params,
                "Route matched"
            ),
            None => warn!(
                request_id = %req.request_id,
                method = %req.method,
                path = %req.path,
                "No route matched"
            ),
        }

        found
    }

    /// Route `req` and let the matched handler write into `resp`.
    ///
    /// Path variables are appended to `req.query_params` before the handler
    /// runs, after any query-string pairs, so a query parameter of the same
    /// name still wins in `get_query_param`. With no matching route `resp` is replaced by the 404 response
    /// naming the path.
    pub fn dispatch(&self, mut req: HandlerRequest, resp: &mut HandlerResponse) {
        let Some(found) = self.find_route(&req) else {
            self.metrics.record_not_found();
            *resp = HandlerResponse::not_found(&req.path);
            return;
        };

        found.merge_into(&mut req);
        self.metrics.record_dispatch();
        found.route.handler().serve(req, resp);
    }

    /// Dispatch into a fresh default response and return it.
    #[must_use]
    pub fn handle(&self, req: HandlerRequest) -> HandlerResponse {
        let mut resp = HandlerResponse::default();
        self.dispatch(req, &mut resp);
        resp
    }
}

impl Handler for Router {
    fn serve(&self, req: HandlerRequest, resp: &mut HandlerResponse) {
        self.dispatch(req, resp);
    }
}
