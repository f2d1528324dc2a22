//! Named handler lookup used when building a router from configuration.
//!
//! Route tables refer to handlers by name; the registry maps those names to
//! the concrete [`Handler`] implementations supplied by the application.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::dispatcher::{Handler, SharedHandler};

#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, SharedHandler>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`.
    ///
    /// Registering a name twice replaces the earlier handler.
    pub fn register<H: Handler + 'static>(&mut self, name: &str, handler: H) -> &mut Self {
        self.register_shared(name, Arc::new(handler))
    }

    pub fn register_shared(&mut self, name: &str, handler: SharedHandler) -> &mut Self {
        if self.handlers.insert(name.to_string(), handler).is_some() {
            warn!(handler = %name, "Handler re-registered, replacing previous");
        } else {
            debug!(handler = %name, "Handler registered");
        }
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<SharedHandler> {
        self.handlers.get(name).map(Arc::clone)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}
