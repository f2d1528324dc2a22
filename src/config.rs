//! # Route Table Configuration
//!
//! Declarative route tables loaded from YAML and turned into a [`Router`].
//!
//! ## File Format
//!
//! ```yaml
//! routes:
//!   - path: /articles/{id:\d+}
//!     name: article
//!     methods: [GET]
//!     headers:
//!       Accept: application/json
//!     handler: show_article
//!   - path: /assets/
//!     prefixes: [/assets/css/, /assets/js/]
//!     handler: static_files
//! ```
//!
//! Entries are registered in file order, so the first entry that accepts a
//! request wins. Handlers are referenced by name and resolved through a
//! [`HandlerRegistry`].
//!
//! ## Usage
//!
//! ```rust
//! use webroute::config::RouteTable;
//! use webroute::dispatcher::{HandlerRequest, HandlerResponse};
//! use webroute::registry::HandlerRegistry;
//!
//! let table = RouteTable::from_yaml_str(
//!     "routes:\n  - path: /ping\n    methods: [GET]\n    handler: ping\n",
//! )?;
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register("ping", |_req: HandlerRequest, resp: &mut HandlerResponse| {
//!     resp.body = "pong".to_string();
//! });
//!
//! let router = table.build_router(&registry)?;
//! assert_eq!(router.route_count(), 1);
//! # Ok::<(), webroute::config::ConfigError>(())
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::info;

use crate::registry::HandlerRegistry;
use crate::router::{Route, RouteError, Router};

/// Failures while loading a route table or building a router from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read route table '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid route table: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("route '{route}' refers to unknown handler '{handler}'")]
    UnknownHandler { route: String, handler: String },

    #[error("route '{route}': {source}")]
    Route {
        route: String,
        #[source]
        source: RouteError,
    },
}

/// Top-level YAML document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteTable {
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

/// One declared route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteEntry {
    /// Path template, e.g. `/articles/{id:\d+}`
    pub path: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Allowed methods; empty accepts any method
    #[serde(default)]
    pub methods: Vec<String>,
    /// Header name to value pattern, in declaration order
    #[serde(default, deserialize_with = "ordered_pairs")]
    pub headers: Vec<(String, String)>,
    #[serde(default)]
    pub prefixes: Vec<String>,
    /// Name of a handler in the [`HandlerRegistry`]
    pub handler: String,
}

impl RouteEntry {
    /// Label used in errors and logs.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }

    fn to_route(&self, registry: &HandlerRegistry) -> Result<Route, ConfigError> {
        let handler = registry
            .get(&self.handler)
            .ok_or_else(|| ConfigError::UnknownHandler {
                route: self.label().to_string(),
                handler: self.handler.clone(),
            })?;

        let mut builder = Route::builder(self.path.as_str()).shared_handler(handler);
        if let Some(name) = &self.name {
            builder = builder.name(name.as_str());
        }
        for method in &self.methods {
            builder = builder.method(method);
        }
        for (header, pattern) in &self.headers {
            builder = builder.header(header, pattern.as_str());
        }
        for prefix in &self.prefixes {
            builder = builder.path_prefix(prefix.as_str());
        }

        builder.build().map_err(|source| ConfigError::Route {
            route: self.label().to_string(),
            source,
        })
    }
}

impl RouteTable {
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a YAML route table from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_yaml_str(&content)?;
        info!(
            path = %path.display(),
            routes = table.routes.len(),
            "Route table loaded"
        );
        Ok(table)
    }

    /// Build a router with one route per entry, in file order.
    ///
    /// Stops at the first entry that names an unknown handler or fails to
    /// compile.
    pub fn build_router(&self, registry: &HandlerRegistry) -> Result<Router, ConfigError> {
        let mut router = Router::new();
        for entry in &self.routes {
            router.add(entry.to_route(registry)?);
        }
        Ok(router)
    }
}

fn ordered_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of header names to value patterns")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(pair) = map.next_entry::<String, String>()? {
                pairs.push(pair);
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}
