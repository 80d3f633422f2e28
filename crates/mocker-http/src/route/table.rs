//! Route lookup by (method, path).

use super::Route;
use crate::config::{Method, RouteDefinition};
use crate::error::MockerError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Identity of a route
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub method: Method,
    pub path: String,
}

impl RouteKey {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Routes by key. Filled at startup, read-only afterwards.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<RouteKey, Arc<Route>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from definitions in order.
    ///
    /// Disabled definitions are skipped. The first broken definition aborts
    /// the whole load, so a partially valid table is never returned.
    pub fn from_definitions<'a, I>(definitions: I) -> Result<Self, MockerError>
    where
        I: IntoIterator<Item = &'a RouteDefinition>,
    {
        let mut table = Self::new();
        for definition in definitions {
            if let Some(route) = Route::from_definition(definition)? {
                info!(
                    "Registered route '{}' {} ({:?}, strategy {:?}, format {}, delay {}ms)",
                    route.name,
                    route.key,
                    route.status,
                    route.strategy,
                    route.format_label(),
                    route.wait.duration_ms()
                );
                table.register(route);
            }
        }
        Ok(table)
    }

    /// Insert a route, replacing any earlier route with the same key.
    /// Returns the replaced route.
    pub fn register(&mut self, route: Route) -> Option<Arc<Route>> {
        let key = route.key.clone();
        let replaced = self.routes.insert(key, Arc::new(route));
        if let Some(ref old) = replaced {
            warn!(
                "Route '{}' {} replaced by a later definition",
                old.name, old.key
            );
        }
        replaced
    }

    pub fn lookup(&self, method: Method, path: &str) -> Option<Arc<Route>> {
        self.routes.get(&RouteKey::new(method, path)).cloned()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// All routes, sorted by path then method
    pub fn routes(&self) -> Vec<Arc<Route>> {
        let mut routes: Vec<_> = self.routes.values().cloned().collect();
        routes.sort_by(|a, b| {
            a.key
                .path
                .cmp(&b.key.path)
                .then_with(|| a.key.method.as_str().cmp(b.key.method.as_str()))
        });
        routes
    }
}
