//! Route resolution.
//!
//! The resolver owns the compiled form of every route selector. Selectors
//! are compiled exactly once, when the resolver is built from the loaded
//! configuration; a compile failure rejects the whole route table. At
//! resolution time the event is round-tripped through JSON so selectors only
//! ever see plain JSON data.

use std::fmt;

use tracing::{debug, warn};

use crate::config::Config;
use crate::selector::{CompileError, Selector};
use crate::types::{Event, Target};

#[derive(Debug)]
struct CompiledRoute {
    route: crate::config::RouteConfig,
    selector: Selector,
}

/// Evaluates route selectors to pick webhook targets for an event.
///
/// Read-only after construction; safe to share across concurrent
/// transactions without locking.
#[derive(Debug)]
pub struct Resolver {
    routes: Vec<CompiledRoute>,
}

/// A route selector failed to compile; the whole table is rejected.
#[derive(Debug)]
pub struct RouteCompileError {
    pub route: String,
    pub error: CompileError,
}

impl fmt::Display for RouteCompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "selector for route '{}' failed to compile: {}", self.route, self.error)
    }
}

impl std::error::Error for RouteCompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl Resolver {
    /// Compile every route selector up front.
    pub fn new(config: &Config) -> Result<Self, RouteCompileError> {
        let mut routes = Vec::with_capacity(config.routes.len());
        for route in &config.routes {
            let selector =
                Selector::compile(&route.selector).map_err(|error| RouteCompileError {
                    route: route.name.clone(),
                    error,
                })?;
            routes.push(CompiledRoute {
                route: route.clone(),
                selector,
            });
        }
        Ok(Self { routes })
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Return targets for the given event, in route-table order.
    ///
    /// A selector that errors at evaluation is treated as non-matching and
    /// the remaining routes are still evaluated. A matched route with
    /// `stop_on_match` ends the walk. Fails only if the event cannot be
    /// represented as JSON at all.
    pub fn resolve(&self, event: &Event) -> Result<Vec<Target>, serde_json::Error> {
        let value = serde_json::to_value(event)?;

        let mut targets = Vec::new();
        for compiled in &self.routes {
            match compiled.selector.matches(&value) {
                Ok(true) => {
                    debug!(
                        route = %compiled.route.name,
                        url = %compiled.route.webhook_url,
                        "selector matched"
                    );
                    targets.push(Target::from_route(&compiled.route));
                    if compiled.route.stop_on_match {
                        break;
                    }
                }
                Ok(false) => {
                    debug!(route = %compiled.route.name, "selector did not match");
                }
                Err(error) => {
                    warn!(
                        route = %compiled.route.name,
                        error = %error,
                        "selector evaluation failed, treating route as non-matching"
                    );
                }
            }
        }

        Ok(targets)
    }
}
