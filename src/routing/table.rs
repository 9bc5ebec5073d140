//! Route table accumulation.
//!
//! # Responsibilities
//! - Accumulate mounts in registration order while the tree is walked
//! - Detect prefixes the dispatcher would treat as the same mount point
//! - Turn route overlaps axum reports by panicking into plain errors
//! - Freeze into an immutable [`RouteTable`] once discovery finishes
//!
//! # Design Decisions
//! - The builder is a local value passed by `&mut`, never shared state
//! - The root prefix is merged rather than nested (axum cannot nest at `/`)

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use axum::Router;

use crate::routing::prefix::collision_key;
use crate::routing::types::{MountedRoute, SkippedModule};

/// Accumulator threaded through traversal.
pub(crate) struct RouteTableBuilder {
    router: Router,
    routes: Vec<MountedRoute>,
    skipped: Vec<SkippedModule>,
    by_key: HashMap<String, usize>,
}

impl RouteTableBuilder {
    pub(crate) fn new() -> Self {
        Self {
            router: Router::new(),
            routes: Vec::new(),
            skipped: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// The mount that already occupies `prefix`'s position, if any.
    pub(crate) fn conflict(&self, prefix: &str) -> Option<&MountedRoute> {
        self.by_key
            .get(&collision_key(prefix))
            .map(|&index| &self.routes[index])
    }

    /// Mount `sub` at `prefix`. Callers check [`conflict`](Self::conflict) first.
    ///
    /// Prefix collisions are caught by `conflict`, but a root module's own
    /// paths can still land on a nested mount (`/users` declared at the root
    /// and `users/route.toml`). axum panics on those; the panic is returned as
    /// the error and the table is left as it was.
    pub(crate) fn mount(&mut self, prefix: &str, source: &Path, sub: Router) -> Result<(), String> {
        let attempt = self.router.clone();
        let mounted = panic::catch_unwind(AssertUnwindSafe(move || {
            if prefix == "/" {
                attempt.merge(sub)
            } else {
                attempt.nest(prefix, sub)
            }
        }))
        .map_err(panic_message)?;
        self.router = mounted;

        self.by_key.insert(collision_key(prefix), self.routes.len());
        self.routes.push(MountedRoute {
            prefix: prefix.to_string(),
            source: source.to_path_buf(),
        });
        Ok(())
    }

    /// Record a module that was loaded but left out.
    pub(crate) fn skip(&mut self, source: &Path, reason: impl Into<String>) {
        self.skipped.push(SkippedModule {
            source: source.to_path_buf(),
            reason: reason.into(),
        });
    }

    pub(crate) fn finish(self) -> RouteTable {
        RouteTable {
            router: self.router,
            routes: self.routes,
            skipped: self.skipped,
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "route registration failed".to_string())
}

/// The finished, immutable result of discovery.
#[derive(Debug, Clone)]
pub struct RouteTable {
    router: Router,
    routes: Vec<MountedRoute>,
    skipped: Vec<SkippedModule>,
}

impl RouteTable {
    /// The populated dispatcher.
    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    /// Mounts in registration order.
    pub fn routes(&self) -> &[MountedRoute] {
        &self.routes
    }

    /// Modules that were loaded but not mounted, in walk order.
    pub fn skipped(&self) -> &[SkippedModule] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
