//! Registration entry point for compiled route modules.
//!
//! Compiled code cannot be loaded from a path at runtime, so each `.rs` route
//! module is registered under its path relative to the routes root. The tree
//! walker still decides which files exist and where they mount.
//!
//! ```ignore
//! let registry = ModuleRegistry::new()
//!     .register_router("route.rs", routes::index::router)
//!     .register_router("users/route.rs", routes::users::router);
//! ```

use std::collections::HashMap;

use axum::Router;

use crate::routing::types::{LoadError, ModuleExport};

type Factory = Box<dyn Fn() -> Result<ModuleExport, LoadError>>;

/// Factories for compiled modules, keyed by relative path.
#[derive(Default)]
pub struct ModuleRegistry {
    factories: HashMap<String, Factory>,
}

/// Normalize a relative path to `/` separators without empty segments.
fn registry_key(relative: &str) -> String {
    relative
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory that may export anything or fail.
    ///
    /// Registering the same path again replaces the earlier factory.
    pub fn register<F>(mut self, relative: &str, factory: F) -> Self
    where
        F: Fn() -> Result<ModuleExport, LoadError> + 'static,
    {
        self.factories.insert(registry_key(relative), Box::new(factory));
        self
    }

    /// Register a module whose export is a router.
    pub fn register_router<F>(self, relative: &str, build: F) -> Self
    where
        F: Fn() -> Router + 'static,
    {
        self.register(relative, move || Ok(ModuleExport::Router(build())))
    }

    /// Run the factory registered for `relative`, if any.
    pub fn resolve(&self, relative: &str) -> Option<Result<ModuleExport, LoadError>> {
        self.factories
            .get(&registry_key(relative))
            .map(|factory| factory())
    }

    pub fn contains(&self, relative: &str) -> bool {
        self.factories.contains_key(&registry_key(relative))
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.factories.keys().collect();
        keys.sort();
        f.debug_struct("ModuleRegistry").field("modules", &keys).finish()
    }
}
