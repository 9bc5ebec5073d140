//! Directory-driven router construction.
//!
//! # Responsibilities
//! - Run discovery and mounting exactly once, at construction
//! - Expose the finished dispatcher through a single accessor
//! - Offer a dry-run plan that derives prefixes without loading modules
//!
//! # Design Decisions
//! - Immutable after construction; there is no re-scan
//! - Any fatal error means no router at all, never a partial one
//! - Walking and mounting are interleaved through the walker's visitor

use axum::Router;

use crate::config::validation::validate_router;
use crate::config::RouterConfig;
use crate::discovery::{CandidateModule, TreeWalker};
use crate::observability::RouteLog;
use crate::routing::loader::ModuleLoader;
use crate::routing::mounter::RouteMounter;
use crate::routing::prefix::derive_prefix;
use crate::routing::table::{RouteTable, RouteTableBuilder};
use crate::routing::types::{MountedRoute, RouterError, RouterResult, SkippedModule};

/// A router built from the modules under a directory.
#[derive(Debug, Clone)]
pub struct DirectoryRouter {
    config: RouterConfig,
    table: RouteTable,
}

impl DirectoryRouter {
    /// Walk `config.directory` and mount every router module `loader` finds.
    pub fn new<L>(config: RouterConfig, loader: &L) -> RouterResult<Self>
    where
        L: ModuleLoader + ?Sized,
    {
        validate_router(&config).map_err(|errors| {
            RouterError::Config(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        })?;

        let log = RouteLog::new(config.debug);
        log.initializing(&config.directory);

        let table = {
            let mounter = RouteMounter::new(&config, loader, log);
            let mut builder = RouteTableBuilder::new();
            TreeWalker::new(&config).walk(&mut |module: CandidateModule| {
                mounter.mount(&module, &mut builder)?;
                Ok(())
            })?;
            builder.finish()
        };

        log.finished(table.len());
        Ok(Self { config, table })
    }

    /// The populated dispatcher, ready to serve or to nest further.
    pub fn router(&self) -> Router {
        self.table.router().clone()
    }

    pub fn into_router(self) -> Router {
        self.table.into_router()
    }

    /// Mounts in registration order.
    pub fn routes(&self) -> &[MountedRoute] {
        self.table.routes()
    }

    /// Modules that were loaded but not mounted, with the reason.
    pub fn skipped(&self) -> &[SkippedModule] {
        self.table.skipped()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

/// Derive the prefix every candidate would mount at, without loading it.
///
/// Non-router helpers appear here too, since telling them apart requires
/// loading.
pub fn plan(config: &RouterConfig) -> RouterResult<Vec<MountedRoute>> {
    let mut planned = Vec::new();
    TreeWalker::new(config).walk(&mut |module: CandidateModule| {
        let prefix = derive_prefix(&config.directory, &module.path, &config.extensions)?;
        planned.push(MountedRoute {
            prefix,
            source: module.path,
        });
        Ok(())
    })?;
    Ok(planned)
}
