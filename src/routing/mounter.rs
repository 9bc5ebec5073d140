//! Mounting of discovered modules.
//!
//! # Responsibilities
//! - Load each candidate through the configured [`ModuleLoader`]
//! - Skip exports that are not routers (logged only in debug mode)
//! - Derive the prefix and register the router with the table builder
//!
//! # Design Decisions
//! - Only load failures and unmountable layouts are errors
//! - Shape is checked before the prefix is derived
//! - Duplicate prefixes and overlapping routes follow [`DuplicatePolicy`]
//! - Every skip is recorded on the table, not only logged

use crate::config::{DuplicatePolicy, RouterConfig};
use crate::discovery::CandidateModule;
use crate::observability::RouteLog;
use crate::routing::loader::ModuleLoader;
use crate::routing::prefix::{check_mountable, derive_prefix};
use crate::routing::table::RouteTableBuilder;
use crate::routing::types::{ModuleExport, MountOutcome, RouterError, RouterResult};

pub(crate) struct RouteMounter<'a, L: ?Sized> {
    config: &'a RouterConfig,
    loader: &'a L,
    log: RouteLog,
}

impl<'a, L: ModuleLoader + ?Sized> RouteMounter<'a, L> {
    pub(crate) fn new(config: &'a RouterConfig, loader: &'a L, log: RouteLog) -> Self {
        Self {
            config,
            loader,
            log,
        }
    }

    pub(crate) fn mount(
        &self,
        module: &CandidateModule,
        table: &mut RouteTableBuilder,
    ) -> RouterResult<MountOutcome> {
        let export = self.loader.load(module).map_err(|source| RouterError::Load {
            path: module.path.clone(),
            source,
        })?;

        let router = match export {
            ModuleExport::Router(router) => router,
            ModuleExport::Other(reason) => return Ok(self.skip(module, table, reason)),
        };

        let prefix = derive_prefix(&self.config.directory, &module.path, &self.config.extensions)?;
        check_mountable(&prefix).map_err(|reason| RouterError::InvalidPrefix {
            prefix: prefix.clone(),
            path: module.path.clone(),
            reason,
        })?;

        if let Some(first) = table.conflict(&prefix) {
            let first = first.source.clone();
            return match self.config.on_duplicate {
                DuplicatePolicy::Reject => Err(RouterError::DuplicatePrefix {
                    prefix,
                    first,
                    second: module.path.clone(),
                }),
                DuplicatePolicy::KeepFirst => {
                    tracing::warn!(
                        prefix = %prefix,
                        kept = %first.display(),
                        skipped = %module.path.display(),
                        "Duplicate prefix, keeping first registration"
                    );
                    let reason = format!("prefix {} already mounted from {}", prefix, first.display());
                    Ok(self.skip(module, table, reason))
                }
            };
        }

        if let Err(reason) = table.mount(&prefix, &module.path, router) {
            return match self.config.on_duplicate {
                DuplicatePolicy::Reject => Err(RouterError::RouteConflict {
                    prefix,
                    path: module.path.clone(),
                    reason,
                }),
                DuplicatePolicy::KeepFirst => {
                    tracing::warn!(
                        prefix = %prefix,
                        skipped = %module.path.display(),
                        reason = %reason,
                        "Routes overlap an earlier mount, keeping first registration"
                    );
                    Ok(self.skip(module, table, format!("routes overlap an earlier mount: {}", reason)))
                }
            };
        }

        self.log.mounted(&prefix, &module.path);
        Ok(MountOutcome::Mounted { prefix })
    }

    fn skip(&self, module: &CandidateModule, table: &mut RouteTableBuilder, reason: String) -> MountOutcome {
        self.log.skipped(&module.path, &reason);
        table.skip(&module.path, reason.clone());
        MountOutcome::Skipped { reason }
    }
}
