//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber from config and environment
//! - Provide the debug-gated discovery log
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - `RUST_LOG` overrides the configured level

use std::path::Path;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Target used for discovery log lines.
pub const ROUTER_TARGET: &str = "route_tree::router";

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(
    config: &ObservabilityConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    }
}

/// Discovery log that is silent unless router debug mode is on.
#[derive(Debug, Clone, Copy)]
pub struct RouteLog {
    enabled: bool,
}

impl RouteLog {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn initializing(&self, root: &Path) {
        if self.enabled {
            tracing::info!(target: ROUTER_TARGET, root = %root.display(), "Initializing routes");
        }
    }

    pub fn mounted(&self, prefix: &str, source: &Path) {
        if self.enabled {
            tracing::info!(
                target: ROUTER_TARGET,
                prefix = %prefix,
                source = %source.display(),
                "Registering route"
            );
        }
    }

    pub fn skipped(&self, source: &Path, reason: &str) {
        if self.enabled {
            tracing::info!(
                target: ROUTER_TARGET,
                source = %source.display(),
                reason = %reason,
                "Skipping module that does not export a router"
            );
        }
    }

    pub fn finished(&self, mounted: usize) {
        if self.enabled {
            tracing::info!(target: ROUTER_TARGET, mounted, "Route discovery complete");
        }
    }
}
