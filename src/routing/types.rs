//! Route discovery types and error definitions.

use std::path::PathBuf;

use axum::Router;
use thiserror::Error;

/// What a loaded module exports.
///
/// Only [`ModuleExport::Router`] is mountable. Anything else is a helper
/// colocated with route files and is skipped.
pub enum ModuleExport {
    /// A mountable sub-router.
    Router(Router),
    /// Some other export, described for the skip log.
    Other(String),
}

impl ModuleExport {
    pub fn other(description: impl Into<String>) -> Self {
        Self::Other(description.into())
    }

    pub fn is_router(&self) -> bool {
        matches!(self, Self::Router(_))
    }
}

impl std::fmt::Debug for ModuleExport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Router(_) => f.write_str("Router(..)"),
            Self::Other(description) => f.debug_tuple("Other").field(description).finish(),
        }
    }
}

/// Errors raised by a [`ModuleLoader`](crate::routing::ModuleLoader).
#[derive(Debug, Error)]
pub enum LoadError {
    /// The module file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The module file is not valid TOML.
    #[error("syntax error: {0}")]
    Syntax(#[from] toml::de::Error),

    /// The module parsed but declares something that cannot be served.
    #[error("malformed module: {0}")]
    Malformed(String),

    /// A registered factory failed to build its router.
    #[error("module factory failed: {0}")]
    Factory(String),
}

/// Errors that abort route discovery.
#[derive(Debug, Error)]
pub enum RouterError {
    /// The router configuration failed validation.
    #[error("invalid router config: {0}")]
    Config(String),

    /// A directory or entry could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A candidate module failed to load.
    #[error("failed to load module {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    /// A candidate path cannot be turned into a prefix.
    #[error("invalid module path {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },

    /// The derived prefix cannot be mounted on the dispatcher.
    #[error("cannot mount {} at '{prefix}': {reason}", path.display())]
    InvalidPrefix {
        prefix: String,
        path: PathBuf,
        reason: String,
    },

    /// Two modules derive the same prefix.
    #[error(
        "prefix '{prefix}' is defined by both {} and {}",
        first.display(),
        second.display()
    )]
    DuplicatePrefix {
        prefix: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// A module's routes overlap routes that are already mounted.
    #[error("routes of {} overlap existing routes at '{prefix}': {reason}", path.display())]
    RouteConflict {
        prefix: String,
        path: PathBuf,
        reason: String,
    },

    /// The tree nests deeper than the configured limit.
    #[error("{} is nested deeper than max_depth {max_depth}", path.display())]
    DepthExceeded { path: PathBuf, max_depth: usize },
}

/// Result type for route discovery.
pub type RouterResult<T> = Result<T, RouterError>;

/// One registration in the finished route table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MountedRoute {
    /// Prefix the module is mounted at.
    pub prefix: String,
    /// File the module was loaded from.
    pub source: PathBuf,
}

/// A candidate that was loaded but not mounted.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SkippedModule {
    /// File the module was loaded from.
    pub source: PathBuf,
    /// Why it was left out of the table.
    pub reason: String,
}

/// Result of offering one candidate to the mounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MountOutcome {
    Mounted { prefix: String },
    Skipped { reason: String },
}
