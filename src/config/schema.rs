//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the route-tree server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Route discovery settings.
    pub router: RouterConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// What to do when two modules derive the same prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Abort construction, naming both files.
    #[default]
    Reject,
    /// Keep the first registration and skip later ones with a warning.
    KeepFirst,
}

/// Route discovery configuration.
///
/// Immutable once handed to [`DirectoryRouter`](crate::routing::DirectoryRouter).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Root directory to scan.
    pub directory: PathBuf,

    /// Emit a log line for every mount and skip.
    pub debug: bool,

    /// Recognized module extensions, without the leading dot.
    pub extensions: Vec<String>,

    /// Sort each directory's entries by name before visiting them.
    pub sort_entries: bool,

    /// Descend into symlinked directories and read symlinked files.
    pub follow_symlinks: bool,

    /// Maximum directory nesting below the root.
    pub max_depth: usize,

    /// Handling of duplicate prefixes.
    pub on_duplicate: DuplicatePolicy,
}

impl RouterConfig {
    /// Create a config scanning `directory` with all other options defaulted.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_sorted_entries(mut self, sort_entries: bool) -> Self {
        self.sort_entries = sort_entries;
        self
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("routes"),
            debug: false,
            extensions: vec!["rs".to_string(), "toml".to_string()],
            sort_entries: false,
            follow_symlinks: true,
            max_depth: 64,
            on_duplicate: DuplicatePolicy::Reject,
        }
    }
}

/// Timeout configuration for request handling.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format: "pretty" or "json".
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}
