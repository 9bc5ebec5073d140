//! Filesystem-convention route discovery for axum.
//!
//! Modules under a routes directory are mounted at prefixes derived from
//! their paths; a file named `route.*` mounts at its directory's prefix.

pub mod config;
pub mod discovery;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::{AppConfig, RouterConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{DirectoryRouter, ModuleLoader, ModuleRegistry, StandardLoader};
