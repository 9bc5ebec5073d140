//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Discovery (at startup):
//!     CandidateModule (from discovery::walker)
//!     → loader.rs (load: .toml declarative, .rs via registry)
//!     → mounter.rs (shape check: Router or skip)
//!     → prefix.rs (relative path → /url/prefix)
//!     → table.rs (nest into the accumulating axum::Router)
//!     → Freeze as immutable DirectoryRouter
//! ```
//!
//! # Design Decisions
//! - Routes discovered at startup, immutable at runtime
//! - Prefix derivation is a pure function of the relative path
//! - Deterministic given a directory order (see `sort_entries`)
//! - Request matching itself is left to axum

pub mod declarative;
pub mod loader;
pub mod mounter;
pub mod prefix;
pub mod registry;
pub mod router;
pub mod table;
pub mod types;

pub use loader::{ModuleLoader, StandardLoader};
pub use prefix::{derive_prefix, prefix_from_relative, RESERVED_STEM};
pub use registry::ModuleRegistry;
pub use router::{plan, DirectoryRouter};
pub use table::RouteTable;
pub use types::{
    LoadError, ModuleExport, MountedRoute, RouterError, RouterResult, SkippedModule,
};
