//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Discover routes → Bind listener → Serve
//!
//! Shutdown:
//!     Signal received (signals.rs) → Shutdown::trigger (shutdown.rs)
//!     → server stops accepting → in-flight requests drain → exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: a route discovery error is a startup failure
//! - The listener binds only after the route tree is complete

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
