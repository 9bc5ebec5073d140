//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, debug-gated discovery log)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → request traces via tower-http's TraceLayer
//! ```

pub mod logging;

pub use logging::{init_tracing, RouteLog};
