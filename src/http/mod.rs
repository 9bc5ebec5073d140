//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve, middleware stack)
//!     → request.rs (assign or keep x-request-id)
//!     → discovered route tree (DirectoryRouter)
//!     → response with x-request-id echoed
//! ```

pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
