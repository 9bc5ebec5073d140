//! Filesystem discovery subsystem.
//!
//! # Data Flow
//! ```text
//! RouterConfig.directory
//!     → walker.rs (read_dir, recurse, depth/cycle guards)
//!     → candidate.rs (classify: directory / candidate / ignored)
//!     → visitor callback (the route mounter), one candidate at a time
//! ```

pub mod candidate;
pub mod walker;

pub use candidate::{CandidateModule, EntryKind};
pub use walker::TreeWalker;
