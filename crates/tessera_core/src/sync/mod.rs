//! # Shared Access
//!
//! The collections themselves take no locks. When a spatial map must be
//! reachable from several threads, wrap it here:
//!
//! ```text
//! Streaming thread:  write() -> put chunks
//! Render thread:     read()  -> lookups
//! Physics thread:    read()  -> lookups
//! ```
//!
//! Stacks are per-thread and are never shared.

mod shared;

pub use shared::SharedSpatialMap;
