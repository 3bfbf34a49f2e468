//! # Memory Management
//!
//! Pre-allocated record storage for per-frame render state.
//!
//! ## Design Philosophy
//!
//! All memory is allocated once when a stack is created. While drawing:
//! - No heap allocations
//! - Records are stored as raw bytes, decoded on demand
//! - Predictable, flat latency

mod accessor;
mod stack;

pub use accessor::{PodAccessor, StructAccessor};
pub use stack::{CacheState, StackState, StructStack};
