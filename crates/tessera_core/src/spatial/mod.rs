//! # Spatial Lookup
//!
//! Hash map keyed by 3D integer coordinates, for voxel and chunk lookups.
//!
//! ## Design Philosophy
//!
//! - Fixed bucket table chosen at construction (no rehashing)
//! - Pluggable hash: spread bits, or keep 16^3 locality
//! - Fail-fast cursors detect modification during iteration

mod cursor;
mod hash;
mod map;

pub use cursor::Cursor;
pub use hash::{Align16Hash, DefaultHash, HashInt3D, HashStrategy};
pub use map::{Iter, Keys, SpatialMap3D, Values, ALIGN16_BUCKET_COUNT, DEFAULT_BUCKET_COUNT};
