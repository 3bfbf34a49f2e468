//! # TESSERA Core
//!
//! Allocation-free collections for voxel worlds and renderers:
//! - `SpatialMap3D`: hash map keyed by `(x, y, z)` integer coordinates
//! - `StructStack`: fixed-capacity stack of records stored as raw bytes
//! - `RectStack` / `MatrixStack`: clip bounds and transform hierarchies
//!
//! ## Architecture Rules
//!
//! 1. **No rehashing, no regrowth** - Sizes are fixed at construction
//! 2. **Flat storage** - Map nodes live in one arena, stack records in one block
//! 3. **Fail fast** - Misuse returns a `CollectionError`, state is untouched
//!
//! ## Example
//!
//! ```rust
//! use tessera_core::{MatrixStack, SpatialMap3D};
//!
//! let mut chunks = SpatialMap3D::new(64);
//! chunks.put(0, -1, 4, "stone");
//! assert_eq!(chunks.get(0, -1, 4), Some(&"stone"));
//!
//! let mut model = MatrixStack::new(16);
//! model.push_identity()?.translate(0.0, 1.0, 0.0)?;
//! # Ok::<(), tessera_core::CollectionError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod memory;
pub mod spatial;
pub mod stacks;
pub mod sync;

pub use config::{MapConfig, StackConfig, TesseraConfig};
pub use error::{CollectionError, CollectionResult};
pub use memory::{CacheState, PodAccessor, StackState, StructAccessor, StructStack};
pub use spatial::{
    Align16Hash, Cursor, DefaultHash, HashInt3D, HashStrategy, SpatialMap3D,
};
pub use stacks::{MatrixStack, RectAccessor, RectStack};
pub use sync::SharedSpatialMap;

pub use tessera_shared::{IVec3, Mat4, Quaternion, Rect, Vec3};
