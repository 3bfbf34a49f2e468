//! # TESSERA Shared
//!
//! Plain-data records shared by every TESSERA collection.
//!
//! ## CRITICAL RULE
//!
//! Every record in this crate must be:
//! - `#[repr(C)]`
//! - `Pod + Zeroable` (no padding, no pointers)
//! - `Copy`
//!
//! The struct stacks in `tessera_core` copy these records byte-for-byte.
//! A record with hidden padding or a heap pointer breaks that contract.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod math;
pub mod matrix;
pub mod rect;

pub use math::{IVec2, IVec3, Quaternion, Vec3};
pub use matrix::Mat4;
pub use rect::Rect;
