//! # Coordinate Hash Functions
//!
//! Pluggable hashing for [`SpatialMap3D`](super::SpatialMap3D).
//!
//! ```text
//! DefaultHash:  x ^ rotl(y, 4) ^ rotl(z, 8)          spreads every bit
//! Align16Hash:  x[0..4] | y[0..4] << 4 | z[0..4] << 8  keeps 16^3 locality
//! ```
//!
//! Any `Fn(i32, i32, i32) -> i32` closure is also a valid hash.

use serde::{Deserialize, Serialize};
use tessera_shared::IVec3;

/// A function which computes the hash of a 3D integer coordinate.
pub trait HashInt3D {
    /// Hashes the coordinate `(x, y, z)`.
    fn hash(&self, x: i32, y: i32, z: i32) -> i32;

    /// Hashes a coordinate vector.
    #[inline]
    fn hash_key(&self, key: IVec3) -> i32 {
        self.hash(key.x, key.y, key.z)
    }
}

impl<F> HashInt3D for F
where
    F: Fn(i32, i32, i32) -> i32,
{
    #[inline]
    fn hash(&self, x: i32, y: i32, z: i32) -> i32 {
        self(x, y, z)
    }
}

/// The default hash: X exclusive-ORed with Y rotated left by 4 and Z rotated
/// left by 8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultHash;

impl HashInt3D for DefaultHash {
    #[inline]
    fn hash(&self, x: i32, y: i32, z: i32) -> i32 {
        x ^ y.rotate_left(4) ^ z.rotate_left(8)
    }
}

/// The "16-value aligned" hash: ORs the low four bits of X, Y and Z, with Y
/// shifted left by 4 and Z by 8.
///
/// Coordinates that differ only above bit 3 on every axis hash identically,
/// so a 16x16x16 neighbourhood maps onto 4096 distinct values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Align16Hash;

impl HashInt3D for Align16Hash {
    #[inline]
    fn hash(&self, x: i32, y: i32, z: i32) -> i32 {
        (x & 0xF) | ((y & 0xF) << 4) | ((z & 0xF) << 8)
    }
}

/// Runtime-selectable hash, used when the strategy comes from a config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashStrategy {
    /// See [`DefaultHash`].
    #[default]
    Default,
    /// See [`Align16Hash`].
    Align16,
}

impl HashInt3D for HashStrategy {
    #[inline]
    fn hash(&self, x: i32, y: i32, z: i32) -> i32 {
        match self {
            Self::Default => DefaultHash.hash(x, y, z),
            Self::Align16 => Align16Hash.hash(x, y, z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hash_values() {
        assert_eq!(DefaultHash.hash(0, 0, 0), 0);
        assert_eq!(DefaultHash.hash(1, 0, 0), 1);
        assert_eq!(DefaultHash.hash(0, 1, 0), 16);
        assert_eq!(DefaultHash.hash(0, 0, 1), 256);
        // Rotation carries the high bit around instead of dropping it.
        assert_eq!(DefaultHash.hash(0, i32::MIN, 0), 8);
    }

    #[test]
    fn test_align16_ignores_high_bits() {
        let base = Align16Hash.hash(3, 7, 11);
        assert_eq!(Align16Hash.hash(3 + 16, 7 - 32, 11 + 4096), base);
        assert_eq!(Align16Hash.hash(-13, -9, -5), base);
        assert_eq!(base, 3 | (7 << 4) | (11 << 8));
    }

    #[test]
    fn test_closure_hash() {
        let h = |x: i32, y: i32, z: i32| x + y + z;
        assert_eq!(h.hash_key(IVec3::new(1, 2, 3)), 6);
    }

    #[test]
    fn test_strategy_dispatch() {
        assert_eq!(HashStrategy::Default.hash(5, 6, 7), DefaultHash.hash(5, 6, 7));
        assert_eq!(HashStrategy::Align16.hash(-1, 18, 40), Align16Hash.hash(-1, 18, 40));
    }
}
