//! Vector and rotation records.
//!
//! These are the canonical coordinate representations used by the spatial
//! map keys and the transform stack.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 3D Vector - translation, scale factors, rotation axes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// All-ones vector (identity scale)
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Unit X vector
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Dot product with `rhs`.
    #[must_use]
    pub fn dot(self, rhs: Self) -> f32 {
        self.x.mul_add(rhs.x, self.y.mul_add(rhs.y, self.z * rhs.z))
    }

    /// Euclidean length.
    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit-length copy. A zero vector is returned unchanged.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            self
        } else {
            self * (1.0 / len)
        }
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// 2D integer vector - rectangle corners, pixel offsets
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct IVec2 {
    /// X component
    pub x: i32,
    /// Y component
    pub y: i32,
}

impl IVec2 {
    /// Creates a new IVec2
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0, 0);

    /// Component-wise minimum
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }
}

/// Wrapping component-wise addition.
impl std::ops::Add for IVec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.wrapping_add(rhs.x), self.y.wrapping_add(rhs.y))
    }
}

/// 3D integer vector - voxel and chunk coordinates
///
/// This is the key type of `SpatialMap3D`.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct IVec3 {
    /// X component
    pub x: i32,
    /// Y component
    pub y: i32,
    /// Z component
    pub z: i32,
}

impl IVec3 {
    /// Creates a new IVec3
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Origin
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<(i32, i32, i32)> for IVec3 {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[i32; 3]> for IVec3 {
    fn from(arr: [i32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

/// Unit quaternion `(x, y, z, w)` describing a rotation.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Quaternion {
    /// Creates a quaternion from raw components.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Identity rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Rotation of `angle` radians around `axis`.
    #[must_use]
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    /// Unit-length copy. A zero quaternion becomes the identity.
    #[must_use]
    pub fn normalized(self) -> Self {
        let len = (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if len == 0.0 {
            return Self::IDENTITY;
        }
        let inv = 1.0 / len;
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
    }

    #[test]
    fn test_vec3_normalized() {
        let v = Vec3::new(3.0, 0.0, 4.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    }

    #[test]
    fn test_record_sizes() {
        assert_eq!(bytemuck::bytes_of(&Vec3::ZERO).len(), 12);
        assert_eq!(bytemuck::bytes_of(&IVec2::ZERO).len(), 8);
        assert_eq!(bytemuck::bytes_of(&IVec3::ZERO).len(), 12);
        assert_eq!(bytemuck::bytes_of(&Quaternion::IDENTITY).len(), 16);
    }

    #[test]
    fn test_ivec2_add_wraps() {
        let v = IVec2::new(i32::MAX, -5) + IVec2::new(1, i32::MIN);
        assert_eq!(v, IVec2::new(i32::MIN, i32::MAX - 4));
    }

    #[test]
    fn test_ivec3_conversions() {
        assert_eq!(IVec3::from((1, -2, 3)), IVec3::new(1, -2, 3));
        assert_eq!(IVec3::from([4, 5, -6]).to_array(), [4, 5, -6]);
    }

    #[test]
    fn test_quaternion_axis_angle_is_unit() {
        let q = Quaternion::from_axis_angle(Vec3::new(0.0, 2.0, 0.0), 1.0);
        let len = (q.x * q.x + q.y * q.y + q.z * q.z + q.w * q.w).sqrt();
        assert!((len - 1.0).abs() < 1e-6);
        assert_eq!(q.x, 0.0);
        assert_eq!(q.z, 0.0);
    }
}
