//! 4x4 transformation matrices.
//!
//! Column-major storage, matching what the GPU expects for uniform uploads:
//! `cols[c][r]` is the element in column `c`, row `r`. Composition follows
//! the post-multiply convention: `a * b` applies `b` first, then `a`.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::math::{Quaternion, Vec3};

/// A 4x4 single-precision transformation matrix.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat4 {
    /// Columns of the matrix.
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    /// Size of the record in bytes.
    pub const SIZE_OF: usize = 16 * std::mem::size_of::<f32>();

    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a matrix from its columns.
    #[must_use]
    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    /// Translation by `(x, y, z)`.
    #[must_use]
    pub const fn from_translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = [x, y, z, 1.0];
        m
    }

    /// Non-uniform scaling by `(x, y, z)`.
    #[must_use]
    pub const fn from_scale(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[0][0] = x;
        m.cols[1][1] = y;
        m.cols[2][2] = z;
        m
    }

    /// Rotation of `angle` radians around the axis `(x, y, z)`.
    ///
    /// The axis is normalized first. A zero axis yields the identity.
    #[must_use]
    pub fn from_axis_angle(angle: f32, x: f32, y: f32, z: f32) -> Self {
        let axis = Vec3::new(x, y, z).normalized();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let (x, y, z) = (axis.x, axis.y, axis.z);
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;

        Self::from_cols([
            [t * x * x + c, t * x * y + s * z, t * x * z - s * y, 0.0],
            [t * x * y - s * z, t * y * y + c, t * y * z + s * x, 0.0],
            [t * x * z + s * y, t * y * z - s * x, t * z * z + c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation described by a quaternion (normalized first).
    #[must_use]
    pub fn from_quaternion(q: Quaternion) -> Self {
        let q = q.normalized();
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let (xx, yy, zz, ww) = (x * x, y * y, z * z, w * w);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (xw, yw, zw) = (x * w, y * w, z * w);

        Self::from_cols([
            [ww + xx - zz - yy, 2.0 * (xy + zw), 2.0 * (xz - yw), 0.0],
            [2.0 * (xy - zw), yy - zz + ww - xx, 2.0 * (yz + xw), 0.0],
            [2.0 * (xz + yw), 2.0 * (yz - xw), zz - yy - xx + ww, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Orthographic projection mapping the given box to clip space.
    ///
    /// Depth maps to `[-1, 1]` (OpenGL convention).
    #[must_use]
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[0][0] = 2.0 / (right - left);
        m.cols[1][1] = 2.0 / (top - bottom);
        m.cols[2][2] = 2.0 / (near - far);
        m.cols[3] = [
            (right + left) / (left - right),
            (top + bottom) / (bottom - top),
            (far + near) / (near - far),
            1.0,
        ];
        m
    }

    /// Element at column `col`, row `row`.
    #[inline]
    #[must_use]
    pub const fn get(&self, col: usize, row: usize) -> f32 {
        self.cols[col][row]
    }

    /// Transforms a point (implicit `w = 1`).
    #[must_use]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let c = &self.cols;
        Vec3::new(
            c[0][0] * p.x + c[1][0] * p.y + c[2][0] * p.z + c[3][0],
            c[0][1] * p.x + c[1][1] * p.y + c[2][1] * p.z + c[3][1],
            c[0][2] * p.x + c[1][2] * p.y + c[2][2] * p.z + c[3][2],
        )
    }

    /// Element-wise comparison with tolerance `epsilon`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.cols
            .iter()
            .flatten()
            .zip(other.cols.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = [[0.0f32; 4]; 4];
        for (c, col) in out.iter_mut().enumerate() {
            for (r, cell) in col.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.cols[k][r] * rhs.cols[c][k]).sum();
            }
        }
        Self::from_cols(out)
    }
}

impl std::ops::MulAssign for Mat4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_identity_is_neutral() {
        let t = Mat4::from_translation(1.0, 2.0, 3.0);
        assert_eq!(Mat4::IDENTITY * t, t);
        assert_eq!(t * Mat4::IDENTITY, t);
    }

    #[test]
    fn test_translate_then_scale_order() {
        // Scale is applied first, then translation.
        let m = Mat4::from_translation(1.0, 0.0, 0.0) * Mat4::from_scale(2.0, 2.0, 2.0);
        let p = m.transform_point(Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn test_axis_angle_rotates_x_to_y() {
        let m = Mat4::from_axis_angle(std::f32::consts::FRAC_PI_2, 0.0, 0.0, 1.0);
        let p = m.transform_point(Vec3::X);
        assert!((p.x).abs() < EPS);
        assert!((p.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_quaternion_matches_axis_angle() {
        let angle = 0.7;
        let axis = Vec3::new(1.0, 2.0, -0.5);
        let a = Mat4::from_axis_angle(angle, axis.x, axis.y, axis.z);
        let b = Mat4::from_quaternion(Quaternion::from_axis_angle(axis, angle));
        assert!(a.approx_eq(&b, EPS));
    }

    #[test]
    fn test_orthographic_maps_corners() {
        let m = Mat4::orthographic(0.0, 800.0, 600.0, 0.0, -1.0, 1.0);
        let tl = m.transform_point(Vec3::new(0.0, 0.0, 0.0));
        let br = m.transform_point(Vec3::new(800.0, 600.0, 0.0));
        assert!((tl.x + 1.0).abs() < EPS && (tl.y - 1.0).abs() < EPS);
        assert!((br.x - 1.0).abs() < EPS && (br.y + 1.0).abs() < EPS);
    }

    #[test]
    fn test_size_matches_bytes() {
        assert_eq!(bytemuck::bytes_of(&Mat4::IDENTITY).len(), Mat4::SIZE_OF);
    }
}
