//! Axis-aligned integer rectangles.
//!
//! Used for viewport and scissor bounds. A rectangle is always stored
//! normalized: `min` holds the smaller coordinate on each axis.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::math::IVec2;

/// An axis-aligned 2D rectangle defined by two integer corners.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
pub struct Rect {
    /// Lower corner (inclusive).
    pub min: IVec2,
    /// Upper corner.
    pub max: IVec2,
}

impl Rect {
    /// Size of the record in bytes.
    pub const SIZE_OF: usize = 4 * std::mem::size_of::<i32>();

    /// Empty rectangle at the origin.
    pub const ZERO: Self = Self {
        min: IVec2::ZERO,
        max: IVec2::ZERO,
    };

    /// Creates a rectangle from two arbitrary corner points.
    ///
    /// The corners are normalized so that `min <= max` on both axes.
    #[must_use]
    pub fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let a = IVec2::new(x0, y0);
        let b = IVec2::new(x1, y1);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a `width` x `height` rectangle anchored at the origin.
    #[must_use]
    pub fn from_size(width: i32, height: i32) -> Self {
        Self::from_corners(0, 0, width, height)
    }

    /// Horizontal extent.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.max.x.wrapping_sub(self.min.x)
    }

    /// Vertical extent.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.max.y.wrapping_sub(self.min.y)
    }

    /// Returns true if the rectangle covers no area.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Replaces this rectangle with the one spanned by two corner points.
    pub fn set_corners(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> &mut Self {
        *self = Self::from_corners(x0, y0, x1, y1);
        self
    }

    /// Replaces this rectangle with a `width` x `height` one at the origin.
    pub fn set_size(&mut self, width: i32, height: i32) -> &mut Self {
        *self = Self::from_size(width, height);
        self
    }

    /// Moves both corners by `(dx, dy)`.
    pub fn offset(&mut self, dx: i32, dy: i32) -> &mut Self {
        let delta = IVec2::new(dx, dy);
        self.min = self.min + delta;
        self.max = self.max + delta;
        self
    }

    /// Returns true if `(x, y)` lies inside the half-open rectangle.
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min.x && x < self.max.x && y >= self.min.y && y < self.max.y
    }
}
