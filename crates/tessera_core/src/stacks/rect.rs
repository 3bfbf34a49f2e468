//! # Rectangle Stack
//!
//! Nested clip and viewport bounds.
//!
//! ```text
//! push_bounds(0, 0, 800, 600)   window
//! push_bounds(10, 10, 210, 90)  panel
//! offset_top(0, 40)             scrolled panel
//! pop()                         back to window
//! ```

use tessera_shared::{IVec2, Rect};

use crate::config::StackConfig;
use crate::error::CollectionResult;
use crate::memory::{StackState, StructAccessor, StructStack};

/// Field-wise codec for [`Rect`]: `min.x, min.y, max.x, max.y` as
/// little-endian `i32`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RectAccessor;

impl RectAccessor {
    #[inline]
    fn read_i32(block: &[u8], offset: usize) -> i32 {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&block[offset..offset + 4]);
        i32::from_le_bytes(bytes)
    }

    #[inline]
    fn write_i32(block: &mut [u8], offset: usize, value: i32) {
        block[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }
}

impl StructAccessor for RectAccessor {
    type Record = Rect;

    #[inline]
    fn size_of(&self) -> usize {
        Rect::SIZE_OF
    }

    #[inline]
    fn create(&self) -> Rect {
        Rect::ZERO
    }

    fn read(&self, offset: usize, block: &[u8], out: &mut Rect) {
        out.min = IVec2::new(
            Self::read_i32(block, offset),
            Self::read_i32(block, offset + 4),
        );
        out.max = IVec2::new(
            Self::read_i32(block, offset + 8),
            Self::read_i32(block, offset + 12),
        );
    }

    fn write(&self, offset: usize, block: &mut [u8], record: &Rect) {
        Self::write_i32(block, offset, record.min.x);
        Self::write_i32(block, offset + 4, record.min.y);
        Self::write_i32(block, offset + 8, record.max.x);
        Self::write_i32(block, offset + 12, record.max.y);
    }
}

/// A fixed-capacity stack of [`Rect`]s.
#[derive(Debug)]
pub struct RectStack {
    inner: StructStack<RectAccessor>,
}

impl RectStack {
    /// Creates a stack holding up to `capacity` rectangles.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: StructStack::new(capacity, RectAccessor),
        }
    }

    /// Creates a stack sized according to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfig`](crate::CollectionError::InvalidConfig)
    /// if the capacity is zero.
    pub fn from_config(config: &StackConfig) -> CollectionResult<Self> {
        Ok(Self {
            inner: StructStack::from_config(config, RectAccessor)?,
        })
    }

    /// Returns the underlying record stack.
    #[inline]
    #[must_use]
    pub const fn as_struct_stack(&self) -> &StructStack<RectAccessor> {
        &self.inner
    }

    /// Returns the maximum number of rectangles.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Returns the number of rectangles on the stack.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the stack is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns true if the stack is full.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.inner.is_full()
    }

    /// Returns the fill level.
    #[must_use]
    pub const fn state(&self) -> StackState {
        self.inner.state()
    }

    /// Pushes a copy of `rect`.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if the stack is full.
    pub fn push(&mut self, rect: &Rect) -> CollectionResult<&mut Self> {
        self.inner.push(rect)?;
        Ok(self)
    }

    /// Pushes the rectangle spanned by two corners, normalized.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if the stack is full.
    pub fn push_bounds(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> CollectionResult<&mut Self> {
        self.inner.push_with(|r| {
            r.set_corners(x0, y0, x1, y1);
        })?;
        Ok(self)
    }

    /// Pushes a `width` x `height` rectangle anchored at the origin.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if the stack is full.
    pub fn push_size(&mut self, width: i32, height: i32) -> CollectionResult<&mut Self> {
        self.inner.push_with(|r| {
            r.set_size(width, height);
        })?;
        Ok(self)
    }

    /// Duplicates the top rectangle.
    ///
    /// # Errors
    ///
    /// `StackOverflow` if full, `StackUnderflow` if empty.
    pub fn duplicate(&mut self) -> CollectionResult<&mut Self> {
        self.inner.duplicate()?;
        Ok(self)
    }

    /// Pops the top rectangle.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn pop(&mut self) -> CollectionResult<&mut Self> {
        self.inner.pop()?;
        Ok(self)
    }

    /// Pops `n` rectangles.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if fewer than `n` are on the stack.
    pub fn pop_n(&mut self, n: usize) -> CollectionResult<&mut Self> {
        self.inner.pop_n(n)?;
        Ok(self)
    }

    /// Moves the top rectangle by `(dx, dy)`. Coordinates wrap on overflow.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn offset_top(&mut self, dx: i32, dy: i32) -> CollectionResult<&mut Self> {
        self.inner.modify_top(|r| {
            r.offset(dx, dy);
        })?;
        Ok(self)
    }

    /// Replaces the top rectangle.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn set_top(&mut self, rect: Rect) -> CollectionResult<&mut Self> {
        self.inner.set_top(rect)?;
        Ok(self)
    }

    /// Returns a copy of the top rectangle.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn peek(&self) -> CollectionResult<Rect> {
        self.inner.peek()
    }

    /// Copies the top rectangle into `out`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn peek_into(&mut self, out: &mut Rect) -> CollectionResult<&mut Self> {
        self.inner.peek_into(out)?;
        Ok(self)
    }

    /// Lends the top rectangle to `f`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn peek_with<R>(&mut self, f: impl FnOnce(&Rect) -> R) -> CollectionResult<R> {
        self.inner.peek_with(f)
    }

    /// Removes every rectangle.
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
