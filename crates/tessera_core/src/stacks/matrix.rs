//! # Matrix Stack
//!
//! Hierarchical model-view transforms.
//!
//! Every transform post-multiplies the top matrix, so the transform applied
//! last in code is applied first to the vertex:
//!
//! ```text
//! push_identity()       top = I
//! translate(1, 0, 0)    top = I * T
//! duplicate()           [I*T, I*T]
//! scale(2, 2, 2)        top = T * S      (scale, then translate)
//! pop()                 top = T
//! ```

use tessera_shared::{Mat4, Quaternion, Vec3};

use crate::config::StackConfig;
use crate::error::CollectionResult;
use crate::memory::{PodAccessor, StackState, StructStack};

/// A fixed-capacity stack of [`Mat4`] transforms.
#[derive(Debug)]
pub struct MatrixStack {
    inner: StructStack<PodAccessor<Mat4>>,
}

impl MatrixStack {
    /// Creates a stack holding up to `capacity` matrices.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: StructStack::new(capacity, PodAccessor::new()),
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
            inner: StructStack::from_config(config, PodAccessor::new())?,
        })
    }

    /// Returns the underlying record stack.
    #[inline]
    #[must_use]
    pub const fn as_struct_stack(&self) -> &StructStack<PodAccessor<Mat4>> {
        &self.inner
    }

    /// Returns the maximum number of matrices.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Returns the number of matrices on the stack.
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

    // ========================================================================
    // Push / Pop
    // ========================================================================

    /// Pushes a copy of `matrix`.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if the stack is full.
    pub fn push(&mut self, matrix: &Mat4) -> CollectionResult<&mut Self> {
        self.inner.push(matrix)?;
        Ok(self)
    }

    /// Pushes the identity matrix.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if the stack is full.
    pub fn push_identity(&mut self) -> CollectionResult<&mut Self> {
        self.push(&Mat4::IDENTITY)
    }

    /// Duplicates the top matrix, typically before applying a local
    /// transform that should be undone with [`MatrixStack::pop`].
    ///
    /// # Errors
    ///
    /// `StackOverflow` if full, `StackUnderflow` if empty.
    pub fn duplicate(&mut self) -> CollectionResult<&mut Self> {
        self.inner.duplicate()?;
        Ok(self)
    }

    /// Pops the top matrix.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn pop(&mut self) -> CollectionResult<&mut Self> {
        self.inner.pop()?;
        Ok(self)
    }

    /// Pops `n` matrices.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if fewer than `n` are on the stack.
    pub fn pop_n(&mut self, n: usize) -> CollectionResult<&mut Self> {
        self.inner.pop_n(n)?;
        Ok(self)
    }

    /// Removes every matrix.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    // ========================================================================
    // Top Transforms
    // ========================================================================

    /// Replaces the top matrix.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn set_top(&mut self, matrix: Mat4) -> CollectionResult<&mut Self> {
        self.inner.set_top(matrix)?;
        Ok(self)
    }

    /// Resets the top matrix to identity.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn set_identity(&mut self) -> CollectionResult<&mut Self> {
        self.set_top(Mat4::IDENTITY)
    }

    /// Post-multiplies the top matrix by `matrix`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn mul_top(&mut self, matrix: &Mat4) -> CollectionResult<&mut Self> {
        self.inner.modify_top(|top| *top *= *matrix)?;
        Ok(self)
    }

    /// Applies a translation.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> CollectionResult<&mut Self> {
        self.mul_top(&Mat4::from_translation(x, y, z))
    }

    /// Applies a translation by `offset`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn translate_vec(&mut self, offset: Vec3) -> CollectionResult<&mut Self> {
        self.translate(offset.x, offset.y, offset.z)
    }

    /// Applies a per-axis scale.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> CollectionResult<&mut Self> {
        self.mul_top(&Mat4::from_scale(x, y, z))
    }

    /// Applies a per-axis scale given as a vector.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn scale_vec(&mut self, factors: Vec3) -> CollectionResult<&mut Self> {
        self.scale(factors.x, factors.y, factors.z)
    }

    /// Applies a rotation of `angle` radians around `(x, y, z)`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn rotate(&mut self, angle: f32, x: f32, y: f32, z: f32) -> CollectionResult<&mut Self> {
        self.mul_top(&Mat4::from_axis_angle(angle, x, y, z))
    }

    /// Applies a rotation of `angle` radians around `axis`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn rotate_axis(&mut self, angle: f32, axis: Vec3) -> CollectionResult<&mut Self> {
        self.rotate(angle, axis.x, axis.y, axis.z)
    }

    /// Applies the rotation described by `rotation`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn rotate_quat(&mut self, rotation: Quaternion) -> CollectionResult<&mut Self> {
        self.mul_top(&Mat4::from_quaternion(rotation))
    }

    /// Applies an orthographic projection (clip-space depth `[-1, 1]`).
    ///
    /// Arguments follow the `glOrtho` order, `bottom` before `top`. A y-down
    /// screen projection passes `bottom = height, top = 0`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn ortho(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> CollectionResult<&mut Self> {
        self.mul_top(&Mat4::orthographic(left, right, bottom, top, near, far))
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Returns a copy of the top matrix.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn peek(&self) -> CollectionResult<Mat4> {
        self.inner.peek()
    }

    /// Copies the top matrix into `out`.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn peek_into(&mut self, out: &mut Mat4) -> CollectionResult<&mut Self> {
        self.inner.peek_into(out)?;
        Ok(self)
    }

    /// Lends the top matrix to `f`, e.g. for a uniform upload.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn peek_with<R>(&mut self, f: impl FnOnce(&Mat4) -> R) -> CollectionResult<R> {
        self.inner.peek_with(f)
    }
}
