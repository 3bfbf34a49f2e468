//! # Struct Accessors
//!
//! The binary contract between a [`StructStack`](super::StructStack) and the
//! records it stores.
//!
//! The stack only knows how many bytes a record occupies. Decoding and
//! encoding go through an accessor, so any fixed-size record can be stacked
//! without the stack seeing its fields.

use std::fmt;
use std::marker::PhantomData;

use bytemuck::Pod;

/// Binary interface for a fixed-size record type.
///
/// # Contract
///
/// - `size_of` is constant for the accessor's lifetime
/// - `read` and `write` touch exactly `block[offset..offset + size_of()]`
/// - `write` followed by `read` at the same offset reproduces the record
///
/// # Example
///
/// ```rust
/// use tessera_core::StructAccessor;
///
/// struct Rgba;
///
/// impl StructAccessor for Rgba {
///     type Record = [u8; 4];
///
///     fn size_of(&self) -> usize { 4 }
///     fn create(&self) -> [u8; 4] { [0, 0, 0, 255] }
///     fn read(&self, offset: usize, block: &[u8], out: &mut [u8; 4]) {
///         out.copy_from_slice(&block[offset..offset + 4]);
///     }
///     fn write(&self, offset: usize, block: &mut [u8], record: &[u8; 4]) {
///         block[offset..offset + 4].copy_from_slice(record);
///     }
/// }
/// ```
pub trait StructAccessor {
    /// The decoded record type.
    type Record;

    /// Size of one encoded record in bytes.
    fn size_of(&self) -> usize;

    /// Creates a new record with its default contents.
    fn create(&self) -> Self::Record;

    /// Decodes the record at `offset` into `out`.
    fn read(&self, offset: usize, block: &[u8], out: &mut Self::Record);

    /// Encodes `record` at `offset`.
    fn write(&self, offset: usize, block: &mut [u8], record: &Self::Record);
}

/// Accessor for any `Pod` record: the record's bytes are its encoding.
///
/// Reads tolerate unaligned offsets, so the backing block needs no
/// particular alignment.
pub struct PodAccessor<T> {
    _record: PhantomData<fn() -> T>,
}

impl<T> PodAccessor<T> {
    /// Creates the accessor.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<T> Default for PodAccessor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for PodAccessor<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PodAccessor<T> {}

impl<T> fmt::Debug for PodAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PodAccessor<{}>", std::any::type_name::<T>())
    }
}

impl<T: Pod + Default> StructAccessor for PodAccessor<T> {
    type Record = T;

    #[inline]
    fn size_of(&self) -> usize {
        std::mem::size_of::<T>()
    }

    #[inline]
    fn create(&self) -> T {
        T::default()
    }

    #[inline]
    fn read(&self, offset: usize, block: &[u8], out: &mut T) {
        *out = bytemuck::pod_read_unaligned(&block[offset..offset + self.size_of()]);
    }

    #[inline]
    fn write(&self, offset: usize, block: &mut [u8], record: &T) {
        block[offset..offset + self.size_of()].copy_from_slice(bytemuck::bytes_of(record));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_shared::Mat4;

    #[test]
    fn test_pod_accessor_unaligned_round_trip() {
        let accessor = PodAccessor::<Mat4>::new();
        let mut block = vec![0u8; accessor.size_of() + 3];
        let m = Mat4::from_translation(1.0, 2.0, 3.0);

        accessor.write(3, &mut block, &m);
        let mut out = accessor.create();
        accessor.read(3, &block, &mut out);
        assert_eq!(out, m);
        assert_eq!(&block[..3], &[0, 0, 0]);
    }

    #[test]
    fn test_pod_accessor_create_uses_default() {
        assert_eq!(PodAccessor::<Mat4>::new().create(), Mat4::IDENTITY);
        assert_eq!(PodAccessor::<u32>::new().size_of(), 4);
    }
}
