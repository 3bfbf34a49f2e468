//! # Struct Stack
//!
//! Fixed-capacity stack of fixed-size records stored in one byte block.
//!
//! ## Layout
//!
//! The stack grows DOWNWARD through the block:
//!
//! ```text
//! slot:   0        1        2        3        4 (= capacity)
//!        [free ] [free ] [ top ] [ ... ] [bottom]
//!                          ▲
//!                   stack_pointer = 2        len = capacity - sp = 3
//! ```
//!
//! - Empty: `stack_pointer == capacity`
//! - Full:  `stack_pointer == 0`
//!
//! ## Top Cache
//!
//! One decoded copy of the top record is kept next to the block.
//!
//! | Operation          | Cache afterwards                          |
//! |--------------------|-------------------------------------------|
//! | `push` / `pop`     | `Dirty` (decoded lazily on next peek)     |
//! | `duplicate`        | unchanged (new top has identical bytes)   |
//! | `modify_top` & co. | `Clean` (written back immediately)        |
//! | `peek_into/with`   | `Clean` (refreshed only if it was dirty)  |
//!
//! Mutations write through at once because `duplicate` copies raw bytes and
//! never consults the cache: the block must already hold the latest top.

use std::fmt;

use super::accessor::StructAccessor;
use crate::config::StackConfig;
use crate::error::{CollectionError, CollectionResult};

/// Whether the top cache mirrors the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheState {
    /// The cache equals the record at the stack pointer.
    Clean,
    /// The cache is stale and must be decoded before use.
    Dirty,
}

/// Fill level of a stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackState {
    /// No records.
    Empty,
    /// At least one record and at least one free slot.
    Partial,
    /// No free slots.
    Full,
}

/// A fixed-capacity LIFO of records encoded through a [`StructAccessor`].
///
/// All memory is allocated once at construction and released when the
/// stack is dropped. No operation allocates afterwards, except
/// [`StructStack::peek`], which returns a fresh record.
///
/// # Thread Safety
///
/// NOT thread-safe. One stack per render thread.
///
/// # Example
///
/// ```rust
/// use tessera_core::{PodAccessor, StructStack};
///
/// let mut stack = StructStack::new(4, PodAccessor::<u32>::new());
/// stack.push(&7)?.duplicate()?;
/// stack.modify_top(|v| *v += 1)?;
/// assert_eq!(stack.peek()?, 8);
/// stack.pop()?;
/// assert_eq!(stack.peek()?, 7);
/// # Ok::<(), tessera_core::CollectionError>(())
/// ```
pub struct StructStack<A: StructAccessor> {
    /// Record codec.
    accessor: A,
    /// The backing block, `capacity * record_size` bytes.
    block: Box<[u8]>,
    /// Bytes per record (cached from the accessor).
    record_size: usize,
    /// Maximum number of records.
    capacity: usize,
    /// The descending stack pointer.
    stack_pointer: usize,
    /// Decoded copy of the top record.
    top_cache: A::Record,
    /// Whether `top_cache` mirrors the block.
    cache: CacheState,
}

impl<A: StructAccessor> StructStack<A> {
    /// Creates a stack holding up to `capacity` records.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of records
    /// * `accessor` - Codec for the record type
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or the block size overflows `usize`.
    #[must_use]
    pub fn new(capacity: usize, accessor: A) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");

        let record_size = accessor.size_of();
        let block_size = record_size
            .checked_mul(capacity)
            .unwrap_or_else(|| panic!("Stack block of {capacity} x {record_size} bytes overflows usize"));
        let top_cache = accessor.create();

        tracing::debug!(capacity, record_size, "struct stack created");

        Self {
            accessor,
            block: vec![0u8; block_size].into_boxed_slice(),
            record_size,
            capacity,
            stack_pointer: capacity,
            top_cache,
            cache: CacheState::Dirty,
        }
    }

    /// Creates a stack sized according to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfig`] if the capacity is zero.
    pub fn from_config(config: &StackConfig, accessor: A) -> CollectionResult<Self> {
        config.validate()?;
        Ok(Self::new(config.capacity, accessor))
    }

    // ========================================================================
    // Getters
    // ========================================================================

    /// Returns the maximum number of records.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of records on the stack.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.capacity - self.stack_pointer
    }

    /// Returns true if the stack holds no records.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stack_pointer >= self.capacity
    }

    /// Returns true if no more records fit.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.stack_pointer == 0
    }

    /// Returns the fill level.
    #[must_use]
    pub const fn state(&self) -> StackState {
        if self.is_empty() {
            StackState::Empty
        } else if self.is_full() {
            StackState::Full
        } else {
            StackState::Partial
        }
    }

    /// Returns whether the top cache currently mirrors the block.
    #[inline]
    #[must_use]
    pub const fn cache_state(&self) -> CacheState {
        self.cache
    }

    /// Returns the size of one record in bytes.
    #[inline]
    #[must_use]
    pub const fn record_size(&self) -> usize {
        self.record_size
    }

    /// Returns the record codec.
    #[inline]
    #[must_use]
    pub const fn accessor(&self) -> &A {
        &self.accessor
    }

    // ========================================================================
    // Stack Operations
    // ========================================================================

    /// Pushes a record.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::StackOverflow`] if the stack is full.
    pub fn push(&mut self, record: &A::Record) -> CollectionResult<&mut Self> {
        self.ensure_not_full()?;
        self.stack_pointer -= 1;
        let offset = self.top_offset();
        self.accessor.write(offset, &mut self.block, record);
        self.cache = CacheState::Dirty;
        Ok(self)
    }

    /// Pops the top record.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::StackUnderflow`] if the stack is empty.
    pub fn pop(&mut self) -> CollectionResult<&mut Self> {
        self.pop_n(1)
    }

    /// Pops `n` records. Popping zero records is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::StackUnderflow`] if fewer than `n` records
    /// are on the stack. Nothing is popped in that case.
    pub fn pop_n(&mut self, n: usize) -> CollectionResult<&mut Self> {
        self.ensure_len(n)?;
        if n > 0 {
            self.stack_pointer += n;
            self.cache = CacheState::Dirty;
        }
        Ok(self)
    }

    /// Duplicates the top record by copying its bytes one slot down.
    ///
    /// The record is not decoded. The cache keeps its state: if it mirrored
    /// the old top, it mirrors the new one, which holds the same bytes.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::StackOverflow`] if the stack is full
    /// - [`CollectionError::StackUnderflow`] if there is nothing to duplicate
    pub fn duplicate(&mut self) -> CollectionResult<&mut Self> {
        self.ensure_not_full()?;
        self.ensure_len(1)?;
        let size = self.record_size;
        let src = self.top_offset();
        self.block.copy_within(src..src + size, src - size);
        self.stack_pointer -= 1;
        Ok(self)
    }

    /// Removes every record. The block's bytes are left as they are.
    pub fn clear(&mut self) {
        self.stack_pointer = self.capacity;
        self.cache = CacheState::Dirty;
        tracing::trace!(capacity = self.capacity, "struct stack cleared");
    }

    /// Returns an independent, freshly decoded copy of the top record.
    ///
    /// Does not touch the top cache.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::StackUnderflow`] if the stack is empty.
    pub fn peek(&self) -> CollectionResult<A::Record> {
        self.ensure_len(1)?;
        let mut record = self.accessor.create();
        self.accessor.read(self.top_offset(), &self.block, &mut record);
        Ok(record)
    }

    /// Lends the top record to `f` through the top cache.
    ///
    /// The record is decoded only if the cache is dirty.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::StackUnderflow`] if the stack is empty.
    pub fn peek_with<R>(&mut self, f: impl FnOnce(&A::Record) -> R) -> CollectionResult<R> {
        self.ensure_len(1)?;
        self.refresh_cache();
        Ok(f(&self.top_cache))
    }

    /// Copies the top record into `out` through the top cache.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::StackUnderflow`] if the stack is empty.
    pub fn peek_into(&mut self, out: &mut A::Record) -> CollectionResult<&mut Self>
    where
        A::Record: Clone,
    {
        self.ensure_len(1)?;
        self.refresh_cache();
        out.clone_from(&self.top_cache);
        Ok(self)
    }

    /// Mutates the top record in place and writes it back.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::StackUnderflow`] if the stack is empty.
    pub fn modify_top(&mut self, f: impl FnOnce(&mut A::Record)) -> CollectionResult<&mut Self> {
        self.ensure_len(1)?;
        self.refresh_cache();
        f(&mut self.top_cache);
        self.write_back();
        Ok(self)
    }

    /// Replaces the top record.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::StackUnderflow`] if the stack is empty.
    pub fn set_top(&mut self, record: A::Record) -> CollectionResult<&mut Self> {
        self.ensure_len(1)?;
        self.top_cache = record;
        self.write_back();
        Ok(self)
    }

    /// Pushes a record built by `f`.
    ///
    /// `f` starts from a copy of the current top (or a freshly created record
    /// on an empty stack), so this behaves like `duplicate` followed by
    /// `modify_top`, with a single encode and no raw copy.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::StackOverflow`] if the stack is full.
    pub fn push_with(&mut self, f: impl FnOnce(&mut A::Record)) -> CollectionResult<&mut Self> {
        self.ensure_not_full()?;
        if self.is_empty() {
            self.top_cache = self.accessor.create();
        } else {
            self.refresh_cache();
        }
        self.stack_pointer -= 1;
        f(&mut self.top_cache);
        self.write_back();
        Ok(self)
    }

    // ========================================================================
    // Cache Protocol
    // ========================================================================

    /// Byte offset of the top slot.
    #[inline]
    const fn top_offset(&self) -> usize {
        self.stack_pointer * self.record_size
    }

    /// Decodes the top record into the cache if the cache is stale.
    fn refresh_cache(&mut self) {
        match self.cache {
            CacheState::Clean => {}
            CacheState::Dirty => {
                let offset = self.top_offset();
                self.accessor.read(offset, &self.block, &mut self.top_cache);
                self.cache = CacheState::Clean;
            }
        }
    }

    /// Encodes the cache into the top slot.
    fn write_back(&mut self) {
        let offset = self.top_offset();
        self.accessor.write(offset, &mut self.block, &self.top_cache);
        self.cache = CacheState::Clean;
    }

    fn ensure_not_full(&self) -> CollectionResult<()> {
        if self.is_full() {
            tracing::debug!(capacity = self.capacity, "struct stack overflow");
            return Err(CollectionError::StackOverflow {
                capacity: self.capacity,
            });
        }
        Ok(())
    }

    fn ensure_len(&self, requested: usize) -> CollectionResult<()> {
        let available = self.len();
        if requested > available {
            tracing::debug!(requested, available, "struct stack underflow");
            return Err(CollectionError::StackUnderflow {
                requested,
                available,
            });
        }
        Ok(())
    }
}

impl<A: StructAccessor> fmt::Debug for StructStack<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructStack")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("record_size", &self.record_size)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
