//! # Fail-Fast Cursor
//!
//! A detached iterator over a [`SpatialMap3D`].
//!
//! The borrowing iterators (`iter`, `keys`, `values`) cannot observe a
//! modification: the borrow checker rules it out. A cursor holds no borrow,
//! so the map can change between steps. It captures the map's modification
//! count on creation and compares it with the live count on every
//! `has_next`/`next` call:
//!
//! ```text
//! cursor()        snapshot = 7
//! next(&map)      live = 7   -> entry
//! map.put(..)     live = 8
//! next(&map)      live = 8   -> Err(ConcurrentModification)
//! ```
//!
//! A cursor is forward-only and cannot be rewound. Ask the map for a new one.

use tessera_shared::IVec3;

use super::hash::HashInt3D;
use super::map::{NodeId, SpatialMap3D};
use crate::error::{CollectionError, CollectionResult};

/// Fail-fast position within a [`SpatialMap3D`]. See [`SpatialMap3D::cursor`].
#[derive(Clone, Debug)]
pub struct Cursor {
    /// Modification count the cursor is valid for.
    expected: u64,
    /// Next bucket to inspect once the current chain runs out.
    bucket: usize,
    /// Next node in the current chain.
    next: Option<NodeId>,
    /// Node returned by the last successful `next`.
    last: Option<NodeId>,
}

impl Cursor {
    pub(crate) const fn new(expected: u64) -> Self {
        Self {
            expected,
            bucket: 0,
            next: None,
            last: None,
        }
    }

    /// Returns true if another entry remains.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ConcurrentModification`] if the map changed
    /// since the cursor was created.
    pub fn has_next<V, H: HashInt3D>(&mut self, map: &SpatialMap3D<V, H>) -> CollectionResult<bool> {
        map.check_mod_count(self.expected)?;
        self.seek(map);
        Ok(self.next.is_some())
    }

    /// Advances to the next entry.
    ///
    /// # Returns
    ///
    /// The next `(key, &value)` pair, or `None` once every bucket is drained.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::ConcurrentModification`] if the map changed
    /// since the cursor was created.
    pub fn next<'m, V, H: HashInt3D>(
        &mut self,
        map: &'m SpatialMap3D<V, H>,
    ) -> CollectionResult<Option<(IVec3, &'m V)>> {
        map.check_mod_count(self.expected)?;
        self.seek(map);

        let Some(node) = self.next.and_then(|id| map.node(id)) else {
            return Ok(None);
        };
        self.last = self.next;
        self.next = node.next;
        Ok(Some((node.key, &node.value)))
    }

    /// Advances to the next key.
    ///
    /// # Errors
    ///
    /// Same as [`Cursor::next`].
    pub fn next_key<V, H: HashInt3D>(&mut self, map: &SpatialMap3D<V, H>) -> CollectionResult<Option<IVec3>> {
        Ok(self.next(map)?.map(|(key, _)| key))
    }

    /// Advances to the next value.
    ///
    /// # Errors
    ///
    /// Same as [`Cursor::next`].
    pub fn next_value<'m, V, H: HashInt3D>(
        &mut self,
        map: &'m SpatialMap3D<V, H>,
    ) -> CollectionResult<Option<&'m V>> {
        Ok(self.next(map)?.map(|(_, value)| value))
    }

    /// Removes the entry returned by the last call to [`Cursor::next`].
    ///
    /// The removal is applied through the cursor, so the cursor stays valid
    /// and iteration continues with the following entry.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::ConcurrentModification`] if the map changed
    ///   behind the cursor's back
    /// - [`CollectionError::InvalidArgument`] if nothing has been returned
    ///   yet, or the last entry was already removed
    pub fn remove_last<V, H: HashInt3D>(&mut self, map: &mut SpatialMap3D<V, H>) -> CollectionResult<V> {
        map.check_mod_count(self.expected)?;
        let id = self
            .last
            .take()
            .ok_or(CollectionError::InvalidArgument("cursor has no current entry"))?;
        let value = map
            .remove_node(id)
            .ok_or(CollectionError::InvalidArgument("cursor entry no longer exists"))?;
        self.expected = map.mod_count();
        Ok(value)
    }

    /// Moves `next` to the head of the next non-empty bucket if the current
    /// chain is exhausted.
    fn seek<V, H: HashInt3D>(&mut self, map: &SpatialMap3D<V, H>) {
        while self.next.is_none() && self.bucket < map.bucket_count() {
            self.next = map.bucket_head(self.bucket);
            self.bucket += 1;
        }
    }
}
