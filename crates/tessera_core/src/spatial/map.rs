//! # Spatial Hash Map
//!
//! A hash map keyed by 3D integer coordinates with a fixed bucket table.
//!
//! ## Layout
//!
//! ```text
//! buckets:  [ head0 | head1 | head2 | ... | headN-1 ]
//!               │               │
//!               ▼               ▼
//! arena:    [ node ]◄──►[ node ]   [ node ]
//!           (key, value, prev, next)
//! ```
//!
//! Nodes live in a generation-tagged arena and are linked by [`NodeId`]
//! handles, so chains need no pointers and no reference counting. New keys are
//! appended at the tail of their chain, preserving insertion order among
//! collisions. Freed slots are recycled through a free list.
//!
//! ## Bucket Index
//!
//! - Power-of-two bucket count: `hash & (N - 1)`
//! - Otherwise: `|hash % N|`
//!
//! Both produce an index in `0..N` for every hash, negative ones included.

use std::fmt;
use std::iter::FusedIterator;

use tessera_shared::IVec3;

use super::cursor::Cursor;
use super::hash::{Align16Hash, DefaultHash, HashInt3D, HashStrategy};
use crate::config::MapConfig;
use crate::error::{CollectionError, CollectionResult};

/// Bucket count used by [`SpatialMap3D::default`].
pub const DEFAULT_BUCKET_COUNT: usize = 100;

/// Bucket count used by [`SpatialMap3D::new_align16`] (one per 16^3 cell).
pub const ALIGN16_BUCKET_COUNT: usize = 4096;

/// Handle to a node in the map's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct NodeId {
    index: usize,
    generation: u32,
}

/// A chain entry.
pub(crate) struct Node<V> {
    pub(crate) key: IVec3,
    pub(crate) value: V,
    prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

/// An arena slot. The generation is bumped every time the slot is freed.
struct Slot<V> {
    generation: u32,
    node: Option<Node<V>>,
}

/// Result of walking one chain for a key.
struct Lookup {
    bucket: usize,
    found: Option<NodeId>,
    tail: Option<NodeId>,
}

/// A hash map from 3D integer coordinates to values.
///
/// The bucket table never grows: pick the bucket count for the expected
/// population at construction. Lookups cost O(chain length).
///
/// # Thread Safety
///
/// No internal locking. Wrap the map in a
/// [`SharedSpatialMap`](crate::sync::SharedSpatialMap) to share it.
///
/// # Example
///
/// ```rust
/// use tessera_core::SpatialMap3D;
///
/// let mut chunks = SpatialMap3D::new(64);
/// assert_eq!(chunks.put(0, 0, 0, "spawn"), None);
/// assert_eq!(chunks.put(0, 0, 0, "origin"), Some("spawn"));
/// assert_eq!(chunks.get(0, 0, 0), Some(&"origin"));
/// assert_eq!(chunks.len(), 1);
/// ```
pub struct SpatialMap3D<V, H = DefaultHash> {
    /// The hash function.
    hasher: H,
    /// Chain heads, one per bucket.
    buckets: Box<[Option<NodeId>]>,
    /// `N - 1` when the bucket count is a power of two.
    mask: Option<usize>,
    /// Node storage.
    slots: Vec<Slot<V>>,
    /// Indices of empty slots.
    free: Vec<usize>,
    /// Number of entries.
    len: usize,
    /// Modification count, checked by cursors.
    mod_count: u64,
}

impl<V> SpatialMap3D<V, DefaultHash> {
    /// Creates a map with `bucket_count` buckets and the default hash.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    #[must_use]
    pub fn new(bucket_count: usize) -> Self {
        Self::with_hasher(bucket_count, DefaultHash)
    }
}

impl<V> SpatialMap3D<V, Align16Hash> {
    /// Creates a map with 4096 buckets and the align-16 hash.
    ///
    /// Every coordinate of a 16x16x16 cell gets its own bucket, and
    /// coordinates 16 apart on every axis share one.
    #[must_use]
    pub fn new_align16() -> Self {
        Self::with_hasher(ALIGN16_BUCKET_COUNT, Align16Hash)
    }
}

impl<V> SpatialMap3D<V, HashStrategy> {
    /// Creates a map sized and hashed according to `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidConfig`] if the bucket count is zero.
    pub fn from_config(config: &MapConfig) -> CollectionResult<Self> {
        config.validate()?;
        Ok(Self::with_hasher(config.bucket_count, config.hash))
    }
}

impl<V> Default for SpatialMap3D<V, DefaultHash> {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_COUNT)
    }
}

impl<V, H: HashInt3D> SpatialMap3D<V, H> {
    /// Creates a map with `bucket_count` buckets and a custom hash.
    ///
    /// # Arguments
    ///
    /// * `bucket_count` - Number of chain heads (fixed for the map's lifetime)
    /// * `hasher` - Coordinate hash; closures `Fn(i32, i32, i32) -> i32` work
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    #[must_use]
    pub fn with_hasher(bucket_count: usize, hasher: H) -> Self {
        assert!(bucket_count > 0, "Bucket count must be greater than zero");

        let mask = bucket_count.is_power_of_two().then(|| bucket_count - 1);
        tracing::debug!(bucket_count, fast_index = mask.is_some(), "spatial map created");

        Self {
            hasher,
            buckets: vec![None; bucket_count].into_boxed_slice(),
            mask,
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            mod_count: 0,
        }
    }

    /// Returns the number of buckets.
    #[inline]
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of entries.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map holds no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the bucket a coordinate hashes to.
    #[inline]
    #[must_use]
    pub fn bucket_index(&self, x: i32, y: i32, z: i32) -> usize {
        let hash = self.hasher.hash(x, y, z);
        match self.mask {
            // Reinterpret the bits; negative hashes keep their low bits.
            Some(mask) => (hash as u32 as usize) & mask,
            None => hash.unsigned_abs() as usize % self.buckets.len(),
        }
    }

    /// Gets the value stored at `(x, y, z)`.
    #[must_use]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<&V> {
        let id = self.locate(IVec3::new(x, y, z)).found?;
        self.node(id).map(|node| &node.value)
    }

    /// Gets a mutable reference to the value stored at `(x, y, z)`.
    ///
    /// Changing a value in place is not a structural modification.
    pub fn get_mut(&mut self, x: i32, y: i32, z: i32) -> Option<&mut V> {
        let id = self.locate(IVec3::new(x, y, z)).found?;
        self.node_mut(id).map(|node| &mut node.value)
    }

    /// Gets the value stored at `key`.
    #[inline]
    #[must_use]
    pub fn get_at(&self, key: IVec3) -> Option<&V> {
        self.get(key.x, key.y, key.z)
    }

    /// Returns true if a value is stored at `(x, y, z)`.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z).is_some()
    }

    /// Stores `value` at `(x, y, z)`.
    ///
    /// A new key is appended to the tail of its bucket chain. An existing
    /// key has its value replaced in place; the entry count is unchanged.
    ///
    /// # Returns
    ///
    /// The value previously stored at these coordinates, if any.
    pub fn put(&mut self, x: i32, y: i32, z: i32, value: V) -> Option<V> {
        self.mod_count += 1;
        let key = IVec3::new(x, y, z);
        let lookup = self.locate(key);

        if let Some(id) = lookup.found {
            if let Some(node) = self.node_mut(id) {
                return Some(std::mem::replace(&mut node.value, value));
            }
        }

        let id = self.alloc(Node {
            key,
            value,
            prev: lookup.tail,
            next: None,
        });
        match lookup.tail {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(id);
                }
            }
            None => self.buckets[lookup.bucket] = Some(id),
        }
        self.len += 1;
        None
    }

    /// Stores `value` at `key`.
    #[inline]
    pub fn put_at(&mut self, key: IVec3, value: V) -> Option<V> {
        self.put(key.x, key.y, key.z, value)
    }

    /// Stores an optional value, rejecting `None`.
    ///
    /// This is the entry point for callers whose values may be absent (for
    /// example values decoded from external data). Presence in the map is
    /// represented by a stored value, so an absent value is never stored.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] for `None`. The map is
    /// not modified in that case.
    pub fn try_put(&mut self, x: i32, y: i32, z: i32, value: Option<V>) -> CollectionResult<Option<V>> {
        let value = value.ok_or(CollectionError::InvalidArgument("map values cannot be absent"))?;
        Ok(self.put(x, y, z, value))
    }

    /// Removes the value stored at `(x, y, z)`.
    ///
    /// # Returns
    ///
    /// The removed value, or `None` if no value was stored there.
    pub fn remove(&mut self, x: i32, y: i32, z: i32) -> Option<V> {
        self.mod_count += 1;
        let lookup = self.locate(IVec3::new(x, y, z));
        let id = lookup.found?;
        self.unlink(lookup.bucket, id)
    }

    /// Removes the value stored at `key`.
    #[inline]
    pub fn remove_at(&mut self, key: IVec3) -> Option<V> {
        self.remove(key.x, key.y, key.z)
    }

    /// Removes every entry.
    ///
    /// All bucket heads are reset in one pass and the arena is emptied.
    /// Counts as a single modification.
    pub fn clear(&mut self) {
        self.mod_count += 1;
        self.buckets.fill(None);
        self.slots.clear();
        self.free.clear();
        self.len = 0;
        tracing::trace!(bucket_count = self.buckets.len(), "spatial map cleared");
    }

    /// Keeps only the entries for which `keep` returns true.
    ///
    /// # Returns
    ///
    /// The number of entries removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(IVec3, &mut V) -> bool,
    {
        let mut removed = 0;
        for bucket in 0..self.buckets.len() {
            let mut cursor = self.buckets[bucket];
            while let Some(id) = cursor {
                let Some(node) = self.node_mut(id) else { break };
                cursor = node.next;
                if !keep(node.key, &mut node.value) {
                    self.unlink(bucket, id);
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            self.mod_count += 1;
        }
        removed
    }

    /// Creates a fail-fast cursor over the entries.
    ///
    /// The cursor does not borrow the map. Any structural change made after
    /// its creation (other than through [`Cursor::remove_last`]) makes its
    /// next call fail with [`CollectionError::ConcurrentModification`].
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.mod_count)
    }

    /// Iterates over `(key, &value)` pairs, bucket by bucket.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V, H> {
        Iter {
            map: self,
            bucket: 0,
            next: None,
            remaining: self.len,
        }
    }

    /// Iterates over the keys.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, V, H> {
        Keys { inner: self.iter() }
    }

    /// Iterates over the values.
    #[must_use]
    pub fn values(&self) -> Values<'_, V, H> {
        Values { inner: self.iter() }
    }

    /// Iterates mutably over the values, in arena order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.slots
            .iter_mut()
            .filter_map(|slot| slot.node.as_mut().map(|node| &mut node.value))
    }

    // ------------------------------------------------------------------------
    // Crate-internal access for cursors
    // ------------------------------------------------------------------------

    /// Live modification count.
    #[inline]
    pub(crate) const fn mod_count(&self) -> u64 {
        self.mod_count
    }

    /// Fails if `expected` no longer matches the live modification count.
    pub(crate) fn check_mod_count(&self, expected: u64) -> CollectionResult<()> {
        if expected == self.mod_count {
            Ok(())
        } else {
            tracing::debug!(expected, actual = self.mod_count, "concurrent modification detected");
            Err(CollectionError::ConcurrentModification {
                expected,
                actual: self.mod_count,
            })
        }
    }

    /// Head of the chain in `bucket`.
    #[inline]
    pub(crate) fn bucket_head(&self, bucket: usize) -> Option<NodeId> {
        self.buckets.get(bucket).copied().flatten()
    }

    /// Looks up a live node.
    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> Option<&Node<V>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Removes a node by handle, as a single structural modification.
    pub(crate) fn remove_node(&mut self, id: NodeId) -> Option<V> {
        let key = self.node(id)?.key;
        self.mod_count += 1;
        let bucket = self.bucket_index(key.x, key.y, key.z);
        self.unlink(bucket, id)
    }

    // ------------------------------------------------------------------------
    // Chain & arena maintenance
    // ------------------------------------------------------------------------

    /// Walks the chain for `key`, remembering the last node visited.
    fn locate(&self, key: IVec3) -> Lookup {
        let bucket = self.bucket_index(key.x, key.y, key.z);
        let mut tail = None;
        let mut cursor = self.buckets[bucket];
        while let Some(id) = cursor {
            let Some(node) = self.node(id) else { break };
            if node.key == key {
                return Lookup {
                    bucket,
                    found: Some(id),
                    tail,
                };
            }
            tail = Some(id);
            cursor = node.next;
        }
        Lookup {
            bucket,
            found: None,
            tail,
        }
    }

    /// Detaches a node from its chain and frees its slot.
    fn unlink(&mut self, bucket: usize, id: NodeId) -> Option<V> {
        let node = self.release(id)?;
        if let Some(next) = node.next.and_then(|next| self.node_mut(next)) {
            next.prev = node.prev;
        }
        match node.prev {
            Some(prev) => {
                if let Some(prev) = self.node_mut(prev) {
                    prev.next = node.next;
                }
            }
            None => self.buckets[bucket] = node.next,
        }
        self.len -= 1;
        Some(node.value)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<V>> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn alloc(&mut self, node: Node<V>) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    fn release(&mut self, id: NodeId) -> Option<Node<V>> {
        let slot = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }
}

impl<V: PartialEq, H: HashInt3D> SpatialMap3D<V, H> {
    /// Returns true if any entry holds a value equal to `value`.
    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool {
        self.values().any(|v| v == value)
    }

    /// Removes every entry holding a value equal to `value`.
    ///
    /// # Returns
    ///
    /// The number of entries removed.
    pub fn remove_value(&mut self, value: &V) -> usize {
        self.retain(|_, v| v != value)
    }
}

impl<V, H: HashInt3D> Extend<(IVec3, V)> for SpatialMap3D<V, H> {
    fn extend<I: IntoIterator<Item = (IVec3, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put_at(key, value);
        }
    }
}

impl<'a, V, H: HashInt3D> IntoIterator for &'a SpatialMap3D<V, H> {
    type Item = (IVec3, &'a V);
    type IntoIter = Iter<'a, V, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug, H: HashInt3D> fmt::Debug for SpatialMap3D<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// ============================================================================
// ITERATORS
// ============================================================================

/// Iterator over `(key, &value)` pairs. See [`SpatialMap3D::iter`].
pub struct Iter<'a, V, H> {
    map: &'a SpatialMap3D<V, H>,
    /// Next bucket to inspect once the current chain runs out.
    bucket: usize,
    /// Next node in the current chain.
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a, V, H: HashInt3D> Iterator for Iter<'a, V, H> {
    type Item = (IVec3, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next.is_none() && self.bucket < self.map.bucket_count() {
            self.next = self.map.bucket_head(self.bucket);
            self.bucket += 1;
        }
        let node = self.map.node(self.next?)?;
        self.next = node.next;
        self.remaining -= 1;
        Some((node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V, H: HashInt3D> ExactSizeIterator for Iter<'_, V, H> {}

impl<V, H: HashInt3D> FusedIterator for Iter<'_, V, H> {}

/// Iterator over keys. See [`SpatialMap3D::keys`].
pub struct Keys<'a, V, H> {
    inner: Iter<'a, V, H>,
}

impl<V, H: HashInt3D> Iterator for Keys<'_, V, H> {
    type Item = IVec3;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Iterator over values. See [`SpatialMap3D::values`].
pub struct Values<'a, V, H> {
    inner: Iter<'a, V, H>,
}

impl<'a, V, H: HashInt3D> Iterator for Values<'a, V, H> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_replace_and_collide() {
        let mut map = SpatialMap3D::new(4);

        assert_eq!(map.put(1, 2, 3, "A"), None);
        assert_eq!(map.put(1, 2, 3, "B"), Some("A"));
        assert_eq!(map.len(), 1);

        assert_eq!(map.put(5, 2, 3, "C"), None);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(1, 2, 3), Some(&"B"));
        assert_eq!(map.get(5, 2, 3), Some(&"C"));
        assert!(map.contains_key(1, 2, 3));
        assert!(map.contains_key(5, 2, 3));
        assert!(!map.contains_key(9, 2, 3));
    }

    #[test]
    fn test_remove_patches_chain() {
        // Single bucket: every key lands in one chain.
        let mut map = SpatialMap3D::new(1);
        for i in 0..5 {
            map.put(i, 0, 0, i);
        }

        // Middle, head, tail.
        assert_eq!(map.remove(2, 0, 0), Some(2));
        assert_eq!(map.remove(0, 0, 0), Some(0));
        assert_eq!(map.remove(4, 0, 0), Some(4));

        let keys: Vec<i32> = map.keys().map(|k| k.x).collect();
        assert_eq!(keys, vec![1, 3]);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_remove_missing_key() {
        let mut map = SpatialMap3D::new(8);
        map.put(0, 0, 0, 1u8);
        assert_eq!(map.remove(9, 9, 9), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_chain_keeps_insertion_order() {
        let mut map = SpatialMap3D::with_hasher(3, |_: i32, _: i32, _: i32| 7);
        map.put(3, 0, 0, 'c');
        map.put(1, 0, 0, 'a');
        map.put(2, 0, 0, 'b');

        let values: String = map.values().collect();
        assert_eq!(values, "cab");
    }

    #[test]
    fn test_negative_hash_index_in_range() {
        let pow2: SpatialMap3D<u8, _> = SpatialMap3D::with_hasher(16, |_: i32, _: i32, _: i32| -1);
        assert_eq!(pow2.bucket_index(0, 0, 0), 15);

        let odd: SpatialMap3D<u8, _> = SpatialMap3D::with_hasher(10, |_: i32, _: i32, _: i32| -23);
        assert_eq!(odd.bucket_index(0, 0, 0), 3);

        let min: SpatialMap3D<u8, _> = SpatialMap3D::with_hasher(7, |_: i32, _: i32, _: i32| i32::MIN);
        assert!(min.bucket_index(0, 0, 0) < 7);
    }

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let mut map = SpatialMap3D::new(4);
        map.put(0, 0, 0, 10);
        let stale = map.locate(IVec3::ZERO).found.unwrap();

        map.remove(0, 0, 0);
        map.put(1, 1, 1, 20);
        let fresh = map.locate(IVec3::new(1, 1, 1)).found.unwrap();

        assert_eq!(stale.index, fresh.index);
        assert_ne!(stale.generation, fresh.generation);
        assert!(map.node(stale).is_none());
    }

    #[test]
    fn test_clear_resets_len() {
        let mut map = SpatialMap3D::new(4);
        map.put(1, 1, 1, ());
        map.put(2, 2, 2, ());
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.get(1, 1, 1), None);
        assert_eq!(map.iter().count(), 0);
    }

    #[test]
    fn test_try_put_rejects_absent_value() {
        let mut map = SpatialMap3D::new(4);
        map.put(0, 0, 0, 1);
        let before = map.mod_count();

        let err = map.try_put(0, 0, 0, None).unwrap_err();
        assert!(matches!(err, CollectionError::InvalidArgument(_)));
        assert_eq!(map.get(0, 0, 0), Some(&1));
        assert_eq!(map.mod_count(), before);

        assert_eq!(map.try_put(0, 0, 0, Some(2)), Ok(Some(1)));
    }

    #[test]
    fn test_retain_and_remove_value() {
        let mut map = SpatialMap3D::new(5);
        for i in 0..10 {
            map.put(i, -i, i * 2, i % 3);
        }
        assert!(map.contains_value(&2));
        assert_eq!(map.remove_value(&2), 3);
        assert!(!map.contains_value(&2));

        let removed = map.retain(|key, _| key.x < 5);
        assert_eq!(removed, 3);
        assert_eq!(map.len(), 4);
        assert!(map.keys().all(|k| k.x < 5));
    }

    #[test]
    fn test_values_mut_and_get_mut() {
        let mut map = SpatialMap3D::new(2);
        map.put(0, 0, 0, 1);
        map.put(0, 0, 1, 2);
        for v in map.values_mut() {
            *v *= 10;
        }
        *map.get_mut(0, 0, 1).unwrap() += 1;
        assert_eq!(map.get(0, 0, 0), Some(&10));
        assert_eq!(map.get(0, 0, 1), Some(&21));
    }

    #[test]
    fn test_extend_and_debug() {
        let mut map = SpatialMap3D::new(1);
        map.extend([(IVec3::new(1, 2, 3), 4)]);
        assert_eq!(map.get_at(IVec3::new(1, 2, 3)), Some(&4));
        assert!(format!("{map:?}").contains('4'));
    }

    #[test]
    fn test_align16_constructor() {
        let mut map = SpatialMap3D::new_align16();
        assert_eq!(map.bucket_count(), ALIGN16_BUCKET_COUNT);
        map.put(1, 2, 3, "a");
        map.put(17, 18, 19, "b");
        assert_eq!(map.bucket_index(1, 2, 3), map.bucket_index(17, 18, 19));
        assert_eq!(map.get(17, 18, 19), Some(&"b"));
    }

    #[test]
    #[should_panic(expected = "Bucket count must be greater than zero")]
    fn test_zero_buckets_panics() {
        let _ = SpatialMap3D::<u8>::new(0);
    }
}
