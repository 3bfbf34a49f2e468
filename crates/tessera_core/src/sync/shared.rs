//! Shared spatial map behind a reader/writer lock.
//!
//! Many readers (render, physics queries) or one writer (world streaming).
//! Clones share the same map.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::spatial::{DefaultHash, HashInt3D, SpatialMap3D};

/// A [`SpatialMap3D`] shared between threads.
pub struct SharedSpatialMap<V, H = DefaultHash> {
    inner: Arc<RwLock<SpatialMap3D<V, H>>>,
}

impl<V, H> Clone for SharedSpatialMap<V, H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, H: HashInt3D> SharedSpatialMap<V, H> {
    /// Wraps `map` for shared access.
    #[must_use]
    pub fn new(map: SpatialMap3D<V, H>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Acquires shared read access, blocking while a writer holds the lock.
    pub fn read(&self) -> RwLockReadGuard<'_, SpatialMap3D<V, H>> {
        self.inner.read()
    }

    /// Acquires exclusive write access.
    pub fn write(&self) -> RwLockWriteGuard<'_, SpatialMap3D<V, H>> {
        self.inner.write()
    }

    /// Runs `f` on the value at `(x, y, z)` under the read lock.
    pub fn with_value<F, R>(&self, x: i32, y: i32, z: i32, f: F) -> Option<R>
    where
        F: FnOnce(&V) -> R,
    {
        self.inner.read().get(x, y, z).map(f)
    }

    /// Inserts or replaces a value under the write lock.
    pub fn put(&self, x: i32, y: i32, z: i32, value: V) -> Option<V> {
        self.inner.write().put(x, y, z, value)
    }

    /// Removes a value under the write lock.
    pub fn remove(&self, x: i32, y: i32, z: i32) -> Option<V> {
        self.inner.write().remove(x, y, z)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns true if another handle shares this map.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.inner) > 1
    }
}

impl<V: Clone, H: HashInt3D> SharedSpatialMap<V, H> {
    /// Returns a copy of the value at `(x, y, z)`.
    #[must_use]
    pub fn get_cloned(&self, x: i32, y: i32, z: i32) -> Option<V> {
        self.inner.read().get(x, y, z).cloned()
    }
}

impl<V, H: HashInt3D> From<SpatialMap3D<V, H>> for SharedSpatialMap<V, H> {
    fn from(map: SpatialMap3D<V, H>) -> Self {
        Self::new(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_writers_on_many_threads() {
        let shared: SharedSpatialMap<i32> = SpatialMap3D::new(64).into();

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let map = shared.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        map.put(t, i, 0, t * 1000 + i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.len(), 400);
        assert_eq!(shared.get_cloned(3, 99, 0), Some(3099));
        assert!(!shared.is_shared());
    }

    #[test]
    fn test_guards() {
        let map: SpatialMap3D<String> = SpatialMap3D::default();
        let shared = SharedSpatialMap::new(map);
        shared.write().put(1, 2, 3, "chunk".to_string());

        assert_eq!(shared.with_value(1, 2, 3, String::len), Some(5));
        assert_eq!(shared.read().keys().count(), 1);

        let reader = shared.clone();
        assert!(shared.is_shared());
        assert_eq!(reader.remove(1, 2, 3).as_deref(), Some("chunk"));
        assert!(shared.is_empty());
    }
}
