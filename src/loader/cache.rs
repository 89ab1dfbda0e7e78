use rustc_hash::FxHashMap;

use crate::sequence::FrameId;

/// Loaded frames keyed by identifier.
///
/// Grows for the lifetime of the controller; entries are never replaced or
/// evicted, so the first successful load of a frame is the one every later
/// reader sees.
#[derive(Debug, Clone)]
pub struct FrameCache<H> {
    entries: FxHashMap<FrameId, H>,
}

impl<H> Default for FrameCache<H> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<H> FrameCache<H> {
    /// Store `handle` unless `id` is already cached. Returns whether the
    /// entry was added.
    pub fn insert(&mut self, id: FrameId, handle: H) -> bool {
        if self.entries.contains_key(&id) {
            return false;
        }
        let _ = self.entries.insert(id, handle);
        true
    }

    /// Cached handle for `id`.
    #[must_use]
    pub fn get(&self, id: &FrameId) -> Option<&H> {
        self.entries.get(id)
    }

    /// Whether `id` has been loaded.
    #[must_use]
    pub fn contains(&self, id: &FrameId) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of cached frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_wins() {
        let mut cache = FrameCache::default();
        let id = FrameId::new("f/0000.png");
        assert!(cache.insert(id.clone(), 1));
        assert!(!cache.insert(id.clone(), 2));
        assert_eq!(cache.get(&id), Some(&1));
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&id));
        assert!(!cache.contains(&FrameId::new("f/0001.png")));
    }
}
