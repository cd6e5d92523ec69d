//! Per-scene index of live components by update tag
//!
//! Lifecycle operations are the only writers. Passes iterate a snapshot of a
//! tag's entries, so hooks that schedule work never invalidate the iteration.
//! The render slice additionally caches each entry's render order and is
//! re-sorted lazily, only after an order changed or an entry was added.

use crate::ecs::component::{ComponentKey, UpdateTag};
use crate::ecs::object::ObjectId;

#[derive(Debug, Clone, Copy)]
struct IndexEntry {
    key: ComponentKey,
    order: i32,
}

/// Live components of one scene, grouped by [`UpdateTag`]
#[derive(Debug, Default)]
pub struct ComponentIndex {
    buckets: [Vec<IndexEntry>; 5],
    render_dirty: bool,
}

impl ComponentIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component under `tag`; duplicates are ignored
    ///
    /// Returns whether the entry was new.
    pub fn insert(&mut self, tag: UpdateTag, key: ComponentKey, order: i32) -> bool {
        let bucket = &mut self.buckets[tag.index()];
        if bucket.iter().any(|entry| entry.key == key) {
            return false;
        }
        bucket.push(IndexEntry { key, order });
        if tag == UpdateTag::Render {
            self.render_dirty = true;
        }
        true
    }

    /// Remove a component from `tag`; returns whether it was present
    pub fn remove(&mut self, tag: UpdateTag, key: ComponentKey) -> bool {
        let bucket = &mut self.buckets[tag.index()];
        let before = bucket.len();
        bucket.retain(|entry| entry.key != key);
        before != bucket.len()
    }

    /// Remove every entry owned by `object`; returns how many were removed
    pub fn remove_object(&mut self, object: ObjectId) -> usize {
        self.buckets
            .iter_mut()
            .map(|bucket| {
                let before = bucket.len();
                bucket.retain(|entry| entry.key.object != object);
                before - bucket.len()
            })
            .sum()
    }

    /// Whether `key` is indexed under `tag`
    pub fn contains(&self, tag: UpdateTag, key: ComponentKey) -> bool {
        self.buckets[tag.index()].iter().any(|entry| entry.key == key)
    }

    /// Whether `key` is indexed under any tag
    pub fn contains_any(&self, key: ComponentKey) -> bool {
        UpdateTag::ALL.iter().any(|&tag| self.contains(tag, key))
    }

    /// Keys under `tag` in iteration order
    pub fn keys(&self, tag: UpdateTag) -> impl Iterator<Item = ComponentKey> + '_ {
        self.buckets[tag.index()].iter().map(|entry| entry.key)
    }

    /// Copy of the keys under `tag`, safe to iterate while the scene mutates
    pub fn snapshot(&self, tag: UpdateTag) -> Vec<ComponentKey> {
        self.keys(tag).collect()
    }

    /// Number of entries under `tag`
    pub fn len(&self, tag: UpdateTag) -> usize {
        self.buckets[tag.index()].len()
    }

    /// Total number of entries
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Whether the index holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Record the current render order of a render entry
    ///
    /// Marks the render slice dirty when the value differs from the cached
    /// one. Returns whether it did.
    pub fn update_render_order(&mut self, key: ComponentKey, order: i32) -> bool {
        let entry = self.buckets[UpdateTag::Render.index()]
            .iter_mut()
            .find(|entry| entry.key == key);
        match entry {
            Some(entry) if entry.order != order => {
                entry.order = order;
                self.render_dirty = true;
                true
            }
            _ => false,
        }
    }

    /// Whether the render slice awaits a re-sort
    pub fn is_render_dirty(&self) -> bool {
        self.render_dirty
    }

    /// Stable-sort the render slice by ascending order if it is dirty
    ///
    /// Returns whether a sort happened.
    pub fn sort_render_if_dirty(&mut self) -> bool {
        if !self.render_dirty {
            return false;
        }
        self.buckets[UpdateTag::Render.index()].sort_by_key(|entry| entry.order);
        self.render_dirty = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    struct A;
    struct B;

    fn ids(count: usize) -> Vec<ObjectId> {
        let mut map: SlotMap<ObjectId, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_insert_is_idempotent() {
        let object = ids(1)[0];
        let mut index = ComponentIndex::new();
        assert!(index.insert(UpdateTag::Physics, ComponentKey::of::<A>(object), 0));
        assert!(!index.insert(UpdateTag::Physics, ComponentKey::of::<A>(object), 0));
        assert_eq!(index.len(UpdateTag::Physics), 1);
        assert!(index.contains(UpdateTag::Physics, ComponentKey::of::<A>(object)));
        assert!(!index.contains(UpdateTag::Collision, ComponentKey::of::<A>(object)));
    }

    #[test]
    fn test_remove_object_clears_all_tags() {
        let objects = ids(2);
        let mut index = ComponentIndex::new();
        index.insert(UpdateTag::Physics, ComponentKey::of::<A>(objects[0]), 0);
        index.insert(UpdateTag::Behavior, ComponentKey::of::<B>(objects[0]), 0);
        index.insert(UpdateTag::Physics, ComponentKey::of::<A>(objects[1]), 0);

        assert_eq!(index.remove_object(objects[0]), 2);
        assert_eq!(index.total(), 1);
        assert!(!index.contains_any(ComponentKey::of::<B>(objects[0])));
        assert!(index.remove(UpdateTag::Physics, ComponentKey::of::<A>(objects[1])));
        assert!(index.is_empty());
    }

    #[test]
    fn test_render_sort_is_lazy_and_stable() {
        let objects = ids(3);
        let mut index = ComponentIndex::new();
        for (i, object) in objects.iter().enumerate() {
            index.insert(UpdateTag::Render, ComponentKey::of::<A>(*object), 1 - i32::try_from(i % 2).unwrap());
        }
        assert!(index.sort_render_if_dirty());
        assert!(!index.sort_render_if_dirty());
        let order: Vec<_> = index.keys(UpdateTag::Render).map(|key| key.object).collect();
        assert_eq!(order, vec![objects[1], objects[0], objects[2]]);

        assert!(!index.update_render_order(ComponentKey::of::<A>(objects[0]), 1));
        assert!(index.update_render_order(ComponentKey::of::<A>(objects[2]), -5));
        assert!(index.is_render_dirty());
        index.sort_render_if_dirty();
        assert_eq!(index.keys(UpdateTag::Render).next().map(|key| key.object), Some(objects[2]));
    }
}
