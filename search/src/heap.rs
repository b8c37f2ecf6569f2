//! Indexed binary min-heap.
//!
//! Items are small `Copy` handles (edges, node ids). Their priorities live
//! outside the heap and are read through a key function passed to every
//! mutating call, so several heaps can hold the same handle and observe the
//! same priority. A priority change is not picked up on its own: the owner
//! must push it again (which re-fixes an item already present) on every heap
//! holding the handle.
//!
//! `Clone` is a structural copy: the slot array and the position index are
//! duplicated, the handles are shared.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct IndexedHeap<K> {
    slots: Vec<K>,
    positions: HashMap<K, usize>,
}

impl<K: Copy + Eq + Hash> IndexedHeap<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            positions: HashMap::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The minimum item.
    #[must_use]
    pub fn top(&self) -> Option<K> {
        self.slots.first().copied()
    }

    /// The item at array position `pos`.
    #[must_use]
    pub fn get(&self, pos: usize) -> Option<K> {
        self.slots.get(pos).copied()
    }

    /// Array position of `item`, if present.
    #[must_use]
    pub fn position(&self, item: &K) -> Option<usize> {
        self.positions.get(item).copied()
    }

    #[must_use]
    pub fn contains(&self, item: &K) -> bool {
        self.positions.contains_key(item)
    }

    /// Items in array order.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.slots.iter()
    }

    /// Heap children (array positions `2p + 1` and `2p + 2`) of position `pos`.
    pub fn children(&self, pos: usize) -> impl Iterator<Item = K> + '_ {
        [2 * pos + 1, 2 * pos + 2]
            .into_iter()
            .filter_map(|child| self.get(child))
    }

    /// Insert `item`. An item already present is re-fixed instead.
    pub fn push<P: Ord>(&mut self, item: K, key: &impl Fn(&K) -> P) {
        if let Some(pos) = self.position(&item) {
            self.fix(pos, key);
            return;
        }
        let pos = self.slots.len();
        self.slots.push(item);
        self.positions.insert(item, pos);
        self.sift_up(pos, key);
    }

    /// Remove and return the minimum item.
    pub fn pop<P: Ord>(&mut self, key: &impl Fn(&K) -> P) -> Option<K> {
        let top = self.top()?;
        self.remove_at(0, key);
        Some(top)
    }

    /// Restore heap order around `pos` after its item's priority changed.
    pub fn fix<P: Ord>(&mut self, pos: usize, key: &impl Fn(&K) -> P) {
        if pos >= self.slots.len() {
            return;
        }
        let pos = self.sift_up(pos, key);
        self.sift_down(pos, key);
    }

    /// Put `new` in the slot held by `old` and re-fix that slot.
    ///
    /// Returns `false` (and leaves the heap untouched) if `old` is absent.
    /// If `new` is already present elsewhere, `old` is simply removed.
    pub fn replace<P: Ord>(&mut self, old: &K, new: K, key: &impl Fn(&K) -> P) -> bool {
        let Some(pos) = self.position(old) else {
            return false;
        };
        if *old != new && self.contains(&new) {
            self.remove_at(pos, key);
            return true;
        }
        self.positions.remove(old);
        self.slots[pos] = new;
        self.positions.insert(new, pos);
        self.fix(pos, key);
        true
    }

    /// Remove `item`. Returns `false` if absent.
    pub fn remove<P: Ord>(&mut self, item: &K, key: &impl Fn(&K) -> P) -> bool {
        match self.position(item) {
            Some(pos) => {
                self.remove_at(pos, key);
                true
            }
            None => false,
        }
    }

    fn remove_at<P: Ord>(&mut self, pos: usize, key: &impl Fn(&K) -> P) {
        let last = self.slots.len() - 1;
        self.swap(pos, last);
        if let Some(removed) = self.slots.pop() {
            self.positions.remove(&removed);
        }
        self.fix(pos, key);
    }

    fn sift_up<P: Ord>(&mut self, mut pos: usize, key: &impl Fn(&K) -> P) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if key(&self.slots[pos]) < key(&self.slots[parent]) {
                self.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
        pos
    }

    fn sift_down<P: Ord>(&mut self, mut pos: usize, key: &impl Fn(&K) -> P) {
        let len = self.slots.len();
        loop {
            let left = 2 * pos + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let smaller = if right < len && key(&self.slots[right]) < key(&self.slots[left]) {
                right
            } else {
                left
            };
            if key(&self.slots[smaller]) < key(&self.slots[pos]) {
                self.swap(pos, smaller);
                pos = smaller;
            } else {
                break;
            }
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.slots.swap(a, b);
        self.positions.insert(self.slots[a], a);
        self.positions.insert(self.slots[b], b);
    }
}

impl<K: Copy + Eq + Hash> Default for IndexedHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}
