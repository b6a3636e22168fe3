use anisync_types::ContainerError;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Node<V> {
    key: u64,
    value: V,
    /// Neighbour towards `rear` (written earlier)
    prev: Option<usize>,
    /// Neighbour towards `front` (written later)
    next: Option<usize>,
}

/// Map keyed by `u64` that iterates in write-recency order.
///
/// Entries form a doubly-linked list stored in a slot arena. `front` is the
/// most recently written entry and `rear` the least recently written one.
///
/// Only [`LruMap::add`] moves an entry to `front`. [`LruMap::get`] is a plain
/// lookup and never reorders; merge ordering depends on that.
#[derive(Debug, Clone)]
pub struct LruMap<V> {
    slots: Vec<Option<Node<V>>>,
    free: Vec<usize>,
    index: HashMap<u64, usize>,
    front: Option<usize>,
    rear: Option<usize>,
}

impl<V> Default for LruMap<V> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            front: None,
            rear: None,
        }
    }
}

impl<V> LruMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key` and make it the most recently used entry,
    /// whether or not the value changed.
    pub fn add(&mut self, key: u64, value: V) {
        if let Some(&slot) = self.index.get(&key) {
            self.unlink(slot);
            if let Some(node) = self.node_mut(slot) {
                node.value = value;
            }
            self.link_front(slot);
            return;
        }

        let node = Node {
            key,
            value,
            prev: None,
            next: None,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                if let Some(entry) = self.slots.get_mut(slot) {
                    *entry = Some(node);
                }
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.index.insert(key, slot);
        self.link_front(slot);
    }

    /// Look up `key` without touching its recency.
    pub fn get(&self, key: u64) -> Result<&V, ContainerError> {
        self.index
            .get(&key)
            .and_then(|&slot| self.node(slot))
            .map(|node| &node.value)
            .ok_or(ContainerError::KeyNotFound { key })
    }

    pub fn contains(&self, key: u64) -> bool {
        self.index.contains_key(&key)
    }

    /// Remove `key`. No-op when absent.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        let slot = self.index.remove(&key)?;
        self.unlink(slot);
        let node = self.slots.get_mut(slot).and_then(Option::take)?;
        self.free.push(slot);
        Some(node.value)
    }

    /// Remove and return the least recently used entry.
    pub fn pop_oldest(&mut self) -> Option<(u64, V)> {
        let key = self.rear.and_then(|slot| self.node(slot)).map(|node| node.key)?;
        self.remove(key).map(|value| (key, value))
    }

    /// Keys from least- to most-recently used.
    pub fn keys(&self) -> Vec<u64> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Entries from least- to most-recently used.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { map: self, cursor: self.rear }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn node(&self, slot: usize) -> Option<&Node<V>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, slot: usize) -> Option<&mut Node<V>> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    /// Detach `slot` from the recency list, patching its neighbours and the
    /// endpoints. The node itself keeps stale links until relinked.
    fn unlink(&mut self, slot: usize) {
        let Some((prev, next)) = self.node(slot).map(|node| (node.prev, node.next)) else {
            return;
        };

        match prev {
            Some(prev) => {
                if let Some(node) = self.node_mut(prev) {
                    node.next = next;
                }
            }
            None => self.rear = next,
        }

        match next {
            Some(next) => {
                if let Some(node) = self.node_mut(next) {
                    node.prev = prev;
                }
            }
            None => self.front = prev,
        }
    }

    fn link_front(&mut self, slot: usize) {
        let old_front = self.front;
        if let Some(node) = self.node_mut(slot) {
            node.prev = old_front;
            node.next = None;
        }

        match old_front {
            Some(front) => {
                if let Some(node) = self.node_mut(front) {
                    node.next = Some(slot);
                }
            }
            // only node in the list
            None => self.rear = Some(slot),
        }

        self.front = Some(slot);
    }
}

/// Borrowing iterator from least- to most-recently used.
pub struct Iter<'a, V> {
    map: &'a LruMap<V>,
    cursor: Option<usize>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (u64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.map.node(self.cursor?)?;
        self.cursor = node.next;
        Some((node.key, &node.value))
    }
}

/// Owning iterator from least- to most-recently used.
pub struct IntoIter<V>(LruMap<V>);

impl<V> Iterator for IntoIter<V> {
    type Item = (u64, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_oldest()
    }
}

impl<V> IntoIterator for LruMap<V> {
    type Item = (u64, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, V> IntoIterator for &'a LruMap<V> {
    type Item = (u64, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
