use anisync_types::ContainerError;
use std::collections::HashMap;

/// Map keyed by `u64` that iterates in ascending key order.
///
/// Keys live in a sorted vector next to a hash map of values. Inserting a new
/// key finds its slot by binary search and shifts the larger keys right; no
/// other operation moves keys relative to each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    keys: Vec<u64>,
    dict: HashMap<u64, V>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            dict: HashMap::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns the previous value, if any.
    pub fn add(&mut self, key: u64, value: V) -> Option<V> {
        let previous = self.dict.insert(key, value);
        if previous.is_none() {
            sorted_insert(&mut self.keys, key);
        }
        previous
    }

    /// Remove `key` from both structures. No-op when absent.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        let value = self.dict.remove(&key)?;
        sorted_remove(&mut self.keys, key);
        Some(value)
    }

    pub fn get(&self, key: u64) -> Result<&V, ContainerError> {
        self.dict.get(&key).ok_or(ContainerError::KeyNotFound { key })
    }

    pub fn contains(&self, key: u64) -> bool {
        self.dict.contains_key(&key)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> &[u64] {
        &self.keys
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &V)> + '_ {
        self.keys.iter().filter_map(|key| self.dict.get(key).map(|value| (*key, value)))
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<V> FromIterator<(u64, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (u64, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.add(key, value);
        }
        map
    }
}

/// Insert `value` into the sorted `keys`, after any equal elements.
///
/// Duplicates are allowed here; `OrderedMap::add` only calls this for keys
/// that are not in the map yet.
fn sorted_insert(keys: &mut Vec<u64>, value: u64) {
    let index = match keys.binary_search(&value) {
        Ok(found) => found + 1,
        Err(slot) => slot,
    };
    keys.insert(index, value);
}

/// Remove one occurrence of `value` from the sorted `keys`, if present.
fn sorted_remove(keys: &mut Vec<u64>, value: u64) {
    if let Ok(index) = keys.binary_search(&value) {
        keys.remove(index);
    }
}
