use std::collections::HashMap;
use std::hash::Hash;

/// Append-only registry assigning a stable id to each distinct value.
///
/// Ids are sequential by default; callers may supply an explicit id instead,
/// which may collide with or skip over sequential ones. Once a value has an
/// id it keeps it for the lifetime of the table.
#[derive(Debug, Clone)]
pub struct InternTable<K> {
    ids: HashMap<K, u32>,
    entries: Vec<(K, u32)>,
}

impl<K: Hash + Eq + Clone> InternTable<K> {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Return the id of `key`, registering it first if unseen.
    pub fn get_or_assign(&mut self, key: K, explicit_id: Option<u32>) -> u32 {
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }

        let id = explicit_id.unwrap_or(self.entries.len() as u32);
        self.ids.insert(key.clone(), id);
        self.entries.push((key, id));
        id
    }

    pub fn get(&self, key: &K) -> Option<u32> {
        self.ids.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Values sorted by id, ties kept in insertion order.
    pub fn ordered_values(&self) -> Vec<&K> {
        let mut sorted: Vec<&(K, u32)> = self.entries.iter().collect();
        sorted.sort_by_key(|(_, id)| *id);
        sorted.into_iter().map(|(k, _)| k).collect()
    }

    /// Values paired with their ids, sorted like [`ordered_values`](Self::ordered_values).
    pub fn ordered_entries(&self) -> Vec<(&K, u32)> {
        let mut sorted: Vec<(&K, u32)> = self.entries.iter().map(|(k, id)| (k, *id)).collect();
        sorted.sort_by_key(|(_, id)| *id);
        sorted
    }
}

impl<K: Hash + Eq + Clone> Default for InternTable<K> {
    fn default() -> Self {
        Self::new()
    }
}
