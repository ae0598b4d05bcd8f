//! Insertion-ordered, name-keyed child list shared by the file and folder collections.

use indexmap::IndexMap;

#[derive(Debug, Clone)]
pub struct NamedChildren<K> {
    entries: IndexMap<String, K>,
}

impl<K> Default for NamedChildren<K> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }
}

impl<K: Copy> NamedChildren<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<K> {
        self.entries.get(name).copied()
    }

    /// Appends `id` under `name`. Returns `false` and leaves the collection untouched when the
    /// name is already taken.
    pub fn insert(&mut self, name: impl Into<String>, id: K) -> bool {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return false;
        }
        self.entries.insert(name, id);
        true
    }

    /// Removes `name`, keeping the relative order of the remaining children.
    pub fn remove(&mut self, name: &str) -> Option<K> {
        self.entries.shift_remove(name)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, K)> + '_ {
        self.entries.iter().map(|(name, &id)| (name.as_str(), id))
    }

    pub fn ids(&self) -> impl DoubleEndedIterator<Item = K> + '_ {
        self.entries.values().copied()
    }

    pub fn names(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn into_ids(self) -> impl Iterator<Item = K> {
        self.entries.into_values()
    }
}
