/// The ordered, indexable key/value backing structure every collection wraps.
///
/// Entries keep their insertion order: setting a new key appends it at the
/// end, setting an existing key replaces its value in place without
/// reordering. Keys are unique. The store itself never fails — absence is an
/// `Option`, and preconditions such as non-emptiness are enforced by the
/// collection that owns the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Store<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Store<K, V>
where
    K: PartialEq + Clone,
{
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a store from an ordered set of entries.
    ///
    /// Later duplicates of a key replace the earlier value in place, same
    /// as repeated [`set`](Store::set) calls.
    pub fn from_entries(entries: Vec<(K, V)>) -> Self {
        let mut store = Self::new();
        for (key, value) in entries {
            store.set(key, value);
        }
        store
    }

    /// Inserts or replaces a value.
    ///
    /// A new key is appended at the end of the iteration order; an existing
    /// key keeps its position and gets the new value.
    pub fn set(&mut self, key: K, value: V) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value for a key, or `None` if the key is absent.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value for a key.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Checks if a key exists in the store.
    pub fn exists(&self, key: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Removes the entry for a key and returns its value.
    ///
    /// Remaining entries keep their relative order; no key is renumbered.
    pub fn unset(&mut self, key: &K) -> Option<V> {
        let position = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(position).1)
    }

    /// Returns the number of entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns the value of the first entry in iteration order.
    pub fn first(&self) -> Option<&V> {
        self.entries.first().map(|(_, v)| v)
    }

    /// Returns the value of the last entry in iteration order.
    pub fn last(&self) -> Option<&V> {
        self.entries.last().map(|(_, v)| v)
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates mutably over the entries in insertion order.
    ///
    /// Keys stay immutable; only values can be changed.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }

    /// Atomically swaps the entire entry set.
    ///
    /// Used by `clear` and by the repopulation pass after a positional
    /// removal.
    pub fn replace_all(&mut self, entries: Vec<(K, V)>) {
        self.entries = entries;
    }
}

impl<K, V> Default for Store<K, V>
where
    K: PartialEq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
