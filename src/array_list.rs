use crate::collection::{
    Collection, EMPTY_RAND, EMPTY_REMOVE, EMPTY_REVERSE, NON_EXISTENT_UPDATE, missing_index,
};
use crate::error::{CollectionError, Result};
use crate::store::Store;
use crate::value::Value;
use rand::Rng;
use std::cmp::Ordering;

/// An ordered list of values of any type, positionally indexed from 0.
///
/// Mutating operations work in place; transforming operations (`filter`,
/// `map`, `sort`, `reverse`, `slice`, `diff`, `merge`) never touch the
/// receiver and return a new list instead. Operations that can come up
/// empty-handed return `Option` — `None` means "no applicable result",
/// which is distinct from a valid empty list.
///
/// # Examples
///
/// ```
/// use typed_collections::{ArrayList, Collection, Value};
///
/// let mut list = ArrayList::new();
/// list.add(Value::new("Max".to_string()));
/// list.add(Value::new(5i64));
///
/// assert_eq!(list.count(), 2);
/// assert_eq!(list.get(1).unwrap(), &Value::new(5i64));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayList {
    store: Store<usize, Value>,
}

impl ArrayList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            store: Store::new(),
        }
    }

    /// Creates a list from an ordered set of values.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self {
            store: Store::from_entries(values.into_iter().enumerate().collect()),
        }
    }

    /// Appends a value at the end of the list.
    pub fn add(&mut self, value: Value) {
        let next = self.store.count();
        self.store.set(next, value);
    }

    /// Gets the element at the given index.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::OutOfRange` if the index does not exist.
    pub fn get(&self, index: usize) -> Result<&Value> {
        self.store
            .get(&index)
            .ok_or_else(|| CollectionError::OutOfRange(missing_index(index)))
    }

    /// Removes the element at the given index and repopulates the list so
    /// the remaining elements sit at contiguous indices again.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::OutOfRange` if the list is empty or the
    /// index does not exist.
    pub fn remove(&mut self, index: usize) -> Result<()> {
        if self.is_empty() {
            return Err(CollectionError::OutOfRange(EMPTY_REMOVE.to_string()));
        }

        if !self.store.exists(&index) {
            return Err(CollectionError::OutOfRange(missing_index(index)));
        }

        self.store.unset(&index);
        self.repopulate();

        Ok(())
    }

    /// Reassigns all elements to contiguous indices, preserving their
    /// relative order.
    fn repopulate(&mut self) {
        let entries = self
            .store
            .iter()
            .map(|(_, value)| value.clone())
            .enumerate()
            .collect();
        self.store.replace_all(entries);
    }

    /// Replaces the value at the given index.
    ///
    /// Returns whether the stored value now equals the given one, which is
    /// always true on success.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidOperation` if the index does not
    /// exist.
    pub fn update(&mut self, index: usize, value: Value) -> Result<bool> {
        if !self.store.exists(&index) {
            return Err(CollectionError::InvalidOperation(
                NON_EXISTENT_UPDATE.to_string(),
            ));
        }

        self.store.set(index, value.clone());

        Ok(self.store.get(&index) == Some(&value))
    }

    /// Returns a new list with the elements matching the predicate,
    /// re-indexed from 0, or `None` when nothing matches.
    pub fn filter<F>(&self, predicate: F) -> Option<Self>
    where
        F: Fn(&Value) -> bool,
    {
        let matched: Vec<Value> = self
            .store
            .iter()
            .filter(|&(_, value)| predicate(value))
            .map(|(_, value)| value.clone())
            .collect();

        if matched.is_empty() {
            None
        } else {
            Some(Self::from_values(matched))
        }
    }

    /// Returns a new list with every element transformed, or `None` when
    /// the list is empty.
    pub fn map<F>(&self, transform: F) -> Option<Self>
    where
        F: Fn(&Value) -> Value,
    {
        if self.is_empty() {
            return None;
        }

        Some(Self::from_values(
            self.store.iter().map(|(_, value)| transform(value)).collect(),
        ))
    }

    /// Searches for elements matching the predicate, optionally stopping
    /// after the first match. `None` when nothing matches.
    pub fn find<F>(&self, predicate: F, stop_at_first: bool) -> Option<Self>
    where
        F: Fn(&Value) -> bool,
    {
        let mut matched = Vec::new();

        for (_, value) in self.store.iter() {
            if predicate(value) {
                matched.push(value.clone());

                if stop_at_first {
                    break;
                }
            }
        }

        if matched.is_empty() {
            None
        } else {
            Some(Self::from_values(matched))
        }
    }

    /// Applies a callback to every element in place.
    pub fn for_each<F>(&mut self, mut callback: F)
    where
        F: FnMut(&mut Value),
    {
        for (_, value) in self.store.iter_mut() {
            callback(value);
        }
    }

    /// Returns a new list with the order reversed.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidOperation` when the list is empty.
    pub fn reverse(&self) -> Result<Self> {
        if self.is_empty() {
            return Err(CollectionError::InvalidOperation(EMPTY_REVERSE.to_string()));
        }

        let mut values = self.values();
        values.reverse();

        Ok(Self::from_values(values))
    }

    /// Returns a new list ordered by the comparator.
    ///
    /// The contract allows an absent result for a failed sort; a Rust
    /// comparator cannot fail, so in practice this is always `Some`.
    pub fn sort<F>(&self, comparator: F) -> Option<Self>
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let mut values = self.values();
        values.sort_by(comparator);

        Some(Self::from_values(values))
    }

    /// Returns a portion of the list, or `None` when the portion is empty.
    ///
    /// A negative offset counts from the end; an omitted length means "to
    /// the end".
    pub fn slice(&self, offset: isize, length: Option<usize>) -> Option<Self> {
        let values = slice_values(&self.values(), offset, length);

        if values.is_empty() {
            None
        } else {
            Some(Self::from_values(values))
        }
    }

    /// Returns the elements present in this list but absent from the other,
    /// by structural, type-aware equality.
    pub fn diff(&self, other: &Self) -> Self {
        Self::from_values(
            self.store
                .iter()
                .filter(|&(_, value)| !other.contains(value))
                .map(|(_, value)| value.clone())
                .collect(),
        )
    }

    /// Checks if both lists hold the same elements in the same order.
    pub fn equals(&self, other: &Self) -> bool {
        self.values() == other.values()
    }

    /// Concatenates this list and the other into a new one.
    pub fn merge(&self, other: &Self) -> Self {
        let mut values = self.values();
        values.extend(other.values());

        Self::from_values(values)
    }

    /// Returns one uniformly chosen element.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidOperation` when the list is empty.
    pub fn rand(&self) -> Result<&Value> {
        if self.is_empty() {
            return Err(CollectionError::InvalidOperation(EMPTY_RAND.to_string()));
        }

        let index = rand::thread_rng().gen_range(0..self.count());
        self.get(index)
    }

    /// Returns a snapshot of the current contents.
    pub fn to_array(&self) -> Vec<Value> {
        self.values()
    }
}

impl Collection for ArrayList {
    type Key = usize;
    type Stored = Value;
    type Entry = Value;

    fn store(&self) -> &Store<usize, Value> {
        &self.store
    }

    fn store_mut(&mut self) -> &mut Store<usize, Value> {
        &mut self.store
    }

    fn unwrap_value(stored: &Value) -> &Value {
        stored
    }

    fn add_entry(&mut self, entry: Value) -> Result<()> {
        self.add(entry);
        Ok(())
    }
}

/// Positional slice shared by every collection: a negative offset counts
/// from the end, an omitted length runs to the end, and out-of-bounds
/// ranges clamp instead of failing.
pub(crate) fn slice_values<T: Clone>(values: &[T], offset: isize, length: Option<usize>) -> Vec<T> {
    let len = values.len();

    let start = if offset < 0 {
        len.saturating_sub(offset.unsigned_abs())
    } else {
        (offset as usize).min(len)
    };

    let end = match length {
        Some(length) => start.saturating_add(length).min(len),
        None => len,
    };

    values[start..end].to_vec()
}
