use crate::error::{CollectionError, Result};
use crate::store::Store;
use crate::value::Value;

pub(crate) const EMPTY_READ: &str = "You're trying to get data from an empty collection";
pub(crate) const EMPTY_REMOVE: &str = "You're trying to remove data from an empty collection";
pub(crate) const EMPTY_REVERSE: &str = "You cannot reverse an empty collection";
pub(crate) const EMPTY_RAND: &str = "You cannot get a random element from an empty collection";
pub(crate) const NON_EXISTENT_UPDATE: &str = "You cannot update a non-existent value";
pub(crate) const NON_NUMERIC_SUM: &str = "You cannot sum non-numeric values";

pub(crate) fn missing_index(index: usize) -> String {
    format!("The {} index does not exist for this collection", index)
}

/// The base contract shared by every collection in the crate.
///
/// Implementors provide access to their backing [`Store`], a projection from
/// the stored representation to the logical [`Value`] (the dictionary
/// unwraps its pairs here), and a single-entry insert for [`fill`]. The
/// rest of the contract — counting, emptiness, positional reads, structural
/// containment, summing and the JSON projection — is defined once on top of
/// those hooks.
pub trait Collection {
    /// The store key: positional `usize` for list-like collections, an
    /// arbitrary scalar [`Value`] for the dictionary.
    type Key: PartialEq + Clone;

    /// What the store physically holds per entry.
    type Stored;

    /// What one `fill` entry looks like: a value for list-like collections,
    /// a key/value tuple for the dictionary.
    type Entry;

    fn store(&self) -> &Store<Self::Key, Self::Stored>;

    fn store_mut(&mut self) -> &mut Store<Self::Key, Self::Stored>;

    /// Projects a stored entry to its logical value.
    fn unwrap_value(stored: &Self::Stored) -> &Value;

    /// Adds one entry through the collection's own `add`, inheriting its
    /// type checking and failure semantics.
    fn add_entry(&mut self, entry: Self::Entry) -> Result<()>;

    /// Returns the length of the collection.
    fn count(&self) -> usize {
        self.store().count()
    }

    /// Checks if the collection is empty.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Checks if the given key or index exists in the collection.
    fn exists(&self, key: &Self::Key) -> bool {
        self.store().exists(key)
    }

    /// Drops all entries by swapping in an empty store.
    fn clear(&mut self) {
        self.store_mut().replace_all(Vec::new());
    }

    /// Gets the first element in iteration order.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::OutOfRange` when the collection is empty.
    fn first(&self) -> Result<&Value> {
        self.store()
            .first()
            .map(Self::unwrap_value)
            .ok_or_else(|| CollectionError::OutOfRange(EMPTY_READ.to_string()))
    }

    /// Gets the last element in iteration order.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::OutOfRange` when the collection is empty.
    fn last(&self) -> Result<&Value> {
        self.store()
            .last()
            .map(Self::unwrap_value)
            .ok_or_else(|| CollectionError::OutOfRange(EMPTY_READ.to_string()))
    }

    /// Checks if the collection contains a value, by structural equality.
    fn contains(&self, needle: &Value) -> bool {
        self.store()
            .iter()
            .any(|(_, stored)| Self::unwrap_value(stored) == needle)
    }

    /// Returns a snapshot of the logical values in iteration order.
    fn values(&self) -> Vec<Value> {
        self.store()
            .iter()
            .map(|(_, stored)| Self::unwrap_value(stored).clone())
            .collect()
    }

    /// Fills the collection with a set of entries, in order.
    ///
    /// Each entry goes through the collection's own `add`, so a failure
    /// partway through leaves the collection partially filled; there is no
    /// rollback.
    ///
    /// # Errors
    ///
    /// Whatever the collection's `add` raises for the failing entry.
    fn fill(&mut self, entries: Vec<Self::Entry>) -> Result<()> {
        for entry in entries {
            self.add_entry(entry)?;
        }

        Ok(())
    }

    /// Applies a callback to every element and returns the numeric total.
    ///
    /// Stops at the first non-numeric callback result.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidOperation` when a callback result
    /// is not numeric.
    fn sum<F>(&self, callback: F) -> Result<f64>
    where
        F: Fn(&Value) -> Value,
        Self: Sized,
    {
        let mut total = 0.0;

        for (_, stored) in self.store().iter() {
            match callback(Self::unwrap_value(stored)).as_f64() {
                Some(number) => total += number,
                None => {
                    return Err(CollectionError::InvalidOperation(
                        NON_NUMERIC_SUM.to_string(),
                    ))
                }
            }
        }

        Ok(total)
    }

    /// Projects the collection into a JSON tree.
    ///
    /// List-like collections become a JSON array in iteration order; the
    /// dictionary overrides this with an ordered JSON object.
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.store()
                .iter()
                .map(|(_, stored)| Self::unwrap_value(stored).to_json())
                .collect(),
        )
    }
}
