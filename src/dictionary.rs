use crate::array_list::slice_values;
use crate::checker::Checker;
use crate::collection::{Collection, EMPTY_REMOVE, NON_EXISTENT_UPDATE};
use crate::error::{CollectionError, Result};
use crate::pair::Pair;
use crate::store::Store;
use crate::value::{article, TypeToken, Value};
use std::any::Any;
use std::cmp::Ordering;

/// A key/value collection with enforced key-type and value-type
/// homogeneity.
///
/// Both type descriptors are fixed at construction; every key and value
/// added, updated or merged afterwards must match them or the operation
/// fails with a descriptive `InvalidArgument` error. Entries keep their
/// insertion order and are stored as [`Pair`]s.
///
/// # Examples
///
/// ```
/// use typed_collections::{Dictionary, Value};
///
/// let mut dictionary = Dictionary::of::<String, i64>();
/// dictionary.add(Value::new("age".to_string()), Value::new(24i64)).unwrap();
///
/// assert_eq!(dictionary.get(&Value::new("age".to_string())), Some(&Value::new(24i64)));
/// assert!(dictionary.add(Value::new("name".to_string()), Value::new("Max")).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    key_type: TypeToken,
    value_type: TypeToken,
    store: Store<Value, Pair>,
}

impl Dictionary {
    /// Creates an empty dictionary with the given type descriptors.
    pub fn new(key_type: TypeToken, value_type: TypeToken) -> Self {
        Self {
            key_type,
            value_type,
            store: Store::new(),
        }
    }

    /// Creates an empty dictionary for keys of type `K` and values of
    /// type `V`.
    pub fn of<K: Any, V: Any>() -> Self {
        Self::new(TypeToken::of::<K>(), TypeToken::of::<V>())
    }

    /// Creates a dictionary from an ordered set of entries, validating
    /// every key and value.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` for the first entry
    /// violating a type descriptor.
    pub fn with_entries(
        key_type: TypeToken,
        value_type: TypeToken,
        entries: Vec<(Value, Value)>,
    ) -> Result<Self> {
        let mut dictionary = Self::new(key_type, value_type);

        for (key, value) in entries {
            dictionary.add(key, value)?;
        }

        Ok(dictionary)
    }

    /// The declared key type.
    pub fn key_type(&self) -> TypeToken {
        self.key_type
    }

    /// The declared value type.
    pub fn value_type(&self) -> TypeToken {
        self.value_type
    }

    fn validate_entry(&self, key: &Value, value: &Value) -> Result<()> {
        Checker::value_type_matches(key, self.key_type, &type_message("key", self.key_type, key))?;
        Checker::value_type_matches(
            value,
            self.value_type,
            &type_message("value", self.value_type, value),
        )?;

        Ok(())
    }

    /// Adds a new entry, replacing the value in place if the key already
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the key or the value
    /// violates its declared type. Nothing is stored on failure.
    pub fn add(&mut self, key: Value, value: Value) -> Result<()> {
        self.validate_entry(&key, &value)?;
        self.store.set(key.clone(), Pair::new(key, value));

        Ok(())
    }

    /// Returns the value for a key, or `None` if the key is absent.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.store.get(key).map(Pair::value)
    }

    /// Removes the entry for a key.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::OutOfRange` if the dictionary is empty or
    /// the key does not exist.
    pub fn remove(&mut self, key: &Value) -> Result<()> {
        if self.is_empty() {
            return Err(CollectionError::OutOfRange(EMPTY_REMOVE.to_string()));
        }

        self.store.unset(key).ok_or_else(|| {
            CollectionError::OutOfRange(format!(
                "The {:?} key does not exist for this collection",
                key
            ))
        })?;

        Ok(())
    }

    /// Replaces the value of an existing entry in place.
    ///
    /// Returns whether the stored value now equals the given one, which is
    /// always true on success.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` on a type violation and
    /// `CollectionError::InvalidOperation` if the key does not exist.
    pub fn update(&mut self, key: &Value, value: Value) -> Result<bool> {
        self.validate_entry(key, &value)?;

        let pair = self.store.get_mut(key).ok_or_else(|| {
            CollectionError::InvalidOperation(NON_EXISTENT_UPDATE.to_string())
        })?;

        pair.set_value(value.clone());

        Ok(pair.value() == &value)
    }

    /// Returns a new dictionary with the entries matching the predicate,
    /// or `None` when nothing matches.
    pub fn filter<F>(&self, predicate: F) -> Option<Self>
    where
        F: Fn(&Value, &Value) -> bool,
    {
        let matched: Vec<(Value, Value)> = self
            .store
            .iter()
            .filter(|(_, pair)| predicate(pair.key(), pair.value()))
            .map(|(_, pair)| (pair.key().clone(), pair.value().clone()))
            .collect();

        if matched.is_empty() {
            None
        } else {
            Some(self.rebuild(matched))
        }
    }

    /// Returns a new dictionary with every value transformed, keys
    /// preserved, or `Ok(None)` when the dictionary is empty.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if a transformed value
    /// violates the declared value type.
    pub fn map<F>(&self, transform: F) -> Result<Option<Self>>
    where
        F: Fn(&Value, &Value) -> Value,
    {
        if self.is_empty() {
            return Ok(None);
        }

        let mut mapped = Self::new(self.key_type, self.value_type);

        for (_, pair) in self.store.iter() {
            mapped.add(pair.key().clone(), transform(pair.key(), pair.value()))?;
        }

        Ok(Some(mapped))
    }

    /// Returns the first value matching the predicate.
    pub fn find<F>(&self, predicate: F) -> Option<&Value>
    where
        F: Fn(&Value, &Value) -> bool,
    {
        self.store
            .iter()
            .find(|(_, pair)| predicate(pair.key(), pair.value()))
            .map(|(_, pair)| pair.value())
    }

    /// Applies a callback to every entry in place.
    ///
    /// The key stays immutable; only the value can be changed. Each value
    /// the callback writes back is validated against the declared value
    /// type before it reaches the store; the entry being processed when
    /// validation fails stays unchanged, entries already visited keep
    /// their new values.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the callback replaces
    /// a value with one violating the declared value type.
    pub fn for_each<F>(&mut self, mut callback: F) -> Result<()>
    where
        F: FnMut(&Value, &mut Value),
    {
        let value_type = self.value_type;

        for (_, pair) in self.store.iter_mut() {
            let key = pair.key().clone();
            let mut value = pair.value().clone();
            callback(&key, &mut value);
            Checker::value_type_matches(
                &value,
                value_type,
                &type_message("value", value_type, &value),
            )?;
            pair.set_value(value);
        }

        Ok(())
    }

    /// Returns a new dictionary ordered by the comparator over
    /// (key, value) entries.
    ///
    /// The contract allows an absent result for a failed sort; a Rust
    /// comparator cannot fail, so in practice this is always `Some`.
    pub fn sort<F>(&self, mut comparator: F) -> Option<Self>
    where
        F: FnMut((&Value, &Value), (&Value, &Value)) -> Ordering,
    {
        let mut entries = self.to_array();
        entries.sort_by(|a, b| comparator((&a.0, &a.1), (&b.0, &b.1)));

        Some(self.rebuild(entries))
    }

    /// Returns a portion of the dictionary preserving key association, or
    /// `None` when the portion is empty.
    pub fn slice(&self, offset: isize, length: Option<usize>) -> Option<Self> {
        let entries = slice_values(&self.to_array(), offset, length);

        if entries.is_empty() {
            None
        } else {
            Some(self.rebuild(entries))
        }
    }

    /// Returns the entries present in this dictionary whose key is absent
    /// from the other, or whose value differs from the other's entry at
    /// the same key.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidOperation` if the other dictionary
    /// declares different key or value types.
    pub fn diff(&self, other: &Self) -> Result<Self> {
        self.check_comparable(other)?;

        let entries = self
            .store
            .iter()
            .filter(|&(key, pair)| other.get(key) != Some(pair.value()))
            .map(|(_, pair)| (pair.key().clone(), pair.value().clone()))
            .collect();

        Ok(self.rebuild(entries))
    }

    /// Compares the unwrapped key-to-value contents of both dictionaries,
    /// ignoring entry order.
    pub fn equals(&self, other: &Self) -> bool {
        self.count() == other.count()
            && self
                .store
                .iter()
                .all(|(key, pair)| other.get(key) == Some(pair.value()))
    }

    /// Merges both dictionaries into a new one. On key collision the
    /// other dictionary's entry wins.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the other dictionary
    /// declares different key or value types.
    pub fn merge(&self, other: &Self) -> Result<Self> {
        self.check_mergeable(other)?;

        let mut merged = self.clone();

        for (_, pair) in other.store.iter() {
            merged
                .store
                .set(pair.key().clone(), pair.clone());
        }

        Ok(merged)
    }

    /// A type-mismatched comparison is a structural misuse, not a bad
    /// argument, so it fails with `InvalidOperation`.
    fn check_comparable(&self, other: &Self) -> Result<()> {
        if self.key_type != other.key_type {
            return Err(CollectionError::InvalidOperation(format!(
                "The key type specified for this dictionary is {}, you cannot compare it with a dictionary of key type {}",
                self.key_type, other.key_type
            )));
        }

        if self.value_type != other.value_type {
            return Err(CollectionError::InvalidOperation(format!(
                "The value type specified for this dictionary is {}, you cannot compare it with a dictionary of value type {}",
                self.value_type, other.value_type
            )));
        }

        Ok(())
    }

    fn check_mergeable(&self, other: &Self) -> Result<()> {
        Checker::equal(
            self.key_type,
            other.key_type,
            &format!(
                "The key type specified for this dictionary is {}, you cannot merge it with a dictionary of key type {}",
                self.key_type, other.key_type
            ),
        )?;
        Checker::equal(
            self.value_type,
            other.value_type,
            &format!(
                "The value type specified for this dictionary is {}, you cannot merge it with a dictionary of value type {}",
                self.value_type, other.value_type
            ),
        )?;

        Ok(())
    }

    /// Builds a sibling dictionary from pre-validated entries.
    fn rebuild(&self, entries: Vec<(Value, Value)>) -> Self {
        let mut dictionary = Self::new(self.key_type, self.value_type);

        for (key, value) in entries {
            dictionary.store.set(key.clone(), Pair::new(key, value));
        }

        dictionary
    }

    /// Returns a snapshot of the unwrapped key/value entries in iteration
    /// order.
    pub fn to_array(&self) -> Vec<(Value, Value)> {
        self.store
            .iter()
            .map(|(_, pair)| (pair.key().clone(), pair.value().clone()))
            .collect()
    }
}

fn type_message(part: &str, declared: TypeToken, actual: &Value) -> String {
    format!(
        "The {} type specified for this dictionary is {}, you cannot pass {} {}",
        part,
        declared,
        article(actual.type_name()),
        actual.type_name()
    )
}

impl Collection for Dictionary {
    type Key = Value;
    type Stored = Pair;
    type Entry = (Value, Value);

    fn store(&self) -> &Store<Value, Pair> {
        &self.store
    }

    fn store_mut(&mut self) -> &mut Store<Value, Pair> {
        &mut self.store
    }

    fn unwrap_value(stored: &Pair) -> &Value {
        stored.value()
    }

    fn add_entry(&mut self, entry: (Value, Value)) -> Result<()> {
        self.add(entry.0, entry.1)
    }

    /// Projects the dictionary into an ordered JSON object, keys rendered
    /// as strings.
    fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();

        for (_, pair) in self.store.iter() {
            let key = match pair.key().to_json() {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            };
            object.insert(key, pair.value().to_json());
        }

        serde_json::Value::Object(object)
    }
}
