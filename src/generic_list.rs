use crate::array_list::slice_values;
use crate::checker::Checker;
use crate::collection::{
    Collection, EMPTY_RAND, EMPTY_READ, EMPTY_REMOVE, EMPTY_REVERSE, NON_EXISTENT_UPDATE,
    missing_index,
};
use crate::error::{CollectionError, Result};
use crate::store::Store;
use crate::value::{article, TypeToken, Value};
use rand::Rng;
use std::any::Any;
use std::cmp::Ordering;

/// An ordered list constrained to instances of one declared type.
///
/// The element type is fixed at construction; `add`, `update`, `merge` and
/// construction itself validate every inbound element against it. Only
/// composite types are accepted — a generic list of scalars is rejected at
/// insertion time. Otherwise the operation set mirrors
/// [`ArrayList`](crate::ArrayList), including the repopulation pass after a
/// removal and the absent-result convention.
///
/// # Examples
///
/// ```
/// use typed_collections::{Collection, GenericList, Value};
/// use serde::Serialize;
///
/// #[derive(Debug, Clone, PartialEq, Serialize)]
/// struct Post { title: String }
///
/// let mut posts = GenericList::of::<Post>();
/// posts.add(Value::new(Post { title: "Hello".to_string() })).unwrap();
///
/// assert_eq!(posts.count(), 1);
/// assert!(posts.add(Value::new(42i64)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenericList {
    element_type: TypeToken,
    store: Store<usize, Value>,
}

impl GenericList {
    /// Creates an empty list for elements of the given declared type.
    pub fn new(element_type: TypeToken) -> Self {
        Self {
            element_type,
            store: Store::new(),
        }
    }

    /// Creates an empty list for elements of type `T`.
    pub fn of<T: Any>() -> Self {
        Self::new(TypeToken::of::<T>())
    }

    /// Creates a list from an ordered set of values, validating each one.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` for the first value
    /// violating the declared type.
    pub fn with_values(element_type: TypeToken, values: Vec<Value>) -> Result<Self> {
        let mut list = Self::new(element_type);

        for value in values {
            list.add(value)?;
        }

        Ok(list)
    }

    /// The declared element type.
    pub fn element_type(&self) -> TypeToken {
        self.element_type
    }

    fn validate(&self, value: &Value) -> Result<()> {
        Self::validate_against(self.element_type, value)
    }

    fn validate_against(element_type: TypeToken, value: &Value) -> Result<()> {
        Checker::is_object_instance(
            value,
            &format!(
                "The type specified for this collection is {}, you cannot pass {} {}",
                element_type,
                article(value.type_name()),
                value.type_name()
            ),
        )?;
        Checker::instance_of(
            value,
            element_type,
            &format!(
                "The type specified for this collection is {}, you cannot pass an object of type {}",
                element_type,
                value.type_name()
            ),
        )?;

        Ok(())
    }

    /// Appends a value at the end of the list.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the value is not an
    /// instance of the declared type. Nothing is stored on failure.
    pub fn add(&mut self, value: Value) -> Result<()> {
        self.validate(&value)?;

        let next = self.store.count();
        self.store.set(next, value);

        Ok(())
    }

    /// Gets the element at the given index.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::OutOfRange` if the list is empty or the
    /// index does not exist.
    pub fn get(&self, index: usize) -> Result<&Value> {
        if self.is_empty() {
            return Err(CollectionError::OutOfRange(EMPTY_READ.to_string()));
        }

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

    fn repopulate(&mut self) {
        let entries = self
            .store
            .iter()
            .map(|(_, value)| value.clone())
            .enumerate()
            .collect();
        self.store.replace_all(entries);
    }

    /// Replaces the element at the given index.
    ///
    /// Returns whether the stored value now equals the given one, which is
    /// always true on success.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` on a type violation and
    /// `CollectionError::InvalidOperation` if the index does not exist.
    pub fn update(&mut self, index: usize, value: Value) -> Result<bool> {
        self.validate(&value)?;

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
            Some(self.rebuild(matched))
        }
    }

    /// Returns a new list with every element transformed, or `Ok(None)`
    /// when the list is empty.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if a transformed element
    /// violates the declared type.
    pub fn map<F>(&self, transform: F) -> Result<Option<Self>>
    where
        F: Fn(&Value) -> Value,
    {
        if self.is_empty() {
            return Ok(None);
        }

        let mut mapped = Self::new(self.element_type);

        for (_, value) in self.store.iter() {
            mapped.add(transform(value))?;
        }

        Ok(Some(mapped))
    }

    /// Searches for elements matching the predicate, optionally stopping
    /// after the first match. `None` when nothing matches.
    pub fn search<F>(&self, predicate: F, stop_at_first: bool) -> Option<Self>
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
            Some(self.rebuild(matched))
        }
    }

    /// Returns the first element matching the predicate.
    pub fn find<F>(&self, predicate: F) -> Option<&Value>
    where
        F: Fn(&Value) -> bool,
    {
        self.store
            .iter()
            .find(|&(_, value)| predicate(value))
            .map(|(_, value)| value)
    }

    /// Applies a callback to every element in place.
    ///
    /// Each element the callback writes back is validated against the
    /// declared type before it reaches the list; the element being
    /// processed when validation fails stays unchanged, elements already
    /// visited keep their new values.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the callback replaces
    /// an element with a value violating the declared type.
    pub fn for_each<F>(&mut self, mut callback: F) -> Result<()>
    where
        F: FnMut(&mut Value),
    {
        let element_type = self.element_type;

        for (_, slot) in self.store.iter_mut() {
            let mut value = slot.clone();
            callback(&mut value);
            Self::validate_against(element_type, &value)?;
            *slot = value;
        }

        Ok(())
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

        Some(self.rebuild(values))
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

        Ok(self.rebuild(values))
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
            Some(self.rebuild(values))
        }
    }

    /// Returns the elements present in this list but absent from the
    /// other, by structural equality.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidOperation` if the other list
    /// declares a different element type.
    pub fn diff(&self, other: &Self) -> Result<Self> {
        self.check_comparable(other)?;

        Ok(self.rebuild(
            self.store
                .iter()
                .filter(|&(_, value)| !other.contains(value))
                .map(|(_, value)| value.clone())
                .collect(),
        ))
    }

    /// Checks if both lists hold the same elements in the same order.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidOperation` if the other list
    /// declares a different element type.
    pub fn equals(&self, other: &Self) -> Result<bool> {
        self.check_comparable(other)?;

        Ok(self.values() == other.values())
    }

    /// Concatenates this list and the other into a new one.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the other list
    /// declares a different element type.
    pub fn merge(&self, other: &Self) -> Result<Self> {
        self.check_mergeable(other)?;

        let mut values = self.values();
        values.extend(other.values());

        Ok(self.rebuild(values))
    }

    /// A type-mismatched comparison is a structural misuse, not a bad
    /// argument, so it fails with `InvalidOperation`.
    fn check_comparable(&self, other: &Self) -> Result<()> {
        if self.element_type != other.element_type {
            return Err(CollectionError::InvalidOperation(format!(
                "The type specified for this collection is {}, you cannot compare it with a collection of type {}",
                self.element_type, other.element_type
            )));
        }

        Ok(())
    }

    fn check_mergeable(&self, other: &Self) -> Result<()> {
        Checker::equal(
            self.element_type,
            other.element_type,
            &format!(
                "The type specified for this collection is {}, you cannot merge it with a collection of type {}",
                self.element_type, other.element_type
            ),
        )
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

    /// Builds a sibling list from pre-validated elements.
    fn rebuild(&self, values: Vec<Value>) -> Self {
        Self {
            element_type: self.element_type,
            store: Store::from_entries(values.into_iter().enumerate().collect()),
        }
    }

    /// Returns a snapshot of the current contents.
    pub fn to_array(&self) -> Vec<Value> {
        self.values()
    }
}

impl Collection for GenericList {
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
        self.add(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Post {
        id: i64,
        title: String,
    }

    fn post(id: i64, title: &str) -> Value {
        Value::new(Post {
            id,
            title: title.to_string(),
        })
    }

    fn sample() -> GenericList {
        GenericList::with_values(
            TypeToken::of::<Post>(),
            vec![post(1, "first"), post(2, "second"), post(3, "third")],
        )
        .unwrap()
    }

    #[test]
    fn test_add_rejects_foreign_types() {
        let mut posts = sample();

        let result = posts.add(Value::new("not a post".to_string()));

        match result {
            Err(CollectionError::InvalidArgument(message)) => {
                assert!(message.contains("Post"));
            }
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
        assert_eq!(posts.count(), 3);
    }

    #[test]
    fn test_add_rejects_scalars_even_when_declared() {
        let mut numbers = GenericList::of::<i64>();

        assert!(matches!(
            numbers.add(Value::new(5i64)),
            Err(CollectionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_remove_shifts_the_following_elements() {
        let mut posts = sample();
        let second = posts.get(1).unwrap().clone();

        posts.remove(0).unwrap();

        assert_eq!(posts.count(), 2);
        assert_eq!(posts.get(0).unwrap(), &second);
    }

    #[test]
    fn test_get_fails_on_empty_and_missing_indices() {
        let posts = GenericList::of::<Post>();
        assert_eq!(
            posts.get(0),
            Err(CollectionError::OutOfRange(EMPTY_READ.to_string()))
        );

        let posts = sample();
        assert_eq!(
            posts.get(9),
            Err(CollectionError::OutOfRange(missing_index(9)))
        );
    }

    #[test]
    fn test_update_validates_before_writing() {
        let mut posts = sample();

        assert!(posts.update(0, post(9, "rewritten")).unwrap());
        assert_eq!(posts.get(0).unwrap(), &post(9, "rewritten"));

        assert!(matches!(
            posts.update(0, Value::new(1i64)),
            Err(CollectionError::InvalidArgument(_))
        ));
        assert!(matches!(
            posts.update(9, post(1, "first")),
            Err(CollectionError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_filter_and_search_share_the_absent_convention() {
        let posts = sample();

        let filtered = posts
            .filter(|value| value.downcast_ref::<Post>().map_or(false, |p| p.id > 1))
            .unwrap();
        assert_eq!(filtered.count(), 2);

        let first_match = posts
            .search(|value| value.downcast_ref::<Post>().map_or(false, |p| p.id > 1), true)
            .unwrap();
        assert_eq!(first_match.count(), 1);

        assert!(posts.filter(|_| false).is_none());
        assert!(posts.search(|_| false, true).is_none());
    }

    #[test]
    fn test_find_returns_the_first_matching_element() {
        let posts = sample();

        let found = posts
            .find(|value| value.downcast_ref::<Post>().map_or(false, |p| p.id == 2))
            .unwrap();

        assert_eq!(found, &post(2, "second"));
        assert!(posts.find(|_| false).is_none());
    }

    #[test]
    fn test_map_validates_transformed_elements() {
        let posts = sample();

        let renamed = posts
            .map(|value| {
                let mut post = value.downcast_ref::<Post>().cloned().unwrap_or(Post {
                    id: 0,
                    title: String::new(),
                });
                post.title = post.title.to_uppercase();
                Value::new(post)
            })
            .unwrap()
            .unwrap();

        assert_eq!(renamed.get(0).unwrap(), &post(1, "FIRST"));
        assert!(posts.map(|_| Value::new(1i64)).is_err());
    }

    #[test]
    fn test_sort_reverse_and_slice() {
        let posts = sample();

        let sorted = posts
            .sort(|a, b| {
                let a = a.downcast_ref::<Post>().map(|p| p.id).unwrap_or(0);
                let b = b.downcast_ref::<Post>().map(|p| p.id).unwrap_or(0);
                b.cmp(&a)
            })
            .unwrap();
        assert_eq!(sorted.get(0).unwrap(), &post(3, "third"));

        let reversed = posts.reverse().unwrap();
        assert_eq!(reversed.get(0).unwrap(), &post(3, "third"));
        assert!(GenericList::of::<Post>().reverse().is_err());

        let tail = posts.slice(-2, None).unwrap();
        assert_eq!(tail.count(), 2);
        assert_eq!(tail.get(0).unwrap(), &post(2, "second"));
    }

    #[test]
    fn test_diff_and_equals_demand_the_same_declared_type() {
        #[derive(Debug, Clone, PartialEq, Serialize)]
        struct Comment {
            body: String,
        }

        let posts = sample();
        let comments = GenericList::of::<Comment>();

        assert!(matches!(
            posts.diff(&comments),
            Err(CollectionError::InvalidOperation(_))
        ));
        assert!(matches!(
            posts.equals(&comments),
            Err(CollectionError::InvalidOperation(_))
        ));

        let same = sample();
        assert!(posts.equals(&same).unwrap());

        let mut fewer = sample();
        fewer.remove(2).unwrap();
        let diff = posts.diff(&fewer).unwrap();
        assert_eq!(diff.to_array(), vec![post(3, "third")]);
    }

    #[test]
    fn test_merge_mismatch_stays_an_argument_error() {
        #[derive(Debug, Clone, PartialEq, Serialize)]
        struct Comment {
            body: String,
        }

        let posts = sample();
        let comments = GenericList::of::<Comment>();

        assert!(matches!(
            posts.merge(&comments),
            Err(CollectionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_for_each_validates_written_back_elements() {
        let mut posts = sample();

        posts
            .for_each(|value| {
                if let Some(post) = value.downcast_mut::<Post>() {
                    post.id += 10;
                }
            })
            .unwrap();
        assert_eq!(posts.get(0).unwrap(), &post(11, "first"));

        let result = posts.for_each(|value| *value = Value::new(1i64));

        assert!(matches!(result, Err(CollectionError::InvalidArgument(_))));
        // The rejected replacement never reached the list.
        assert_eq!(posts.get(0).unwrap(), &post(11, "first"));
    }

    #[test]
    fn test_merge_concatenates_validated_lists() {
        let posts = sample();
        let more = GenericList::with_values(
            TypeToken::of::<Post>(),
            vec![post(4, "fourth")],
        )
        .unwrap();

        let merged = posts.merge(&more).unwrap();

        assert_eq!(merged.count(), 4);
        assert_eq!(merged.last().unwrap(), &post(4, "fourth"));
    }

    #[test]
    fn test_rand_fails_on_empty_list() {
        assert!(matches!(
            GenericList::of::<Post>().rand(),
            Err(CollectionError::InvalidOperation(_))
        ));

        let posts = sample();
        assert!(posts.contains(posts.rand().unwrap()));
    }
}
