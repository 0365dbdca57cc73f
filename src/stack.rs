use crate::checker::Checker;
use crate::collection::Collection;
use crate::error::Result;
use crate::store::Store;
use crate::value::{TypeToken, Value};
use std::any::Any;

/// A LIFO stack with a type-enforced `push`.
///
/// The element type is fixed at construction. `pop` and `peek` return
/// `Option` — an empty stack yields `None`, so callers guard with
/// [`is_empty`](Collection::is_empty) rather than catching an error.
///
/// # Examples
///
/// ```
/// use typed_collections::{Collection, Stack, Value};
///
/// let mut stack = Stack::of::<String>();
/// stack.push(Value::new("a".to_string())).unwrap();
///
/// assert_eq!(stack.pop(), Some(Value::new("a".to_string())));
/// assert!(stack.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    element_type: TypeToken,
    store: Store<usize, Value>,
}

impl Stack {
    /// Creates an empty stack for elements of the given declared type.
    pub fn new(element_type: TypeToken) -> Self {
        Self {
            element_type,
            store: Store::new(),
        }
    }

    /// Creates an empty stack for elements of type `T`.
    pub fn of<T: Any>() -> Self {
        Self::new(TypeToken::of::<T>())
    }

    /// The declared element type.
    pub fn element_type(&self) -> TypeToken {
        self.element_type
    }

    /// Pushes a value onto the top of the stack and returns it.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if the value is not of
    /// the declared type. Nothing is stored on failure.
    pub fn push(&mut self, value: Value) -> Result<Value> {
        Checker::value_type_matches(
            &value,
            self.element_type,
            &format!(
                "The type specified for this collection is {}, you cannot pass a value of type {}",
                self.element_type,
                value.type_name()
            ),
        )?;

        let top = self.store.count();
        self.store.set(top, value.clone());

        Ok(value)
    }

    /// Removes and returns the top element, or `None` on an empty stack.
    pub fn pop(&mut self) -> Option<Value> {
        let top = self.store.count().checked_sub(1)?;
        self.store.unset(&top)
    }

    /// Returns the top element without removing it, or `None` on an empty
    /// stack.
    pub fn peek(&self) -> Option<&Value> {
        self.store.last()
    }
}

impl Collection for Stack {
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
        self.push(entry).map(|_| ())
    }
}
