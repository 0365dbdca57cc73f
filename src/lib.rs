//! # typed-collections
//!
//! Type-checked, insertion-ordered collection types layered over a single
//! indexable storage primitive.
//!
//! The crate provides four container flavors — a dynamic [`ArrayList`], a
//! typed key/value [`Dictionary`], a homogeneous [`GenericList`] and a LIFO
//! [`Stack`] — sharing one backing [`Store`] and a uniform set of
//! functional operations (filter, map, sum, sort, slice, diff, equals,
//! merge). Typed containers validate every inbound element at runtime
//! against an immutable declared type, with uniform, descriptive error
//! messages.
//!
//! ## Key Features
//!
//! - **Type-checked**: Dictionary, GenericList and Stack enforce their
//!   declared types on every insertion
//! - **Insertion-ordered**: iteration, `first`/`last` and the JSON
//!   projection always follow insertion order
//! - **Explicit absent results**: filter/map/slice/find return `Option` so
//!   "no result" is distinguishable from a valid empty collection
//! - **Structural equality**: `contains`/`diff`/`equals` compare by type
//!   and value, never by loose coercion
//!
//! ## Usage Examples
//!
//! ### ArrayList
//!
//! ```rust
//! use typed_collections::{ArrayList, Collection, Value};
//!
//! let numbers = ArrayList::from_values((1i64..=5).map(Value::new).collect());
//! let more = ArrayList::from_values((6i64..=10).map(Value::new).collect());
//!
//! let merged = numbers.merge(&more);
//!
//! assert_eq!(merged.count(), 10);
//! assert_eq!(merged.first().unwrap(), &Value::new(1i64));
//! assert_eq!(merged.last().unwrap(), &Value::new(10i64));
//!
//! let evens = merged
//!     .filter(|value| value.downcast_ref::<i64>().map_or(false, |n| n % 2 == 0))
//!     .unwrap();
//! assert_eq!(evens.count(), 5);
//! ```
//!
//! ### Dictionary
//!
//! ```rust
//! use typed_collections::{Collection, Dictionary, Value};
//!
//! let mut person = Dictionary::of::<String, String>();
//! person.add(Value::new("name".to_string()), Value::new("Max".to_string())).unwrap();
//! person.add(Value::new("age".to_string()), Value::new("24".to_string())).unwrap();
//!
//! assert_eq!(person.to_json().to_string(), r#"{"name":"Max","age":"24"}"#);
//!
//! // A value of the wrong type never reaches the store.
//! let result = person.add(Value::new("height".to_string()), Value::new(180i64));
//! assert!(result.is_err());
//! assert_eq!(person.count(), 2);
//! ```
//!
//! ### GenericList
//!
//! ```rust
//! use typed_collections::{Collection, GenericList, Value};
//! use serde::Serialize;
//!
//! #[derive(Debug, Clone, PartialEq, Serialize)]
//! struct Post { id: i64, title: String }
//!
//! let mut posts = GenericList::of::<Post>();
//! posts.add(Value::new(Post { id: 1, title: "First post".to_string() })).unwrap();
//! posts.add(Value::new(Post { id: 2, title: "Second post".to_string() })).unwrap();
//!
//! posts.remove(0).unwrap();
//!
//! // The list re-indexes after a removal.
//! let first = posts.get(0).unwrap().downcast_ref::<Post>().unwrap();
//! assert_eq!(first.id, 2);
//! ```
//!
//! ### Stack
//!
//! ```rust
//! use typed_collections::{Collection, Stack, Value};
//!
//! let mut history = Stack::of::<String>();
//! history.push(Value::new("first".to_string())).unwrap();
//! history.push(Value::new("second".to_string())).unwrap();
//!
//! assert_eq!(history.peek(), Some(&Value::new("second".to_string())));
//! assert_eq!(history.pop(), Some(Value::new("second".to_string())));
//! assert_eq!(history.count(), 1);
//! ```
//!
//! ### Error Handling
//!
//! ```rust
//! use typed_collections::{ArrayList, CollectionError, Stack, Value};
//!
//! let empty = ArrayList::new();
//! match empty.rand() {
//!     Err(CollectionError::InvalidOperation(message)) => {
//!         assert_eq!(message, "You cannot get a random element from an empty collection");
//!     }
//!     other => panic!("unexpected result: {:?}", other),
//! }
//!
//! let mut stack = Stack::of::<String>();
//! match stack.push(Value::new(42i64)) {
//!     Err(CollectionError::InvalidArgument(message)) => {
//!         assert!(message.contains("i64"));
//!     }
//!     other => panic!("unexpected result: {:?}", other),
//! }
//! ```

mod array_list;
mod checker;
mod collection;
mod dictionary;
mod error;
mod extensions;
mod generic_list;
mod pair;
mod stack;
mod store;
mod value;

pub use array_list::ArrayList;
pub use checker::Checker;
pub use collection::Collection;
pub use dictionary::Dictionary;
pub use error::{CollectionError, Result};
pub use extensions::{call_extension, register_extension};
pub use generic_list::GenericList;
pub use pair::Pair;
pub use stack::Stack;
pub use store::Store;
pub use value::{Storable, TypeToken, Value};

// Re-export std::any for convenience
pub use std::any::{Any, TypeId};
