use serde::{Serialize, Serializer};
use std::any::{Any, TypeId};
use std::fmt;

/// The object-safe surface every stored value exposes.
///
/// Implemented blanket-style for any `'static` type that is cloneable,
/// comparable, debuggable and serializable, so callers never implement it
/// by hand — they just wrap their value in [`Value::new`].
pub trait Storable: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn eq_value(&self, other: &dyn Storable) -> bool;
    fn clone_value(&self) -> Box<dyn Storable>;
    fn debug_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
    fn json_value(&self) -> serde_json::Value;
    fn type_name(&self) -> &'static str;
}

impl<T> Storable for T
where
    T: Any + Clone + PartialEq + fmt::Debug + Serialize + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn eq_value(&self, other: &dyn Storable) -> bool {
        // Same concrete type and same value, never a cross-type coercion.
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }

    fn clone_value(&self) -> Box<dyn Storable> {
        Box::new(self.clone())
    }

    fn debug_value(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }

    fn json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// A type-erased value that remembers its runtime type.
///
/// Every collection in this crate stores `Value`s; the type information is
/// preserved so values can be checked against a declared [`TypeToken`],
/// compared structurally, and projected to JSON.
///
/// # Examples
///
/// ```
/// use typed_collections::Value;
///
/// let number = Value::new(42i64);
/// let text = Value::new("hello".to_string());
///
/// assert!(number.is::<i64>());
/// assert_eq!(number.downcast_ref::<i64>(), Some(&42));
/// assert_ne!(number, text);
/// ```
pub struct Value(Box<dyn Storable>);

impl Value {
    /// Wraps a value of any storable type.
    pub fn new<T>(value: T) -> Self
    where
        T: Any + Clone + PartialEq + fmt::Debug + Serialize + Send + Sync,
    {
        Value(Box::new(value))
    }

    /// Checks if the contained value is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.type_id() == TypeId::of::<T>()
    }

    /// Returns the `TypeId` of the contained value.
    pub fn type_id(&self) -> TypeId {
        self.0.as_any().type_id()
    }

    /// Returns the type name of the contained value.
    pub fn type_name(&self) -> &'static str {
        self.0.type_name()
    }

    /// Gets a reference to the contained value if it is of type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// Gets a mutable reference to the contained value if it is of type `T`.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.0.as_any_mut().downcast_mut::<T>()
    }

    /// Projects the contained value into a JSON tree.
    pub fn to_json(&self) -> serde_json::Value {
        self.0.json_value()
    }

    /// Extracts the contained value as `f64` if it is any numeric type.
    ///
    /// Used by `sum` to decide whether a callback result is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        macro_rules! try_numeric {
            ($($ty:ty),*) => {
                $(
                    if let Some(n) = self.downcast_ref::<$ty>() {
                        return Some(*n as f64);
                    }
                )*
            };
        }
        try_numeric!(f64, f32, i64, i32, i16, i8, isize, u64, u32, u16, u8, usize);
        None
    }

    /// Checks if the contained value is a composite type rather than one of
    /// the scalar primitives.
    pub fn is_composite(&self) -> bool {
        !is_scalar_id(self.type_id())
    }
}

fn is_scalar_id(id: TypeId) -> bool {
    [
        TypeId::of::<bool>(),
        TypeId::of::<char>(),
        TypeId::of::<i8>(),
        TypeId::of::<i16>(),
        TypeId::of::<i32>(),
        TypeId::of::<i64>(),
        TypeId::of::<i128>(),
        TypeId::of::<isize>(),
        TypeId::of::<u8>(),
        TypeId::of::<u16>(),
        TypeId::of::<u32>(),
        TypeId::of::<u64>(),
        TypeId::of::<u128>(),
        TypeId::of::<usize>(),
        TypeId::of::<f32>(),
        TypeId::of::<f64>(),
        TypeId::of::<String>(),
        TypeId::of::<&'static str>(),
        TypeId::of::<()>(),
    ]
    .contains(&id)
}

impl Clone for Value {
    fn clone(&self) -> Self {
        Value(self.0.clone_value())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_value(other.0.as_ref())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.debug_value(f)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// The immutable declared-type descriptor carried by typed collections.
///
/// A `TypeToken` is fixed at construction time; every element added to the
/// collection afterwards must match it.
///
/// # Examples
///
/// ```
/// use typed_collections::{TypeToken, Value};
///
/// let token = TypeToken::of::<i64>();
/// assert!(token.matches(&Value::new(7i64)));
/// assert!(!token.matches(&Value::new("seven")));
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TypeToken {
    id: TypeId,
    name: &'static str,
}

impl TypeToken {
    /// Builds the descriptor for type `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The `TypeId` this descriptor demands.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The textual name of the declared type.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Checks whether a value satisfies this descriptor.
    pub fn matches(&self, value: &Value) -> bool {
        value.type_id() == self.id
    }
}

impl fmt::Debug for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeToken({})", self.name)
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Returns the correct indefinite article for preceding a word.
pub(crate) fn article(word: &str) -> &'static str {
    match word.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a') | Some('e') | Some('i') | Some('o') | Some('u') => "an",
        _ => "a",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_type_aware() {
        assert_eq!(Value::new(1i64), Value::new(1i64));
        assert_ne!(Value::new(1i64), Value::new(1i32));
        assert_ne!(Value::new(1i64), Value::new("1".to_string()));
    }

    #[test]
    fn test_clone_preserves_type_and_value() {
        let original = Value::new(vec![1, 2, 3]);
        let copy = original.clone();

        assert_eq!(original, copy);
        assert!(copy.is::<Vec<i32>>());
    }

    #[test]
    fn test_numeric_extraction() {
        assert_eq!(Value::new(2i32).as_f64(), Some(2.0));
        assert_eq!(Value::new(2.5f64).as_f64(), Some(2.5));
        assert_eq!(Value::new("two".to_string()).as_f64(), None);
    }

    #[test]
    fn test_composite_detection() {
        assert!(!Value::new(42i64).is_composite());
        assert!(!Value::new("plain".to_string()).is_composite());
        assert!(Value::new(vec![1, 2]).is_composite());
    }

    #[test]
    fn test_token_matching() {
        let token = TypeToken::of::<String>();

        assert!(token.matches(&Value::new("yes".to_string())));
        assert!(!token.matches(&Value::new("no")));
        assert_eq!(token, TypeToken::of::<String>());
    }

    #[test]
    fn test_json_projection() {
        let value = Value::new("Max".to_string());
        assert_eq!(value.to_json(), serde_json::json!("Max"));
    }

    #[test]
    fn test_article() {
        assert_eq!(article("i64"), "an");
        assert_eq!(article("bool"), "a");
        assert_eq!(article("&str"), "a");
    }
}
