use crate::error::{CollectionError, Result};
use crate::value::Value;
use lazy_static::lazy_static;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// An extension method: a callback bound to an explicit receiver plus an
/// argument list.
type ExtensionFn = Arc<dyn Fn(&mut dyn Any, &[Value]) -> Result<Value> + Send + Sync>;

lazy_static! {
    /// The process-wide extension registry, keyed by receiver type and
    /// method name. Append-only during normal operation.
    static ref REGISTRY: RwLock<HashMap<(TypeId, String), ExtensionFn>> =
        RwLock::new(HashMap::new());
}

const REGISTRY_LOCK: &str = "Failed to acquire the extension registry lock";

/// Registers a named extension method for the collection type `C`.
///
/// The callback receives the collection instance it was invoked on plus the
/// caller's arguments, and can later be invoked through
/// [`call_extension`] as if it were a built-in method. Registering the same
/// name again replaces the previous callback.
///
/// # Examples
///
/// ```
/// use typed_collections::{register_extension, call_extension, ArrayList, Value};
///
/// register_extension::<ArrayList, _>("second", |list, _args| {
///     list.get(1).cloned()
/// }).unwrap();
///
/// let mut list = ArrayList::from_values(vec![Value::new(1i64), Value::new(2i64)]);
/// assert_eq!(call_extension("second", &mut list, &[]).unwrap(), Value::new(2i64));
/// ```
///
/// # Errors
///
/// Returns `CollectionError::InvalidOperation` if the registry lock cannot
/// be acquired.
pub fn register_extension<C, F>(name: &str, method: F) -> Result<()>
where
    C: Any,
    F: Fn(&mut C, &[Value]) -> Result<Value> + Send + Sync + 'static,
{
    let erased: ExtensionFn = Arc::new(move |receiver, arguments| {
        let receiver = receiver.downcast_mut::<C>().ok_or_else(|| {
            CollectionError::InvalidOperation(
                "The receiver does not match the registered collection type".to_string(),
            )
        })?;

        method(receiver, arguments)
    });

    let mut registry = REGISTRY
        .write()
        .map_err(|_| CollectionError::InvalidOperation(REGISTRY_LOCK.to_string()))?;
    registry.insert((TypeId::of::<C>(), name.to_string()), erased);

    Ok(())
}

/// Invokes a registered extension method on a collection instance.
///
/// # Errors
///
/// Returns `CollectionError::InvalidOperation` when no method with that
/// name is registered for the receiver's type, or whatever the callback
/// itself raises.
pub fn call_extension<C: Any>(name: &str, receiver: &mut C, arguments: &[Value]) -> Result<Value> {
    let method = {
        let registry = REGISTRY
            .read()
            .map_err(|_| CollectionError::InvalidOperation(REGISTRY_LOCK.to_string()))?;

        registry
            .get(&(TypeId::of::<C>(), name.to_string()))
            .cloned()
            .ok_or_else(|| {
                CollectionError::InvalidOperation(format!(
                    "The {} method does not exist for this collection",
                    name
                ))
            })?
    };

    method(receiver, arguments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array_list::ArrayList;
    use crate::collection::Collection;
    use crate::stack::Stack;

    #[test]
    fn test_registered_method_is_bound_to_a_receiver() {
        register_extension::<ArrayList, _>("ext_tests_total", |list, _| {
            Ok(Value::new(list.sum(|value| value.clone())?))
        })
        .unwrap();

        let mut list = ArrayList::from_values(vec![Value::new(2i64), Value::new(3i64)]);

        let total = call_extension("ext_tests_total", &mut list, &[]).unwrap();
        assert_eq!(total, Value::new(5.0f64));
    }

    #[test]
    fn test_extension_can_mutate_the_receiver() {
        register_extension::<Stack, _>("ext_tests_push_twice", |stack, arguments| {
            for argument in arguments {
                stack.push(argument.clone())?;
            }
            Ok(Value::new(stack.count()))
        })
        .unwrap();

        let mut stack = Stack::of::<i64>();
        let count = call_extension(
            "ext_tests_push_twice",
            &mut stack,
            &[Value::new(1i64), Value::new(2i64)],
        )
        .unwrap();

        assert_eq!(count, Value::new(2usize));
        assert_eq!(stack.count(), 2);
    }

    #[test]
    fn test_unknown_method_fails() {
        let mut list = ArrayList::new();

        let result = call_extension("ext_tests_missing", &mut list, &[]);

        assert_eq!(
            result,
            Err(CollectionError::InvalidOperation(
                "The ext_tests_missing method does not exist for this collection".to_string()
            ))
        );
    }

    #[test]
    fn test_registry_is_keyed_by_receiver_type() {
        register_extension::<ArrayList, _>("ext_tests_kind", |_, _| {
            Ok(Value::new("list".to_string()))
        })
        .unwrap();

        // Same name, different receiver type: not found.
        let mut stack = Stack::of::<i64>();
        assert!(call_extension("ext_tests_kind", &mut stack, &[]).is_err());
    }
}
