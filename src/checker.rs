use crate::error::{CollectionError, Result};
use crate::value::{TypeToken, Value};

/// Validation utilities shared by the typed collections.
///
/// Every typed collection funnels its insertions through one of these
/// checks, so type-violation messages stay uniform across the crate. Each
/// function succeeds silently or fails with
/// [`CollectionError::InvalidArgument`] carrying the supplied message.
pub struct Checker;

impl Checker {
    /// Checks that two type descriptors are identical.
    pub fn equal(first: TypeToken, second: TypeToken, message: &str) -> Result<()> {
        if first != second {
            return Err(CollectionError::InvalidArgument(message.to_string()));
        }

        Ok(())
    }

    /// Checks that a value is a composite type, not a scalar primitive.
    pub fn is_object_instance(value: &Value, message: &str) -> Result<()> {
        if !value.is_composite() {
            return Err(CollectionError::InvalidArgument(message.to_string()));
        }

        Ok(())
    }

    /// Checks that a value's runtime type is exactly the declared type.
    ///
    /// This is an exact match, never a supertype check.
    pub fn instance_of(value: &Value, declared: TypeToken, message: &str) -> Result<()> {
        if !declared.matches(value) {
            return Err(CollectionError::InvalidArgument(message.to_string()));
        }

        Ok(())
    }

    /// Checks that a value's type equals the declared descriptor.
    ///
    /// Used for dictionary keys and values, where both scalars and
    /// composites are acceptable as long as the type lines up.
    pub fn value_type_matches(value: &Value, declared: TypeToken, message: &str) -> Result<()> {
        if !declared.matches(value) {
            return Err(CollectionError::InvalidArgument(message.to_string()));
        }

        Ok(())
    }
}
