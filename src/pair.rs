use crate::value::Value;

/// A simple key/value pair backing every [`Dictionary`](crate::Dictionary)
/// entry.
///
/// The key is fixed for the lifetime of the pair; only the value can be
/// replaced. A pair is owned exclusively by the dictionary entry that wraps
/// it and is never shared between collections.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    key: Value,
    value: Value,
}

impl Pair {
    /// Creates a new pair.
    pub fn new(key: Value, value: Value) -> Self {
        Self { key, value }
    }

    /// Returns the key.
    pub fn key(&self) -> &Value {
        &self.key
    }

    /// Returns the value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Replaces the value, leaving the key untouched.
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }
}
