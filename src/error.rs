use thiserror::Error;

/// Errors raised by the collection types.
///
/// Every failure carries a complete human-readable message; there are no
/// error codes beyond the variant itself. Errors are raised at the point of
/// violation and propagate to the caller — the library never retries or
/// recovers internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A value handed to `add`/`update`/`merge`/`fill` or a constructor
    /// violates the declared type constraint of the collection.
    #[error("{0}")]
    InvalidArgument(String),

    /// An index or key does not exist, or the collection is empty when a
    /// positional read or removal is attempted.
    #[error("{0}")]
    OutOfRange(String),

    /// The operation is structurally disallowed: comparing collections of
    /// incompatible declared types, summing non-numeric results, or
    /// reversing/sampling an empty collection.
    #[error("{0}")]
    InvalidOperation(String),
}

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, CollectionError>;
