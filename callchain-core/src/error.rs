//! Error types for callchain.
//!
//! Every failure raised while a chain runs is reported as a [`ChainError`]:
//!
//! - [`ChainError::UnresolvedOperation`] - a named entry has no operation on the receiver
//! - [`ChainError::NotCallable`] - an object lacks the entry point its arity needs
//! - [`ChainError::Callback`] - a callback body failed; the error is kept as is

use crate::{callable::Arity, name::Name};
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What every callback body reduces to once its return value is discarded.
pub type CallbackResult = Result<(), BoxError>;

/// Errors that abort a chain run.
#[derive(Error, Debug)]
pub enum ChainError {
    /// A named entry did not resolve on the receiver.
    #[error("undefined operation `{name}` for {receiver}")]
    UnresolvedOperation {
        /// The registered name.
        name: Name,
        /// Type name of the receiver the lookup ran against.
        receiver: &'static str,
    },

    /// A callable object does not implement the entry point for its arity.
    #[error("{callable} is not callable with {arity}")]
    NotCallable {
        /// Type name of the object.
        callable: &'static str,
        /// The arity the object declared.
        arity: Arity,
    },

    /// A callback failed with its own error.
    #[error(transparent)]
    Callback(BoxError),
}

impl ChainError {
    /// Build a [`ChainError::NotCallable`] for `C`.
    pub fn not_callable<C: ?Sized>(arity: Arity) -> Self {
        ChainError::NotCallable {
            callable: std::any::type_name::<C>(),
            arity,
        }
    }

    /// Classify an error raised by a callback body.
    ///
    /// A `ChainError` that travelled through a box (e.g. from a nested chain)
    /// is unboxed rather than wrapped a second time.
    pub fn from_callback(err: BoxError) -> Self {
        match err.downcast::<ChainError>() {
            Ok(chain) => *chain,
            Err(other) => ChainError::Callback(other),
        }
    }

    /// Returns the callback's own error, if this is a callback failure.
    pub fn into_callback_error(self) -> Option<BoxError> {
        match self {
            ChainError::Callback(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the failure came from the chain rather than a callback body.
    pub fn is_dispatch(&self) -> bool {
        !matches!(self, ChainError::Callback(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn test_callback_error_is_transparent() {
        let err = ChainError::from_callback(Box::new(Boom));
        assert_eq!(err.to_string(), "boom");
        assert!(!err.is_dispatch());
        let inner = err.into_callback_error().unwrap();
        assert!(inner.downcast_ref::<Boom>().is_some());
    }

    #[test]
    fn test_nested_chain_error_is_unboxed() {
        let nested: BoxError = Box::new(ChainError::UnresolvedOperation {
            name: Name::from("missing"),
            receiver: "Action",
        });
        let err = ChainError::from_callback(nested);
        assert!(matches!(err, ChainError::UnresolvedOperation { .. }));
        assert_eq!(err.to_string(), "undefined operation `missing` for Action");
    }

    #[test]
    fn test_not_callable_message() {
        struct Inert;
        let err = ChainError::not_callable::<Inert>(Arity::Unary);
        assert!(err.is_dispatch());
        assert!(err.to_string().ends_with("Inert is not callable with one argument"));
    }
}
