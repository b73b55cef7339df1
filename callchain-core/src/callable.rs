//! # Callable objects
//!
//! An object registered on a chain is an opaque value with its own entry
//! point. It closes over whatever state it needs; the chain never hands it the
//! receiver.

use crate::error::{CallbackResult, ChainError};
use std::{any::Any, fmt};

/// The declared signature of a callback.
///
/// Callbacks state up front whether they take the run arguments. The chain
/// never forwards arguments to a nullary callback, however many `run` is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Takes no arguments.
    Nullary,
    /// Takes the argument passed to `run`.
    Unary,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Nullary => f.write_str("no arguments"),
            Arity::Unary => f.write_str("one argument"),
        }
    }
}

/// A value that can be invoked on itself with zero or one argument.
///
/// Implement [`call`](Callable::call) for a nullary object, or override
/// [`arity`](Callable::arity) to return [`Arity::Unary`] and implement
/// [`call_with`](Callable::call_with). An entry point the object declares but
/// does not implement fails with [`ChainError::NotCallable`] when the chain runs.
///
/// # Equality
///
/// Two objects are the same callback when [`same_callable`](Callable::same_callable)
/// says so. The default is identity: the same allocation registered twice is
/// a duplicate, two distinct values never are, however alike they behave.
///
/// To compare by value instead, return `Some(self)` from
/// [`as_any`](Callable::as_any) and downcast `other` in `same_callable`:
///
/// ```rust
/// use callchain_core::{Callable, CallbackResult};
/// use std::any::Any;
///
/// #[derive(PartialEq)]
/// struct Audit(&'static str);
///
/// impl Callable for Audit {
///     fn call(&self) -> CallbackResult {
///         Ok(())
///     }
///
///     fn as_any(&self) -> Option<&dyn Any> {
///         Some(self)
///     }
///
///     fn same_callable(&self, other: &dyn Callable) -> bool {
///         other
///             .as_any()
///             .and_then(|other| other.downcast_ref::<Self>())
///             .is_some_and(|other| other == self)
///     }
/// }
///
/// assert!(Audit("db").same_callable(&Audit("db")));
/// assert!(!Audit("db").same_callable(&Audit("cache")));
/// ```
///
/// # Example
///
/// ```rust
/// use callchain_core::{Arity, Callable, CallbackResult};
///
/// struct Audit;
///
/// impl Callable<u64> for Audit {
///     fn arity(&self) -> Arity {
///         Arity::Unary
///     }
///
///     fn call_with(&self, id: &u64) -> CallbackResult {
///         assert!(*id > 0);
///         Ok(())
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not `Callable<{A}>`",
    label = "missing `Callable` implementation",
    note = "Callable objects must implement `call` or `call_with`."
)]
pub trait Callable<A: ?Sized = ()>: Send + Sync + 'static {
    /// The signature this object is invoked with.
    fn arity(&self) -> Arity {
        Arity::Nullary
    }

    /// Zero-argument entry point.
    fn call(&self) -> CallbackResult {
        Err(ChainError::not_callable::<Self>(Arity::Nullary).into())
    }

    /// One-argument entry point.
    fn call_with(&self, args: &A) -> CallbackResult {
        let _ = args;
        Err(ChainError::not_callable::<Self>(Arity::Unary).into())
    }

    /// The object as `Any`, for implementations of
    /// [`same_callable`](Callable::same_callable) that downcast. `None` by default.
    fn as_any(&self) -> Option<&dyn Any> {
        None
    }

    /// Whether `other` is the same callback as `self`.
    fn same_callable(&self, other: &dyn Callable<A>) -> bool {
        std::ptr::addr_eq(self as *const Self, other as *const dyn Callable<A>)
    }
}
