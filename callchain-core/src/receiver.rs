//! # Named operations (Receiver)
//!
//! A chain entry registered by name is resolved against the receiver every
//! time the chain runs. Instead of reflecting on the receiver, the receiver
//! publishes a lookup table: [`Receiver::resolve`] maps a name to a tagged
//! [`Operation`].
//!
//! # Usage Patterns
//!
//! 1. **Generated**: `#[receiver]` on an `impl` block (feature `macros` of `callchain`)
//! 2. **Table**: hold an [`OperationTable`] and delegate to [`OperationTable::get`]
//! 3. **Direct**: `match` on the name inside `resolve`

use crate::{callable::Arity, error::CallbackResult, name::Name};
use std::{collections::HashMap, fmt};

/// An operation resolved from a name, tagged with its declared signature.
pub enum Operation<R, A: ?Sized = ()> {
    /// Called with the receiver only.
    Nullary(fn(&mut R) -> CallbackResult),
    /// Called with the receiver and the run argument.
    Unary(fn(&mut R, &A) -> CallbackResult),
}

impl<R, A: ?Sized> Operation<R, A> {
    /// The declared signature.
    pub fn arity(&self) -> Arity {
        match self {
            Operation::Nullary(_) => Arity::Nullary,
            Operation::Unary(_) => Arity::Unary,
        }
    }

    /// Invoke on `receiver`. `args` is only passed to unary operations.
    pub fn invoke(self, receiver: &mut R, args: &A) -> CallbackResult {
        match self {
            Operation::Nullary(op) => op(receiver),
            Operation::Unary(op) => op(receiver, args),
        }
    }
}

impl<R, A: ?Sized> Clone for Operation<R, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, A: ?Sized> Copy for Operation<R, A> {}

impl<R, A: ?Sized> fmt::Debug for Operation<R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Operation").field(&self.arity()).finish()
    }
}

/// A receiver of named operations.
///
/// Names are looked up lazily: a chain calls `resolve` only when it runs, and
/// a `None` aborts the run with `ChainError::UnresolvedOperation`.
///
/// # Example
///
/// ```rust
/// use callchain_core::{Operation, Receiver};
///
/// struct Action {
///     log: Vec<String>,
/// }
///
/// impl Receiver<u64> for Action {
///     fn resolve(&self, name: &str) -> Option<Operation<Self, u64>> {
///         match name {
///             "authenticate!" => Some(Operation::Nullary(|action| {
///                 action.log.push("authenticate!".into());
///                 Ok(())
///             })),
///             _ => None,
///         }
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot resolve named operations for `{A}`",
    label = "missing `Receiver<{A}>` implementation",
    note = "Implement `resolve`, or annotate the impl block with `#[receiver]`."
)]
pub trait Receiver<A: ?Sized = ()>: Sized {
    /// Look up the operation registered under `name`.
    fn resolve(&self, name: &str) -> Option<Operation<Self, A>>;
}

// The unit receiver has no operations; chains of closures and objects can
// run against it.
impl<A: ?Sized> Receiver<A> for () {
    fn resolve(&self, _name: &str) -> Option<Operation<Self, A>> {
        None
    }
}

/// A hand-built name → operation table.
pub struct OperationTable<R, A: ?Sized = ()> {
    operations: HashMap<Name, Operation<R, A>>,
}

impl<R, A: ?Sized> OperationTable<R, A> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            operations: HashMap::new(),
        }
    }

    /// Register a zero-argument operation. A later registration under the
    /// same name replaces the earlier one.
    pub fn nullary(mut self, name: impl Into<Name>, op: fn(&mut R) -> CallbackResult) -> Self {
        self.operations.insert(name.into(), Operation::Nullary(op));
        self
    }

    /// Register a one-argument operation.
    pub fn unary(mut self, name: impl Into<Name>, op: fn(&mut R, &A) -> CallbackResult) -> Self {
        self.operations.insert(name.into(), Operation::Unary(op));
        self
    }

    /// Register an operation that already carries its tag.
    pub fn insert(&mut self, name: impl Into<Name>, op: Operation<R, A>) {
        self.operations.insert(name.into(), op);
    }

    /// Look up an operation.
    pub fn get(&self, name: &str) -> Option<Operation<R, A>> {
        self.operations.get(name).copied()
    }

    /// Whether an operation is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Iterate over the registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &Name> {
        self.operations.keys()
    }
}

impl<R, A: ?Sized> Default for OperationTable<R, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, A: ?Sized> Clone for OperationTable<R, A> {
    fn clone(&self) -> Self {
        Self {
            operations: self.operations.clone(),
        }
    }
}

impl<R, A: ?Sized> fmt::Debug for OperationTable<R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.operations.iter()).finish()
    }
}
