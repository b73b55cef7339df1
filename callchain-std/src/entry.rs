//! Chain entries.

use crate::callback::Callback;
use callchain_core::{Arity, ChainError, Name, Receiver};
use std::fmt;

/// One registered callback, normalized to a uniform `invoke` capability.
///
/// Entries are created by the chain when a callback is accepted and never
/// change afterwards. [`callback`](Entry::callback) returns the value exactly
/// as it was registered.
pub struct Entry<R, A: ?Sized + 'static = ()> {
    callback: Callback<R, A>,
}

impl<R, A: ?Sized + 'static> Entry<R, A> {
    pub(crate) fn new(callback: Callback<R, A>) -> Self {
        Self { callback }
    }

    /// The raw registered value.
    pub fn callback(&self) -> &Callback<R, A> {
        &self.callback
    }

    /// The kind of the registered value.
    pub fn kind(&self) -> &'static str {
        self.callback.kind()
    }

    /// The operation name, for named entries.
    pub fn name(&self) -> Option<&Name> {
        match &self.callback {
            Callback::Named(name) => Some(name),
            _ => None,
        }
    }

    /// The declared signature.
    ///
    /// `None` for named entries: their signature is only known once the name
    /// resolves against a receiver.
    pub fn arity(&self) -> Option<Arity> {
        match &self.callback {
            Callback::Named(_) => None,
            Callback::Object(obj) => Some(obj.arity()),
            Callback::Closure(closure) => Some(closure.arity()),
        }
    }

    /// Invoke the callback against `receiver`.
    ///
    /// Nullary callbacks never see `args`. Objects are invoked on themselves
    /// and never see `receiver`.
    pub fn invoke(&self, receiver: &mut R, args: &A) -> Result<(), ChainError>
    where
        R: Receiver<A>,
    {
        let result = match &self.callback {
            Callback::Named(name) => {
                let op = receiver
                    .resolve(name)
                    .ok_or_else(|| unresolved::<R>(name))?;
                op.invoke(receiver, args)
            }
            Callback::Object(obj) => match obj.arity() {
                Arity::Nullary => obj.call(),
                Arity::Unary => obj.call_with(args),
            },
            Callback::Closure(closure) => closure.invoke(receiver, args),
        };
        result.map_err(ChainError::from_callback)
    }

    /// Resolve a named entry against `receiver` without invoking it.
    pub(crate) fn check(&self, receiver: &R) -> Result<(), ChainError>
    where
        R: Receiver<A>,
    {
        match &self.callback {
            Callback::Named(name) if receiver.resolve(name).is_none() => Err(unresolved::<R>(name)),
            _ => Ok(()),
        }
    }
}

fn unresolved<R>(name: &Name) -> ChainError {
    ChainError::UnresolvedOperation {
        name: name.clone(),
        receiver: std::any::type_name::<R>(),
    }
}

impl<R, A: ?Sized + 'static> fmt::Debug for Entry<R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("callback", &self.callback)
            .finish()
    }
}
