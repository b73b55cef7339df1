//! The callback chain.

use crate::{callback::Callback, callback::Closure, entry::Entry, instrument};
use callchain_core::{ChainError, IntoOutcome, Receiver};
use std::{fmt, slice};

/// An ordered set of callbacks run against a receiver.
///
/// Callbacks run in registration order. A callback equal to one already on
/// the chain (see [`Callback`] for the rule) is skipped without error, so
/// adding the same name twice runs it once.
///
/// # Example
///
/// ```rust
/// use callchain_core::{Operation, Receiver};
/// use callchain_std::{Chain, Closure};
///
/// #[derive(Default)]
/// struct Action {
///     log: Vec<String>,
/// }
///
/// impl Receiver<u64> for Action {
///     fn resolve(&self, name: &str) -> Option<Operation<Self, u64>> {
///         match name {
///             "set_article" => Some(Operation::Unary(|action, id| {
///                 action.log.push(format!("set_article: {id}"));
///                 Ok(())
///             })),
///             _ => None,
///         }
///     }
/// }
///
/// let mut chain = Chain::<Action, u64>::new();
/// chain
///     .add_fn(|action: &mut Action| action.log.push("authenticate!".into()))
///     .add("set_article")
///     .add("set_article");
/// assert_eq!(chain.len(), 2);
///
/// let mut action = Action::default();
/// chain.run(&mut action, &23).unwrap();
/// assert_eq!(action.log, ["authenticate!", "set_article: 23"]);
/// ```
pub struct Chain<R, A: ?Sized + 'static = ()> {
    entries: Vec<Entry<R, A>>,
}

impl<R, A: ?Sized + 'static> Chain<R, A> {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a callback unless an equal one is already registered.
    ///
    /// Returns whether the callback was appended.
    pub fn insert(&mut self, callback: impl Into<Callback<R, A>>) -> bool {
        let callback = callback.into();
        if self.contains(&callback) {
            instrument::skipped(&callback);
            return false;
        }
        self.entries.push(Entry::new(callback));
        true
    }

    /// Register a callback. Duplicates are skipped.
    pub fn add(&mut self, callback: impl Into<Callback<R, A>>) -> &mut Self {
        self.insert(callback);
        self
    }

    /// Register several callbacks, in order. Duplicates are skipped, including
    /// duplicates within `callbacks` itself.
    pub fn add_all<I>(&mut self, callbacks: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Callback<R, A>>,
    {
        for callback in callbacks {
            self.insert(callback);
        }
        self
    }

    /// Register an inline closure that takes only the receiver.
    pub fn add_fn<F, O>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut R) -> O + Send + Sync + 'static,
        O: IntoOutcome,
    {
        self.add(Closure::nullary(f))
    }

    /// Register an inline closure that takes the receiver and the run argument.
    pub fn add_fn_with_args<F, O>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut R, &A) -> O + Send + Sync + 'static,
        O: IntoOutcome,
    {
        self.add(Closure::unary(f))
    }

    /// Whether a callback equal to `callback` is registered.
    pub fn contains(&self, callback: &Callback<R, A>) -> bool {
        self.entries.iter().any(|entry| entry.callback() == callback)
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first registered entry.
    pub fn first(&self) -> Option<&Entry<R, A>> {
        self.entries.first()
    }

    /// The entry at `index`.
    pub fn get(&self, index: usize) -> Option<&Entry<R, A>> {
        self.entries.get(index)
    }

    /// Iterate over the entries in registration order.
    pub fn iter(&self) -> Iter<'_, R, A> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Run every callback against `receiver`, in registration order.
    ///
    /// The first failing callback aborts the run; the callbacks after it are
    /// not invoked and the error is returned as is.
    pub fn run(&self, receiver: &mut R, args: &A) -> Result<(), ChainError>
    where
        R: Receiver<A>,
    {
        let _span = instrument::run_span(self.entries.len());
        for (index, entry) in self.entries.iter().enumerate() {
            instrument::invoking(index, entry);
            entry.invoke(receiver, args).inspect_err(|err| {
                instrument::failed(index, entry, err);
            })?;
        }
        Ok(())
    }

    /// Check that every named callback resolves on `receiver`.
    ///
    /// Nothing is invoked. Returns the first name that does not resolve.
    pub fn check(&self, receiver: &R) -> Result<(), ChainError>
    where
        R: Receiver<A>,
    {
        self.entries.iter().try_for_each(|entry| entry.check(receiver))
    }
}

impl<R, A: ?Sized + 'static> Default for Chain<R, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, A: ?Sized + 'static> fmt::Debug for Chain<R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}

impl<R, A: ?Sized + 'static, C: Into<Callback<R, A>>> Extend<C> for Chain<R, A> {
    fn extend<I: IntoIterator<Item = C>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<R, A: ?Sized + 'static, C: Into<Callback<R, A>>> FromIterator<C> for Chain<R, A> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        let mut chain = Self::new();
        chain.add_all(iter);
        chain
    }
}

impl<'a, R, A: ?Sized + 'static> IntoIterator for &'a Chain<R, A> {
    type Item = &'a Entry<R, A>;
    type IntoIter = Iter<'a, R, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`Chain`].
pub struct Iter<'a, R, A: ?Sized + 'static = ()> {
    inner: slice::Iter<'a, Entry<R, A>>,
}

impl<'a, R, A: ?Sized + 'static> Iterator for Iter<'a, R, A> {
    type Item = &'a Entry<R, A>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<R, A: ?Sized + 'static> DoubleEndedIterator for Iter<'_, R, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<R, A: ?Sized + 'static> ExactSizeIterator for Iter<'_, R, A> {}

impl<R, A: ?Sized + 'static> Clone for Iter<'_, R, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
