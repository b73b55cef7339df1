//! Testing utilities for callchain.
//!
//! This module provides receivers and callable objects that make it easy to
//! observe what a chain ran and in which order.
//!
//! # Features
//!
//! - [`Journal`]: A receiver with a log and a hand-built operation table
//! - [`RecordingCallable`]: An object that appends its label to a shared log
//! - [`CountingCallable`]: An object that counts invocations
//! - [`FailingCallable`]: An object that always fails with [`InjectedFailure`]

use callchain_core::{Arity, Callable, CallbackResult, Operation, OperationTable, Receiver};
use std::{
    fmt,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};
use thiserror::Error;

// ============================================================================
// Journal
// ============================================================================

/// A receiver that keeps a log and resolves names through an [`OperationTable`].
///
/// # Example
///
/// ```rust,ignore
/// let mut journal = Journal::with_operations(
///     OperationTable::new().nullary("open", |j: &mut Journal<u32>| {
///         j.push("open");
///         Ok(())
///     }),
/// );
///
/// chain.run(&mut journal, &1)?;
/// assert_eq!(journal.entries(), ["open"]);
/// ```
pub struct Journal<A: ?Sized = ()> {
    log: Vec<String>,
    operations: OperationTable<Journal<A>, A>,
}

impl<A: ?Sized> Journal<A> {
    /// Create a journal with no operations.
    pub fn new() -> Self {
        Self::with_operations(OperationTable::new())
    }

    /// Create a journal that resolves names through `operations`.
    pub fn with_operations(operations: OperationTable<Journal<A>, A>) -> Self {
        Self {
            log: Vec::new(),
            operations,
        }
    }

    /// Append a line to the log.
    pub fn push(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
    }

    /// The lines logged so far.
    pub fn entries(&self) -> &[String] {
        &self.log
    }

    /// Remove and return the oldest line.
    pub fn shift(&mut self) -> Option<String> {
        if self.log.is_empty() {
            None
        } else {
            Some(self.log.remove(0))
        }
    }

    /// Clear the log.
    pub fn clear(&mut self) {
        self.log.clear();
    }
}

impl<A: ?Sized> Default for Journal<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> Receiver<A> for Journal<A> {
    fn resolve(&self, name: &str) -> Option<Operation<Self, A>> {
        self.operations.get(name)
    }
}

impl<A: ?Sized> fmt::Debug for Journal<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Journal")
            .field("log", &self.log)
            .field("operations", &self.operations)
            .finish()
    }
}

// ============================================================================
// Recording Callable
// ============================================================================

/// A callable object that appends its label to a shared log.
///
/// Nullary recorders log the label; unary recorders log `label: args`,
/// formatting the argument with `Debug`. Clones share the log but are
/// distinct callbacks.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingCallable::new("audit");
/// let log = recorder.clone();
///
/// chain.add(Callback::object(recorder));
/// chain.run(&mut receiver, &())?;
///
/// assert_eq!(log.calls(), vec!["audit"]);
/// ```
pub struct RecordingCallable {
    label: String,
    arity: Arity,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingCallable {
    /// Create a nullary recorder.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            arity: Arity::Nullary,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a unary recorder.
    pub fn with_args(label: impl Into<String>) -> Self {
        Self {
            arity: Arity::Unary,
            ..Self::new(label)
        }
    }

    /// Create a recorder that logs into the same log as `self`.
    pub fn sibling(&self, label: impl Into<String>, arity: Arity) -> Self {
        Self {
            label: label.into(),
            arity,
            calls: self.calls.clone(),
        }
    }

    /// Get a clone of the recorded calls.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the number of recorded calls.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Clone for RecordingCallable {
    fn clone(&self) -> Self {
        self.sibling(self.label.clone(), self.arity)
    }
}

impl<A: fmt::Debug + ?Sized> Callable<A> for RecordingCallable {
    fn arity(&self) -> Arity {
        self.arity
    }

    fn call(&self) -> CallbackResult {
        self.calls.lock().unwrap().push(self.label.clone());
        Ok(())
    }

    fn call_with(&self, args: &A) -> CallbackResult {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}: {:?}", self.label, args));
        Ok(())
    }
}

// ============================================================================
// Counting Callable
// ============================================================================

/// A nullary callable object that counts invocations.
pub struct CountingCallable {
    count: Arc<AtomicUsize>,
}

impl CountingCallable {
    /// Create a new counting callable.
    pub fn new() -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Default for CountingCallable {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CountingCallable {
    fn clone(&self) -> Self {
        Self {
            count: self.count.clone(),
        }
    }
}

impl<A: ?Sized> Callable<A> for CountingCallable {
    fn call(&self) -> CallbackResult {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Failing Callable
// ============================================================================

/// The error returned by [`FailingCallable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InjectedFailure {
    /// The configured message.
    pub message: String,
}

/// A nullary callable object that always fails with the given message.
pub struct FailingCallable {
    message: String,
}

impl FailingCallable {
    /// Create a callable that fails with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<A: ?Sized> Callable<A> for FailingCallable {
    fn call(&self) -> CallbackResult {
        Err(Box::new(InjectedFailure {
            message: self.message.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_journal_shift() {
        let mut journal = Journal::<()>::new();
        journal.push("a");
        journal.push(String::from("b"));
        assert_eq!(journal.shift().as_deref(), Some("a"));
        assert_eq!(journal.entries(), ["b"]);
        journal.clear();
        assert_eq!(journal.shift(), None);
    }

    #[test]
    fn test_recorder_siblings_share_log() {
        let first = RecordingCallable::new("first");
        let second = first.sibling("second", Arity::Unary);
        Callable::<u8>::call(&first).unwrap();
        Callable::<u8>::call_with(&second, &7).unwrap();
        assert_eq!(first.calls(), vec!["first", "second: 7"]);
        assert_eq!(second.count(), 2);
    }

    #[test]
    fn test_failing_callable() {
        let err = Callable::<()>::call(&FailingCallable::new("nope")).unwrap_err();
        assert_eq!(err.to_string(), "nope");
        let failure = err.downcast::<InjectedFailure>().unwrap();
        assert_eq!(failure.message, "nope");
    }
}
