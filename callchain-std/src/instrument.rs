//! Tracing instrumentation.
//!
//! With the `tracing` feature a chain run opens a `chain.run` span and reports
//! each callback it invokes. Without the feature everything here compiles to
//! nothing.

use crate::{callback::Callback, entry::Entry};
use callchain_core::{Arity, Callable, CallbackResult, ChainError};

/// Keeps the `chain.run` span entered for the duration of a run.
pub(crate) struct RunGuard {
    #[cfg(feature = "tracing")]
    _span: tracing::span::EnteredSpan,
}

#[cfg(feature = "tracing")]
pub(crate) fn run_span(entries: usize) -> RunGuard {
    RunGuard {
        _span: tracing::debug_span!("chain.run", entries).entered(),
    }
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub(crate) fn run_span(_entries: usize) -> RunGuard {
    RunGuard {}
}

#[cfg(feature = "tracing")]
pub(crate) fn invoking<R, A: ?Sized + 'static>(index: usize, entry: &Entry<R, A>) {
    tracing::trace!(
        index,
        kind = entry.kind(),
        name = entry.name().map(|name| name.as_str()),
        "invoking callback"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub(crate) fn invoking<R, A: ?Sized + 'static>(_index: usize, _entry: &Entry<R, A>) {}

#[cfg(feature = "tracing")]
pub(crate) fn failed<R, A: ?Sized + 'static>(index: usize, entry: &Entry<R, A>, err: &ChainError) {
    tracing::debug!(
        index,
        kind = entry.kind(),
        name = entry.name().map(|name| name.as_str()),
        error = %err,
        "callback failed, aborting chain"
    );
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub(crate) fn failed<R, A: ?Sized + 'static>(
    _index: usize,
    _entry: &Entry<R, A>,
    _err: &ChainError,
) {
}

#[cfg(feature = "tracing")]
pub(crate) fn skipped<R, A: ?Sized + 'static>(callback: &Callback<R, A>) {
    tracing::trace!(?callback, "skipping duplicate callback");
}

#[cfg(not(feature = "tracing"))]
#[inline(always)]
pub(crate) fn skipped<R, A: ?Sized + 'static>(_callback: &Callback<R, A>) {}

/// A [`Callable`] wrapper that records a span around each invocation.
///
/// The wrapper keeps the inner object's arity. Equality is the wrapper's own
/// identity, so wrapping the same object twice yields two callbacks.
///
/// # Example
///
/// ```rust,ignore
/// chain.add(Callback::object(Traced::new(AuditLog::default(), "audit")));
/// ```
pub struct Traced<C> {
    inner: C,
    name: &'static str,
}

impl<C> Traced<C> {
    /// Wrap `inner`, labelling its spans with `name`.
    pub const fn new(inner: C, name: &'static str) -> Self {
        Self { inner, name }
    }

    /// The wrapped object.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// The span label.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<A: ?Sized, C: Callable<A>> Callable<A> for Traced<C> {
    fn arity(&self) -> Arity {
        self.inner.arity()
    }

    fn call(&self) -> CallbackResult {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("callable", name = self.name).entered();
        self.inner.call()
    }

    fn call_with(&self, args: &A) -> CallbackResult {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("callable", name = self.name).entered();
        self.inner.call_with(args)
    }
}
