//! Registered callback values.
//!
//! A [`Callback`] is the raw value a caller hands to `Chain::add`. It is kept
//! as registered so that duplicates can be rejected and entries introspected.

use callchain_core::{Arity, Callable, CallbackResult, IntoOutcome, Name};
use std::{fmt, sync::Arc};

enum Body<R, A: ?Sized + 'static> {
    Nullary(Arc<dyn Fn(&mut R) -> CallbackResult + Send + Sync>),
    Unary(Arc<dyn Fn(&mut R, &A) -> CallbackResult + Send + Sync>),
}

/// An inline closure registered on a chain.
///
/// Closures take the receiver explicitly as `&mut R`, so they can reach its
/// state the same way a method would. The signature is fixed at construction:
/// [`Closure::nullary`] never sees the run argument, [`Closure::unary`] always
/// does.
///
/// Cloning a `Closure` yields a handle to the same closure; registering both
/// handles on one chain keeps only the first.
///
/// # Example
///
/// ```rust
/// use callchain_std::Closure;
///
/// struct Action {
///     log: Vec<String>,
/// }
///
/// let authenticate = Closure::<Action, u64>::nullary(|action: &mut Action| {
///     action.log.push("authenticate!".to_string())
/// });
/// let set_article = Closure::<Action, u64>::unary(|action: &mut Action, id: &u64| {
///     action.log.push(format!("set_article: {id}"))
/// });
/// ```
pub struct Closure<R, A: ?Sized + 'static = ()> {
    body: Body<R, A>,
}

impl<R, A: ?Sized + 'static> Closure<R, A> {
    /// Wrap a closure that takes only the receiver.
    pub fn nullary<F, O>(f: F) -> Self
    where
        F: Fn(&mut R) -> O + Send + Sync + 'static,
        O: IntoOutcome,
    {
        Self {
            body: Body::Nullary(Arc::new(move |receiver: &mut R| f(receiver).into_outcome())),
        }
    }

    /// Wrap a closure that takes the receiver and the run argument.
    pub fn unary<F, O>(f: F) -> Self
    where
        F: Fn(&mut R, &A) -> O + Send + Sync + 'static,
        O: IntoOutcome,
    {
        Self {
            body: Body::Unary(Arc::new(move |receiver: &mut R, args: &A| {
                f(receiver, args).into_outcome()
            })),
        }
    }

    /// The declared signature.
    pub fn arity(&self) -> Arity {
        match self.body {
            Body::Nullary(_) => Arity::Nullary,
            Body::Unary(_) => Arity::Unary,
        }
    }

    /// Whether both handles point at the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.body, &other.body) {
            (Body::Nullary(a), Body::Nullary(b)) => Arc::ptr_eq(a, b),
            (Body::Unary(a), Body::Unary(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Run the closure against `receiver`.
    pub fn invoke(&self, receiver: &mut R, args: &A) -> CallbackResult {
        match &self.body {
            Body::Nullary(f) => f(receiver),
            Body::Unary(f) => f(receiver, args),
        }
    }
}

impl<R, A: ?Sized + 'static> Clone for Closure<R, A> {
    fn clone(&self) -> Self {
        let body = match &self.body {
            Body::Nullary(f) => Body::Nullary(Arc::clone(f)),
            Body::Unary(f) => Body::Unary(Arc::clone(f)),
        };
        Self { body }
    }
}

impl<R, A: ?Sized + 'static> fmt::Debug for Closure<R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Closure").field(&self.arity()).finish()
    }
}

/// A raw callback as registered on a chain.
///
/// # Equality
///
/// `==` is the chain's uniqueness rule:
///
/// - `Named` entries compare by value: the same name is the same callback
/// - `Object` entries compare with [`Callable::same_callable`], identity by default
/// - `Closure` entries compare by identity
/// - Different kinds are never equal
pub enum Callback<R, A: ?Sized + 'static = ()> {
    /// An operation looked up on the receiver by name.
    Named(Name),
    /// An object invoked on itself.
    Object(Arc<dyn Callable<A>>),
    /// A closure invoked with the receiver.
    Closure(Closure<R, A>),
}

impl<R, A: ?Sized + 'static> Callback<R, A> {
    /// Register a named operation.
    pub fn named(name: impl Into<Name>) -> Self {
        Callback::Named(name.into())
    }

    /// Register a new callable object.
    pub fn object<C: Callable<A>>(callable: C) -> Self {
        Callback::Object(Arc::new(callable))
    }

    /// Register a callable object that may already be registered elsewhere.
    pub fn shared(callable: Arc<dyn Callable<A>>) -> Self {
        Callback::Object(callable)
    }

    /// A short label for the kind of callback.
    pub fn kind(&self) -> &'static str {
        match self {
            Callback::Named(_) => "named",
            Callback::Object(_) => "object",
            Callback::Closure(_) => "closure",
        }
    }
}

impl<R, A: ?Sized + 'static> PartialEq for Callback<R, A> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Callback::Named(a), Callback::Named(b)) => a == b,
            (Callback::Object(a), Callback::Object(b)) => a.same_callable(b.as_ref()),
            (Callback::Closure(a), Callback::Closure(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl<R, A: ?Sized + 'static> Clone for Callback<R, A> {
    fn clone(&self) -> Self {
        match self {
            Callback::Named(name) => Callback::Named(name.clone()),
            Callback::Object(obj) => Callback::Object(Arc::clone(obj)),
            Callback::Closure(closure) => Callback::Closure(closure.clone()),
        }
    }
}

impl<R, A: ?Sized + 'static> fmt::Debug for Callback<R, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Callback::Object(obj) => f.debug_tuple("Object").field(&obj.arity()).finish(),
            Callback::Closure(closure) => fmt::Debug::fmt(closure, f),
        }
    }
}

impl<R, A: ?Sized + 'static> From<Name> for Callback<R, A> {
    fn from(name: Name) -> Self {
        Callback::Named(name)
    }
}

impl<R, A: ?Sized + 'static> From<&'static str> for Callback<R, A> {
    fn from(name: &'static str) -> Self {
        Callback::Named(Name::from(name))
    }
}

impl<R, A: ?Sized + 'static> From<String> for Callback<R, A> {
    fn from(name: String) -> Self {
        Callback::Named(Name::from(name))
    }
}

impl<R, A: ?Sized + 'static> From<Closure<R, A>> for Callback<R, A> {
    fn from(closure: Closure<R, A>) -> Self {
        Callback::Closure(closure)
    }
}

impl<R, A: ?Sized + 'static, C: Callable<A>> From<Arc<C>> for Callback<R, A> {
    fn from(callable: Arc<C>) -> Self {
        Callback::Object(callable)
    }
}
