//! # callchain - Ordered Callback Chains
//!
//! `callchain` keeps an ordered, duplicate-free list of callbacks and runs
//! them against a receiver. It is meant to sit inside a request-handling
//! component, e.g. the before/after hooks of a web action.
//!
//! Three kinds of callbacks can be registered:
//!
//! - **Named**: an operation name, resolved on the receiver when the chain runs
//! - **Object**: a [`Callable`] value, invoked on itself
//! - **Closure**: a function taking the receiver explicitly
//!
//! ## Quick Start
//!
//! ```rust
//! use callchain::{Chain, Operation, Receiver};
//!
//! struct Params {
//!     id: u64,
//! }
//!
//! #[derive(Default)]
//! struct Action {
//!     log: Vec<String>,
//! }
//!
//! impl Receiver<Params> for Action {
//!     fn resolve(&self, name: &str) -> Option<Operation<Self, Params>> {
//!         match name {
//!             "authenticate!" => Some(Operation::Nullary(|action| {
//!                 action.log.push("authenticate!".into());
//!                 Ok(())
//!             })),
//!             "set_article" => Some(Operation::Unary(|action, params| {
//!                 action.log.push(format!("set_article: {}", params.id));
//!                 Ok(())
//!             })),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut chain = Chain::new();
//! chain.add_all(["authenticate!", "set_article"]);
//!
//! let mut action = Action::default();
//! chain.run(&mut action, &Params { id: 23 }).unwrap();
//! assert_eq!(action.log, ["authenticate!", "set_article: 23"]);
//! ```
//!
//! ## Features
//!
//! - `macros`: the `#[receiver]` attribute, generating [`Receiver`] from an impl block
//! - `tracing`: spans and events for every chain run

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use callchain_core::{
    // Capabilities
    Arity,
    // Error types
    BoxError,
    Callable,
    CallbackResult,
    ChainError,
    IntoOutcome,
    // Names
    Name,
    Operation,
    OperationTable,
    Receiver,
};

pub use callchain_std::{Callback, Chain, Closure, Entry, Iter, Traced};

/// Standard callable wrappers.
pub mod instrument {
    pub use callchain_std::instrument::Traced;
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use callchain_std::testing::*;
}

/// Prelude module - common imports for callchain.
///
/// # Usage
///
/// ```rust
/// use callchain::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Capabilities
        Arity,
        // Errors
        BoxError,
        Callable,
        // Registration
        Callback,
        CallbackResult,
        Chain,
        ChainError,
        Closure,
        IntoOutcome,
        Operation,
        OperationTable,
        Receiver,
    };
}

#[cfg(feature = "macros")]
pub use callchain_macros::receiver;
