//! # callchain-core
//!
//! Core traits for the callchain callback registry.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! receivers and callable objects that don't need the `Chain` container
//! from `callchain-std`.
//!
//! # Capabilities
//!
//! A chain runs three kinds of callbacks, and each kind leans on one
//! capability defined here:
//!
//! ## Named operations ([`Receiver`])
//!
//! A name registered on a chain is resolved at run time against the receiver.
//! Receivers publish an explicit lookup table through [`Receiver::resolve`],
//! either by hand with [`OperationTable`] or generated by `#[receiver]`.
//!
//! - **Lazy**: names are looked up when the chain runs, not when they are added
//! - **Declared arity**: every [`Operation`] is tagged nullary or unary
//!
//! ## Callable objects ([`Callable`])
//!
//! Opaque values with a zero- or one-argument entry point. They are invoked on
//! themselves and never see the receiver.
//!
//! ## Outcomes ([`IntoOutcome`])
//!
//! Callback bodies may return `()`, `bool`, `Option<T>` or `Result<T, E>`.
//! The value is discarded; only failure is kept.
//!
//! # Error Types
//!
//! - [`ChainError`] - Errors raised while running a chain
//! - [`BoxError`] - Errors raised by callback bodies

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod callable;
mod error;
mod name;
mod outcome;
mod receiver;

// Re-exports
pub use callable::{Arity, Callable};
pub use error::{BoxError, CallbackResult, ChainError};
pub use name::Name;
pub use outcome::IntoOutcome;
pub use receiver::{Operation, OperationTable, Receiver};
