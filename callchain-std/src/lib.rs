//! # callchain-std
//!
//! Standard implementations for the callchain callback registry.
//!
//! This crate provides:
//! - **Chain**: [`Chain`], the ordered, deduplicating callback container
//! - **Callbacks**: [`Callback`], [`Closure`] and the [`Entry`] wrapper
//! - **Instrumentation**: `tracing` spans (feature `tracing`) and [`Traced`]
//! - **Testing**: receivers and callable objects in [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use callchain_core;

// Modules
pub mod callback;
pub mod chain;
pub mod entry;
pub mod instrument;
pub mod testing;

pub use callback::{Callback, Closure};
pub use chain::{Chain, Iter};
pub use entry::Entry;
pub use instrument::Traced;
