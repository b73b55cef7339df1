//! Outcome conversion traits.

use crate::error::{BoxError, CallbackResult};

/// Trait for converting a callback's return value into a [`CallbackResult`].
///
/// A chain discards what its callbacks return; only failures matter.
///
/// # Default Implementations
///
/// - `()` → success
/// - `bool` → success, the value is ignored
/// - `Option<T>` → delegates to `T`, `None` is success
/// - `Result<T, E>` → delegates to `T` or propagates the error
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `IntoOutcome`",
    label = "callback bodies must return `()`, `bool`, `Option` or `Result`",
    note = "IntoOutcome must implement the `into_outcome` method."
)]
pub trait IntoOutcome {
    /// Discard the value, keeping only the failure.
    fn into_outcome(self) -> CallbackResult;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> CallbackResult {
        Ok(())
    }
}

impl IntoOutcome for bool {
    fn into_outcome(self) -> CallbackResult {
        Ok(())
    }
}

impl<T: IntoOutcome> IntoOutcome for Option<T> {
    fn into_outcome(self) -> CallbackResult {
        match self {
            Some(t) => t.into_outcome(),
            None => Ok(()),
        }
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoOutcome,
    E: Into<BoxError>,
{
    fn into_outcome(self) -> CallbackResult {
        match self {
            Ok(t) => t.into_outcome(),
            Err(e) => Err(e.into()),
        }
    }
}
