use proc_macro::TokenStream;

mod receiver;

/// Generates a `Receiver` implementation from an inherent `impl` block.
///
/// Every method taking `self` by reference (`&self`, `&mut self`,
/// `self: &Self` or `self: &mut Self`) becomes a named operation:
///
/// - no parameters besides `self` ⇒ `Operation::Nullary`
/// - one `&T` parameter ⇒ `Operation::Unary`, receiving the chain argument
/// - anything else is a compile error
///
/// The operation is named after the method. Use `#[operation(name = "...")]`
/// to register it under another name and `#[operation(skip)]` to leave a
/// method out. `#[operation(name = ...)]` on an associated function or a
/// by-value method is a compile error. Return values go through `IntoOutcome`.
///
/// The argument type is taken from `#[receiver(args = T)]`, or from the first
/// unary method. A block with only nullary operations implements `Receiver<A>`
/// for every `A`.
///
/// ```rust,ignore
/// #[callchain::receiver]
/// impl Action {
///     #[operation(name = "authenticate!")]
///     fn authenticate(&mut self) {
///         self.log.push("authenticate!".into());
///     }
///
///     fn set_article(&mut self, params: &Params) {
///         self.log.push(format!("set_article: {}", params.id));
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn receiver(attr: TokenStream, item: TokenStream) -> TokenStream {
    receiver::receiver_impl(attr, item)
}
