use proc_macro::TokenStream;

mod hook;

/// Register a function as a hook, decorator style.
///
/// The function itself is emitted unchanged. Next to it the macro generates
/// `register_<name>(pangler: &mut Pangler<I>) -> Result<(), PanglerError>`,
/// where `I` is read from the function's `&HookContext<'_, I>` argument
/// (`()` when omitted).
///
/// # Arguments
///
/// - `needs(a, b)`: fields the hook operates on
/// - `returns(c)`: fields the hook writes back
/// - `modifies(d)`: fields both needed and written back
/// - `when(event = "save", retries = 3)`: literal guards
///
/// Field names may be identifiers or string literals.
///
/// # Example
///
/// ```rust,ignore
/// #[panglery::hook(modifies(foo), when(event = "double"))]
/// fn double(_ctx: &HookContext<'_>, args: &Event) -> Result<Event, PanglerError> {
///     let foo: i64 = args.value("foo")?;
///     Ok(fields! { foo: foo * 2 })
/// }
///
/// let mut pangler: Pangler = Pangler::new();
/// register_double(&mut pangler)?;
/// ```
#[proc_macro_attribute]
pub fn hook(attr: TokenStream, item: TokenStream) -> TokenStream {
    hook::hook_impl(attr, item)
}
