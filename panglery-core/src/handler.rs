//! # Handlers
//!
//! A handler is the opaque body of a hook. It receives a [`HookContext`]
//! (the dispatcher plus, for bound panglers, the instance) and the event
//! fields it declared interest in, and may hand back updates.
//!
//! # Usage Patterns
//!
//! 1. **Closure**: `|ctx: &HookContext<'_, W>, args: &Event| { ... }`
//! 2. **Struct implementation**: `impl Handler<W> for MyHandler`
//!
//! Return types convert through [`IntoUpdates`]: `()`, an [`Event`],
//! `Option<Event>`, or a `Result` of any of those.

use crate::{
    error::BoxError,
    event::Event,
    pangler::Pangler,
};
use std::sync::Arc;

/// What a handler produced: updates to merge, or nothing.
pub type HookOutput = Result<Option<Event>, BoxError>;

/// Call-site information handed to every handler.
pub struct HookContext<'a, I = ()> {
    pangler: &'a Pangler<I>,
    instance: Option<Arc<I>>,
}

impl<'a, I> HookContext<'a, I> {
    pub(crate) fn new(pangler: &'a Pangler<I>, instance: Option<Arc<I>>) -> Self {
        Self { pangler, instance }
    }

    /// The pangler running the hook.
    pub fn pangler(&self) -> &'a Pangler<I> {
        self.pangler
    }

    /// The bound instance, if the pangler is bound.
    pub fn instance(&self) -> Option<&Arc<I>> {
        self.instance.as_ref()
    }
}

/// The body of a hook.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a hook handler for instances of `{I}`",
    label = "missing `Handler<{I}>` implementation",
    note = "Closures must have the shape `Fn(&HookContext<'_, {I}>, &Event) -> R` with `R: IntoUpdates`."
)]
pub trait Handler<I>: Send + Sync + 'static {
    /// Run the handler with the matched arguments.
    fn call(&self, ctx: &HookContext<'_, I>, args: &Event) -> HookOutput;
}

// Blanket impl for closures and fn items
impl<I, F, R> Handler<I> for F
where
    F: Fn(&HookContext<'_, I>, &Event) -> R + Send + Sync + 'static,
    R: IntoUpdates,
{
    fn call(&self, ctx: &HookContext<'_, I>, args: &Event) -> HookOutput {
        (self)(ctx, args).into_updates()
    }
}

/// Conversion of handler return values into event updates.
pub trait IntoUpdates {
    /// Convert into updates. `Ok(None)` leaves the event unchanged.
    fn into_updates(self) -> HookOutput;
}

impl IntoUpdates for () {
    fn into_updates(self) -> HookOutput {
        Ok(None)
    }
}

impl IntoUpdates for Event {
    fn into_updates(self) -> HookOutput {
        Ok(Some(self))
    }
}

impl IntoUpdates for Option<Event> {
    fn into_updates(self) -> HookOutput {
        Ok(self)
    }
}

impl<T, E> IntoUpdates for Result<T, E>
where
    T: IntoUpdates,
    E: Into<BoxError>,
{
    fn into_updates(self) -> HookOutput {
        self.map_err(Into::into)?.into_updates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_and_none_produce_no_updates() {
        assert!(().into_updates().unwrap().is_none());
        assert!(None::<Event>.into_updates().unwrap().is_none());
    }

    #[test]
    fn test_result_forwards_inner_conversion() {
        let ok: Result<Event, std::io::Error> = Ok(crate::fields! { foo: 1 });
        assert_eq!(ok.into_updates().unwrap(), Some(crate::fields! { foo: 1 }));

        let err: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        assert_eq!(err.into_updates().unwrap_err().to_string(), "boom");
    }

    #[test]
    fn test_closure_is_a_handler() {
        fn assert_handler<H: Handler<()>>(_: &H) {}
        let handler = |_ctx: &HookContext<'_, ()>, args: &Event| args.clone();
        assert_handler(&handler);
    }
}
