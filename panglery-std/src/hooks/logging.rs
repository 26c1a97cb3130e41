//! Logging handler - observability for dispatch.

use panglery_core::{Event, Handler, HookContext, HookOutput};

/// A handler that logs its arguments and leaves the event unchanged.
///
/// Logs through `tracing` at debug level when the `tracing` feature is on.
///
/// # Example
///
/// ```rust,ignore
/// use panglery::{HookSpec, hooks::LoggingHandler};
///
/// pangler.add_handler(
///     HookSpec::new().needs(["path"]).when("event", "save"),
///     LoggingHandler::named("save"),
/// )?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingHandler {
    name: &'static str,
}

impl LoggingHandler {
    /// Create a `LoggingHandler` with a default name.
    pub fn new() -> Self {
        Self { name: "hook" }
    }

    /// Create a `LoggingHandler` with a custom name.
    ///
    /// The name identifies the hook in log records.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log records.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: 'static> Handler<I> for LoggingHandler {
    fn call(&self, ctx: &HookContext<'_, I>, args: &Event) -> HookOutput {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                name = %self.name,
                pangler = %ctx.pangler().id(),
                bound = ctx.instance().is_some(),
                ?args,
                "hook invoked"
            );
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (self.name, ctx, args);
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panglery_core::{HookSpec, Pangler, fields};

    #[test]
    fn test_logging_handler_leaves_event_unchanged() {
        let mut pangler: Pangler = Pangler::new();
        pangler
            .add_handler(HookSpec::new().needs(["foo"]), LoggingHandler::named("probe"))
            .unwrap();
        let mut event = fields! { foo: 1, bar: 2 };
        pangler.dispatch(&mut event).unwrap();
        assert_eq!(event, fields! { foo: 1, bar: 2 });
    }

    #[test]
    fn test_logging_handler_names() {
        assert_eq!(LoggingHandler::new().name(), "hook");
        assert_eq!(LoggingHandler::named("save").name(), "save");
    }
}
