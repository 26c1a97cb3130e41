//! # panglery - Event Hooks
//!
//! `panglery` dispatches events to hooks: handlers guarded by the fields
//! they need and the literal values they require. Handlers may read, add and
//! rewrite event fields, and every later hook sees those changes.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use panglery::prelude::*;
//!
//! let mut pangler: Pangler = Pangler::new();
//!
//! pangler.add_hook(HookSpec::new().modifies(["foo"]), |_ctx: &HookContext<'_>, args: &Event| {
//!     let foo: i64 = args.value("foo")?;
//!     Ok::<_, PanglerError>(fields! { foo: foo * 2 })
//! })?;
//!
//! pangler.add_hook(HookSpec::new().needs(["foo"]), |_ctx: &HookContext<'_>, args: &Event| {
//!     println!("foo is now {}", args.get("foo").unwrap());
//! })?;
//!
//! pangler.trigger(fields! { foo: 3 })?; // prints "foo is now 6"
//! ```
//!
//! ## Instances and Hierarchies
//!
//! A pangler declared for a type is bound to instances with
//! [`Pangler::cached_bind`] (or [`Hooked::hooks`]); handlers then receive the
//! instance through [`HookContext::instance`]. [`Aggregate`] combines the
//! panglers declared along a [`Class`] hierarchy.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use panglery_core::{
    // Aggregation
    Aggregate,
    AggregateAccess,
    // Error types
    BoxError,
    Class,
    ClassBuilder,
    Decorator,
    // Event
    Event,
    // Handler
    Handler,
    // Hook
    Hook,
    HookContext,
    HookOutput,
    HookSpec,
    // Binding
    Hooked,
    IntoUpdates,
    // Dispatcher
    Pangler,
    PanglerError,
    PanglerId,
    Value,
    fields,
    forget,
};

/// Standard handler implementations.
pub mod hooks {
    pub use panglery_std::hooks::LoggingHandler;
}

/// Testing utilities.
pub mod testing {
    pub use panglery_std::testing::{CountingHandler, RecordingHandler};
}

/// Prelude module - common imports for panglery.
///
/// # Usage
///
/// ```rust,ignore
/// use panglery::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Aggregate, Class, Event, Handler, HookContext, HookSpec, Hooked, Pangler, PanglerError,
        PanglerId, Value, fields,
    };
}

#[cfg(feature = "macros")]
pub use panglery_macros::hook;
