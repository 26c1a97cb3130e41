//! # panglery-core
//!
//! Core dispatcher for the panglery event hook library.
//!
//! This crate has minimal dependencies and is what handler libraries and
//! extensions import when they don't need the standard handlers.
//!
//! # Layers
//!
//! ## Hook ([`Hook`], [`HookSpec`])
//!
//! A handler paired with the fields it needs, the fields it returns and the
//! literal values it is guarded by. Immutable once registered.
//!
//! ## Dispatcher ([`Pangler`])
//!
//! Hooks in registration order. `trigger` builds an [`Event`] and runs every
//! matching hook against it, each seeing the updates of those before it.
//!
//! ## Binding ([`Pangler::bind`], [`Pangler::cached_bind`], [`Hooked`])
//!
//! Instance-scoped copies that pass the instance to handlers, memoized per
//! `(instance, id)` without keeping the instance alive.
//!
//! ## Aggregation ([`Class`], [`Aggregate`])
//!
//! Panglers declared across a class hierarchy, combined in resolution order
//! and bound per instance.
//!
//! # Error Types
//!
//! - [`PanglerError`] - every fallible operation
//! - [`BoxError`] - what handlers fail with

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod aggregate;
mod bind;
mod cache;
mod class;
mod error;
mod event;
mod handler;
mod hook;
mod id;
mod pangler;

// Re-exports
pub use aggregate::{Aggregate, AggregateAccess};
pub use bind::{Hooked, forget};
pub use class::{Class, ClassBuilder};
pub use error::{BoxError, PanglerError};
pub use event::{Event, Value};
pub use handler::{Handler, HookContext, HookOutput, IntoUpdates};
pub use hook::{Hook, HookSpec};
pub use id::PanglerId;
pub use pangler::{Decorator, Pangler};

#[doc(hidden)]
pub use serde_json;
