//! Testing utilities for panglery.
//!
//! Handlers that make it easy to assert which hooks fired and with what.
//!
//! # Features
//!
//! - [`RecordingHandler`]: records the arguments of every call
//! - [`CountingHandler`]: counts invocations

use panglery_core::{Event, Handler, HookContext, HookOutput};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Handler
// ============================================================================

/// A handler that records the arguments it receives.
///
/// Clones share their record, so keep one clone to inspect after handing the
/// other to a pangler.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingHandler::new();
/// pangler.add_handler(HookSpec::new().needs(["x"]), recorder.clone())?;
///
/// pangler.trigger(fields! { x: 5 })?;
///
/// assert_eq!(recorder.calls(), vec![fields! { x: 5 }]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    calls: Arc<Mutex<Vec<Event>>>,
    bound: Arc<Mutex<Vec<bool>>>,
    response: Option<Event>,
}

impl RecordingHandler {
    /// Create a recorder that returns no updates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that returns `updates` on every call.
    pub fn responding(updates: Event) -> Self {
        Self {
            response: Some(updates),
            ..Self::default()
        }
    }

    fn lock<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
        slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Arguments of every call, oldest first.
    pub fn calls(&self) -> Vec<Event> {
        Self::lock(&self.calls).clone()
    }

    /// Whether each call came through a bound pangler, oldest first.
    pub fn bound_calls(&self) -> Vec<bool> {
        Self::lock(&self.bound).clone()
    }

    /// Number of calls.
    pub fn count(&self) -> usize {
        Self::lock(&self.calls).len()
    }

    /// Forget all recorded calls.
    pub fn clear(&self) {
        Self::lock(&self.calls).clear();
        Self::lock(&self.bound).clear();
    }
}

impl<I: 'static> Handler<I> for RecordingHandler {
    fn call(&self, ctx: &HookContext<'_, I>, args: &Event) -> HookOutput {
        Self::lock(&self.calls).push(args.clone());
        Self::lock(&self.bound).push(ctx.instance().is_some());
        Ok(self.response.clone())
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingHandler::new();
/// pangler.add_handler(HookSpec::new().when("event", "tick"), counter.clone())?;
///
/// pangler.trigger(fields! { event: "tick" })?;
///
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<I: 'static> Handler<I> for CountingHandler {
    fn call(&self, _ctx: &HookContext<'_, I>, _args: &Event) -> HookOutput {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }
}
