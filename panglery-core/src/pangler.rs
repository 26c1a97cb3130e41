//! # Dispatcher (Pangler)
//!
//! A [`Pangler`] stores hooks in registration order and dispatches events to
//! them. Triggering walks the hooks exactly once each; every hook is matched
//! against the event as it stands after the hooks before it ran, so one
//! hook's updates can make a later hook eligible.
//!
//! ```rust,ignore
//! let mut pangler: Pangler = Pangler::new();
//! pangler.add_hook(HookSpec::new().modifies(["foo"]), |_ctx, args: &Event| {
//!     let foo: i64 = args.value("foo")?;
//!     Ok::<_, PanglerError>(fields! { foo: foo * 2 })
//! })?;
//! pangler.trigger(fields! { foo: 3 })?;
//! ```
//!
//! A pangler is usually declared once per type (the prototype) and bound to
//! instances with [`Pangler::bind`] or [`Pangler::cached_bind`]. Binding never
//! mutates the prototype; bound copies share its hooks.

use crate::{
    error::PanglerError,
    event::{Event, Value},
    handler::{Handler, HookContext, IntoUpdates},
    hook::{Contract, Hook, HookSpec},
    id::PanglerId,
};
use std::fmt;
use std::sync::{Arc, Weak};

/// An ordered collection of hooks, optionally bound to an instance.
pub struct Pangler<I = ()> {
    hooks: Vec<Arc<Hook<I>>>,
    id: PanglerId,
    instance: Option<Weak<I>>,
}

impl<I: 'static> Pangler<I> {
    /// Create an empty pangler with a process-unique id.
    pub fn new() -> Self {
        Self::with_id(PanglerId::unique())
    }

    /// Create an empty pangler with an explicit id.
    pub fn with_id(id: impl Into<PanglerId>) -> Self {
        Self {
            hooks: Vec::new(),
            id: id.into(),
            instance: None,
        }
    }

    /// Create an empty pangler whose binds are never cached.
    pub fn uncached() -> Self {
        Self::with_id(PanglerId::NoCache)
    }

    /// The cache identity shared by this pangler, its clones and bound copies.
    pub fn id(&self) -> &PanglerId {
        &self.id
    }

    /// Registered hooks, in registration order.
    pub fn hooks(&self) -> &[Arc<Hook<I>>] {
        &self.hooks
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Whether this pangler is bound to an instance (live or not).
    pub fn is_bound(&self) -> bool {
        self.instance.is_some()
    }

    /// The bound instance, if bound and still alive.
    pub fn instance(&self) -> Option<Arc<I>> {
        self.instance.as_ref().and_then(Weak::upgrade)
    }

    pub(crate) fn bound_instance(&self) -> Option<&Weak<I>> {
        self.instance.as_ref()
    }

    /// Register a closure (or fn item) as a hook.
    ///
    /// # Errors
    ///
    /// [`PanglerError::EmptyHook`] if the spec needs no field at all.
    pub fn add_hook<F, R>(&mut self, spec: HookSpec, handler: F) -> Result<(), PanglerError>
    where
        F: Fn(&HookContext<'_, I>, &Event) -> R + Send + Sync + 'static,
        R: IntoUpdates,
    {
        self.add_handler(spec, handler)
    }

    /// Register any [`Handler`] as a hook.
    ///
    /// # Errors
    ///
    /// [`PanglerError::EmptyHook`] if the spec needs no field at all.
    pub fn add_handler<H: Handler<I>>(
        &mut self,
        spec: HookSpec,
        handler: H,
    ) -> Result<(), PanglerError> {
        let contract = spec.resolve()?;
        self.push(handler, contract);
        Ok(())
    }

    /// Validate a spec now and register the handler later.
    ///
    /// The returned [`Decorator`] hands the handler back unchanged, so
    /// registration can be stacked in front of a binding:
    ///
    /// ```rust,ignore
    /// let on_save = pangler
    ///     .hook(HookSpec::new().when("event", "save"))?
    ///     .wrap(|_ctx: &HookContext<'_>, _args: &Event| println!("saved"));
    /// ```
    ///
    /// # Errors
    ///
    /// [`PanglerError::EmptyHook`] if the spec needs no field at all.
    pub fn hook(&mut self, spec: HookSpec) -> Result<Decorator<'_, I>, PanglerError> {
        let contract = spec.resolve()?;
        Ok(Decorator {
            pangler: self,
            contract,
        })
    }

    fn push<H: Handler<I>>(&mut self, handler: H, contract: Contract) {
        self.hooks.push(Arc::new(Hook::new(handler, contract)));
    }

    /// Trigger an event built from `(name, value)` pairs.
    ///
    /// # Errors
    ///
    /// [`PanglerError::EmptyTrigger`] without fields; otherwise the first
    /// error raised while executing a hook, which aborts the dispatch.
    pub fn trigger<K, V>(&self, fields: impl IntoIterator<Item = (K, V)>) -> Result<(), PanglerError>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut event: Event = fields.into_iter().collect();
        self.dispatch(&mut event)
    }

    /// Run the dispatch loop over a caller-owned event, mutating it in place.
    ///
    /// # Errors
    ///
    /// Same as [`Pangler::trigger`].
    pub fn dispatch(&self, event: &mut Event) -> Result<(), PanglerError> {
        if event.is_empty() {
            return Err(PanglerError::EmptyTrigger);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            id = %self.id,
            hooks = self.hooks.len(),
            fields = event.len(),
            bound = self.is_bound(),
            "triggering event"
        );

        for hook in &self.hooks {
            if hook.matches(event) {
                #[cfg(feature = "tracing")]
                tracing::trace!(needs = ?hook.needs(), "hook matched");

                hook.execute(self, event)?;
            }
        }
        Ok(())
    }

    /// A clone whose hooks are ours followed by each of `others`' hooks.
    pub fn combine<'a>(&self, others: impl IntoIterator<Item = &'a Pangler<I>>) -> Self
    where
        I: 'a,
    {
        let mut combined = self.clone();
        for other in others {
            combined.hooks.extend(other.hooks.iter().cloned());
        }
        combined
    }

    /// A copy of this pangler bound to `instance`.
    ///
    /// The copy holds only a weak reference: it never keeps the instance
    /// alive, and executing a hook after the instance is dropped fails with
    /// [`PanglerError::InstanceGone`].
    pub fn bind(&self, instance: &Arc<I>) -> Self {
        let mut bound = self.clone();
        bound.instance = Some(Arc::downgrade(instance));
        bound
    }
}

impl<I: 'static> Clone for Pangler<I> {
    fn clone(&self) -> Self {
        Self {
            hooks: self.hooks.clone(),
            id: self.id.clone(),
            instance: self.instance.clone(),
        }
    }
}

impl<I: 'static> Default for Pangler<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: 'static> fmt::Debug for Pangler<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pangler")
            .field("id", &self.id)
            .field("hooks", &self.hooks.len())
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// A validated registration waiting for its handler.
///
/// Created by [`Pangler::hook`].
#[must_use = "the hook is only registered once a handler is wrapped"]
pub struct Decorator<'a, I> {
    pangler: &'a mut Pangler<I>,
    contract: Contract,
}

impl<I: 'static> Decorator<'_, I> {
    /// Register a clone of `handler` and return the original.
    pub fn wrap<F, R>(self, handler: F) -> F
    where
        F: Fn(&HookContext<'_, I>, &Event) -> R + Clone + Send + Sync + 'static,
        R: IntoUpdates,
    {
        self.wrap_handler(handler)
    }

    /// Register a clone of any [`Handler`] and return the original.
    pub fn wrap_handler<H: Handler<I> + Clone>(self, handler: H) -> H {
        self.pangler.push(handler.clone(), self.contract);
        handler
    }
}
