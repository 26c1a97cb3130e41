//! # Instance Binding
//!
//! A bound pangler passes its instance to every handler, the way a method
//! receives `self`. [`Pangler::cached_bind`] memoizes bound copies per
//! `(instance, id)` so repeated lookups return the very same pangler.
//!
//! Types that own a prototype pangler expose it through [`Hooked`]:
//!
//! ```rust,ignore
//! lazy_static! {
//!     static ref WIDGET_HOOKS: Pangler<Widget> = widget_hooks();
//! }
//!
//! impl Hooked for Widget {
//!     fn prototype() -> &'static Pangler<Self> {
//!         &WIDGET_HOOKS
//!     }
//! }
//!
//! let widget = Arc::new(Widget::default());
//! widget.hooks().trigger(fields! { event: "resize" })?;
//! ```

use crate::{
    cache::{AGGREGATES, BINDINGS},
    error::PanglerError,
    id::PanglerId,
    pangler::Pangler,
};
use std::sync::Arc;

impl<I: Send + Sync + 'static> Pangler<I> {
    /// Bind to `instance`, reusing a previously cached bound copy.
    ///
    /// Panglers with [`PanglerId::NoCache`] bind afresh on every call.
    pub fn cached_bind(&self, instance: &Arc<I>) -> Arc<Self> {
        if !self.id().is_cacheable() {
            return Arc::new(self.bind(instance));
        }
        BINDINGS.get_or_insert_with(instance, self.id(), || self.bind(instance))
    }

    /// Look up the cached bound copy for `(instance, id)` without creating one.
    ///
    /// # Errors
    ///
    /// [`PanglerError::NotBound`] if nothing was bound under that key yet.
    pub fn fetch_bound(instance: &Arc<I>, id: &PanglerId) -> Result<Arc<Self>, PanglerError> {
        BINDINGS
            .get(instance, id)
            .ok_or_else(|| PanglerError::NotBound(id.clone()))
    }
}

/// Drop every cached bound and aggregated pangler for `instance`.
///
/// Dead instances are swept lazily; call this from `Drop` (or earlier) to
/// release the cached panglers right away.
pub fn forget<I>(instance: &Arc<I>) {
    BINDINGS.forget(instance);
    AGGREGATES.forget(instance);
}

/// A type that declares a prototype pangler for its instances.
pub trait Hooked: Sized + Send + Sync + 'static {
    /// The type-level, unbound pangler.
    fn prototype() -> &'static Pangler<Self>;

    /// The pangler bound to this instance, cached per instance.
    fn hooks(self: &Arc<Self>) -> Arc<Pangler<Self>> {
        Self::prototype().cached_bind(self)
    }
}
