//! # Aggregation
//!
//! An [`Aggregate`] gathers the panglers a class hierarchy declares under one
//! attribute name and combines them, most derived class first, into a single
//! pangler bound to an instance. The result is cached per
//! `(instance, aggregate id)`.
//!
//! An aggregate with no attribute name is inert: accessing it through an
//! instance yields the aggregate itself.

use crate::{
    cache::AGGREGATES,
    class::Class,
    id::PanglerId,
    pangler::Pangler,
};
use std::fmt;
use std::sync::Arc;

/// Collects a named pangler attribute across a class hierarchy.
#[derive(Debug, Clone)]
pub struct Aggregate {
    attribute: Option<String>,
    id: PanglerId,
}

/// The result of accessing an [`Aggregate`] through an instance.
pub enum AggregateAccess<'a, I> {
    /// The aggregate has no attribute name yet.
    Inert(&'a Aggregate),
    /// The combined pangler, bound to the instance.
    Bound(Arc<Pangler<I>>),
}

impl<I: 'static> fmt::Debug for AggregateAccess<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateAccess::Inert(aggregate) => f.debug_tuple("Inert").field(aggregate).finish(),
            AggregateAccess::Bound(pangler) => f.debug_tuple("Bound").field(pangler).finish(),
        }
    }
}

impl<I: 'static> AggregateAccess<'_, I> {
    /// The bound pangler, or `None` for an inert aggregate.
    pub fn into_bound(self) -> Option<Arc<Pangler<I>>> {
        match self {
            AggregateAccess::Inert(_) => None,
            AggregateAccess::Bound(pangler) => Some(pangler),
        }
    }
}

impl Aggregate {
    /// Aggregate `attribute` under a process-unique id.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self::with_id(attribute, PanglerId::unique())
    }

    /// Aggregate `attribute` under an explicit id.
    pub fn with_id(attribute: impl Into<String>, id: impl Into<PanglerId>) -> Self {
        Self {
            attribute: Some(attribute.into()),
            id: id.into(),
        }
    }

    /// An aggregate without an attribute name.
    pub fn unbound() -> Self {
        Self {
            attribute: None,
            id: PanglerId::unique(),
        }
    }

    /// The attribute collected, if configured.
    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// The cache id of the combined panglers.
    pub fn id(&self) -> &PanglerId {
        &self.id
    }

    /// Combine, in resolution order, every pangler the hierarchy of `class`
    /// declares under the attribute. Nothing is bound or cached.
    ///
    /// An inert aggregate, or a hierarchy that declares nothing, yields an
    /// empty pangler.
    pub fn collect<I: 'static>(&self, class: &Class<I>) -> Pangler<I> {
        let base = Pangler::with_id(self.id.clone());
        let Some(attribute) = self.attribute.as_deref() else {
            return base;
        };
        base.combine(
            class
                .resolution_order()
                .filter_map(|ancestor| ancestor.attribute(attribute)),
        )
    }

    /// Access the aggregate through `instance` of `class`.
    ///
    /// A cached combined pangler for `(instance, id)` is returned as-is;
    /// otherwise the hierarchy is collected, bound and cached.
    pub fn get<'a, I>(&'a self, instance: &Arc<I>, class: &Class<I>) -> AggregateAccess<'a, I>
    where
        I: Send + Sync + 'static,
    {
        if self.attribute.is_none() {
            return AggregateAccess::Inert(self);
        }
        if !self.id.is_cacheable() {
            return AggregateAccess::Bound(Arc::new(self.collect(class).bind(instance)));
        }
        let bound = AGGREGATES.get_or_insert_with(instance, &self.id, || {
            self.collect(class).bind(instance)
        });
        AggregateAccess::Bound(bound)
    }
}
