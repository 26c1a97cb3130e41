//! # Type Hierarchy
//!
//! A [`Class`] is an explicit, runtime description of a type: a name, its
//! ordered bases, and the panglers it declares under attribute names.
//! Its resolution order (itself first, then every ancestor exactly once) is
//! the C3 linearization of its bases, computed once when the class is built.
//!
//! ```rust,ignore
//! let a = Class::builder("A").attribute("hooks", a_hooks).build()?;
//! let b = Class::builder("B").extends(&a).attribute("hooks", b_hooks).build()?;
//! let c = Class::builder("C").extends(&a).build()?;
//! let d = Class::builder("D").extends(&b).extends(&c).build()?;
//! assert_eq!(d.resolution_order().map(Class::name).collect::<Vec<_>>(), ["D", "B", "C", "A"]);
//! ```

use crate::{error::PanglerError, pangler::Pangler};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A node in a type hierarchy whose instances are of type `I`.
pub struct Class<I> {
    name: String,
    bases: Vec<Arc<Class<I>>>,
    attributes: BTreeMap<String, Pangler<I>>,
    ancestors: Vec<Arc<Class<I>>>,
}

impl<I: 'static> Class<I> {
    /// Start describing a class.
    pub fn builder(name: impl Into<String>) -> ClassBuilder<I> {
        ClassBuilder {
            name: name.into(),
            bases: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    /// The class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct bases, in declaration order.
    pub fn bases(&self) -> &[Arc<Class<I>>] {
        &self.bases
    }

    /// The pangler this class itself declares under `name`.
    ///
    /// Inherited attributes are not consulted; this is the unbound
    /// prototype as declared on the type.
    pub fn attribute(&self, name: &str) -> Option<&Pangler<I>> {
        self.attributes.get(name)
    }

    /// This class followed by its ancestors, most derived first.
    pub fn resolution_order(&self) -> impl Iterator<Item = &Class<I>> {
        std::iter::once(self).chain(self.ancestors.iter().map(Arc::as_ref))
    }

    /// Whether `other` is this class or one of its ancestors.
    pub fn is_subclass_of(&self, other: &Class<I>) -> bool {
        self.resolution_order().any(|class| std::ptr::eq(class, other))
    }
}

impl<I: 'static> fmt::Debug for Class<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field(
                "bases",
                &self.bases.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .field("attributes", &self.attributes.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Class`].
pub struct ClassBuilder<I> {
    name: String,
    bases: Vec<Arc<Class<I>>>,
    attributes: BTreeMap<String, Pangler<I>>,
}

impl<I: 'static> ClassBuilder<I> {
    /// Append a direct base. Order matters for the resolution order.
    pub fn extends(mut self, base: &Arc<Class<I>>) -> Self {
        self.bases.push(Arc::clone(base));
        self
    }

    /// Declare a pangler under an attribute name.
    pub fn attribute(mut self, name: impl Into<String>, pangler: Pangler<I>) -> Self {
        self.attributes.insert(name.into(), pangler);
        self
    }

    /// Linearize the hierarchy and freeze the class.
    ///
    /// # Errors
    ///
    /// [`PanglerError::InconsistentHierarchy`] when the bases cannot be
    /// ordered consistently (a base listed twice, or bases whose own orders
    /// conflict).
    pub fn build(self) -> Result<Arc<Class<I>>, PanglerError> {
        let ancestors = linearize(&self.name, &self.bases)?;
        Ok(Arc::new(Class {
            name: self.name,
            bases: self.bases,
            attributes: self.attributes,
            ancestors,
        }))
    }
}

/// C3 merge of the bases' orders followed by the bases themselves.
fn linearize<I: 'static>(
    name: &str,
    bases: &[Arc<Class<I>>],
) -> Result<Vec<Arc<Class<I>>>, PanglerError> {
    let mut sequences: Vec<Vec<Arc<Class<I>>>> = bases
        .iter()
        .map(|base| {
            std::iter::once(Arc::clone(base))
                .chain(base.ancestors.iter().cloned())
                .collect()
        })
        .collect();
    sequences.push(bases.to_vec());

    let mut merged = Vec::new();
    loop {
        sequences.retain(|seq| !seq.is_empty());
        if sequences.is_empty() {
            return Ok(merged);
        }

        let candidate = sequences
            .iter()
            .map(|seq| &seq[0])
            .find(|head| {
                !sequences
                    .iter()
                    .any(|seq| seq[1..].iter().any(|c| Arc::ptr_eq(c, *head)))
            })
            .cloned()
            .ok_or_else(|| PanglerError::InconsistentHierarchy {
                class: name.to_owned(),
            })?;

        for seq in &mut sequences {
            if Arc::ptr_eq(&seq[0], &candidate) {
                seq.remove(0);
            }
        }
        merged.push(candidate);
    }
}
