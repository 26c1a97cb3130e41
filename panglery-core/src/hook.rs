//! # Hooks
//!
//! A [`Hook`] pairs a [`Handler`] with its parameter contract and its
//! trigger predicate. Hooks are immutable once registered and shared by
//! reference between a prototype pangler, its clones and its bound copies.
//!
//! The contract is described with a [`HookSpec`]:
//!
//! - `needs`: fields that must be present; they are passed to the handler.
//! - `returns`: fields the handler is expected to write back.
//! - `modifies`: shorthand for a field that is both needed and returned.
//! - `when(key, value)`: the hook fires only if `event[key] == value`.
//!   Condition keys are required but never passed to the handler.

use crate::{
    error::PanglerError,
    event::{Event, Value},
    handler::{Handler, HookContext},
    pangler::Pangler,
};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The declared contract of a hook, before validation.
#[derive(Debug, Clone, Default)]
pub struct HookSpec {
    needs: BTreeSet<String>,
    returns: BTreeSet<String>,
    modifies: BTreeSet<String>,
    conditions: BTreeMap<String, Value>,
}

impl HookSpec {
    /// An empty spec. Registering it as-is fails with [`PanglerError::EmptyHook`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Add fields the hook operates on.
    pub fn needs<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.needs.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Add fields the hook writes back.
    pub fn returns<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.returns.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Add fields the hook both needs and writes back.
    pub fn modifies<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.modifies.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Only fire when the event holds `value` under `key`.
    ///
    /// Values compare by value. Numbers compare numerically, so a guard on
    /// `2` also matches `2.0`.
    pub fn when(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.insert(key.into(), value.into());
        self
    }

    /// Resolve the effective sets, rejecting a spec that hooks nothing.
    pub(crate) fn resolve(self) -> Result<Contract, PanglerError> {
        let parameters: BTreeSet<String> = self.needs.union(&self.modifies).cloned().collect();
        let needs: BTreeSet<String> = parameters
            .iter()
            .chain(self.conditions.keys())
            .cloned()
            .collect();
        if needs.is_empty() {
            return Err(PanglerError::EmptyHook);
        }
        let returns = self.returns.union(&self.modifies).cloned().collect();
        Ok(Contract {
            needs,
            parameters,
            returns,
            conditions: self.conditions,
        })
    }
}

/// Equality for conditions: by value, with integers and floats comparing
/// numerically.
fn same_value(value: &Value, required: &Value) -> bool {
    match (value, required) {
        (Value::Number(a), Value::Number(b)) if a.is_f64() || b.is_f64() => {
            a.as_f64() == b.as_f64()
        }
        _ => value == required,
    }
}

/// A validated contract, ready to be paired with a handler.
#[derive(Debug, Clone)]
pub(crate) struct Contract {
    needs: BTreeSet<String>,
    parameters: BTreeSet<String>,
    returns: BTreeSet<String>,
    conditions: BTreeMap<String, Value>,
}

/// A registered handler with its contract.
pub struct Hook<I> {
    handler: Box<dyn Handler<I>>,
    contract: Contract,
}

impl<I: 'static> Hook<I> {
    pub(crate) fn new<H: Handler<I>>(handler: H, contract: Contract) -> Self {
        Self {
            handler: Box::new(handler),
            contract,
        }
    }

    /// Fields that must be present for the hook to fire.
    pub fn needs(&self) -> &BTreeSet<String> {
        &self.contract.needs
    }

    /// Fields passed to the handler.
    pub fn parameters(&self) -> &BTreeSet<String> {
        &self.contract.parameters
    }

    /// Fields the handler declared it writes back.
    pub fn returns(&self) -> &BTreeSet<String> {
        &self.contract.returns
    }

    /// Required literal values.
    pub fn conditions(&self) -> &BTreeMap<String, Value> {
        &self.contract.conditions
    }

    /// Whether the hook fires for the event in its current state.
    pub fn matches(&self, event: &Event) -> bool {
        self.contract.needs.iter().all(|key| event.contains_key(key))
            && self
                .contract
                .conditions
                .iter()
                .all(|(key, required)| {
                    event
                        .get(key)
                        .is_some_and(|value| same_value(value, required))
                })
    }

    /// Run the handler and merge whatever it returns into `event`.
    ///
    /// # Errors
    ///
    /// [`PanglerError::InstanceGone`] if `pangler` is bound to a dropped
    /// instance; [`PanglerError::Handler`] if the handler fails.
    pub fn execute(&self, pangler: &Pangler<I>, event: &mut Event) -> Result<(), PanglerError> {
        let instance = match pangler.bound_instance() {
            Some(weak) => Some(weak.upgrade().ok_or(PanglerError::InstanceGone)?),
            None => None,
        };
        let args = event.restrict(&self.contract.parameters);
        let ctx = HookContext::new(pangler, instance);

        let Some(updates) = self.handler.call(&ctx, &args)? else {
            return Ok(());
        };

        #[cfg(feature = "tracing")]
        for key in updates.keys() {
            if !self.contract.returns.contains(key) {
                tracing::debug!(key, "hook returned an undeclared field");
            }
        }

        event.merge(updates);
        Ok(())
    }
}

impl<I: 'static> fmt::Debug for Hook<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("needs", &self.contract.needs)
            .field("parameters", &self.contract.parameters)
            .field("returns", &self.contract.returns)
            .field("conditions", &self.contract.conditions)
            .finish_non_exhaustive()
    }
}
