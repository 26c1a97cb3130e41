//! Process-wide identity caches.
//!
//! Entries are keyed by `(instance address, id)` and hold only a weak
//! reference to their instance, so caching never extends an instance's
//! lifetime. An entry whose instance is gone is treated as a miss, and every
//! insertion sweeps such entries out.

use crate::id::PanglerId;
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError, Weak};

/// Bound panglers produced by `cached_bind`.
pub(crate) static BINDINGS: LazyLock<IdentityCache> = LazyLock::new(IdentityCache::new);

/// Combined panglers produced by aggregates.
pub(crate) static AGGREGATES: LazyLock<IdentityCache> = LazyLock::new(IdentityCache::new);

type Key = (usize, PanglerId);

struct Entry {
    owner: Weak<dyn Any + Send + Sync>,
    value: Arc<dyn Any + Send + Sync>,
}

impl Entry {
    fn is_live(&self) -> bool {
        self.owner.strong_count() > 0
    }
}

fn address<I>(instance: &Arc<I>) -> usize {
    Arc::as_ptr(instance).cast::<()>() as usize
}

/// Remove and return the entries matching `predicate`.
fn take_where(
    entries: &mut HashMap<Key, Entry>,
    predicate: impl Fn(&Key, &Entry) -> bool,
) -> Vec<Entry> {
    let keys: Vec<Key> = entries
        .iter()
        .filter(|(key, entry)| predicate(key, entry))
        .map(|(key, _)| key.clone())
        .collect();
    keys.iter().filter_map(|key| entries.remove(key)).collect()
}

pub(crate) struct IdentityCache {
    entries: Mutex<HashMap<Key, Entry>>,
}

impl IdentityCache {
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Key, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a live entry.
    pub(crate) fn get<I, V>(&self, instance: &Arc<I>, id: &PanglerId) -> Option<Arc<V>>
    where
        I: Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        let entries = self.lock();
        let entry = entries.get(&(address(instance), id.clone()))?;
        if !entry.is_live() {
            return None;
        }
        Arc::clone(&entry.value).downcast::<V>().ok()
    }

    /// Return the live entry, or build, store and return a new one.
    ///
    /// `make` runs under the cache lock, so concurrent first lookups for the
    /// same key build exactly once. It must not touch the cache itself.
    pub(crate) fn get_or_insert_with<I, V>(
        &self,
        instance: &Arc<I>,
        id: &PanglerId,
        make: impl FnOnce() -> V,
    ) -> Arc<V>
    where
        I: Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        // Evicted entries drop after the guard, since their values may
        // re-enter the cache from `Drop`.
        let mut evicted = Vec::new();
        let mut entries = self.lock();
        evicted.extend(take_where(&mut entries, |_, entry| !entry.is_live()));

        let key = (address(instance), id.clone());
        if let Some(existing) = entries
            .get(&key)
            .and_then(|entry| Arc::clone(&entry.value).downcast::<V>().ok())
        {
            return existing;
        }

        let value = Arc::new(make());
        let owner: Weak<I> = Arc::downgrade(instance);
        let owner: Weak<dyn Any + Send + Sync> = owner;
        let erased: Arc<dyn Any + Send + Sync> = value.clone();
        evicted.extend(entries.insert(
            key,
            Entry {
                owner,
                value: erased,
            },
        ));
        value
    }

    /// Drop every entry belonging to `instance`. Returns how many went.
    pub(crate) fn forget<I>(&self, instance: &Arc<I>) -> usize {
        let target = address(instance);
        let evicted = take_where(&mut self.lock(), |(addr, _), _| *addr == target);
        evicted.len()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.lock().len()
    }
}
