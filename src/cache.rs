//  Copyright 2026 pincache Authors
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

use std::cell::RefCell;
use std::ptr::NonNull;

use ahash::RandomState;
use hashbrown::HashMap;
use tracing::{debug, trace, warn};

use crate::{
    error::Error,
    eviction::{oldest_unpinned::OldestUnpinned, EvictionPolicy},
    handle::Handle,
    node::{Identifier, PersistentNode, NULL, ROOT},
    reader::NodeReader,
};

/// An in-memory record for one currently-cached identifier.
///
/// Lives behind a `Box` inside the cache table so that its address is
/// stable for as long as it is pinned, independent of the table's own
/// bookkeeping (rehashing moves the `Box` pointer, never its pointee).
pub(crate) struct Entry<V, const A: usize, H> {
    pub(crate) node: PersistentNode<V, A>,
    pub(crate) pins: usize,
    pub(crate) hint: Option<H>,
}

struct Inner<V, const A: usize, P: EvictionPolicy> {
    table: HashMap<Identifier, Box<Entry<V, A, P::Hint>>, RandomState>,
    policy: P,
}

/// A bounded cache over a persistent graph of nodes, reachable only
/// through [`Handle`]s that keep their target pinned for as long as they
/// live.
///
/// `V` is the node payload type, `A` is the compile-time arity (outgoing
/// edges per node), `R` is the backing-store reader, and `P` is the
/// eviction policy (defaulting to [`OldestUnpinned`]).
///
/// This type is single-threaded by design (see the crate's module docs):
/// its internal table and policy live behind a [`RefCell`], which also
/// makes `Cache` `!Sync` — sharing one across threads requires an
/// external `Mutex` and is out of scope here.
pub struct Cache<V, R, const A: usize, P = OldestUnpinned>
where
    R: NodeReader<V, A>,
    P: EvictionPolicy,
{
    capacity: usize,
    reader: R,
    inner: RefCell<Inner<V, A, P>>,
}

impl<V, R, const A: usize> Cache<V, R, A, OldestUnpinned>
where
    R: NodeReader<V, A>,
{
    /// Construct a cache with the default (oldest-unpinned) eviction
    /// policy. `capacity` must be at least 1.
    pub fn new(capacity: usize, reader: R) -> Result<Self, Error<R::Error>> {
        CacheBuilder::new(capacity, reader).build()
    }
}

impl<V, R, const A: usize, P> Cache<V, R, A, P>
where
    R: NodeReader<V, A>,
    P: EvictionPolicy,
{
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A live handle pinning the root entry (identifier 0).
    pub fn root_ptr(&self) -> Result<Handle<'_, V, R, A, P>, Error<R::Error>> {
        self.get_handle(ROOT)
    }

    /// The null handle. Never touches the cache table, the policy, or the
    /// backing store.
    pub fn null_ptr(&self) -> Handle<'_, V, R, A, P> {
        Handle::null()
    }

    fn get_handle(&self, id: Identifier) -> Result<Handle<'_, V, R, A, P>, Error<R::Error>> {
        match self.get_entry(id)? {
            Some(entry) => Ok(Handle::live(id, self, entry)),
            None => Ok(Handle::null()),
        }
    }

    /// Resolve `id` to a pinnable entry pointer, loading it on a cache
    /// miss. Returns `None` only for the null identifier.
    pub(crate) fn get_entry(
        &self,
        id: Identifier,
    ) -> Result<Option<NonNull<Entry<V, A, P::Hint>>>, Error<R::Error>> {
        if id == NULL {
            return Ok(None);
        }

        {
            let mut inner = self.inner.borrow_mut();
            if let Some(entry) = inner.table.get_mut(&id) {
                trace!(id, "cache hit");
                if entry.pins == 0 {
                    let hint = entry
                        .hint
                        .take()
                        .expect("an unpinned cached entry must carry an eviction hint");
                    inner.policy.on_repinned(id, hint);
                }
                let ptr = unsafe { NonNull::new_unchecked(entry.as_mut() as *mut _) };
                return Ok(Some(ptr));
            }
        }

        self.load(id).map(Some)
    }

    fn load(&self, id: Identifier) -> Result<NonNull<Entry<V, A, P::Hint>>, Error<R::Error>> {
        debug_assert_ne!(id, NULL, "load must never be called with the null identifier");
        debug_assert!(
            !self.inner.borrow().table.contains_key(&id),
            "load must never be called for an identifier already in the cache"
        );

        {
            let mut inner = self.inner.borrow_mut();
            if inner.table.len() >= self.capacity {
                let victim = inner.policy.choose_victim().ok_or_else(|| {
                    warn!(capacity = self.capacity, "capacity exhausted: every cached entry is pinned");
                    Error::CapacityExhausted {
                        capacity: self.capacity,
                    }
                })?;
                debug!(victim, "evicting oldest unpinned entry");
                inner.table.remove(&victim);
            }
        }

        let node = self.reader.read(id).map_err(|source| Error::Read { id, source })?;
        debug!(id, "loaded node from backing store");

        let mut inner = self.inner.borrow_mut();
        inner.policy.on_loaded(id);
        let mut boxed = Box::new(Entry {
            node,
            pins: 0,
            hint: None,
        });
        let ptr = unsafe { NonNull::new_unchecked(boxed.as_mut() as *mut _) };
        inner.table.insert(id, boxed);
        Ok(ptr)
    }

    /// Called exactly once by a handle's destructor. Infallible.
    pub(crate) fn release(&self, id: Identifier, mut entry: NonNull<Entry<V, A, P::Hint>>) {
        let mut inner = self.inner.borrow_mut();
        let pins = unsafe { &mut entry.as_mut().pins };
        debug_assert!(*pins > 0, "release called on an already-unpinned entry");
        *pins -= 1;
        if *pins == 0 {
            let hint = inner.policy.on_unpinned(id);
            unsafe {
                entry.as_mut().hint = Some(hint);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn total_pins(&self) -> usize {
        self.inner.borrow().table.values().map(|e| e.pins).sum()
    }
}

/// Builds a [`Cache`], optionally with a non-default eviction policy.
pub struct CacheBuilder<V, R, const A: usize, P = OldestUnpinned>
where
    R: NodeReader<V, A>,
    P: EvictionPolicy,
{
    capacity: usize,
    reader: R,
    eviction_config: P::Config,
}

impl<V, R, const A: usize, P> CacheBuilder<V, R, A, P>
where
    R: NodeReader<V, A>,
    P: EvictionPolicy,
    P::Config: Default,
{
    pub fn new(capacity: usize, reader: R) -> Self {
        Self {
            capacity,
            reader,
            eviction_config: P::Config::default(),
        }
    }
}

impl<V, R, const A: usize, P> CacheBuilder<V, R, A, P>
where
    R: NodeReader<V, A>,
    P: EvictionPolicy,
{
    /// Supply a non-default eviction-policy configuration.
    pub fn eviction_config(mut self, config: P::Config) -> Self {
        self.eviction_config = config;
        self
    }

    pub fn build(self) -> Result<Cache<V, R, A, P>, Error<R::Error>> {
        if self.capacity == 0 {
            warn!("rejecting cache construction with capacity 0");
            return Err(Error::InvalidCapacity);
        }
        Ok(Cache {
            capacity: self.capacity,
            reader: self.reader,
            inner: RefCell::new(Inner {
                table: HashMap::with_hasher(RandomState::default()),
                policy: P::new(self.eviction_config),
            }),
        })
    }
}
