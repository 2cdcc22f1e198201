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

use std::ops::Deref;
use std::ptr::NonNull;

use crate::{
    cache::{Cache, Entry},
    error::Error,
    eviction::{oldest_unpinned::OldestUnpinned, EvictionPolicy},
    node::{Identifier, NULL},
    reader::NodeReader,
};

/// A move-only reference to one entry pinned in a [`Cache`].
///
/// A handle is either *null* (carries no references, pins nothing) or
/// *live* (pins exactly one cache entry for as long as the handle
/// exists). There is no `Clone`/`Copy` impl: the only way to obtain
/// another pin on the same identifier is to ask the cache again (e.g.
/// another `root_ptr()`, or another `follow_edge` from a still-live
/// parent). Moving a handle (ordinary Rust move, nothing to write by
/// hand) transfers the pin without touching the cache; only dropping a
/// handle releases one.
///
/// [`Handle::follow_edge`] consumes `self` by value rather than
/// borrowing it. This is what makes `p = p.follow_edge(0)?` an
/// ordinary move-assignment (no separate operator to write), and it is
/// load-bearing at capacity 1: the old entry's pin is released before
/// the child is looked up, so a one-slot cache can evict the very
/// entry a walk is stepping away from. Holding two identifiers pinned
/// at once (as opposed to stepping from one to the next) means asking
/// the cache for each independently rather than chaining off one
/// handle twice.
pub struct Handle<'a, V, R, const A: usize, P = OldestUnpinned>
where
    R: NodeReader<V, A>,
    P: EvictionPolicy,
{
    id: Identifier,
    cache: Option<&'a Cache<V, R, A, P>>,
    entry: Option<NonNull<Entry<V, A, P::Hint>>>,
}

impl<'a, V, R, const A: usize, P> Handle<'a, V, R, A, P>
where
    R: NodeReader<V, A>,
    P: EvictionPolicy,
{
    /// The null handle. Never touches the cache table, the policy, or
    /// the backing store.
    pub(crate) fn null() -> Self {
        Self {
            id: NULL,
            cache: None,
            entry: None,
        }
    }

    /// A live handle pinning `entry`. Increments its pin count by one;
    /// this is the only place a pin count is ever incremented.
    pub(crate) fn live(id: Identifier, cache: &'a Cache<V, R, A, P>, mut entry: NonNull<Entry<V, A, P::Hint>>) -> Self {
        unsafe {
            entry.as_mut().pins += 1;
        }
        Self {
            id,
            cache: Some(cache),
            entry: Some(entry),
        }
    }

    /// The identifier this handle refers to, or [`NULL`] for the null handle.
    pub fn id(&self) -> Identifier {
        self.id
    }

    /// `true` iff this handle is live.
    pub fn is_live(&self) -> bool {
        self.cache.is_some()
    }

    /// A read-only reference to the payload of the pinned node.
    ///
    /// # Panics
    /// Panics if called on the null handle — dereferencing a handle
    /// that pins nothing is a programming error, not a recoverable
    /// failure.
    pub fn value(&self) -> &V {
        let entry = self.entry.expect("value() called on a null handle");
        unsafe { &entry.as_ref().node.value }
    }

    /// Follow the `index`-th outgoing edge of the pinned node, consuming
    /// this handle.
    ///
    /// Loads the child into the cache if it is not already cached,
    /// evicting an unpinned victim if the cache is full, and returns a
    /// new handle pinning it. If the edge is the null identifier, the
    /// returned handle is the null handle.
    ///
    /// # Panics
    /// Panics if called on the null handle (there is no node whose
    /// edges could be read).
    pub fn follow_edge(self, index: usize) -> Result<Handle<'a, V, R, A, P>, Error<R::Error>> {
        let entry = self.entry.expect("follow_edge() called on a null handle");
        if index >= A {
            return Err(Error::IndexOutOfRange { index, arity: A });
        }
        let cache = self
            .cache
            .expect("a live handle's entry is always paired with a cache reference");
        let child = unsafe { entry.as_ref().node.edges[index] };

        // Drop this handle's own pin before asking the cache for the
        // child: at capacity 1 the child's load must be free to evict
        // the entry this handle was pinning, and that entry only
        // becomes eligible once the pin is gone.
        drop(self);

        Ok(match cache.get_entry(child)? {
            Some(child_entry) => Handle::live(child, cache, child_entry),
            None => Handle::null(),
        })
    }
}

impl<'a, V, R, const A: usize, P> Deref for Handle<'a, V, R, A, P>
where
    R: NodeReader<V, A>,
    P: EvictionPolicy,
{
    type Target = V;

    fn deref(&self) -> &V {
        self.value()
    }
}

impl<'a, V, R, const A: usize, P> Drop for Handle<'a, V, R, A, P>
where
    R: NodeReader<V, A>,
    P: EvictionPolicy,
{
    fn drop(&mut self) {
        if let (Some(cache), Some(entry)) = (self.cache, self.entry) {
            cache.release(self.id, entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::cache::Cache;
    use crate::node::PersistentNode;

    #[derive(Debug, thiserror::Error)]
    #[error("no node at {0}")]
    struct MissingNode(Identifier);

    struct GraphReader {
        nodes: Vec<PersistentNode<i64, 1>>,
        reads: Rc<Cell<usize>>,
    }

    impl NodeReader<i64, 1> for GraphReader {
        type Error = MissingNode;

        fn read(&self, id: Identifier) -> Result<PersistentNode<i64, 1>, Self::Error> {
            self.reads.set(self.reads.get() + 1);
            self.nodes.get(id as usize).cloned().ok_or(MissingNode(id))
        }
    }

    fn chain(len: usize) -> (GraphReader, Rc<Cell<usize>>) {
        let nodes = (0..len)
            .map(|i| {
                let next = if i + 1 < len { (i + 1) as Identifier } else { NULL };
                PersistentNode::new(i as i64, [next])
            })
            .collect();
        let reads = Rc::new(Cell::new(0));
        (
            GraphReader {
                nodes,
                reads: reads.clone(),
            },
            reads,
        )
    }

    #[test]
    fn null_handle_is_falsy_and_id_is_null() {
        let (reader, _) = chain(1);
        let cache = Cache::new(1, reader).unwrap();
        let h = cache.null_ptr();
        assert!(!h.is_live());
        assert_eq!(h.id(), NULL);
    }

    #[test]
    fn deref_reads_the_pinned_payload() {
        let (reader, _) = chain(3);
        let cache = Cache::new(3, reader).unwrap();
        let h = cache.root_ptr().unwrap();
        assert_eq!(*h, 0);
    }

    #[test]
    #[should_panic(expected = "null handle")]
    fn value_on_null_handle_panics() {
        let (reader, _) = chain(1);
        let cache = Cache::new(1, reader).unwrap();
        let h = cache.null_ptr();
        let _ = h.value();
    }

    #[test]
    #[should_panic(expected = "null handle")]
    fn follow_edge_on_null_handle_panics() {
        let (reader, _) = chain(1);
        let cache = Cache::new(1, reader).unwrap();
        let h = cache.null_ptr();
        let _ = h.follow_edge(0);
    }
}
