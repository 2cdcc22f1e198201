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

//! A bounded in-memory cache over a persistent, read-only graph of
//! nodes, addressed through move-only, pinning [`Handle`]s.
//!
//! A [`Cache`] owns a bounded table of materialized [`PersistentNode`]s
//! keyed by [`Identifier`]. Clients never see the table directly: they
//! obtain a [`Handle`] from [`Cache::root_ptr`], read its payload, and
//! call [`Handle::follow_edge`] to walk to a neighbor, which
//! transparently loads the neighbor through a [`NodeReader`] on a
//! cache miss. While a handle is alive, its entry is *pinned* and can
//! never be evicted; once the last handle to an entry drops, the entry
//! becomes eligible for eviction under the cache's [`EvictionPolicy`]
//! (the default being oldest-unpinned-first).
//!
//! This crate is deliberately single-threaded: [`Cache`] uses a
//! [`std::cell::RefCell`] internally and is not [`Sync`]. Sharing one
//! across threads is the embedder's problem (wrap it in a `Mutex`);
//! see the module docs on [`cache`] for why that split is made here
//! rather than inside the cache.

pub mod cache;
pub mod error;
pub mod eviction;
pub mod handle;
pub mod node;
pub mod reader;
mod removable_queue;

pub use cache::{Cache, CacheBuilder};
pub use error::Error;
pub use eviction::oldest_unpinned::{OldestUnpinned, OldestUnpinnedConfig};
pub use eviction::EvictionPolicy;
pub use handle::Handle;
pub use node::{Identifier, PersistentNode, NULL, ROOT};
pub use reader::NodeReader;
