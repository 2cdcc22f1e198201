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

pub mod oldest_unpinned;

use crate::node::Identifier;

/// Tracks the unpinned subset of a cache's entries and nominates victims.
///
/// A policy never sees pinned entries: the cache container only calls
/// [`EvictionPolicy::on_unpinned`] once an entry's pin count has reached
/// zero, and [`EvictionPolicy::on_repinned`] the moment it leaves zero
/// again. This makes it structurally impossible for a policy to nominate
/// a live node as a victim.
pub trait EvictionPolicy: Sized {
    /// Opaque token returned by [`Self::on_unpinned`] and presented back to
    /// [`Self::on_repinned`] for O(1) membership maintenance.
    type Hint;

    /// Policy-specific construction parameters.
    type Config;

    fn new(config: Self::Config) -> Self;

    /// The entry for `id` was just inserted into the cache; its pin count
    /// is about to become 1. No bookkeeping is needed yet.
    fn on_loaded(&mut self, id: Identifier);

    /// The entry for `id` transitioned from pin count 1 to 0: record it as
    /// eviction-eligible and return a hint for cheap re-pinning.
    fn on_unpinned(&mut self, id: Identifier) -> Self::Hint;

    /// The entry for `id` transitioned from pin count 0 back to positive:
    /// remove it from the eligible set using the hint it was given.
    fn on_repinned(&mut self, id: Identifier, hint: Self::Hint);

    /// Remove and return one eligible identifier, or `None` if the
    /// eligible set is empty.
    fn choose_victim(&mut self) -> Option<Identifier>;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;
}
