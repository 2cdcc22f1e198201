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

use crate::{
    eviction::EvictionPolicy,
    node::Identifier,
    removable_queue::{RemovableQueue, Token},
};

/// [`OldestUnpinned`] takes no construction parameters.
#[derive(Debug, Default, Clone, Copy)]
pub struct OldestUnpinnedConfig;

/// The default eviction policy: among unpinned entries, always evicts the
/// one that has been unpinned the longest.
///
/// Maintains the unpinned set as a FIFO sequence over a slab arena, so
/// `on_unpinned` is an O(1) push to the back and `on_repinned` is an O(1)
/// removal from wherever in the sequence the hint points.
#[derive(Default)]
pub struct OldestUnpinned {
    queue: RemovableQueue<Identifier>,
}

impl EvictionPolicy for OldestUnpinned {
    type Hint = Token;
    type Config = OldestUnpinnedConfig;

    fn new(_config: Self::Config) -> Self {
        Self::default()
    }

    fn on_loaded(&mut self, _id: Identifier) {}

    fn on_unpinned(&mut self, id: Identifier) -> Self::Hint {
        self.queue.push_back(id)
    }

    fn on_repinned(&mut self, _id: Identifier, hint: Self::Hint) {
        self.queue.remove(hint);
    }

    fn choose_victim(&mut self) -> Option<Identifier> {
        self.queue.pop_front()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
impl OldestUnpinned {
    /// Identifiers currently eligible for eviction, oldest first.
    pub(crate) fn eligible(&self) -> Vec<Identifier> {
        self.queue.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_in_unpin_order() {
        let mut policy = OldestUnpinned::new(OldestUnpinnedConfig);
        policy.on_loaded(0);
        policy.on_loaded(1);
        policy.on_loaded(2);

        let h0 = policy.on_unpinned(0);
        let h1 = policy.on_unpinned(1);
        policy.on_unpinned(2);
        assert_eq!(policy.eligible(), vec![0, 1, 2]);

        // Re-pinning 1 should remove just 1, leaving the rest in order.
        policy.on_repinned(1, h1);
        assert_eq!(policy.eligible(), vec![0, 2]);

        policy.on_repinned(0, h0);
        assert_eq!(policy.choose_victim(), Some(2));
        assert!(policy.is_empty());
        assert_eq!(policy.choose_victim(), None);
    }
}
