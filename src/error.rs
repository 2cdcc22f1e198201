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

use thiserror::Error;

use crate::node::Identifier;

/// Every way a public `pincache` operation can fail.
///
/// `E` is the backing-store reader's own error type (see
/// [`crate::NodeReader::Error`]); it is carried as the source of
/// [`Error::Read`] so callers keep the original cause.
#[derive(Debug, Error)]
pub enum Error<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error("cache capacity must be at least 1")]
    InvalidCapacity,

    #[error("follow_edge index {index} out of range for arity {arity}")]
    IndexOutOfRange { index: usize, arity: usize },

    #[error("failed to read node {id} from the backing store")]
    Read {
        id: Identifier,
        #[source]
        source: E,
    },

    #[error("cache capacity exhausted: all {capacity} cached entries are pinned")]
    CapacityExhausted { capacity: usize },
}
