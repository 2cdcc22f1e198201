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

use crate::node::{Identifier, PersistentNode};

/// The backing-store contract: given an identifier, synchronously yield
/// the node record it refers to, or fail.
///
/// Implementations are assumed referentially transparent — reading the
/// same identifier twice must yield the same record. `read` is never
/// called with the null identifier.
pub trait NodeReader<V, const A: usize> {
    /// The error a failed read surfaces, wrapped by [`crate::Error::Read`].
    type Error: std::error::Error + Send + Sync + 'static;

    fn read(&self, id: Identifier) -> Result<PersistentNode<V, A>, Self::Error>;
}
