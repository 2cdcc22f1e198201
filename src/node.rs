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

/// A persistent identifier: a signed index into the backing store.
pub type Identifier = i64;

/// The reserved identifier denoting "no node".
pub const NULL: Identifier = -1;

/// The identifier conventionally used for the root of the graph.
pub const ROOT: Identifier = 0;

/// The stored form of a node: a payload plus a fixed-size array of
/// outgoing identifiers. `A` is the compile-time arity of every node in
/// the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistentNode<V, const A: usize> {
    pub value: V,
    pub edges: [Identifier; A],
}

impl<V, const A: usize> PersistentNode<V, A> {
    pub fn new(value: V, edges: [Identifier; A]) -> Self {
        Self { value, edges }
    }
}
