// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use crate::geometry::edge::{Edge, EdgeKind};

/// Where a queried point sits relative to a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeLocation {
    Interior,
    Edge,
    Node,
    #[default]
    Exterior,
}

/// A closed, simple polygon on the sphere: an ordered loop of directed edges,
/// counter-clockwise as seen from outside. Vertex `i` is the start of edge
/// `i`; consecutive edges share their endpoint.
#[derive(Debug, Clone, Default)]
pub struct Face {
    pub edges: Vec<Edge>,
}

impl Face {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }

    /// Builds the loop from a vertex cycle, one edge kind throughout.
    pub fn from_nodes(nodes: &[usize], kind: EdgeKind) -> Self {
        let edges = (0..nodes.len())
            .map(|i| Edge::new(nodes[i], nodes[(i + 1) % nodes.len()], kind))
            .collect();
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Node index of local vertex `i` (the start of edge `i`).
    pub fn node(&self, i: usize) -> usize {
        self.edges[i].nodes[0]
    }

    /// Local index of `edge` within this face, comparing undirected.
    pub fn edge_index(&self, edge: &Edge) -> Option<usize> {
        self.edges.iter().position(|e| e == edge)
    }
}
