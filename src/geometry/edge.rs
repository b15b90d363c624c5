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

/// Sentinel for an unassigned node slot.
pub const INVALID_NODE: usize = usize::MAX;

/// Sentinel for an unassigned face slot.
pub const INVALID_FACE: usize = usize::MAX;

/// The two arc families an edge can follow on the sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    GreatCircleArc,
    ConstantLatitude,
}

/// An arc between two node indices. Directed inside a face loop, undirected
/// for edge-map lookup (see [`EdgeKey`]).
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub nodes: [usize; 2],
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(node0: usize, node1: usize, kind: EdgeKind) -> Self {
        Self {
            nodes: [node0, node1],
            kind,
        }
    }

    /// True when both endpoints are the same node; degenerate edges are
    /// permitted as placeholders and skipped by every traversal.
    pub fn is_degenerate(&self) -> bool {
        self.nodes[0] == self.nodes[1]
    }

    /// The edge traversed in the opposite direction.
    pub fn reversed(&self) -> Edge {
        Edge::new(self.nodes[1], self.nodes[0], self.kind)
    }

    /// Canonical key for undirected lookup in an edge map.
    pub fn key(&self) -> EdgeKey {
        if self.nodes[0] <= self.nodes[1] {
            EdgeKey(self.nodes[0], self.nodes[1])
        } else {
            EdgeKey(self.nodes[1], self.nodes[0])
        }
    }
}

/// Undirected equality: the same node pair in either order is the same edge.
impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Edge {}

/// Node pair sorted ascending, the map key for an undirected edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey(pub usize, pub usize);

/// The (at most two) faces incident to an edge.
#[derive(Debug, Clone, Copy)]
pub struct FacePair {
    pub faces: [usize; 2],
}

impl FacePair {
    pub fn new() -> Self {
        Self {
            faces: [INVALID_FACE; 2],
        }
    }

    /// Registers an incident face; returns false when both slots are taken.
    pub fn push(&mut self, face: usize) -> bool {
        if self.faces[0] == INVALID_FACE {
            self.faces[0] = face;
            true
        } else if self.faces[1] == INVALID_FACE {
            self.faces[1] = face;
            true
        } else {
            false
        }
    }

    pub fn is_complete(&self) -> bool {
        self.faces[0] != INVALID_FACE && self.faces[1] != INVALID_FACE
    }

    /// The incident face that is not `face`.
    pub fn opposite(&self, face: usize) -> Option<usize> {
        if self.faces[0] == face {
            Some(self.faces[1])
        } else if self.faces[1] == face {
            Some(self.faces[0])
        } else {
            None
        }
    }
}

impl Default for FacePair {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for FacePair {
    type Output = usize;
    fn index(&self, i: usize) -> &usize {
        &self.faces[i]
    }
}
