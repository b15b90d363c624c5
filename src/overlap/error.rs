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

use thiserror::Error;

/// Failure modes of overlap mesh generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OverlapError {
    /// The starting vertex of a First face was not located in the Second
    /// mesh; the meshes do not cover the same region.
    #[error("no face of the second mesh contains the start vertex of first face {0}")]
    NoInitialFace(usize),

    /// A Second face presented a degenerate edge to the tracer.
    #[error("zero edge detected in second face {0}")]
    ZeroEdge(usize),

    /// Two arcs share a positive-measure segment in a configuration the
    /// tracer cannot step across. Arcs running along a shared grid line are
    /// handled by skipping the overlapping edge; this kind is reserved for
    /// the configurations that skipping cannot resolve.
    #[error("not implemented: coincident edges between the meshes")]
    CoincidentEdges,

    /// One First edge crossed one Second edge more than once.
    #[error("not implemented: non-convex intersections")]
    NonConvexIntersection,

    /// An edge was expected in the edge map and was not there.
    #[error("logic error: edge ({0}, {1}) not found in edge map")]
    MissingEdge(usize, usize),

    /// Face reconstruction revisited a consumed path segment.
    #[error("logic error: trying to reuse traced path segment {0}")]
    ReuseTracedSegment(usize),

    /// The interior walk went around a Second face without finding an exit.
    #[error("possible infinite loop while walking second face {0}")]
    InfiniteLoop(usize),
}
