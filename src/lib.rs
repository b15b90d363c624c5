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

//! Overlap mesh generation for polygonal meshes on the unit sphere.
//!
//! Given two meshes whose faces are bounded by great-circle or
//! constant-latitude arcs, [`overlap::generate_overlap_mesh`] produces the
//! mesh of their pairwise face intersections, each face tagged with the
//! (first, second) source pair. The overlap mesh is the foundation for
//! conservative remapping of fields between the inputs.

pub mod geometry;
pub mod kernel;
pub mod mesh;
pub mod overlap;

pub use mesh::Mesh;
pub use overlap::{generate_overlap_mesh, OverlapConfig, OverlapError, OverlapReport};
