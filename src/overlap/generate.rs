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

use tracing::debug;

use crate::geometry::edge::INVALID_NODE;
use crate::kernel::{ExactKernel, FuzzyKernel, SphericalKernel};
use crate::mesh::coincident::build_coincident_node_map;
use crate::mesh::dedup::{DedupStrategy, NodeBins};
use crate::mesh::Mesh;
use crate::overlap::error::OverlapError;
use crate::overlap::path::trace_face_path;
use crate::overlap::reconstruct::assemble_overlap_faces;

/// Which predicate kernel drives the generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelKind {
    #[default]
    Fuzzy,
    Exact,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapConfig {
    pub kernel: KernelKind,
    pub dedup: DedupStrategy,
}

/// Aggregate diagnostics of a generation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapReport {
    /// Second nodes that coincide with a First node.
    pub coincident_nodes: usize,
    /// Count of "face does not change across a crossing" soft warnings.
    pub face_unchanged_warnings: u32,
    /// Second edges skipped because a First edge ran along them.
    pub coincident_skips: u32,
}

/// Generates the overlap mesh of `first` and `second`.
///
/// The overlap node list starts with the First nodes verbatim, then the
/// Second nodes (coincident ones aliased through the node map), then the
/// nodes born at edge-edge intersections in creation order. Faces are closed
/// polygons tagged with their `(first_face, second_face)` source pair in
/// `source_pairs`.
///
/// Both input meshes must come with their edge maps built (see
/// [`Mesh::build_edge_map`]).
pub fn generate_overlap_mesh(
    first: &Mesh,
    second: &Mesh,
    config: OverlapConfig,
) -> Result<(Mesh, OverlapReport), OverlapError> {
    match config.kernel {
        KernelKind::Fuzzy => generate_with::<FuzzyKernel>(first, second, config),
        KernelKind::Exact => generate_with::<ExactKernel>(first, second, config),
    }
}

fn generate_with<K: SphericalKernel>(
    first: &Mesh,
    second: &Mesh,
    config: OverlapConfig,
) -> Result<(Mesh, OverlapReport), OverlapError> {
    let mut overlap = Mesh::default();
    let mut report = OverlapReport::default();

    let (coincident, mut second_node_map) = build_coincident_node_map::<K>(first, second);
    report.coincident_nodes = coincident;
    debug!(count = coincident, "coincident nodes");

    overlap.nodes.extend_from_slice(&first.nodes);
    let second_nodes_begin = overlap.nodes.len();
    overlap.nodes.extend_from_slice(&second.nodes);

    // Non-coincident Second nodes live in the block just appended.
    for (i, m) in second_node_map.iter_mut().enumerate() {
        if *m == INVALID_NODE {
            *m = second_nodes_begin + i;
        }
    }

    let mut bins = NodeBins::new(config.dedup);
    bins.seed(&overlap.nodes);

    for first_face in 0..first.faces.len() {
        let path = trace_face_path::<K>(
            first,
            second,
            &second_node_map,
            first_face,
            &mut overlap,
            &mut bins,
            &mut report,
        )?;
        assemble_overlap_faces(second, &second_node_map, &path, &mut overlap)?;
    }

    Ok((overlap, report))
}
