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

use std::collections::BTreeSet;

use ahash::AHashSet;
use tracing::debug;

use crate::geometry::edge::{Edge, INVALID_FACE};
use crate::geometry::face::Face;
use crate::mesh::Mesh;
use crate::overlap::error::OverlapError;
use crate::overlap::path::{PathSegment, SegmentEnd};

/// Stitches the traced path of one First face into closed overlap polygons,
/// then absorbs Second faces wholly interior to the First face.
///
/// Each polygon alternates First-boundary legs (consecutive path segments)
/// with Second-interior legs (walking the current Second face's edge loop
/// until a later path segment exits back onto the First boundary).
pub fn assemble_overlap_faces(
    second: &Mesh,
    second_node_map: &[usize],
    path: &[PathSegment],
    overlap: &mut Mesh,
) -> Result<(), OverlapError> {
    if path.is_empty() {
        return Ok(());
    }

    let n = path.len();
    let first_face = path[0].first_face;
    let mut used = vec![false; n];

    // Second faces touched by the boundary; flood fill must not re-add them.
    let mut faces_on_boundary: AHashSet<usize> = AHashSet::new();
    for seg in path {
        faces_on_boundary.insert(seg.second_face);
        debug!(
            node0 = seg.node0(),
            node1 = seg.node1(),
            second_face = seg.second_face,
            "path segment"
        );
    }

    // Candidates for the interior flood fill, collected while walking
    // Second-face interiors. Filled in ascending face order.
    let mut faces_to_add: BTreeSet<usize> = BTreeSet::new();

    while let Some(start) = (0..n).find(|&i| !used[i]) {
        let mut j = start;
        let origin = path[j].node0();
        let second_face = path[j].second_face;
        let face_second = &second.faces[second_face];
        let mut face_overlap = Face::default();

        'closed: loop {
            // First-boundary leg: consume consecutive segments until one
            // branches into the Second-face interior or the loop closes.
            loop {
                if used[j] {
                    return Err(OverlapError::ReuseTracedSegment(j));
                }
                used[j] = true;
                face_overlap.edges.push(path[j].edge);

                if path[j].end != SegmentEnd::None {
                    break;
                }
                if path[j].node1() == origin {
                    break 'closed;
                }
                j = (j + 1) % n;
            }

            // Second-interior leg: walk the Second face's edges from where
            // the path left the boundary.
            let mut local = match &path[j].end {
                SegmentEnd::Node { local } => *local,
                SegmentEnd::Edge { local, .. } => *local,
                SegmentEnd::None => unreachable!("leg entered without a branch"),
            };
            let mut current_node = path[j].node1();
            let mut edges_completed = 0usize;

            loop {
                let edge_second = face_second.edges[local];

                if edges_completed > face_second.len() {
                    return Err(OverlapError::InfiniteLoop(second_face));
                }
                edges_completed += 1;

                if edge_second.is_degenerate() {
                    local = (local + 1) % face_second.len();
                    current_node = second_node_map[edge_second.nodes[1]];
                    continue;
                }

                // Does a later path segment re-enter through this edge or
                // one of its endpoints?
                let mut exit: Option<usize> = None;
                let mut k = (j + 1) % n;
                while k != j {
                    let seg = &path[k];
                    if current_node != seg.node1() {
                        match &seg.end {
                            SegmentEnd::Node { .. } => {
                                if seg.node1() == second_node_map[edge_second.nodes[0]]
                                    || seg.node1() == second_node_map[edge_second.nodes[1]]
                                {
                                    exit = Some(k);
                                    break;
                                }
                            }
                            SegmentEnd::Edge { crossed, .. } => {
                                if *crossed == edge_second {
                                    exit = Some(k);
                                    break;
                                }
                            }
                            SegmentEnd::None => {}
                        }
                    }
                    k = (k + 1) % n;
                }

                // The face across this edge is an interior candidate.
                let pair = second
                    .facepair(&edge_second)
                    .ok_or(OverlapError::MissingEdge(
                        edge_second.nodes[0],
                        edge_second.nodes[1],
                    ))?;
                let opposite = pair
                    .opposite(second_face)
                    .ok_or(OverlapError::MissingEdge(
                        edge_second.nodes[0],
                        edge_second.nodes[1],
                    ))?;
                if opposite != INVALID_FACE {
                    faces_to_add.insert(opposite);
                }

                if let Some(k) = exit {
                    // The path becomes active again only if its next segment
                    // runs inside this Second face.
                    let j_next = (k + 1) % n;
                    if path[j_next].second_face == second_face {
                        let exit_node = path[k].node1();
                        face_overlap.edges.push(Edge::new(
                            current_node,
                            exit_node,
                            edge_second.kind,
                        ));
                        j = j_next;
                        if exit_node == origin {
                            break 'closed;
                        }
                        break;
                    }
                }

                // Keep walking around the Second face.
                face_overlap.edges.push(Edge::new(
                    current_node,
                    second_node_map[edge_second.nodes[1]],
                    edge_second.kind,
                ));
                local = (local + 1) % face_second.len();
                current_node = second_node_map[edge_second.nodes[1]];
                if current_node == origin {
                    break 'closed;
                }
            }
        }

        debug!(edges = face_overlap.edges.len(), "overlap face closed");
        overlap.faces.push(face_overlap);
        overlap.source_pairs.push((first_face, second_face));
    }

    // Interior flood fill: BFS over the Second-mesh dual graph, starting
    // from the interior candidates that the boundary never visited.
    for f in &faces_on_boundary {
        faces_to_add.remove(f);
    }
    let mut added = faces_on_boundary;

    while let Some(f) = faces_to_add.pop_first() {
        if !added.insert(f) {
            continue;
        }
        let face_second = &second.faces[f];

        let mut face_copy = Face::default();
        for e in &face_second.edges {
            face_copy.edges.push(Edge::new(
                second_node_map[e.nodes[0]],
                second_node_map[e.nodes[1]],
                e.kind,
            ));
        }
        overlap.faces.push(face_copy);
        overlap.source_pairs.push((first_face, f));

        for e in &face_second.edges {
            if e.is_degenerate() {
                continue;
            }
            let pair = second
                .facepair(e)
                .ok_or(OverlapError::MissingEdge(e.nodes[0], e.nodes[1]))?;
            let other = pair
                .opposite(f)
                .ok_or(OverlapError::MissingEdge(e.nodes[0], e.nodes[1]))?;
            if other != INVALID_FACE && !added.contains(&other) {
                faces_to_add.insert(other);
            }
        }
    }

    Ok(())
}
