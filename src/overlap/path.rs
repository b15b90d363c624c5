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

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::geometry::edge::{Edge, INVALID_FACE};
use crate::geometry::face::NodeLocation;
use crate::geometry::node::Node;
use crate::kernel::SphericalKernel;
use crate::mesh::dedup::NodeBins;
use crate::mesh::queries::{find_face_from_node, find_face_near_node, find_face_near_vertex, FaceLocate};
use crate::mesh::Mesh;
use crate::overlap::error::OverlapError;
use crate::overlap::generate::OverlapReport;

/// What terminates a path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentEnd {
    /// The First edge ends inside the current Second face.
    None,
    /// The walker reached the Second vertex at local index `local`.
    Node { local: usize },
    /// The walker crossed the interior of a Second edge; `crossed` is kept
    /// because the Second-face handle changes across the crossing.
    Edge { local: usize, crossed: Edge },
}

/// One leg of the traced boundary of a First face: an arc lying entirely
/// within one Second face, annotated with how it ends.
#[derive(Debug, Clone)]
pub struct PathSegment {
    /// Overlap-node endpoints plus the arc kind of the First edge.
    pub edge: Edge,
    pub first_face: usize,
    pub second_face: usize,
    pub end: SegmentEnd,
}

impl PathSegment {
    pub fn node0(&self) -> usize {
        self.edge.nodes[0]
    }

    pub fn node1(&self) -> usize {
        self.edge.nodes[1]
    }
}

/// Traces the oriented boundary of First face `first_face_ix` against the
/// Second mesh, emitting one segment per Second face entered. New nodes born
/// at transversal edge crossings are appended to `overlap` through `bins`.
pub fn trace_face_path<K: SphericalKernel>(
    first: &Mesh,
    second: &Mesh,
    second_node_map: &[usize],
    first_face_ix: usize,
    overlap: &mut Mesh,
    bins: &mut NodeBins,
    report: &mut OverlapReport,
) -> Result<Vec<PathSegment>, OverlapError> {
    let face_first = &first.faces[first_face_ix];
    let node_start = first.nodes[face_first.node(0)];

    let located = find_face_from_node::<K>(second, &node_start);
    if located.face_indices.is_empty() {
        return Err(OverlapError::NoInitialFace(first_face_ix));
    }

    let mut current_second = located.face_indices[0];
    if located.face_indices.len() > 1 {
        // The start vertex sits on a Second boundary; enter the face the
        // First boundary points into.
        current_second = find_face_near_node::<K>(
            second,
            &node_start,
            &first.nodes[face_first.node(1)],
            face_first.edges[0].kind,
            Some(&located),
        );
    }

    debug!(
        first_face = first_face_ix,
        second_face = current_second,
        "tracing face boundary"
    );

    let mut path = Vec::new();

    for i in 0..face_first.len() {
        let edge_first = face_first.edges[i];
        if edge_first.is_degenerate() {
            continue;
        }

        let node_first_end = first.nodes[edge_first.nodes[1]];
        let mut current_overlap_node = edge_first.nodes[0];
        let mut last_intersection = first.nodes[edge_first.nodes[0]];

        // Walk along this First edge until its endpoint, one segment per
        // Second face entered.
        'walk: loop {
            let face_second = &second.faces[current_second];
            let k = face_second.len();

            // Scan the Second face boundary for the next crossing.
            let mut hit: Option<(usize, Node)> = None;
            for (j, edge_second) in face_second.edges.iter().enumerate() {
                if edge_second.is_degenerate() {
                    return Err(OverlapError::ZeroEdge(current_second));
                }

                let crossings = K::edge_intersections(
                    &first.nodes[edge_first.nodes[0]],
                    &first.nodes[edge_first.nodes[1]],
                    edge_first.kind,
                    &second.nodes[edge_second.nodes[0]],
                    &second.nodes[edge_second.nodes[1]],
                    edge_second.kind,
                );
                if crossings.coincident {
                    // The First edge runs along this Second edge. The walk
                    // completes through the remaining edges of the face (the
                    // shared segment ends at a vertex or crossing that one of
                    // them reports), so the overlapping edge itself carries
                    // no crossing.
                    debug!(
                        first_face = first_face_ix,
                        second_face = current_second,
                        edge = j,
                        "skipping coincident second edge"
                    );
                    report.coincident_skips += 1;
                    continue;
                }

                let fresh: SmallVec<[Node; 2]> = crossings
                    .points
                    .into_iter()
                    .filter(|p| !K::nodes_equal(p, &last_intersection))
                    .collect();

                if fresh.len() > 1 {
                    return Err(OverlapError::NonConvexIntersection);
                }
                if let Some(p) = fresh.first() {
                    hit = Some((j, *p));
                    break;
                }
            }

            let Some((j, p)) = hit else {
                // The First edge terminates inside the current Second face.
                // The endpoint may sit on this face's boundary when the edge
                // ran along it (coincident skip above).
                path.push(PathSegment {
                    edge: Edge::new(current_overlap_node, edge_first.nodes[1], edge_first.kind),
                    first_face: first_face_ix,
                    second_face: current_second,
                    end: SegmentEnd::None,
                });
                break 'walk;
            };

            last_intersection = p;

            let edge_second = face_second.edges[j];
            let s0 = second.nodes[edge_second.nodes[0]];
            let s1 = second.nodes[edge_second.nodes[1]];

            // Case A: the crossing is exactly the endpoint of the First
            // edge; the next First edge decides which face comes next.
            if K::nodes_equal(&p, &node_first_end) {
                let edge_first_next = face_first.edges[(i + 1) % face_first.len()];
                let toward = first.nodes[edge_first_next.nodes[1]];

                let next_second;
                let crossing_end;

                if K::nodes_equal(&p, &s0) {
                    next_second = find_face_near_vertex::<K>(
                        second,
                        edge_second.nodes[0],
                        &toward,
                        edge_first_next.kind,
                    );
                    crossing_end = SegmentEnd::Node { local: j };
                } else if K::nodes_equal(&p, &s1) {
                    next_second = find_face_near_vertex::<K>(
                        second,
                        edge_second.nodes[1],
                        &toward,
                        edge_first_next.kind,
                    );
                    crossing_end = SegmentEnd::Node { local: (j + 1) % k };
                } else {
                    // Endpoint strictly interior to the Second edge.
                    let restrict = restrict_to_facepair(second, &edge_second)?;
                    next_second = find_face_near_node::<K>(
                        second,
                        &first.nodes[edge_first_next.nodes[0]],
                        &toward,
                        edge_first_next.kind,
                        Some(&restrict),
                    );
                    crossing_end = SegmentEnd::Edge {
                        local: j,
                        crossed: edge_second,
                    };
                }

                if next_second != current_second {
                    path.push(PathSegment {
                        edge: Edge::new(current_overlap_node, edge_first.nodes[1], edge_first.kind),
                        first_face: first_face_ix,
                        second_face: current_second,
                        end: crossing_end,
                    });
                } else {
                    warn!(
                        first_face = first_face_ix,
                        second_face = current_second,
                        "face does not change across edge"
                    );
                    report.face_unchanged_warnings += 1;
                    path.push(PathSegment {
                        edge: Edge::new(current_overlap_node, edge_first.nodes[1], edge_first.kind),
                        first_face: first_face_ix,
                        second_face: current_second,
                        end: SegmentEnd::None,
                    });
                }

                current_second = next_second;
                break 'walk;
            }

            // Case B: the walker crosses the Second vertex s0.
            if K::nodes_equal(&p, &s0) {
                let next_node = second_node_map[edge_second.nodes[0]];
                path.push(PathSegment {
                    edge: Edge::new(current_overlap_node, next_node, edge_first.kind),
                    first_face: first_face_ix,
                    second_face: current_second,
                    end: SegmentEnd::Node { local: j },
                });

                let prev_second = current_second;
                current_second = find_face_near_vertex::<K>(
                    second,
                    edge_second.nodes[0],
                    &node_first_end,
                    edge_first.kind,
                );
                if prev_second == current_second {
                    warn!(
                        first_face = first_face_ix,
                        second_face = current_second,
                        "face does not change across vertex"
                    );
                    report.face_unchanged_warnings += 1;
                }

                current_overlap_node = next_node;
                if next_node == edge_first.nodes[1] {
                    break 'walk;
                }
                continue 'walk;
            }

            // Case C: the walker crosses the Second vertex s1.
            if K::nodes_equal(&p, &s1) {
                let next_node = second_node_map[edge_second.nodes[1]];
                path.push(PathSegment {
                    edge: Edge::new(current_overlap_node, next_node, edge_first.kind),
                    first_face: first_face_ix,
                    second_face: current_second,
                    end: SegmentEnd::Node { local: (j + 1) % k },
                });

                let prev_second = current_second;
                current_second = find_face_near_vertex::<K>(
                    second,
                    edge_second.nodes[1],
                    &node_first_end,
                    edge_first.kind,
                );
                if prev_second == current_second {
                    warn!(
                        first_face = first_face_ix,
                        second_face = current_second,
                        "face does not change across vertex"
                    );
                    report.face_unchanged_warnings += 1;
                }

                current_overlap_node = next_node;
                if next_node == edge_first.nodes[1] {
                    break 'walk;
                }
                continue 'walk;
            }

            // Case D: transversal crossing strictly inside both edges. A new
            // overlap node is born at the intersection.
            let next_node = bins.intern(&mut overlap.nodes, p);
            path.push(PathSegment {
                edge: Edge::new(current_overlap_node, next_node, edge_first.kind),
                first_face: first_face_ix,
                second_face: current_second,
                end: SegmentEnd::Edge {
                    local: j,
                    crossed: edge_second,
                },
            });
            current_overlap_node = next_node;

            let restrict = restrict_to_facepair(second, &edge_second)?;
            let prev_second = current_second;
            current_second = find_face_near_node::<K>(
                second,
                &p,
                &node_first_end,
                edge_first.kind,
                Some(&restrict),
            );
            if prev_second == current_second {
                warn!(
                    first_face = first_face_ix,
                    second_face = current_second,
                    "face does not change across edge"
                );
                report.face_unchanged_warnings += 1;
            }
        }
    }

    Ok(path)
}

/// The two faces across a Second edge, packaged as a `FaceLocate` so the
/// direction tie-break only considers them.
fn restrict_to_facepair(second: &Mesh, edge: &Edge) -> Result<FaceLocate, OverlapError> {
    let missing = || OverlapError::MissingEdge(edge.nodes[0], edge.nodes[1]);
    let pair = second.facepair(edge).ok_or_else(missing)?;

    let mut locate = FaceLocate {
        location: NodeLocation::Edge,
        ..Default::default()
    };
    for &f in &pair.faces {
        if f == INVALID_FACE {
            continue;
        }
        let local = second.faces[f].edge_index(edge).ok_or_else(missing)?;
        locate.face_indices.push(f);
        locate.face_locations.push(local);
    }
    Ok(locate)
}
