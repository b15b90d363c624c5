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
use tracing::warn;

use crate::geometry::edge::EdgeKind;
use crate::geometry::face::NodeLocation;
use crate::geometry::node::Node;
use crate::kernel::{ArcSide, SphericalKernel};
use crate::mesh::Mesh;

/// Step length for the direction tie-break in [`find_face_near_node`].
const NUDGE: f64 = 1.0e-7;

/// Result of locating a node in a mesh: every face containing it, the
/// classification, and per face the local index of the edge or vertex the
/// node sits on (meaningless for `Interior`).
#[derive(Debug, Clone, Default)]
pub struct FaceLocate {
    pub face_indices: Vec<usize>,
    pub face_locations: Vec<usize>,
    pub location: NodeLocation,
}

/// All faces of `mesh` containing `node`. Interior hits return one face;
/// edge hits two; vertex hits every incident face.
pub fn find_face_from_node<K: SphericalKernel>(mesh: &Mesh, node: &Node) -> FaceLocate {
    let mut out = FaceLocate::default();

    for (f, face) in mesh.faces.iter().enumerate() {
        let mut contained = true;
        let mut on: SmallVec<[usize; 2]> = SmallVec::new();

        for (i, edge) in face.edges.iter().enumerate() {
            if edge.is_degenerate() {
                continue;
            }
            let n0 = &mesh.nodes[edge.nodes[0]];
            let n1 = &mesh.nodes[edge.nodes[1]];
            match K::edge_side(n0, n1, edge.kind, node) {
                ArcSide::Right => {
                    contained = false;
                    break;
                }
                ArcSide::On => on.push(i),
                ArcSide::Left => {}
            }
        }
        if !contained {
            continue;
        }

        let k = face.len();
        let (loc, local) = if on.is_empty() {
            (NodeLocation::Interior, 0)
        } else if let Some(&e) = on.iter().find(|&&e| on.contains(&((e + 1) % k))) {
            // Two adjacent boundary circles meet at the shared vertex.
            (NodeLocation::Node, (e + 1) % k)
        } else {
            (NodeLocation::Edge, on[0])
        };

        if out.face_indices.is_empty() {
            out.location = loc;
        }
        out.face_indices.push(f);
        out.face_locations.push(local);
    }

    out
}

/// Resolves which face an arc leaving `node` toward `toward` enters, among
/// the faces sharing the node's vertex or edge. The tie-break displaces the
/// node a small step along the outgoing arc and picks the candidate whose
/// interior contains the stepped point.
pub fn find_face_near_node<K: SphericalKernel>(
    mesh: &Mesh,
    node: &Node,
    toward: &Node,
    kind: EdgeKind,
    restrict: Option<&FaceLocate>,
) -> usize {
    let located;
    let candidates: &[usize] = match restrict {
        Some(s) => &s.face_indices,
        None => {
            located = find_face_from_node::<K>(mesh, node);
            &located.face_indices
        }
    };
    debug_assert!(!candidates.is_empty());

    // A walk that continues along a mesh edge belongs to the face whose
    // counter-clockwise boundary traverses that edge in the same direction;
    // an interior step cannot separate the two incident faces there.
    for &f in candidates {
        if continues_along_boundary::<K>(mesh, f, node, toward) {
            return f;
        }
    }

    let stepped = step_along_arc(node, toward, kind);
    for &f in candidates {
        if face_contains::<K>(mesh, f, &stepped) {
            return f;
        }
    }

    // No candidate owns the stepped point (grazing or near-degenerate
    // geometry). Fall back to the least-violated candidate; deterministic.
    let mut best = candidates[0];
    let mut best_score = f64::NEG_INFINITY;
    for &f in candidates {
        let score = containment_score(mesh, f, &stepped);
        if score > best_score {
            best_score = score;
            best = f;
        }
    }
    warn!(face = best, "direction tie-break fell back to nearest face");
    best
}

/// Vertex-index form of [`find_face_near_node`], used when the walker stands
/// on a mesh vertex: candidates are the faces incident to that vertex.
pub fn find_face_near_vertex<K: SphericalKernel>(
    mesh: &Mesh,
    vertex: usize,
    toward: &Node,
    kind: EdgeKind,
) -> usize {
    let node = mesh.nodes[vertex];
    let located = find_face_from_node::<K>(mesh, &node);
    find_face_near_node::<K>(mesh, &node, toward, kind, Some(&located))
}

/// True when the arc leaving `node` toward `toward` runs along a boundary
/// edge of face `f` in the edge's own direction.
fn continues_along_boundary<K: SphericalKernel>(
    mesh: &Mesh,
    f: usize,
    node: &Node,
    toward: &Node,
) -> bool {
    for edge in &mesh.faces[f].edges {
        if edge.is_degenerate() {
            continue;
        }
        let u = &mesh.nodes[edge.nodes[0]];
        let w = &mesh.nodes[edge.nodes[1]];

        if K::edge_side(u, w, edge.kind, node) != ArcSide::On
            || K::edge_side(u, w, edge.kind, toward) != ArcSide::On
        {
            continue;
        }
        let on_arc = match edge.kind {
            EdgeKind::GreatCircleArc => K::within_gc_arc(u, w, node),
            EdgeKind::ConstantLatitude => K::within_cl_arc(u, w, node),
        };
        // Standing at the far endpoint means the walk leaves this edge.
        if !on_arc || K::nodes_equal(node, w) {
            continue;
        }

        let forward = match edge.kind {
            EdgeKind::GreatCircleArc => u.cross(w).dot(&node.cross(toward)) > 0.0,
            EdgeKind::ConstantLatitude => {
                let ew = u.x * w.y - u.y * w.x;
                let et = node.x * toward.y - node.y * toward.x;
                ew * et > 0.0
            }
        };
        if forward {
            return true;
        }
    }
    false
}

fn face_contains<K: SphericalKernel>(mesh: &Mesh, f: usize, p: &Node) -> bool {
    mesh.faces[f].edges.iter().all(|edge| {
        edge.is_degenerate()
            || K::edge_side(
                &mesh.nodes[edge.nodes[0]],
                &mesh.nodes[edge.nodes[1]],
                edge.kind,
                p,
            ) != ArcSide::Right
    })
}

/// Minimum signed side value of `p` over the face boundary; positive inside.
fn containment_score(mesh: &Mesh, f: usize, p: &Node) -> f64 {
    let mut score = f64::INFINITY;
    for edge in &mesh.faces[f].edges {
        if edge.is_degenerate() {
            continue;
        }
        let n0 = &mesh.nodes[edge.nodes[0]];
        let n1 = &mesh.nodes[edge.nodes[1]];
        let s = match edge.kind {
            EdgeKind::GreatCircleArc => n0.cross(n1).dot(p),
            EdgeKind::ConstantLatitude => {
                let east = n0.x * n1.y - n0.y * n1.x >= 0.0;
                if east {
                    p.z - n0.z
                } else {
                    n0.z - p.z
                }
            }
        };
        score = score.min(s);
    }
    score
}

/// A point a short way from `node` along the arc toward `toward`.
fn step_along_arc(node: &Node, toward: &Node, kind: EdgeKind) -> Node {
    match kind {
        EdgeKind::GreatCircleArc => {
            let t = node.cross(toward).cross(node);
            let n = t.norm();
            if n < NUDGE * NUDGE {
                // Degenerate direction; stay put.
                return *node;
            }
            (*node + t * (NUDGE / n)).normalized()
        }
        EdgeKind::ConstantLatitude => {
            let east = node.x * toward.y - node.y * toward.x >= 0.0;
            let radius = (node.x * node.x + node.y * node.y).sqrt();
            let angle = NUDGE / radius.max(NUDGE);
            node.rotated_z(if east { angle } else { -angle })
        }
    }
}
