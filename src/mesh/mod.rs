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

pub mod coincident;
pub mod dedup;
pub mod queries;

use ahash::AHashMap;
use thiserror::Error;

use crate::geometry::edge::{Edge, EdgeKey, EdgeKind, FacePair};
use crate::geometry::face::Face;
use crate::geometry::node::{Node, NodeVector};

/// Subdivision count for constant-latitude edges when integrating face
/// areas. The latitude arc is not a geodesic, so it is sampled and the area
/// summed over great-circle sub-arcs.
const AREA_LATITUDE_STEPS: usize = 64;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// An edge can bound at most two faces.
    #[error("edge ({0}, {1}) is incident to more than two faces")]
    TooManyIncidentFaces(usize, usize),
}

/// A polygonal mesh on the unit sphere. Nodes and faces are index-based; the
/// edge map gives the (at most two) faces incident to each undirected edge.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub nodes: NodeVector,
    pub faces: Vec<Face>,
    pub edge_map: AHashMap<EdgeKey, FacePair>,
    /// For an overlap mesh, the (first_face, second_face) pair that produced
    /// each face, parallel to `faces`. Empty on input meshes.
    pub source_pairs: Vec<(usize, usize)>,
}

impl Mesh {
    pub fn new(nodes: NodeVector, faces: Vec<Face>) -> Self {
        Self {
            nodes,
            faces,
            edge_map: AHashMap::new(),
            source_pairs: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.faces.clear();
        self.edge_map.clear();
        self.source_pairs.clear();
    }

    /// Builds the edge-to-facepair map from the face loops. Degenerate edges
    /// are not registered.
    pub fn build_edge_map(&mut self) -> Result<(), MeshError> {
        self.edge_map.clear();
        for (f, face) in self.faces.iter().enumerate() {
            for edge in &face.edges {
                if edge.is_degenerate() {
                    continue;
                }
                let pair = self.edge_map.entry(edge.key()).or_default();
                if !pair.push(f) {
                    let EdgeKey(n0, n1) = edge.key();
                    return Err(MeshError::TooManyIncidentFaces(n0, n1));
                }
            }
        }
        Ok(())
    }

    pub fn facepair(&self, edge: &Edge) -> Option<&FacePair> {
        self.edge_map.get(&edge.key())
    }

    /// Spherical area of face `ix`, counter-clockwise positive.
    ///
    /// Constant-latitude edges are sampled into short great-circle sub-arcs;
    /// the polygon area is then the summed signed solid angle of a triangle
    /// fan (van Oosterom-Strackee).
    pub fn face_area(&self, ix: usize) -> f64 {
        let ring = self.face_ring(ix);
        if ring.len() < 3 {
            return 0.0;
        }
        let o = ring[0];
        let mut area = 0.0;
        for i in 1..ring.len() - 1 {
            area += signed_triangle_area(&o, &ring[i], &ring[i + 1]);
        }
        area
    }

    pub fn total_area(&self) -> f64 {
        (0..self.faces.len()).map(|i| self.face_area(i)).sum()
    }

    /// The boundary of face `ix` as a vertex ring, constant-latitude edges
    /// subdivided, degenerate edges dropped.
    fn face_ring(&self, ix: usize) -> Vec<Node> {
        let mut ring = Vec::new();
        for edge in &self.faces[ix].edges {
            if edge.is_degenerate() {
                continue;
            }
            let u = self.nodes[edge.nodes[0]];
            match edge.kind {
                EdgeKind::GreatCircleArc => ring.push(u),
                EdgeKind::ConstantLatitude => {
                    let v = self.nodes[edge.nodes[1]];
                    let cz = u.x * v.y - u.y * v.x;
                    let dot = u.x * v.x + u.y * v.y;
                    let dl = cz.atan2(dot);
                    for k in 0..AREA_LATITUDE_STEPS {
                        let t = k as f64 / AREA_LATITUDE_STEPS as f64;
                        ring.push(u.rotated_z(dl * t));
                    }
                }
            }
        }
        ring
    }
}

/// Signed solid angle of the spherical triangle (a, b, c).
fn signed_triangle_area(a: &Node, b: &Node, c: &Node) -> f64 {
    let num = a.dot(&b.cross(c));
    let den = 1.0 + a.dot(b) + b.dot(c) + c.dot(a);
    2.0 * num.atan2(den)
}

/// Convenience constructor: a mesh from vertex cycles with one edge kind
/// throughout, edge map built.
pub fn mesh_from_loops(
    nodes: NodeVector,
    loops: &[&[usize]],
    kind: EdgeKind,
) -> Result<Mesh, MeshError> {
    let faces = loops.iter().map(|l| Face::from_nodes(l, kind)).collect();
    let mut mesh = Mesh::new(nodes, faces);
    mesh.build_edge_map()?;
    Ok(mesh)
}
