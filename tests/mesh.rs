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

use std::f64::consts::PI;

use approx::assert_relative_eq;

use overmesh::geometry::{Edge, EdgeKind, Face, Node, NodeLocation, INVALID_FACE, INVALID_NODE};
use overmesh::kernel::FuzzyKernel;
use overmesh::mesh::coincident::build_coincident_node_map;
use overmesh::mesh::dedup::{DedupStrategy, NodeBins};
use overmesh::mesh::queries::{find_face_from_node, find_face_near_node, find_face_near_vertex};
use overmesh::mesh::{mesh_from_loops, Mesh, MeshError};

fn lonlat(lon_deg: f64, lat_deg: f64) -> Node {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    Node::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

/// The eight octants of the sphere, all great-circle edges.
fn octant_mesh() -> Mesh {
    let nodes = vec![
        Node::new(1.0, 0.0, 0.0),
        Node::new(0.0, 1.0, 0.0),
        Node::new(-1.0, 0.0, 0.0),
        Node::new(0.0, -1.0, 0.0),
        Node::new(0.0, 0.0, 1.0),
        Node::new(0.0, 0.0, -1.0),
    ];
    let loops: &[&[usize]] = &[
        &[0, 1, 4],
        &[1, 2, 4],
        &[2, 3, 4],
        &[3, 0, 4],
        &[1, 0, 5],
        &[2, 1, 5],
        &[3, 2, 5],
        &[0, 3, 5],
    ];
    mesh_from_loops(nodes, loops, EdgeKind::GreatCircleArc).unwrap()
}

#[test]
fn edge_map_records_incident_faces() {
    let nodes = vec![
        Node::new(1.0, 0.0, 0.0),
        Node::new(0.0, 1.0, 0.0),
        Node::new(0.0, 0.0, 1.0),
        Node::new(0.0, -1.0, 0.0),
    ];
    let mesh = mesh_from_loops(nodes, &[&[0, 1, 2], &[0, 2, 3]], EdgeKind::GreatCircleArc).unwrap();

    let shared = mesh
        .facepair(&Edge::new(0, 2, EdgeKind::GreatCircleArc))
        .unwrap();
    assert!(shared.is_complete());
    assert_eq!(shared.opposite(0), Some(1));
    assert_eq!(shared.opposite(1), Some(0));

    let boundary = mesh
        .facepair(&Edge::new(0, 1, EdgeKind::GreatCircleArc))
        .unwrap();
    assert_eq!(boundary.faces, [0, INVALID_FACE]);

    // Reversed direction looks up the same entry.
    assert!(mesh
        .facepair(&Edge::new(2, 0, EdgeKind::GreatCircleArc))
        .is_some());
}

#[test]
fn edge_with_three_faces_is_rejected() {
    let nodes = vec![
        Node::new(1.0, 0.0, 0.0),
        Node::new(0.0, 1.0, 0.0),
        Node::new(0.0, 0.0, 1.0),
        Node::new(0.0, -1.0, 0.0),
        Node::new(0.0, 0.0, -1.0),
    ];
    let result = mesh_from_loops(
        nodes,
        &[&[0, 1, 2], &[0, 1, 3], &[0, 1, 4]],
        EdgeKind::GreatCircleArc,
    );
    assert_eq!(result.unwrap_err(), MeshError::TooManyIncidentFaces(0, 1));
}

#[test]
fn octant_face_area_is_one_eighth_of_the_sphere() {
    let mesh = octant_mesh();
    assert_relative_eq!(mesh.face_area(0), PI / 2.0, epsilon = 1e-12);
    assert_relative_eq!(mesh.total_area(), 4.0 * PI, epsilon = 1e-9);
}

#[test]
fn polar_cap_area_from_latitude_edges() {
    let lat = 30.0f64;
    let nodes = vec![
        lonlat(0.0, lat),
        lonlat(90.0, lat),
        lonlat(180.0, lat),
        lonlat(270.0, lat),
    ];
    let z = nodes[0].z;
    let face = Face::from_nodes(&[0, 1, 2, 3], EdgeKind::ConstantLatitude);
    let mesh = Mesh::new(nodes, vec![face]);

    // Cap area above z is 2 pi (1 - z).
    assert_relative_eq!(mesh.face_area(0), 2.0 * PI * (1.0 - z), max_relative = 1e-3);
}

#[test]
fn locate_interior_edge_and_vertex() {
    let mesh = octant_mesh();

    let interior = find_face_from_node::<FuzzyKernel>(&mesh, &lonlat(45.0, 45.0));
    assert_eq!(interior.location, NodeLocation::Interior);
    assert_eq!(interior.face_indices, vec![0]);

    let on_edge = find_face_from_node::<FuzzyKernel>(&mesh, &lonlat(90.0, 45.0));
    assert_eq!(on_edge.location, NodeLocation::Edge);
    assert_eq!(on_edge.face_indices, vec![0, 1]);

    let on_vertex = find_face_from_node::<FuzzyKernel>(&mesh, &Node::new(0.0, 1.0, 0.0));
    assert_eq!(on_vertex.location, NodeLocation::Node);
    assert_eq!(on_vertex.face_indices.len(), 4);

    let outside = find_face_from_node::<FuzzyKernel>(&Mesh::default(), &lonlat(0.0, 0.0));
    assert_eq!(outside.location, NodeLocation::Exterior);
    assert!(outside.face_indices.is_empty());
}

#[test]
fn near_node_resolves_the_entered_face() {
    let mesh = octant_mesh();
    let on_edge = lonlat(90.0, 45.0);

    let west = find_face_near_node::<FuzzyKernel>(
        &mesh,
        &on_edge,
        &lonlat(45.0, 45.0),
        EdgeKind::GreatCircleArc,
        None,
    );
    assert_eq!(west, 0);

    let east = find_face_near_node::<FuzzyKernel>(
        &mesh,
        &on_edge,
        &lonlat(135.0, 45.0),
        EdgeKind::GreatCircleArc,
        None,
    );
    assert_eq!(east, 1);
}

#[test]
fn near_vertex_prefers_the_face_whose_boundary_carries_the_walk() {
    let mesh = octant_mesh();

    // Walking from (0,1,0) straight north runs along the meridian shared by
    // faces 0 and 1; the face traversing it in the same direction wins.
    let north = find_face_near_vertex::<FuzzyKernel>(
        &mesh,
        1,
        &Node::new(0.0, 0.0, 1.0),
        EdgeKind::GreatCircleArc,
    );
    assert_eq!(north, 0);

    let south = find_face_near_vertex::<FuzzyKernel>(
        &mesh,
        1,
        &Node::new(0.0, 0.0, -1.0),
        EdgeKind::GreatCircleArc,
    );
    assert_eq!(south, 5);
}

#[test]
fn coincident_nodes_found_across_meshes() {
    let first = octant_mesh();

    // A quarter turn maps the octant mesh onto itself; every node of the
    // second mesh coincides with one of the first.
    let nodes = vec![
        Node::new(0.0, 1.0, 0.0),
        Node::new(-1.0, 0.0, 0.0),
        Node::new(0.0, -1.0, 0.0),
        Node::new(1.0, 0.0, 0.0),
        Node::new(0.0, 0.0, 1.0),
        Node::new(0.0, 0.0, -1.0),
    ];
    let second = Mesh::new(nodes, Vec::new());

    let (count, map) = build_coincident_node_map::<FuzzyKernel>(&first, &second);
    assert_eq!(count, 6);
    assert_eq!(map, vec![1, 2, 3, 0, 4, 5]);
}

#[test]
fn coincident_map_leaves_unmatched_nodes_invalid() {
    let first = octant_mesh();
    let second = Mesh::new(vec![lonlat(12.0, 34.0), Node::new(1.0, 0.0, 0.0)], Vec::new());

    let (count, map) = build_coincident_node_map::<FuzzyKernel>(&first, &second);
    assert_eq!(count, 1);
    assert_eq!(map, vec![INVALID_NODE, 0]);
}

#[test]
fn hash_bins_intern_reuses_equal_nodes() {
    let mut bins = NodeBins::new(DedupStrategy::HashBins);
    let mut nodes = Vec::new();

    let a = lonlat(10.0, 20.0);
    let near = Node::new(a.x + 1.0e-12, a.y, a.z);
    let far = lonlat(50.0, 20.0);

    assert_eq!(bins.intern(&mut nodes, a), 0);
    assert_eq!(bins.intern(&mut nodes, near), 0);
    assert_eq!(bins.intern(&mut nodes, far), 1);
    assert_eq!(nodes.len(), 2);
}

#[test]
fn retain_strategy_keeps_repeats() {
    let mut bins = NodeBins::new(DedupStrategy::Retain);
    let mut nodes = Vec::new();

    let a = lonlat(10.0, 20.0);
    assert_eq!(bins.intern(&mut nodes, a), 0);
    assert_eq!(bins.intern(&mut nodes, a), 1);
    assert_eq!(nodes.len(), 2);
}

#[test]
fn multimap_bins_catch_pairs_straddling_a_bin_boundary() {
    // 0.1 is a bin edge; these two land in different bins but are equal.
    let a = Node::new(0.1 - 1.0e-12, 0.5, 0.2);
    let b = Node::new(0.1 + 1.0e-12, 0.5, 0.2);

    let mut hash_bins = NodeBins::new(DedupStrategy::HashBins);
    let mut nodes = Vec::new();
    hash_bins.intern(&mut nodes, a);
    hash_bins.intern(&mut nodes, b);
    assert_eq!(nodes.len(), 2);

    let mut multimap = NodeBins::new(DedupStrategy::MultimapBins);
    let mut nodes = Vec::new();
    assert_eq!(multimap.intern(&mut nodes, a), 0);
    assert_eq!(multimap.intern(&mut nodes, b), 0);
    assert_eq!(nodes.len(), 1);
}

#[test]
fn seeded_bins_reuse_existing_nodes() {
    let existing = vec![lonlat(0.0, 0.0), lonlat(90.0, 0.0)];
    let mut bins = NodeBins::new(DedupStrategy::HashBins);
    bins.seed(&existing);

    let mut nodes = existing.clone();
    assert_eq!(bins.intern(&mut nodes, lonlat(90.0, 0.0)), 1);
    assert_eq!(nodes.len(), 2);
}
