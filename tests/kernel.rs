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

use approx::assert_relative_eq;

use overmesh::geometry::{EdgeKind, Node};
use overmesh::kernel::{ArcSide, ExactKernel, FuzzyKernel, SphericalKernel};

fn lonlat(lon_deg: f64, lat_deg: f64) -> Node {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    Node::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
}

#[test]
fn fuzzy_node_equality() {
    let a = Node::new(1.0, 0.0, 0.0);
    let b = Node::new(1.0 + 5.0e-11, 0.0, 0.0);
    let c = Node::new(1.0 + 1.0e-9, 0.0, 0.0);

    assert!(FuzzyKernel::nodes_equal(&a, &b));
    assert!(!FuzzyKernel::nodes_equal(&a, &c));
}

#[test]
fn exact_node_equality_is_bitwise() {
    let a = Node::new(1.0, 0.0, 0.0);
    let b = Node::new(1.0, 0.0, 0.0);
    let c = Node::new(1.0 + 1.0e-12, 0.0, 0.0);

    assert!(ExactKernel::nodes_equal(&a, &b));
    assert!(!ExactKernel::nodes_equal(&a, &c));
}

#[test]
fn great_circle_side_classification() {
    let n0 = Node::new(1.0, 0.0, 0.0);
    let n1 = Node::new(0.0, 1.0, 0.0);
    let kind = EdgeKind::GreatCircleArc;

    let north = Node::new(0.0, 0.0, 1.0);
    let south = Node::new(0.0, 0.0, -1.0);
    let mid = lonlat(45.0, 0.0);

    assert_eq!(FuzzyKernel::edge_side(&n0, &n1, kind, &north), ArcSide::Left);
    assert_eq!(FuzzyKernel::edge_side(&n0, &n1, kind, &south), ArcSide::Right);
    assert_eq!(FuzzyKernel::edge_side(&n0, &n1, kind, &mid), ArcSide::On);

    assert_eq!(ExactKernel::edge_side(&n0, &n1, kind, &north), ArcSide::Left);
    assert_eq!(ExactKernel::edge_side(&n0, &n1, kind, &south), ArcSide::Right);
}

#[test]
fn constant_latitude_side_depends_on_direction() {
    let u = lonlat(0.0, 30.0);
    let v = lonlat(90.0, 30.0);
    let kind = EdgeKind::ConstantLatitude;
    let above = lonlat(45.0, 60.0);
    let below = lonlat(45.0, 0.0);

    // Eastward arc: interior of a CCW face is to the north.
    assert_eq!(FuzzyKernel::edge_side(&u, &v, kind, &above), ArcSide::Left);
    assert_eq!(FuzzyKernel::edge_side(&u, &v, kind, &below), ArcSide::Right);

    // Westward arc flips it.
    assert_eq!(FuzzyKernel::edge_side(&v, &u, kind, &above), ArcSide::Right);
    assert_eq!(FuzzyKernel::edge_side(&v, &u, kind, &below), ArcSide::Left);
}

#[test]
fn great_circle_transversal_crossing() {
    let a0 = Node::new(1.0, 0.0, 0.0);
    let a1 = Node::new(0.0, 1.0, 0.0);
    let b0 = lonlat(45.0, 45.0);
    let b1 = lonlat(45.0, -45.0);

    let out = FuzzyKernel::edge_intersections(
        &a0,
        &a1,
        EdgeKind::GreatCircleArc,
        &b0,
        &b1,
        EdgeKind::GreatCircleArc,
    );
    assert!(!out.coincident);
    assert_eq!(out.points.len(), 1);
    let p = out.points[0];
    let expected = lonlat(45.0, 0.0);
    assert_relative_eq!(p.x, expected.x, epsilon = 1e-12);
    assert_relative_eq!(p.y, expected.y, epsilon = 1e-12);
    assert_relative_eq!(p.z, expected.z, epsilon = 1e-12);

    let out = ExactKernel::edge_intersections(
        &a0,
        &a1,
        EdgeKind::GreatCircleArc,
        &b0,
        &b1,
        EdgeKind::GreatCircleArc,
    );
    assert!(!out.coincident);
    assert_eq!(out.points.len(), 1);
}

#[test]
fn shared_endpoint_is_a_single_crossing() {
    let shared = Node::new(1.0, 0.0, 0.0);
    let a1 = Node::new(0.0, 1.0, 0.0);
    let b1 = Node::new(0.0, 0.0, 1.0);

    let fuzzy = FuzzyKernel::edge_intersections(
        &shared,
        &a1,
        EdgeKind::GreatCircleArc,
        &shared,
        &b1,
        EdgeKind::GreatCircleArc,
    );
    let exact = ExactKernel::edge_intersections(
        &shared,
        &a1,
        EdgeKind::GreatCircleArc,
        &shared,
        &b1,
        EdgeKind::GreatCircleArc,
    );

    for out in [fuzzy, exact] {
        assert!(!out.coincident);
        assert_eq!(out.points.len(), 1);
        assert_eq!(out.points[0], shared);
    }
}

#[test]
fn endpoint_on_arc_interior_is_snapped() {
    // A T-junction: arc A ends strictly inside arc B. The endpoint itself
    // must come back verbatim so downstream equality checks hold.
    let a0 = lonlat(45.0, 45.0);
    let a1 = lonlat(45.0, 0.0);
    let b0 = Node::new(1.0, 0.0, 0.0);
    let b1 = Node::new(0.0, 1.0, 0.0);

    let out = FuzzyKernel::edge_intersections(
        &a0,
        &a1,
        EdgeKind::GreatCircleArc,
        &b0,
        &b1,
        EdgeKind::GreatCircleArc,
    );
    assert_eq!(out.points.len(), 1);
    assert_eq!(out.points[0], a1);

    let out = ExactKernel::edge_intersections(
        &a0,
        &a1,
        EdgeKind::GreatCircleArc,
        &b0,
        &b1,
        EdgeKind::GreatCircleArc,
    );
    assert_eq!(out.points.len(), 1);
    assert_eq!(out.points[0], a1);
}

#[test]
fn overlapping_arcs_on_one_circle_are_coincident() {
    let a0 = lonlat(0.0, 0.0);
    let a1 = lonlat(90.0, 0.0);
    let b0 = lonlat(30.0, 0.0);
    let b1 = lonlat(120.0, 0.0);

    let out = FuzzyKernel::edge_intersections(
        &a0,
        &a1,
        EdgeKind::GreatCircleArc,
        &b0,
        &b1,
        EdgeKind::GreatCircleArc,
    );
    assert!(out.coincident);
    assert!(out.points.is_empty());
}

#[test]
fn identical_arcs_are_coincident() {
    let a0 = Node::new(1.0, 0.0, 0.0);
    let a1 = Node::new(0.0, 1.0, 0.0);

    let out = FuzzyKernel::edge_intersections(
        &a0,
        &a1,
        EdgeKind::GreatCircleArc,
        &a0,
        &a1,
        EdgeKind::GreatCircleArc,
    );
    assert!(out.coincident);

    let out = ExactKernel::edge_intersections(
        &a0,
        &a1,
        EdgeKind::GreatCircleArc,
        &a0,
        &a1,
        EdgeKind::GreatCircleArc,
    );
    assert!(out.coincident);
}

#[test]
fn disjoint_arcs_on_one_circle_do_not_cross() {
    let a0 = lonlat(0.0, 0.0);
    let a1 = lonlat(30.0, 0.0);
    let b0 = lonlat(60.0, 0.0);
    let b1 = lonlat(90.0, 0.0);

    let out = FuzzyKernel::edge_intersections(
        &a0,
        &a1,
        EdgeKind::GreatCircleArc,
        &b0,
        &b1,
        EdgeKind::GreatCircleArc,
    );
    assert!(!out.coincident);
    assert!(out.points.is_empty());
}

#[test]
fn touching_arcs_on_one_circle_cross_at_the_shared_point() {
    let a0 = lonlat(0.0, 0.0);
    let shared = lonlat(30.0, 0.0);
    let b1 = lonlat(60.0, 0.0);

    let out = FuzzyKernel::edge_intersections(
        &a0,
        &shared,
        EdgeKind::GreatCircleArc,
        &shared,
        &b1,
        EdgeKind::GreatCircleArc,
    );
    assert!(!out.coincident);
    assert_eq!(out.points.len(), 1);
    assert!(FuzzyKernel::nodes_equal(&out.points[0], &shared));
}

#[test]
fn great_circle_crosses_latitude_circle() {
    // A meridian against a latitude arc; one crossing where the meridian
    // pierces the latitude plane.
    let g0 = lonlat(0.0, -45.0);
    let g1 = lonlat(0.0, 45.0);
    let c0 = lonlat(-30.0, 30.0);
    let c1 = lonlat(30.0, 30.0);

    let out = FuzzyKernel::edge_intersections(
        &g0,
        &g1,
        EdgeKind::GreatCircleArc,
        &c0,
        &c1,
        EdgeKind::ConstantLatitude,
    );
    assert!(!out.coincident);
    assert_eq!(out.points.len(), 1);

    let p = out.points[0];
    assert_eq!(p.z, c0.z);
    assert_relative_eq!(p.x, (1.0 - c0.z * c0.z).sqrt(), epsilon = 1e-12);
    assert_relative_eq!(p.y, 0.0, epsilon = 1e-12);

    // Same crossing when the argument order flips.
    let out = FuzzyKernel::edge_intersections(
        &c0,
        &c1,
        EdgeKind::ConstantLatitude,
        &g0,
        &g1,
        EdgeKind::GreatCircleArc,
    );
    assert_eq!(out.points.len(), 1);
}

#[test]
fn meridian_misses_latitude_arc_outside_its_span() {
    let g0 = lonlat(90.0, -45.0);
    let g1 = lonlat(90.0, 45.0);
    let c0 = lonlat(-30.0, 30.0);
    let c1 = lonlat(30.0, 30.0);

    let out = FuzzyKernel::edge_intersections(
        &g0,
        &g1,
        EdgeKind::GreatCircleArc,
        &c0,
        &c1,
        EdgeKind::ConstantLatitude,
    );
    assert!(out.points.is_empty());
}

#[test]
fn distinct_latitude_circles_never_cross() {
    let a0 = lonlat(0.0, 30.0);
    let a1 = lonlat(90.0, 30.0);
    let b0 = lonlat(0.0, 50.0);
    let b1 = lonlat(90.0, 50.0);

    let out = FuzzyKernel::edge_intersections(
        &a0,
        &a1,
        EdgeKind::ConstantLatitude,
        &b0,
        &b1,
        EdgeKind::ConstantLatitude,
    );
    assert!(!out.coincident);
    assert!(out.points.is_empty());
}

#[test]
fn latitude_arcs_overlap_and_touch() {
    let lat = 30.0;
    let a0 = lonlat(0.0, lat);
    let a1 = lonlat(40.0, lat);
    let b0 = lonlat(20.0, lat);
    let b1 = lonlat(60.0, lat);

    let out = FuzzyKernel::edge_intersections(
        &a0,
        &a1,
        EdgeKind::ConstantLatitude,
        &b0,
        &b1,
        EdgeKind::ConstantLatitude,
    );
    assert!(out.coincident);

    let shared = lonlat(40.0, lat);
    let out = FuzzyKernel::edge_intersections(
        &a0,
        &shared,
        EdgeKind::ConstantLatitude,
        &shared,
        &b1,
        EdgeKind::ConstantLatitude,
    );
    assert!(!out.coincident);
    assert_eq!(out.points.len(), 1);
    assert!(FuzzyKernel::nodes_equal(&out.points[0], &shared));
}

#[test]
fn first_edge_crossing_a_second_vertex_reports_the_vertex() {
    // The equator arc passes through a vertex where two meridian edges meet;
    // scanning either incident edge yields that vertex once.
    let v = lonlat(45.0, 0.0);
    let up = lonlat(45.0, 60.0);
    let a0 = Node::new(1.0, 0.0, 0.0);
    let a1 = Node::new(0.0, 1.0, 0.0);

    let out = FuzzyKernel::edge_intersections(
        &a0,
        &a1,
        EdgeKind::GreatCircleArc,
        &up,
        &v,
        EdgeKind::GreatCircleArc,
    );
    assert_eq!(out.points.len(), 1);
    assert_eq!(out.points[0], v);
}
