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

pub mod exact;
pub mod fuzzy;

pub use exact::ExactKernel;
pub use fuzzy::FuzzyKernel;

use smallvec::SmallVec;

use crate::geometry::edge::EdgeKind;
use crate::geometry::node::Node;

/// Componentwise tolerance for fuzzy node comparisons and the fuzzy
/// predicates.
pub const HIGH_TOLERANCE: f64 = 1.0e-10;

/// Tolerance for detecting degenerate constructions (parallel circle planes).
pub const REFERENCE_TOLERANCE: f64 = 1.0e-12;

/// Position of a point relative to a directed arc. `Left` is the interior
/// side of a counter-clockwise face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcSide {
    Left,
    On,
    Right,
}

/// Result of intersecting two arcs. When `coincident` is set the arcs lie on
/// the same circle and overlap over a positive-measure segment; `points` is
/// empty in that case and the caller fails fast.
#[derive(Debug, Clone, Default)]
pub struct EdgeCrossings {
    pub points: SmallVec<[Node; 2]>,
    pub coincident: bool,
}

impl EdgeCrossings {
    fn coincident() -> Self {
        Self {
            points: SmallVec::new(),
            coincident: true,
        }
    }
}

/// The predicate kernel the tracer and the mesh queries are generic over.
///
/// Implementors are stateless unit structs. The fuzzy kernel classifies with
/// `HIGH_TOLERANCE`; the exact kernel takes every sign decision in rational
/// arithmetic over the lifted f64 coordinates. Intersection *coordinates* are
/// constructed in f64 either way (normalization needs a square root); only
/// the decisions differ.
pub trait SphericalKernel {
    /// Same point on the sphere, under this kernel's notion of equality.
    fn nodes_equal(a: &Node, b: &Node) -> bool;

    /// Classifies `p` against the directed arc `n0 -> n1`.
    fn edge_side(n0: &Node, n1: &Node, kind: EdgeKind, p: &Node) -> ArcSide;

    /// Arc-range test for a point already known to lie on the great circle
    /// through `u` and `v`. Endpoints are inside.
    fn within_gc_arc(u: &Node, v: &Node, p: &Node) -> bool;

    /// Arc-range test on a constant-latitude circle; the arc runs the short
    /// way in longitude. Endpoints are inside.
    fn within_cl_arc(u: &Node, v: &Node, p: &Node) -> bool;

    /// All intersection points of arc A with arc B that lie within both arcs,
    /// endpoints included. A point that is an endpoint of one arc and
    /// interior to the other is a valid intersection; such points are emitted
    /// as the endpoint node verbatim so downstream equality tests hold in
    /// both kernels.
    fn edge_intersections(
        a0: &Node,
        a1: &Node,
        akind: EdgeKind,
        b0: &Node,
        b1: &Node,
        bkind: EdgeKind,
    ) -> EdgeCrossings {
        use EdgeKind::*;
        match (akind, bkind) {
            (GreatCircleArc, GreatCircleArc) => Self::gc_gc(a0, a1, b0, b1),
            (GreatCircleArc, ConstantLatitude) => Self::gc_cl(a0, a1, b0, b1),
            (ConstantLatitude, GreatCircleArc) => Self::gc_cl(b0, b1, a0, a1),
            (ConstantLatitude, ConstantLatitude) => Self::cl_cl(a0, a1, b0, b1),
        }
    }

    fn gc_gc(a0: &Node, a1: &Node, b0: &Node, b1: &Node) -> EdgeCrossings {
        let on_a = |p: &Node| Self::edge_side(a0, a1, EdgeKind::GreatCircleArc, p) == ArcSide::On;
        let on_b = |p: &Node| Self::edge_side(b0, b1, EdgeKind::GreatCircleArc, p) == ArcSide::On;

        if on_a(b0) && on_a(b1) {
            return Self::same_circle_crossings(a0, a1, b0, b1, EdgeKind::GreatCircleArc);
        }

        let mut out = EdgeCrossings::default();

        // Endpoints sitting exactly on the other arc are intersections; emit
        // the endpoint itself so the caller's equality checks see the
        // original node.
        for e in [b0, b1] {
            if on_a(e) && Self::within_gc_arc(a0, a1, e) {
                push_unique(&mut out.points, *e);
            }
        }
        for e in [a0, a1] {
            if on_b(e) && Self::within_gc_arc(b0, b1, e) {
                push_unique(&mut out.points, *e);
            }
        }

        if let Some((p, q)) = gc_gc_candidates(a0, a1, b0, b1) {
            for cand in [p, q] {
                if Self::within_gc_arc(a0, a1, &cand) && Self::within_gc_arc(b0, b1, &cand) {
                    push_unique(&mut out.points, cand);
                }
            }
        }

        out
    }

    fn gc_cl(g0: &Node, g1: &Node, c0: &Node, c1: &Node) -> EdgeCrossings {
        let on_g = |p: &Node| Self::edge_side(g0, g1, EdgeKind::GreatCircleArc, p) == ArcSide::On;
        let on_c = |p: &Node| Self::edge_side(c0, c1, EdgeKind::ConstantLatitude, p) == ArcSide::On;

        // The circles coincide only when the great circle is the equator and
        // the latitude circle sits at z = 0.
        if on_g(c0) && on_g(c1) && on_c(g0) && on_c(g1) {
            return Self::same_circle_crossings(g0, g1, c0, c1, EdgeKind::ConstantLatitude);
        }

        let mut out = EdgeCrossings::default();

        for e in [c0, c1] {
            if on_g(e) && Self::within_gc_arc(g0, g1, e) {
                push_unique(&mut out.points, *e);
            }
        }
        for e in [g0, g1] {
            if on_c(e) && Self::within_cl_arc(c0, c1, e) {
                push_unique(&mut out.points, *e);
            }
        }

        for cand in gc_cl_candidates(g0, g1, c0.z) {
            if Self::within_gc_arc(g0, g1, &cand) && Self::within_cl_arc(c0, c1, &cand) {
                push_unique(&mut out.points, cand);
            }
        }

        out
    }

    fn cl_cl(a0: &Node, a1: &Node, b0: &Node, b1: &Node) -> EdgeCrossings {
        // Distinct latitude circles never meet.
        if Self::edge_side(a0, a1, EdgeKind::ConstantLatitude, b0) != ArcSide::On {
            return EdgeCrossings::default();
        }
        Self::same_circle_crossings(a0, a1, b0, b1, EdgeKind::ConstantLatitude)
    }

    /// Two arcs on the same circle: either they overlap over a segment
    /// (coincident, fail-fast upstream), or they touch at shared endpoints.
    fn same_circle_crossings(
        a0: &Node,
        a1: &Node,
        b0: &Node,
        b1: &Node,
        kind: EdgeKind,
    ) -> EdgeCrossings {
        let within_a = |p: &Node| match kind {
            EdgeKind::GreatCircleArc => Self::within_gc_arc(a0, a1, p),
            EdgeKind::ConstantLatitude => Self::within_cl_arc(a0, a1, p),
        };
        let within_b = |p: &Node| match kind {
            EdgeKind::GreatCircleArc => Self::within_gc_arc(b0, b1, p),
            EdgeKind::ConstantLatitude => Self::within_cl_arc(b0, b1, p),
        };
        let strict_a = |p: &Node| {
            within_a(p) && !p.approx_eq(a0, HIGH_TOLERANCE) && !p.approx_eq(a1, HIGH_TOLERANCE)
        };
        let strict_b = |p: &Node| {
            within_b(p) && !p.approx_eq(b0, HIGH_TOLERANCE) && !p.approx_eq(b1, HIGH_TOLERANCE)
        };

        // Any endpoint strictly inside the other arc gives positive measure.
        if strict_a(b0) || strict_a(b1) || strict_b(a0) || strict_b(a1) {
            return EdgeCrossings::coincident();
        }

        let fwd = Self::nodes_equal(a0, b0) && Self::nodes_equal(a1, b1);
        let rev = Self::nodes_equal(a0, b1) && Self::nodes_equal(a1, b0);
        if fwd || rev {
            // Shared endpoints: the identical arc overlaps everywhere, the
            // complementary arc (the rest of the circle) only touches.
            match mid_arc(a0, a1, kind) {
                Some(mid) if !within_b(&mid) => {
                    let mut out = EdgeCrossings::default();
                    push_unique(&mut out.points, *a0);
                    push_unique(&mut out.points, *a1);
                    return out;
                }
                _ => return EdgeCrossings::coincident(),
            }
        }

        let mut out = EdgeCrossings::default();
        for e in [b0, b1] {
            if within_a(e) {
                push_unique(&mut out.points, *e);
            }
        }
        for e in [a0, a1] {
            if within_b(e) {
                push_unique(&mut out.points, *e);
            }
        }
        out
    }
}

/// Candidate intersections of the two great circles: `+-(a0 x a1) x (b0 x b1)`
/// normalized. `None` when the circle planes are parallel.
pub(crate) fn gc_gc_candidates(a0: &Node, a1: &Node, b0: &Node, b1: &Node) -> Option<(Node, Node)> {
    let d = a0.cross(a1).cross(&b0.cross(b1));
    let n = d.norm();
    if n < REFERENCE_TOLERANCE {
        return None;
    }
    let p = d * (1.0 / n);
    Some((p, -p))
}

/// Candidate intersections of the great circle through `g0`, `g1` with the
/// latitude circle at `z = zlat`: solve the circle plane against `z = zlat`
/// inside the unit sphere.
pub(crate) fn gc_cl_candidates(g0: &Node, g1: &Node, zlat: f64) -> SmallVec<[Node; 2]> {
    let mut out = SmallVec::new();

    let w = g0.cross(g1);
    let q2 = w.x * w.x + w.y * w.y;
    let r2 = 1.0 - zlat * zlat;
    if q2 < REFERENCE_TOLERANCE * REFERENCE_TOLERANCE || r2 <= 0.0 {
        // Equatorial circle plane or polar latitude; the coincident case is
        // handled before construction.
        return out;
    }

    // In-plane line: w.x * x + w.y * y = -w.z * zlat, radius sqrt(r2).
    let c = -w.z * zlat;
    let s2 = (r2 - c * c / q2) / q2;
    if s2 < -HIGH_TOLERANCE {
        return out;
    }
    let s = s2.max(0.0).sqrt();

    let fx = w.x * c / q2;
    let fy = w.y * c / q2;
    out.push(Node::new(fx - s * w.y, fy + s * w.x, zlat));
    if s > REFERENCE_TOLERANCE {
        out.push(Node::new(fx + s * w.y, fy - s * w.x, zlat));
    }
    out
}

/// Midpoint of the arc from `u` to `v`. `None` when the endpoints are
/// antipodal and the midpoint is not determined by them.
pub(crate) fn mid_arc(u: &Node, v: &Node, kind: EdgeKind) -> Option<Node> {
    match kind {
        EdgeKind::GreatCircleArc => {
            let sum = *u + *v;
            if sum.norm() < HIGH_TOLERANCE {
                None
            } else {
                Some(sum.normalized())
            }
        }
        EdgeKind::ConstantLatitude => {
            let cz = u.x * v.y - u.y * v.x;
            let dot = u.x * v.x + u.y * v.y;
            let dl = cz.atan2(dot);
            Some(u.rotated_z(dl / 2.0))
        }
    }
}

fn push_unique(points: &mut SmallVec<[Node; 2]>, p: Node) {
    // Construction-side dedup is numerical in both kernels: two routes to
    // the same crossing agree only to rounding.
    if points.iter().all(|q| !q.approx_eq(&p, HIGH_TOLERANCE)) {
        points.push(p);
    }
}
