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

use rug::Rational;

use crate::geometry::edge::EdgeKind;
use crate::geometry::node::Node;
use crate::kernel::{ArcSide, SphericalKernel};

/// Exact kernel: sign decisions in `rug::Rational` over the lifted f64
/// coordinates (the lift is lossless). Intersection coordinates are still
/// constructed in f64; only the predicates are exact.
pub struct ExactKernel;

fn rat(v: f64) -> Rational {
    // Non-finite coordinates cannot come off a unit sphere.
    Rational::from_f64(v).unwrap_or_else(Rational::new)
}

fn rat3(n: &Node) -> [Rational; 3] {
    [rat(n.x), rat(n.y), rat(n.z)]
}

fn cross3(a: &[Rational; 3], b: &[Rational; 3]) -> [Rational; 3] {
    [
        a[1].clone() * &b[2] - a[2].clone() * &b[1],
        a[2].clone() * &b[0] - a[0].clone() * &b[2],
        a[0].clone() * &b[1] - a[1].clone() * &b[0],
    ]
}

fn dot3(a: &[Rational; 3], b: &[Rational; 3]) -> Rational {
    a[0].clone() * &b[0] + a[1].clone() * &b[1] + a[2].clone() * &b[2]
}

/// Exact triple product a . (b x c).
fn det3(a: &Node, b: &Node, c: &Node) -> Rational {
    let a = rat3(a);
    let bc = cross3(&rat3(b), &rat3(c));
    dot3(&a, &bc)
}

/// Exact z component of the xy-plane cross product u x v.
fn cross_z(u: &Node, v: &Node) -> Rational {
    rat(u.x) * rat(v.y) - rat(u.y) * rat(v.x)
}

fn side_of(s: Rational) -> ArcSide {
    match s.cmp0() {
        std::cmp::Ordering::Equal => ArcSide::On,
        std::cmp::Ordering::Greater => ArcSide::Left,
        std::cmp::Ordering::Less => ArcSide::Right,
    }
}

impl SphericalKernel for ExactKernel {
    fn nodes_equal(a: &Node, b: &Node) -> bool {
        // Rational compare of the lifted coordinates; equivalent to bitwise
        // equality modulo signed zero.
        rat(a.x) == rat(b.x) && rat(a.y) == rat(b.y) && rat(a.z) == rat(b.z)
    }

    fn edge_side(n0: &Node, n1: &Node, kind: EdgeKind, p: &Node) -> ArcSide {
        match kind {
            EdgeKind::GreatCircleArc => side_of(det3(n0, n1, p)),
            EdgeKind::ConstantLatitude => {
                let east = cross_z(n0, n1).cmp0() != std::cmp::Ordering::Less;
                let s = rat(p.z) - rat(n0.z);
                side_of(if east { s } else { -s })
            }
        }
    }

    fn within_gc_arc(u: &Node, v: &Node, p: &Node) -> bool {
        // Same-side tests against the circle normal w = u x v.
        let ur = rat3(u);
        let vr = rat3(v);
        let pr = rat3(p);
        let w = cross3(&ur, &vr);
        dot3(&cross3(&ur, &pr), &w).cmp0() != std::cmp::Ordering::Less
            && dot3(&cross3(&pr, &vr), &w).cmp0() != std::cmp::Ordering::Less
    }

    fn within_cl_arc(u: &Node, v: &Node, p: &Node) -> bool {
        let east = cross_z(u, v).cmp0() != std::cmp::Ordering::Less;
        let s1 = cross_z(u, p);
        let s2 = cross_z(p, v);
        if east {
            s1.cmp0() != std::cmp::Ordering::Less && s2.cmp0() != std::cmp::Ordering::Less
        } else {
            s1.cmp0() != std::cmp::Ordering::Greater && s2.cmp0() != std::cmp::Ordering::Greater
        }
    }
}
