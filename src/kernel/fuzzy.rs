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

use crate::geometry::edge::EdgeKind;
use crate::geometry::node::Node;
use crate::kernel::{ArcSide, SphericalKernel, HIGH_TOLERANCE};

/// Floating-point kernel: every classification within `HIGH_TOLERANCE`.
pub struct FuzzyKernel;

impl SphericalKernel for FuzzyKernel {
    fn nodes_equal(a: &Node, b: &Node) -> bool {
        a.approx_eq(b, HIGH_TOLERANCE)
    }

    fn edge_side(n0: &Node, n1: &Node, kind: EdgeKind, p: &Node) -> ArcSide {
        let s = match kind {
            EdgeKind::GreatCircleArc => n0.cross(n1).dot(p),
            EdgeKind::ConstantLatitude => {
                // For an eastward arc the interior of a CCW face is north of
                // the latitude circle; westward flips it.
                let east = n0.x * n1.y - n0.y * n1.x >= 0.0;
                if east {
                    p.z - n0.z
                } else {
                    n0.z - p.z
                }
            }
        };
        if s.abs() < HIGH_TOLERANCE {
            ArcSide::On
        } else if s > 0.0 {
            ArcSide::Left
        } else {
            ArcSide::Right
        }
    }

    fn within_gc_arc(u: &Node, v: &Node, p: &Node) -> bool {
        let w = u.cross(v);
        u.cross(p).dot(&w) >= -HIGH_TOLERANCE && p.cross(v).dot(&w) >= -HIGH_TOLERANCE
    }

    fn within_cl_arc(u: &Node, v: &Node, p: &Node) -> bool {
        let cz = u.x * v.y - u.y * v.x;
        let s1 = u.x * p.y - u.y * p.x;
        let s2 = p.x * v.y - p.y * v.x;
        if cz >= 0.0 {
            s1 >= -HIGH_TOLERANCE && s2 >= -HIGH_TOLERANCE
        } else {
            s1 <= HIGH_TOLERANCE && s2 <= HIGH_TOLERANCE
        }
    }
}
