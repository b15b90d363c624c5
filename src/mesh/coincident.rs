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

use ahash::AHashMap;
use smallvec::SmallVec;

use crate::geometry::edge::INVALID_NODE;
use crate::geometry::node::Node;
use crate::kernel::SphericalKernel;
use crate::mesh::Mesh;

/// Spatial bin width for coincident-node detection and overlap-node dedup.
/// Much coarser than the node tolerance, so equal nodes land in the same or
/// a neighboring bin.
pub const BIN_WIDTH: f64 = 1.0e-1;

pub(crate) type BinKey = (i64, i64, i64);

pub(crate) fn bin_key(n: &Node) -> BinKey {
    (
        (n.x / BIN_WIDTH).floor() as i64,
        (n.y / BIN_WIDTH).floor() as i64,
        (n.z / BIN_WIDTH).floor() as i64,
    )
}

/// For each Second node, the index of a coinciding First node, or
/// `INVALID_NODE`. Returns the coincidence count alongside the map.
///
/// First nodes are binned by quantized position; each Second node probes its
/// own bin and the 26 neighbors, so pairs straddling a bin boundary are
/// still found.
pub fn build_coincident_node_map<K: SphericalKernel>(
    first: &Mesh,
    second: &Mesh,
) -> (usize, Vec<usize>) {
    let mut bins: AHashMap<BinKey, SmallVec<[usize; 4]>> = AHashMap::new();
    for (i, node) in first.nodes.iter().enumerate() {
        bins.entry(bin_key(node)).or_default().push(i);
    }

    let mut count = 0;
    let mut map = vec![INVALID_NODE; second.nodes.len()];

    for (j, node) in second.nodes.iter().enumerate() {
        let (kx, ky, kz) = bin_key(node);
        'probe: for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(candidates) = bins.get(&(kx + dx, ky + dy, kz + dz)) else {
                        continue;
                    };
                    for &i in candidates {
                        if K::nodes_equal(&first.nodes[i], node) {
                            map[j] = i;
                            count += 1;
                            break 'probe;
                        }
                    }
                }
            }
        }
    }

    (count, map)
}
