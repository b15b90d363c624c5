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

use crate::geometry::node::{Node, NodeVector};
use crate::kernel::HIGH_TOLERANCE;
use crate::mesh::coincident::{bin_key, BinKey};

/// How intersection-born overlap nodes are deduplicated as they are
/// appended during tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupStrategy {
    /// Append always; repeated nodes are retained.
    Retain,
    /// Single-bin lookup. A pair straddling a bin boundary can slip through,
    /// which is acceptable for most inputs.
    #[default]
    HashBins,
    /// Probes all neighboring bins; guaranteed duplicate-free.
    MultimapBins,
}

/// Spatial index over the overlap node list, consulted before appending a
/// freshly constructed intersection node.
#[derive(Debug)]
pub struct NodeBins {
    strategy: DedupStrategy,
    bins: AHashMap<BinKey, SmallVec<[usize; 4]>>,
}

impl NodeBins {
    pub fn new(strategy: DedupStrategy) -> Self {
        Self {
            strategy,
            bins: AHashMap::new(),
        }
    }

    /// Indexes the nodes already present (the seeded First and Second
    /// blocks), so an intersection landing on one of them reuses its index.
    pub fn seed(&mut self, nodes: &[Node]) {
        if self.strategy == DedupStrategy::Retain {
            return;
        }
        for (i, node) in nodes.iter().enumerate() {
            self.bins.entry(bin_key(node)).or_default().push(i);
        }
    }

    /// Returns the index of `p` in `nodes`, appending it when no equal node
    /// is already indexed.
    pub fn intern(&mut self, nodes: &mut NodeVector, p: Node) -> usize {
        match self.strategy {
            DedupStrategy::Retain => {
                nodes.push(p);
                return nodes.len() - 1;
            }
            DedupStrategy::HashBins => {
                if let Some(candidates) = self.bins.get(&bin_key(&p)) {
                    if let Some(&i) = candidates
                        .iter()
                        .find(|&&i| nodes[i].approx_eq(&p, HIGH_TOLERANCE))
                    {
                        return i;
                    }
                }
            }
            DedupStrategy::MultimapBins => {
                let (kx, ky, kz) = bin_key(&p);
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        for dz in -1..=1 {
                            let Some(candidates) = self.bins.get(&(kx + dx, ky + dy, kz + dz))
                            else {
                                continue;
                            };
                            if let Some(&i) = candidates
                                .iter()
                                .find(|&&i| nodes[i].approx_eq(&p, HIGH_TOLERANCE))
                            {
                                return i;
                            }
                        }
                    }
                }
            }
        }

        let ix = nodes.len();
        nodes.push(p);
        self.bins.entry(bin_key(&p)).or_default().push(ix);
        ix
    }
}
