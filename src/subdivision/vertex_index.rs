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

use crate::geometry::Point2;
use crate::quadedge::{EdgeId, QuadEdges};
use crate::subdivision::Subdivision;

/// Cache mapping each rounded vertex to one directed edge leaving it.
///
/// The index is not authoritative. It can be rebuilt at any time by a full
/// edge walk, but it must be told about every quad-edge added to or removed
/// from the subdivision while it is live, or lookups silently go stale.
#[derive(Debug, Clone, Default)]
pub struct VertexIndex {
    map: AHashMap<(i64, i64), EdgeId>,
}

impl VertexIndex {
    /// Builds the index by walking every edge once.
    pub fn build(subdivision: &Subdivision) -> Self {
        let mut index = VertexIndex::default();
        let graph = subdivision.graph();
        let _ = subdivision.walk_all_edges::<()>(&mut |e| {
            index.add(graph, e);
            Ok(true)
        });
        index
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Looks up an edge whose origin is `p`, by rounded identity.
    pub fn get(&self, p: Point2) -> Option<EdgeId> {
        self.map.get(&p.rounded().key()).copied()
    }

    /// Registers both endpoints of `edge` if they are not present yet.
    pub fn add(&mut self, graph: &QuadEdges, edge: EdgeId) {
        let org = graph.org(edge);
        let dest = graph.dest(edge);
        self.map.entry(org.key()).or_insert(edge);
        self.map.entry(dest.key()).or_insert(edge.sym());
    }

    /// Drops every entry that points at `edge`'s quad, re-pointing each to
    /// another edge of the same origin fan when one survives. Must be called
    /// before the edge is actually unlinked from the graph.
    pub fn remove(&mut self, graph: &QuadEdges, edge: EdgeId) {
        for directed in [edge, edge.sym()] {
            let key = graph.org(directed).key();
            let Some(&entry) = self.map.get(&key) else {
                continue;
            };
            if entry.quad() != edge.quad() {
                continue;
            }
            let replacement = graph.onext(entry);
            if replacement == entry {
                self.map.remove(&key);
            } else {
                self.map.insert(key, replacement);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn build_indexes_every_vertex() {
        let mut sd = Subdivision::new(p(0.0, 0.0), p(30.0, 0.0), p(15.0, 24.0));
        sd.insert_site(p(15.0, 8.0)).unwrap();
        let index = sd.vertex_index();
        assert_eq!(index.len(), 4);
        for v in [p(0.0, 0.0), p(30.0, 0.0), p(15.0, 24.0), p(15.0, 8.0)] {
            let e = index.get(v).expect("vertex indexed");
            assert_eq!(sd.graph().org(e), v);
        }
        assert!(index.get(p(99.0, 99.0)).is_none());
    }

    #[test]
    fn lookup_normalizes_to_the_grid() {
        let sd = Subdivision::new(p(0.0, 0.0), p(30.0, 0.0), p(15.0, 24.0));
        let index = sd.vertex_index();
        assert!(index.get(p(0.0001, -0.0002)).is_some());
    }

    #[test]
    fn remove_repoints_to_a_surviving_fan_edge() {
        let mut graph = QuadEdges::new();
        let a = graph.make_edge_with(p(0.0, 0.0), p(1.0, 0.0));
        let b = graph.make_edge_with(p(0.0, 0.0), p(0.0, 1.0));
        graph.splice(a, b);

        let mut index = VertexIndex::default();
        index.add(&graph, a);
        index.add(&graph, b);
        assert_eq!(index.get(p(0.0, 0.0)), Some(a));

        index.remove(&graph, a);
        graph.delete(a);
        let survivor = index.get(p(0.0, 0.0)).expect("origin still indexed");
        assert_eq!(survivor, b);
        // the far endpoint of the removed edge loses its only entry
        assert!(index.get(p(1.0, 0.0)).is_none());
    }
}
