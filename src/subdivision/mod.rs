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

pub mod constraint;
pub mod vertex_index;

pub use vertex_index::VertexIndex;

use std::fmt;
use std::sync::Arc;

use ahash::AHashSet;

use crate::cancel::CancelToken;
use crate::error::{Defect, TriangulationError, ValidationReport};
use crate::geometry::bounds::{Aabb2, frame_triangle};
use crate::geometry::intersection::crossing_pairs;
use crate::geometry::{Point2, Segment2};
use crate::kernel::predicates::{Orientation, classify, orient2d};
use crate::quadedge::{EdgeId, QuadEdges};
use crate::trace::{NoopRecorder, Recorder, TraceEvent};

/// A planar subdivision holding an incremental Delaunay triangulation.
///
/// The graph is seeded with an oversized frame triangle so every face a real
/// point can land in is bounded. One arbitrary starting edge is enough to
/// reach the whole connected graph by navigation; it is also the hint for
/// point location, updated on every insertion for locality.
pub struct Subdivision {
    graph: QuadEdges,
    starting_edge: EdgeId,
    site_count: usize,
    frame: [Point2; 3],
    recorder: Arc<dyn Recorder>,
}

impl Subdivision {
    /// Builds the seed triangle and its exterior face from three vertices.
    ///
    /// The winding is normalized to counter-clockwise. No legality check is
    /// made; seeding with collinear vertices is the caller's mistake.
    pub fn new(a: Point2, b: Point2, c: Point2) -> Self {
        let a = a.rounded();
        let mut b = b.rounded();
        let mut c = c.rounded();
        if classify(orient2d((a.x, a.y), (b.x, b.y), (c.x, c.y))) == Orientation::Clockwise {
            std::mem::swap(&mut b, &mut c);
        }

        let mut graph = QuadEdges::new();
        let ea = graph.make_edge_with(a, b);
        let eb = graph.make_edge_with(b, c);
        graph.splice(ea.sym(), eb);
        let ec = graph.make_edge_with(c, a);
        graph.splice(eb.sym(), ec);
        graph.splice(ec.sym(), ea);

        Subdivision {
            graph,
            starting_edge: ea,
            site_count: 3,
            frame: [a, b, c],
            recorder: Arc::new(NoopRecorder),
        }
    }

    /// Triangulates an arbitrary point set under a computed frame triangle.
    pub fn new_for_points(points: &[Point2]) -> Result<Self, TriangulationError> {
        Self::new_for_points_with(points, &CancelToken::new())
    }

    /// Cancellable form of [`Subdivision::new_for_points`]. The token is
    /// polled between insertions; on cancellation the partial subdivision
    /// built so far rides along in the error and is valid to use.
    pub fn new_for_points_with(
        points: &[Point2],
        cancel: &CancelToken,
    ) -> Result<Self, TriangulationError> {
        let mut seen: AHashSet<(i64, i64)> = AHashSet::new();
        let rounded: Vec<Point2> = points
            .iter()
            .map(|p| p.rounded())
            .filter(|p| seen.insert(p.key()))
            .collect();

        if rounded.is_empty() {
            return Err(TriangulationError::EmptyPointSet);
        }
        if rounded.len() >= 3 && all_collinear(&rounded) {
            return Err(TriangulationError::DegenerateInput);
        }

        let Some(bounds) = Aabb2::from_points(&rounded) else {
            return Err(TriangulationError::EmptyPointSet);
        };
        let [a, b, c] = frame_triangle(&bounds);
        let mut subdivision = Subdivision::new(a, b, c);

        for p in rounded {
            if cancel.is_cancelled() {
                return Err(TriangulationError::Cancelled {
                    partial: Some(Box::new(subdivision)),
                });
            }
            subdivision.insert_site(p)?;
        }
        Ok(subdivision)
    }

    /// Attaches a diagnostic recorder. The triangulation itself is
    /// unaffected.
    pub fn set_recorder(&mut self, recorder: Arc<dyn Recorder>) {
        self.recorder = recorder;
    }

    pub fn graph(&self) -> &QuadEdges {
        &self.graph
    }

    pub fn frame(&self) -> [Point2; 3] {
        self.frame
    }

    /// Distinct vertices in the graph, frame included.
    pub fn site_count(&self) -> usize {
        self.site_count
    }

    pub fn is_frame_vertex(&self, p: Point2) -> bool {
        self.frame.iter().any(|v| *v == p)
    }

    /// Inserts one point, restoring the Delaunay property locally.
    ///
    /// Returns `Ok(false)` when the point coincides with an existing vertex
    /// (a no-op) and `Ok(true)` for a real insertion. Failure to locate the
    /// point is reported rather than swallowed, since a silently missing
    /// point would corrupt the triangulation's guarantees.
    pub fn insert_site(&mut self, point: Point2) -> Result<bool, TriangulationError> {
        let p = point.rounded();
        self.recorder.record("insert-site", &TraceEvent::Point(p));

        let mut e = self.locate(p)?;
        if p == self.graph.org(e) || p == self.graph.dest(e) {
            return Ok(false);
        }
        if self.graph.on_edge(p, e) {
            // the point splits this edge; remove it and retriangulate the
            // two faces it used to separate
            let doomed = e;
            e = self.graph.oprev(e);
            if self.starting_edge.quad() == doomed.quad() {
                self.starting_edge = e;
            }
            self.graph.delete(doomed);
        }

        // fan the new vertex out to every vertex of the containing face
        let org = self.graph.org(e);
        let first = self.graph.make_edge_with(org, p);
        self.graph.splice(first, e);
        let mut base = first;
        loop {
            base = self.graph.connect(e, base.sym());
            e = self.graph.oprev(base);
            if self.graph.lnext(e) == first {
                break;
            }
        }
        self.starting_edge = first;

        // walk the suspect edges, flipping every one that fails the
        // in-circle test against the new vertex
        loop {
            let t = self.graph.oprev(e);
            let t_dest = self.graph.dest(t);
            if self.graph.right_of(t_dest, e)
                && p.within_circle(self.graph.org(e), t_dest, self.graph.dest(e))
            {
                self.graph.swap(e);
                e = self.graph.oprev(e);
            } else if self.graph.onext(e) == first {
                break;
            } else {
                let next = self.graph.onext(e);
                e = self.graph.lprev(next);
            }
        }

        self.site_count += 1;
        Ok(true)
    }

    /// Finds an edge whose face contains `p`, or whose segment carries `p`.
    ///
    /// The walk is bounded by twice the vertex count; past that the graph is
    /// assumed numerically inconsistent and every face is scanned instead.
    pub(crate) fn locate(&self, p: Point2) -> Result<EdgeId, TriangulationError> {
        let mut e = self.starting_edge;
        for _ in 0..2 * self.site_count {
            if p == self.graph.org(e) || p == self.graph.dest(e) {
                return Ok(e);
            } else if self.graph.right_of(p, e) {
                e = e.sym();
            } else if !self.graph.right_of(p, self.graph.onext(e)) {
                e = self.graph.onext(e);
            } else if !self.graph.right_of(p, self.graph.dprev(e)) {
                e = self.graph.dprev(e);
            } else {
                return Ok(e);
            }
        }
        self.locate_exhaustive(p)
            .ok_or(TriangulationError::LocateFailed(p))
    }

    fn locate_exhaustive(&self, p: Point2) -> Option<EdgeId> {
        for e0 in self.graph.primal_edges() {
            for e in [e0, e0.sym()] {
                if p == self.graph.org(e) || p == self.graph.dest(e) || self.graph.on_edge(p, e) {
                    return Some(e);
                }
                let b = self.graph.lnext(e);
                let c = self.graph.lnext(b);
                // strictly interior to a bounded face; boundary hits are the
                // on-edge case above, and the exterior face also closes in
                // three edges but winds clockwise
                if self.graph.lnext(c) == e
                    && self.face_is_ccw(e, b, c)
                    && self.strictly_left(p, e)
                    && self.strictly_left(p, b)
                    && self.strictly_left(p, c)
                {
                    return Some(e);
                }
            }
        }
        None
    }

    fn strictly_left(&self, p: Point2, e: EdgeId) -> bool {
        let o = self.graph.org(e);
        let d = self.graph.dest(e);
        classify(orient2d((o.x, o.y), (d.x, d.y), (p.x, p.y))) == Orientation::CounterClockwise
    }

    fn face_is_ccw(&self, e: EdgeId, b: EdgeId, c: EdgeId) -> bool {
        let u = self.graph.org(e);
        let v = self.graph.org(b);
        let w = self.graph.org(c);
        classify(orient2d((u.x, u.y), (v.x, v.y), (w.x, w.y))) == Orientation::CounterClockwise
    }

    /// Visits every undirected edge exactly once, depth-first from the
    /// stored starting edge. The callback returns `Ok(false)` to stop early;
    /// its first error aborts the walk and is handed back.
    pub fn walk_all_edges<E>(
        &self,
        visit: &mut dyn FnMut(EdgeId) -> Result<bool, E>,
    ) -> Result<(), E> {
        let mut seen: AHashSet<u32> = AHashSet::new();
        let mut stack = vec![self.starting_edge];
        while let Some(e) = stack.pop() {
            if !seen.insert(e.quad()) {
                continue;
            }
            if !visit(e)? {
                return Ok(());
            }
            stack.push(self.graph.onext(e));
            stack.push(self.graph.onext(e.sym()));
        }
        Ok(())
    }

    /// Enumerates every bounded triangular face exactly once. For each
    /// vertex reached through the edge walk, consecutive fan edge pairs
    /// whose far endpoints are themselves connected close a triangle;
    /// vertices already handled are skipped so no face repeats. The
    /// callback returns false to stop early.
    pub fn walk_all_triangles(&self, visit: &mut dyn FnMut(&[Point2; 3]) -> bool) {
        let mut seen_quads: AHashSet<u32> = AHashSet::new();
        let mut done_vertices: AHashSet<(i64, i64)> = AHashSet::new();
        let mut stack = vec![self.starting_edge];

        while let Some(edge) = stack.pop() {
            if !seen_quads.insert(edge.quad()) {
                continue;
            }
            for spoke in [edge, edge.sym()] {
                let v = self.graph.org(spoke);
                if !done_vertices.insert(v.key()) {
                    continue;
                }
                let mut s = spoke;
                loop {
                    let s2 = self.graph.onext(s);
                    if s2 != s {
                        let d1 = self.graph.dest(s);
                        let d2 = self.graph.dest(s2);
                        if d1 != d2
                            && !done_vertices.contains(&d1.key())
                            && !done_vertices.contains(&d2.key())
                            && classify(orient2d((v.x, v.y), (d1.x, d1.y), (d2.x, d2.y)))
                                == Orientation::CounterClockwise
                            && self.graph.find_onext_dest(s.sym(), d2).is_some()
                            && !visit(&[v, d1, d2])
                        {
                            return;
                        }
                    }
                    s = s2;
                    if s == spoke {
                        break;
                    }
                }
            }
            stack.push(self.graph.onext(edge));
            stack.push(self.graph.onext(edge.sym()));
        }
    }

    /// Collects every bounded triangle, optionally dropping the ones that
    /// touch a frame vertex.
    pub fn triangles(&self, include_frame: bool) -> Vec<[Point2; 3]> {
        let mut out = Vec::new();
        self.walk_all_triangles(&mut |tri| {
            if include_frame || !tri.iter().any(|v| self.is_frame_vertex(*v)) {
                out.push(*tri);
            }
            true
        });
        out
    }

    /// Every live undirected edge as a segment.
    pub fn segments(&self) -> Vec<Segment2> {
        self.graph
            .primal_edges()
            .map(|e| self.graph.edge_segment(e))
            .collect()
    }

    /// Builds the point-to-edge cache for this subdivision.
    pub fn vertex_index(&self) -> VertexIndex {
        VertexIndex::build(self)
    }

    /// Checks the whole graph for structural defects: zero-length edges and
    /// properly crossing edge pairs. All findings are aggregated into one
    /// report instead of failing at the first.
    pub fn validate(&self, cancel: &CancelToken) -> Result<(), TriangulationError> {
        let mut report = ValidationReport::default();
        let mut segments = Vec::new();
        for e in self.graph.primal_edges() {
            let seg = self.graph.edge_segment(e);
            if seg.is_degenerate() {
                report.push(Defect::ZeroLengthEdge(seg.a));
            } else {
                segments.push(seg);
            }
        }
        if cancel.is_cancelled() {
            return Err(TriangulationError::Cancelled { partial: None });
        }
        for (i, j) in crossing_pairs(&segments) {
            report.push(Defect::CrossingEdges(segments[i], segments[j]));
        }
        if report.is_empty() {
            Ok(())
        } else {
            Err(report.into())
        }
    }

    pub fn is_valid(&self, cancel: &CancelToken) -> bool {
        self.validate(cancel).is_ok()
    }

    /// Number of non-frame vertices on the convex hull of the inserted
    /// points, counted as vertices sharing an edge with a frame vertex.
    pub fn hull_vertex_count(&self) -> usize {
        let mut hull: AHashSet<(i64, i64)> = AHashSet::new();
        for e in self.graph.primal_edges() {
            let o = self.graph.org(e);
            let d = self.graph.dest(e);
            if self.is_frame_vertex(o) && !self.is_frame_vertex(d) {
                hull.insert(d.key());
            }
            if self.is_frame_vertex(d) && !self.is_frame_vertex(o) {
                hull.insert(o.key());
            }
        }
        hull.len()
    }
}

fn all_collinear(points: &[Point2]) -> bool {
    let first = points[0];
    let Some(second) = points.iter().find(|p| **p != first) else {
        return true;
    };
    points.iter().all(|p| {
        classify(orient2d(
            (first.x, first.y),
            (second.x, second.y),
            (p.x, p.y),
        )) == Orientation::Collinear
    })
}

impl fmt::Debug for Subdivision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subdivision")
            .field("sites", &self.site_count)
            .field("edges", &self.graph.len())
            .field("frame", &self.frame)
            .finish()
    }
}
