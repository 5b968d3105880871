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

use smallvec::{SmallVec, smallvec};

use crate::cancel::CancelToken;
use crate::error::TriangulationError;
use crate::geometry::{Point2, Segment2};
use crate::kernel::predicates::{Orientation, classify};
use crate::quadedge::{EdgeId, QuadEdges};
use crate::subdivision::{Subdivision, VertexIndex};
use crate::trace::TraceEvent;

impl Subdivision {
    /// Forces an edge between two existing vertices.
    ///
    /// Every edge properly crossed by the segment is removed, the constraint
    /// edge is bridged across the resulting cavity and both sides are
    /// re-triangulated. The vertex index is kept current through every edit,
    /// so repeated constraint insertions can share one index.
    ///
    /// Succeeds without modification when the edge already exists. Fails
    /// without touching the graph when an endpoint is unknown, when the
    /// segment runs exactly through a third vertex, or when the fan at an
    /// endpoint cannot assign the direction to a wedge.
    pub fn insert_constraint(
        &mut self,
        index: &mut VertexIndex,
        start: Point2,
        end: Point2,
    ) -> Result<(), TriangulationError> {
        let start = start.rounded();
        let end = end.rounded();
        self.recorder.record(
            "insert-constraint",
            &TraceEvent::Edge(Segment2::new(start, end)),
        );

        let start_edge = index
            .get(start)
            .ok_or(TriangulationError::VertexNotFound(start))?;
        let end_edge = index
            .get(end)
            .ok_or(TriangulationError::VertexNotFound(end))?;

        // nothing to do when the constraint is already an edge
        if self.graph.find_onext_dest(start_edge, end).is_some() {
            return Ok(());
        }

        let wedge = resolve_edge(&self.graph, start_edge, end)?;
        // surfaces a blocked or ambiguous far endpoint before any edit
        resolve_edge(&self.graph, end_edge, start)?;

        let (crossed, end_out) = self.collect_crossings(wedge, start, end)?;
        for &edge in crossed.iter() {
            self.recorder.record(
                "constraint-crossing",
                &TraceEvent::Edge(self.graph.edge_segment(edge)),
            );
        }

        // the resolved wedge edge survives the removal; keep hints on it
        if crossed
            .iter()
            .any(|c| c.quad() == self.starting_edge.quad())
        {
            self.starting_edge = wedge;
        }
        for &edge in crossed.iter() {
            index.remove(&self.graph, edge);
            self.graph.delete(edge);
        }

        // the corridor is now one cavity on the left of both `wedge` and
        // `end_out`; bridge it and fill each side
        let into_start = self.graph.lprev(wedge);
        let base = self.graph.connect(into_start, end_out);
        index.add(&self.graph, base);
        self.fill_cavity(base, index)?;
        self.fill_cavity(base.sym(), index)?;
        Ok(())
    }

    /// Inserts a batch of constraints in order, polling for cancellation
    /// between them. The index of the first failing constraint is reported
    /// with its cause; earlier insertions stay in place.
    pub fn insert_constraints(
        &mut self,
        pairs: &[(Point2, Point2)],
        cancel: &CancelToken,
    ) -> Result<(), TriangulationError> {
        let mut index = self.vertex_index();
        for (i, (start, end)) in pairs.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(TriangulationError::Cancelled { partial: None });
            }
            self.insert_constraint(&mut index, *start, *end)
                .map_err(|source| TriangulationError::Constraint {
                    index: i,
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }

    /// Walks the corridor of triangles the constraint passes through and
    /// collects every properly crossing edge. Returns the collected edges
    /// and the cavity boundary edge leaving `end`.
    fn collect_crossings(
        &self,
        wedge: EdgeId,
        start: Point2,
        end: Point2,
    ) -> Result<(SmallVec<[EdgeId; 16]>, EdgeId), TriangulationError> {
        let constraint = Segment2::new(start, end);
        let mut crossed: SmallVec<[EdgeId; 16]> = SmallVec::new();

        // far edge of the wedge triangle
        let mut cur = self.graph.lnext(wedge);
        let max = 2 * self.graph.len() + 8;
        for _ in 0..max {
            if !constraint.crosses(&self.graph.edge_segment(cur)) {
                return Err(TriangulationError::DidNotConverge {
                    context: "corridor walk",
                    max,
                });
            }
            crossed.push(cur);

            // step across into the neighboring triangle
            let across = cur.sym();
            let c1 = self.graph.lnext(across);
            let c2 = self.graph.lnext(c1);
            let apex = self.graph.dest(c1);
            if apex == end {
                return Ok((crossed, c2));
            }
            if constraint.crosses(&self.graph.edge_segment(c1)) {
                cur = c1;
            } else if constraint.crosses(&self.graph.edge_segment(c2)) {
                cur = c2;
            } else if constraint.contains_point(apex) {
                // a third vertex sits exactly on the constraint segment
                return Err(TriangulationError::CollinearPoints {
                    origin: start,
                    along: apex,
                    toward: end,
                });
            } else {
                return Err(TriangulationError::DidNotConverge {
                    context: "corridor walk",
                    max,
                });
            }
        }
        Err(TriangulationError::DidNotConverge {
            context: "corridor walk",
            max,
        })
    }

    /// Re-triangulates the polygonal face on the left of `base`, leaving
    /// `base` itself untouched. Each triangle takes the boundary vertex
    /// whose circumcircle with the base holds no other boundary vertex, so
    /// the filled cavity needs no further legalization and the base edge is
    /// never a flip candidate.
    fn fill_cavity(
        &mut self,
        base: EdgeId,
        index: &mut VertexIndex,
    ) -> Result<(), TriangulationError> {
        let cap = 2 * self.graph.len() + 8;
        let mut cycle: SmallVec<[EdgeId; 16]> = smallvec![base];
        let mut e = self.graph.lnext(base);
        while e != base {
            cycle.push(e);
            if cycle.len() > cap {
                return Err(TriangulationError::DidNotConverge {
                    context: "cavity walk",
                    max: cap,
                });
            }
            e = self.graph.lnext(e);
        }
        let n = cycle.len();
        if n <= 3 {
            return Ok(());
        }

        let a = self.graph.org(base);
        let b = self.graph.dest(base);

        let mut best = 2;
        for j in 3..n {
            let candidate = self.graph.org(cycle[j]);
            let current = self.graph.org(cycle[best]);
            if candidate.within_circle(a, b, current) {
                best = j;
            }
        }
        let c = self.graph.org(cycle[best]);
        self.recorder
            .record("cavity-fill", &TraceEvent::Triangle([a, b, c]));

        // close triangle (a, b, c) with at most two new diagonals and
        // recurse into the sub-cavities they cut off
        let bc = if best == 2 {
            cycle[1]
        } else {
            let diagonal = self.graph.connect(base, cycle[best]);
            index.add(&self.graph, diagonal);
            self.fill_cavity(diagonal.sym(), index)?;
            diagonal
        };
        if best != n - 1 {
            let diagonal = self.graph.connect(bc, base);
            index.add(&self.graph, diagonal);
            self.fill_cavity(diagonal.sym(), index)?;
        }
        Ok(())
    }
}

/// Finds the fan edge at `from`'s origin whose counter-clockwise wedge
/// (from the edge to its onext) contains the direction toward `toward`.
///
/// Each consecutive fan pair is classified by three cross products: the
/// next edge against the current one, and the target direction against
/// each. The combination decides whether the current wedge is accepted,
/// the scan advances, or the direction is unresolvable.
pub(crate) fn resolve_edge(
    graph: &QuadEdges,
    from: EdgeId,
    toward: Point2,
) -> Result<EdgeId, TriangulationError> {
    use Orientation::*;

    let origin = graph.org(from);
    if toward == origin {
        return Err(TriangulationError::InvalidEndpoint(origin));
    }
    let vd = toward - origin;

    // a lone spoke owns the whole plane
    if graph.onext(from) == from {
        let va = graph.dest(from) - origin;
        if classify(va.cross(&vd)) == Collinear && va.dot(&vd) > 0.0 {
            return Err(collinear_with(graph, from, origin, toward));
        }
        return Ok(from);
    }

    let fan_len = graph.ring_len(from);
    let mut a = from;
    for _ in 0..fan_len {
        let b = graph.onext(a);
        let va = graph.dest(a) - origin;
        let vb = graph.dest(b) - origin;

        let ab = classify(va.cross(&vb));
        let da = classify(va.cross(&vd));
        let db = classify(vb.cross(&vd));

        let accept = match (ab, da, db) {
            // convex wedge: inside means left of the edge, right of its next
            (CounterClockwise, CounterClockwise, Clockwise) => true,
            (CounterClockwise, Collinear, Clockwise) => {
                return Err(collinear_with(graph, a, origin, toward));
            }
            (CounterClockwise, _, _) => false,

            // reflex wedge: inside means left of the edge or right of its next
            (Clockwise, CounterClockwise, _) => true,
            (Clockwise, Clockwise, Clockwise) => true,
            (Clockwise, Clockwise, _) => false,
            (Clockwise, Collinear, CounterClockwise) => {
                return Err(collinear_with(graph, a, origin, toward));
            }
            // exactly opposite the edge, which is interior here
            (Clockwise, Collinear, Clockwise) => true,
            (Clockwise, Collinear, Collinear) => {
                return Err(TriangulationError::CoincidentEdges(origin));
            }

            // the pair is collinear: opposite spokes split the plane in two
            (Collinear, CounterClockwise, Clockwise) => true,
            (Collinear, Clockwise, CounterClockwise) => false,
            (Collinear, Collinear, _) => {
                if va.dot(&vd) > 0.0 {
                    return Err(collinear_with(graph, a, origin, toward));
                }
                false
            }
            // spokes pointing the same way leave the direction ambiguous
            (Collinear, _, _) => {
                return Err(TriangulationError::CoincidentEdges(origin));
            }
        };
        if accept {
            return Ok(a);
        }
        a = b;
    }
    Err(TriangulationError::WedgeNotFound(origin))
}

fn collinear_with(
    graph: &QuadEdges,
    edge: EdgeId,
    origin: Point2,
    toward: Point2,
) -> TriangulationError {
    TriangulationError::CollinearPoints {
        origin,
        along: graph.dest(edge),
        toward,
    }
}
