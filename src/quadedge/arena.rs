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

use crate::geometry::{Point2, Segment2};
use crate::kernel::predicates::orient2d;
use crate::quadedge::edge::EdgeId;

/// One quad-edge record: four directed edges sharing a slot. The `next`
/// links are the counter-clockwise origin rings of all four rotations;
/// origins are stored for the two primal rotations only.
#[derive(Debug, Clone)]
struct Quad {
    next: [EdgeId; 4],
    origin: [Option<Point2>; 2],
    removed: bool,
}

/// Arena of quad-edge records. Slots are reused through a free list and a
/// removed quad keeps a tombstone so stale handles are detectable in debug
/// builds.
#[derive(Debug, Clone, Default)]
pub struct QuadEdges {
    quads: Vec<Quad>,
    free: Vec<u32>,
    live: usize,
}

impl QuadEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live undirected edges.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn is_live(&self, e: EdgeId) -> bool {
        let slot = e.quad() as usize;
        slot < self.quads.len() && !self.quads[slot].removed
    }

    /// Creates a fresh, isolated edge with unset endpoints and returns its
    /// rotation-0 handle. The primal rings are singletons and the dual ring
    /// links the two face edges together, which encodes a detached edge in
    /// an otherwise empty plane.
    pub fn make_edge(&mut self) -> EdgeId {
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.quads.push(Quad {
                    next: [EdgeId::new(0, 0); 4],
                    origin: [None, None],
                    removed: false,
                });
                (self.quads.len() - 1) as u32
            }
        };
        let quad = &mut self.quads[slot as usize];
        quad.next = [
            EdgeId::new(slot, 0),
            EdgeId::new(slot, 3),
            EdgeId::new(slot, 2),
            EdgeId::new(slot, 1),
        ];
        quad.origin = [None, None];
        quad.removed = false;
        self.live += 1;
        EdgeId::new(slot, 0)
    }

    pub fn make_edge_with(&mut self, origin: Point2, dest: Point2) -> EdgeId {
        let e = self.make_edge();
        self.set_endpoints(e, origin, dest);
        e
    }

    /// Sets both endpoints of a primal edge.
    pub fn set_endpoints(&mut self, e: EdgeId, origin: Point2, dest: Point2) {
        self.set_org(e, origin);
        self.set_org(e.sym(), dest);
    }

    fn set_org(&mut self, e: EdgeId, p: Point2) {
        debug_assert!(e.is_primal(), "duals carry no vertex");
        let slot = (e.rot_index() >> 1) as usize;
        self.quads[e.quad() as usize].origin[slot] = Some(p);
    }

    pub fn try_org(&self, e: EdgeId) -> Option<Point2> {
        if !e.is_primal() {
            return None;
        }
        let slot = (e.rot_index() >> 1) as usize;
        self.quads[e.quad() as usize].origin[slot]
    }

    pub fn org(&self, e: EdgeId) -> Point2 {
        self.try_org(e).expect("edge origin not set")
    }

    pub fn dest(&self, e: EdgeId) -> Point2 {
        self.org(e.sym())
    }

    pub fn edge_segment(&self, e: EdgeId) -> Segment2 {
        Segment2::new(self.org(e), self.dest(e))
    }

    /// Next edge counter-clockwise around the shared origin.
    pub fn onext(&self, e: EdgeId) -> EdgeId {
        let quad = &self.quads[e.quad() as usize];
        debug_assert!(!quad.removed, "navigation through a removed edge");
        quad.next[e.rot_index() as usize]
    }

    /// Previous edge counter-clockwise (so, next clockwise) around the
    /// shared origin.
    pub fn oprev(&self, e: EdgeId) -> EdgeId {
        self.onext(e.rot()).rot()
    }

    /// Next edge counter-clockwise around the left face.
    pub fn lnext(&self, e: EdgeId) -> EdgeId {
        self.onext(e.inv_rot()).rot()
    }

    pub fn lprev(&self, e: EdgeId) -> EdgeId {
        self.onext(e).sym()
    }

    /// Next edge counter-clockwise around the right face.
    pub fn rnext(&self, e: EdgeId) -> EdgeId {
        self.onext(e.rot()).inv_rot()
    }

    pub fn rprev(&self, e: EdgeId) -> EdgeId {
        self.onext(e.sym())
    }

    /// Next edge counter-clockwise around the shared destination.
    pub fn dnext(&self, e: EdgeId) -> EdgeId {
        self.onext(e.sym()).sym()
    }

    pub fn dprev(&self, e: EdgeId) -> EdgeId {
        self.onext(e.inv_rot()).inv_rot()
    }

    fn set_next(&mut self, e: EdgeId, next: EdgeId) {
        self.quads[e.quad() as usize].next[e.rot_index() as usize] = next;
    }

    /// The fundamental topological edit. Exchanges the origin rings of `a`
    /// and `b` together with the matching dual rings, merging the rings when
    /// they are distinct and splitting them when they are the same. Splice
    /// is its own inverse.
    pub fn splice(&mut self, a: EdgeId, b: EdgeId) {
        let alpha = self.onext(a).rot();
        let beta = self.onext(b).rot();

        let a_next = self.onext(a);
        let b_next = self.onext(b);
        let alpha_next = self.onext(alpha);
        let beta_next = self.onext(beta);

        self.set_next(a, b_next);
        self.set_next(b, a_next);
        self.set_next(alpha, beta_next);
        self.set_next(beta, alpha_next);
    }

    /// Creates a new edge from `a.dest` to `b.org` and splices it into both
    /// rings. `a` and `b` must bound a common face for the result to stay
    /// planar.
    pub fn connect(&mut self, a: EdgeId, b: EdgeId) -> EdgeId {
        let origin = self.dest(a);
        let dest = self.org(b);
        let e = self.make_edge();
        self.set_endpoints(e, origin, dest);
        let a_lnext = self.lnext(a);
        self.splice(e, a_lnext);
        self.splice(e.sym(), b);
        e
    }

    /// Splices `e` out of both endpoint rings and frees its slot. Neighbor
    /// rings are left closed over the surviving edges.
    pub fn delete(&mut self, e: EdgeId) {
        let o = self.oprev(e);
        self.splice(e, o);
        let s = e.sym();
        let so = self.oprev(s);
        self.splice(s, so);

        let quad = &mut self.quads[e.quad() as usize];
        quad.removed = true;
        quad.origin = [None, None];
        self.free.push(e.quad());
        self.live -= 1;
    }

    /// Rotates `e` inside the quadrilateral formed by its two adjacent
    /// faces, replacing one diagonal with the other.
    pub fn swap(&mut self, e: EdgeId) {
        let a = self.oprev(e);
        let b = self.oprev(e.sym());

        self.splice(e, a);
        self.splice(e.sym(), b);
        let a_lnext = self.lnext(a);
        self.splice(e, a_lnext);
        let b_lnext = self.lnext(b);
        self.splice(e.sym(), b_lnext);

        let origin = self.dest(a);
        let dest = self.dest(b);
        self.set_endpoints(e, origin, dest);
    }

    /// Scans the counter-clockwise fan around `e`'s origin for an edge whose
    /// destination is `dest` (by rounded identity).
    pub fn find_onext_dest(&self, e: EdgeId, dest: Point2) -> Option<EdgeId> {
        let mut cur = e;
        loop {
            if self.dest(cur) == dest {
                return Some(cur);
            }
            cur = self.onext(cur);
            if cur == e {
                return None;
            }
        }
    }

    /// Number of edges in the counter-clockwise origin ring of `e`.
    pub fn ring_len(&self, e: EdgeId) -> usize {
        let mut n = 1;
        let mut cur = self.onext(e);
        while cur != e {
            n += 1;
            cur = self.onext(cur);
        }
        n
    }

    /// True when `p` lies strictly right of the directed edge.
    pub fn right_of(&self, p: Point2, e: EdgeId) -> bool {
        let org = self.org(e);
        let dest = self.dest(e);
        orient2d((p.x, p.y), (dest.x, dest.y), (org.x, org.y)) > 0.0
    }

    /// True when `p` lies on the closed segment of the edge, within
    /// tolerance.
    pub fn on_edge(&self, p: Point2, e: EdgeId) -> bool {
        self.edge_segment(e).contains_point(p)
    }

    /// Rotation-0 handles of every live quad.
    pub fn primal_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.quads
            .iter()
            .enumerate()
            .filter(|(_, quad)| !quad.removed)
            .map(|(slot, _)| EdgeId::new(slot as u32, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn fresh_edge_rings_are_canonical() {
        let mut qe = QuadEdges::new();
        let e = qe.make_edge();
        assert_eq!(qe.onext(e), e);
        assert_eq!(qe.onext(e.sym()), e.sym());
        // the dual ring links the two face edges
        assert_eq!(qe.onext(e.rot()), e.inv_rot());
        assert_eq!(qe.onext(e.inv_rot()), e.rot());
        assert_eq!(qe.len(), 1);
    }

    #[test]
    fn splice_merges_and_splits_origin_rings() {
        let mut qe = QuadEdges::new();
        let a = qe.make_edge_with(p(0.0, 0.0), p(1.0, 0.0));
        let b = qe.make_edge_with(p(0.0, 0.0), p(0.0, 1.0));

        qe.splice(a, b);
        assert_eq!(qe.onext(a), b);
        assert_eq!(qe.onext(b), a);
        assert_eq!(qe.ring_len(a), 2);

        // splice is its own inverse
        qe.splice(a, b);
        assert_eq!(qe.onext(a), a);
        assert_eq!(qe.onext(b), b);
    }

    #[test]
    fn connect_closes_a_triangle() {
        let mut qe = QuadEdges::new();
        let ab = qe.make_edge_with(p(0.0, 0.0), p(10.0, 0.0));
        let bc = qe.make_edge_with(p(10.0, 0.0), p(5.0, 8.0));
        qe.splice(ab.sym(), bc);
        let ca = qe.connect(bc, ab);

        assert_eq!(qe.org(ca), p(5.0, 8.0));
        assert_eq!(qe.dest(ca), p(0.0, 0.0));
        // left face of ab cycles through all three edges
        assert_eq!(qe.lnext(ab), bc);
        assert_eq!(qe.lnext(bc), ca);
        assert_eq!(qe.lnext(ca), ab);
    }

    #[test]
    fn derived_navigation_walks_faces_and_destinations() {
        let mut qe = QuadEdges::new();
        let ab = qe.make_edge_with(p(0.0, 0.0), p(10.0, 0.0));
        let bc = qe.make_edge_with(p(10.0, 0.0), p(5.0, 8.0));
        qe.splice(ab.sym(), bc);
        let ca = qe.connect(bc, ab);

        // right face (the exterior) cycles through all three edges
        assert_eq!(qe.rprev(ab), bc);
        assert_eq!(qe.rprev(bc), ca);
        assert_eq!(qe.rnext(qe.rprev(ab)), ab);
        // destination ring of a-b holds both edges ending at b
        assert_eq!(qe.dnext(ab), bc.sym());
        assert_eq!(qe.dprev(bc.sym()), ab);
        assert_eq!(qe.lprev(qe.lnext(ab)), ab);
    }

    #[test]
    fn delete_unlinks_the_neighbor_rings() {
        let mut qe = QuadEdges::new();
        let a = qe.make_edge_with(p(0.0, 0.0), p(1.0, 0.0));
        let b = qe.make_edge_with(p(0.0, 0.0), p(0.0, 1.0));
        qe.splice(a, b);

        qe.delete(b);
        assert_eq!(qe.onext(a), a);
        assert_eq!(qe.len(), 1);
        assert!(!qe.is_live(b));
    }

    #[test]
    fn slots_are_reused_after_delete() {
        let mut qe = QuadEdges::new();
        let a = qe.make_edge();
        qe.delete(a);
        let b = qe.make_edge();
        assert_eq!(a.quad(), b.quad());
        assert!(qe.is_live(b));
        assert_eq!(qe.len(), 1);
    }

    #[test]
    fn swap_replaces_one_diagonal_with_the_other() {
        // quadrilateral a-d-b-c (ccw) split by the diagonal d-c
        let mut qe = QuadEdges::new();
        let a = p(0.0, 0.0);
        let d = p(5.0, -8.0);
        let b = p(10.0, 0.0);
        let c = p(5.0, 8.0);

        let e1 = qe.make_edge_with(a, d);
        let e2 = qe.make_edge_with(d, b);
        let e3 = qe.make_edge_with(b, c);
        let e4 = qe.make_edge_with(c, a);
        qe.splice(e1.sym(), e2);
        qe.splice(e2.sym(), e3);
        qe.splice(e3.sym(), e4);
        qe.splice(e4.sym(), e1);

        let diag = qe.connect(e1, e4);
        assert_eq!(qe.org(diag), d);
        assert_eq!(qe.dest(diag), c);

        qe.swap(diag);
        assert_eq!(qe.org(diag), b);
        assert_eq!(qe.dest(diag), a);
        // both faces of the swapped diagonal are triangles again
        assert_eq!(qe.lnext(e1), e2);
        assert_eq!(qe.lnext(e2), diag);
        assert_eq!(qe.lnext(diag), e1);
    }

    #[test]
    fn find_onext_dest_scans_the_whole_fan() {
        let mut qe = QuadEdges::new();
        let a = qe.make_edge_with(p(0.0, 0.0), p(1.0, 0.0));
        let b = qe.make_edge_with(p(0.0, 0.0), p(0.0, 1.0));
        let c = qe.make_edge_with(p(0.0, 0.0), p(-1.0, 0.0));
        qe.splice(a, b);
        qe.splice(b, c);

        assert_eq!(qe.find_onext_dest(a, p(-1.0, 0.0)), Some(c));
        assert_eq!(qe.find_onext_dest(a, p(0.0, 1.0)), Some(b));
        assert!(qe.find_onext_dest(a, p(5.0, 5.0)).is_none());
    }

    #[test]
    fn right_of_and_on_edge() {
        let mut qe = QuadEdges::new();
        let e = qe.make_edge_with(p(0.0, 0.0), p(10.0, 0.0));
        assert!(qe.right_of(p(5.0, -1.0), e));
        assert!(!qe.right_of(p(5.0, 1.0), e));
        assert!(!qe.right_of(p(5.0, 0.0), e));
        assert!(qe.on_edge(p(5.0, 0.0), e));
        assert!(!qe.on_edge(p(5.0, 1.0), e));
    }
}
