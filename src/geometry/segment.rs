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

use std::fmt;

use crate::geometry::point::{Point2, TOLERANCE};
use crate::kernel::predicates::{Orientation, classify, orient2d};

/// A line segment between two points.
#[derive(Clone, Copy, PartialEq)]
pub struct Segment2 {
    pub a: Point2,
    pub b: Point2,
}

impl Segment2 {
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    pub fn length(&self) -> f64 {
        self.a.distance_to(&self.b)
    }

    /// Both endpoints land on the same rounding grid cell.
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    fn side(&self, p: Point2) -> Orientation {
        classify(orient2d(
            (self.a.x, self.a.y),
            (self.b.x, self.b.y),
            (p.x, p.y),
        ))
    }

    /// True when `p` lies on the segment, endpoints included.
    pub fn contains_point(&self, p: Point2) -> bool {
        if self.side(p) != Orientation::Collinear {
            return false;
        }
        let (lo_x, hi_x) = if self.a.x < self.b.x {
            (self.a.x, self.b.x)
        } else {
            (self.b.x, self.a.x)
        };
        let (lo_y, hi_y) = if self.a.y < self.b.y {
            (self.a.y, self.b.y)
        } else {
            (self.b.y, self.a.y)
        };
        p.x >= lo_x - TOLERANCE
            && p.x <= hi_x + TOLERANCE
            && p.y >= lo_y - TOLERANCE
            && p.y <= hi_y + TOLERANCE
    }

    /// Proper crossing test: the interiors of the two segments intersect in
    /// exactly one point. Touching at an endpoint does not count.
    pub fn crosses(&self, other: &Segment2) -> bool {
        use Orientation::*;
        let o1 = self.side(other.a);
        let o2 = self.side(other.b);
        let o3 = other.side(self.a);
        let o4 = other.side(self.b);
        matches!(
            (o1, o2),
            (CounterClockwise, Clockwise) | (Clockwise, CounterClockwise)
        ) && matches!(
            (o3, o4),
            (CounterClockwise, Clockwise) | (Clockwise, CounterClockwise)
        )
    }

    /// Collinear segments sharing more than a single point.
    pub fn overlaps(&self, other: &Segment2) -> bool {
        if self.side(other.a) != Orientation::Collinear
            || self.side(other.b) != Orientation::Collinear
        {
            return false;
        }
        // project on the dominant axis of self
        let d = self.b - self.a;
        let pick = |p: Point2| {
            if d.x.abs() >= d.y.abs() { p.x } else { p.y }
        };
        let (s0, s1) = ordered(pick(self.a), pick(self.b));
        let (t0, t1) = ordered(pick(other.a), pick(other.b));
        s0.max(t0) + TOLERANCE < s1.min(t1)
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

impl fmt::Debug for Segment2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} -> {:?}", self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment2 {
        Segment2::new(Point2::new(ax, ay), Point2::new(bx, by))
    }

    #[test]
    fn crossing_segments() {
        assert!(seg(0.0, 0.0, 10.0, 10.0).crosses(&seg(0.0, 10.0, 10.0, 0.0)));
    }

    #[test]
    fn shared_endpoint_is_not_a_crossing() {
        assert!(!seg(0.0, 0.0, 10.0, 0.0).crosses(&seg(10.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn disjoint_segments_do_not_cross() {
        assert!(!seg(0.0, 0.0, 1.0, 0.0).crosses(&seg(5.0, 5.0, 6.0, 5.0)));
    }

    #[test]
    fn endpoint_touch_on_interior_is_not_proper() {
        // second segment ends on the first one's interior
        assert!(!seg(0.0, 0.0, 10.0, 0.0).crosses(&seg(5.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn contains_point_with_tolerance() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        assert!(s.contains_point(Point2::new(5.0, 0.0)));
        assert!(s.contains_point(Point2::new(0.0, 0.0)));
        assert!(!s.contains_point(Point2::new(11.0, 0.0)));
        assert!(!s.contains_point(Point2::new(5.0, 0.1)));
    }

    #[test]
    fn collinear_overlap() {
        assert!(seg(0.0, 0.0, 10.0, 0.0).overlaps(&seg(5.0, 0.0, 15.0, 0.0)));
        // sharing only an endpoint is not an overlap
        assert!(!seg(0.0, 0.0, 10.0, 0.0).overlaps(&seg(10.0, 0.0, 20.0, 0.0)));
        assert!(!seg(0.0, 0.0, 10.0, 0.0).overlaps(&seg(0.0, 1.0, 10.0, 1.0)));
    }
}
